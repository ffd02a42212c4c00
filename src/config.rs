//! Service Configuration
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the server binary first). Missing variables take defaults; present but
//! malformed ones are rejected so a typo never silently changes the policy.

use std::time::Duration;

use crate::advice::{
    AdvicePolicy, CallPolicy, FallbackStrategy, OpenAiSettings, Persona, PromptStyle,
    RiskFraming, DEFAULT_CALL_THRESHOLD, DEFAULT_MAX_WORDS,
};
use crate::advice::provider::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::garden::DEFAULT_MAX_CONCURRENT;
use crate::weather::{OpenWeatherSettings, DEFAULT_OPENWEATHER_BASE_URL};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CITY: &str = "Managua";
pub const DEFAULT_TEMPERATURE_C: f64 = 35.0;

/// Accepted range for provider timeouts, in seconds
const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub default_city: String,
    pub default_temperature_c: f64,
    pub max_concurrent_advice: usize,
    pub advice: AdvicePolicy,
    pub openai: OpenAiSettings,
    pub weather: OpenWeatherSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_city: DEFAULT_CITY.to_string(),
            default_temperature_c: DEFAULT_TEMPERATURE_C,
            max_concurrent_advice: DEFAULT_MAX_CONCURRENT,
            advice: AdvicePolicy::default(),
            openai: OpenAiSettings::default(),
            weather: OpenWeatherSettings::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values behave like unset ones
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse_num(&get, "PORT", "a port number", DEFAULT_PORT)?;
        let default_city = get("DEFAULT_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string());
        let default_temperature_c =
            parse_num(&get, "DEFAULT_TEMPERATURE_C", "a temperature in °C", DEFAULT_TEMPERATURE_C)?;
        if !default_temperature_c.is_finite() {
            return Err(invalid("DEFAULT_TEMPERATURE_C", default_temperature_c.to_string(), "a finite temperature"));
        }
        let max_concurrent_advice =
            parse_num(&get, "MAX_CONCURRENT_ADVICE", "a positive integer", DEFAULT_MAX_CONCURRENT)?;
        if max_concurrent_advice == 0 {
            return Err(invalid("MAX_CONCURRENT_ADVICE", "0".to_string(), "a positive integer"));
        }

        // Advice policy
        let threshold = parse_num(&get, "ADVICE_THRESHOLD", "0-100", DEFAULT_CALL_THRESHOLD)?;
        if threshold > 100 {
            return Err(invalid("ADVICE_THRESHOLD", threshold.to_string(), "0-100"));
        }
        let call = match get("ADVICE_CALL_POLICY").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("always") => CallPolicy::Always,
            Some("conditional") => CallPolicy::Conditional { threshold },
            Some(other) => return Err(invalid("ADVICE_CALL_POLICY", other.to_string(), "always|conditional")),
        };
        let fallback = parse_named(&get, "ADVICE_FALLBACK", "heuristic|random_quote", FallbackStrategy::parse)?
            .unwrap_or_default();
        let persona = parse_named(&get, "ADVICE_PERSONA", "coach|botanist|witty_robot", Persona::parse)?
            .unwrap_or_default();
        let risk_framing = parse_named(&get, "ADVICE_RISK_FRAMING", "heat_and_cold|heat|cold|off", RiskFraming::parse)?
            .unwrap_or_default();
        let max_words = parse_num(&get, "ADVICE_MAX_WORDS", "a positive integer", DEFAULT_MAX_WORDS)?;
        if max_words == 0 {
            return Err(invalid("ADVICE_MAX_WORDS", "0".to_string(), "a positive integer"));
        }
        let advice_timeout = parse_timeout(&get, "ADVICE_TIMEOUT_SECS", 4)?;

        let advice = AdvicePolicy {
            call,
            fallback,
            prompt: PromptStyle { persona, risk_framing, max_words },
            timeout: advice_timeout,
        };

        let openai = OpenAiSettings {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            timeout: advice_timeout,
            ..OpenAiSettings::default()
        };

        let weather = OpenWeatherSettings {
            api_key: get("OPENWEATHER_API_KEY"),
            base_url: get("OPENWEATHER_BASE_URL").unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            timeout: parse_timeout(&get, "WEATHER_TIMEOUT_SECS", 3)?,
            ..OpenWeatherSettings::default()
        };

        Ok(Self {
            port,
            default_city,
            default_temperature_c,
            max_concurrent_advice,
            advice,
            openai,
            weather,
        })
    }

    pub fn openai_configured(&self) -> bool {
        self.openai.api_key.is_some()
    }
}

fn invalid(var: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::Invalid { var, value, expected }
}

fn parse_num<T, G>(get: &G, var: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| invalid(var, raw, expected)),
    }
}

fn parse_named<T, G>(
    get: &G,
    var: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(None),
        Some(raw) => parse(&raw).map(Some).ok_or_else(|| invalid(var, raw, expected)),
    }
}

fn parse_timeout<G>(get: &G, var: &'static str, default_secs: u64) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let secs = parse_num(get, var, "seconds between 1 and 30", default_secs)?;
    if !TIMEOUT_RANGE_SECS.contains(&secs) {
        return Err(invalid(var, secs.to_string(), "seconds between 1 and 30"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.default_city, "Managua");
        assert_eq!(cfg.default_temperature_c, 35.0);
        assert_eq!(cfg.max_concurrent_advice, 4);
        assert_eq!(cfg.advice.call, CallPolicy::Always);
        assert_eq!(cfg.advice.fallback, FallbackStrategy::Heuristic);
        assert_eq!(cfg.advice.prompt, PromptStyle::default());
        assert_eq!(cfg.advice.timeout, Duration::from_secs(4));
        assert_eq!(cfg.openai.model, "gpt-4o-mini");
        assert!(!cfg.openai_configured());
        assert_eq!(cfg.weather.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_robot_flavour() {
        let cfg = config(&[
            ("ADVICE_CALL_POLICY", "Conditional"),
            ("ADVICE_THRESHOLD", "45"),
            ("ADVICE_FALLBACK", "random_quote"),
            ("ADVICE_PERSONA", "witty_robot"),
            ("ADVICE_RISK_FRAMING", "heat"),
            ("ADVICE_MAX_WORDS", "20"),
            ("ADVICE_TIMEOUT_SECS", "3"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(cfg.advice.call, CallPolicy::Conditional { threshold: 45 });
        assert_eq!(cfg.advice.fallback, FallbackStrategy::RandomQuote);
        assert_eq!(cfg.advice.prompt.persona, Persona::WittyRobot);
        assert_eq!(cfg.advice.prompt.risk_framing, RiskFraming::Heat);
        assert_eq!(cfg.advice.prompt.max_words, 20);
        assert_eq!(cfg.openai.timeout, Duration::from_secs(3));
        assert!(cfg.openai_configured());
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let cfg = config(&[("OPENAI_API_KEY", "  "), ("ADVICE_PERSONA", "")]).unwrap();
        assert!(!cfg.openai_configured());
        assert_eq!(cfg.advice.prompt.persona, Persona::Coach);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            config(&[("ADVICE_CALL_POLICY", "sometimes")]).unwrap_err(),
            ConfigError::Invalid {
                var: "ADVICE_CALL_POLICY",
                value: "sometimes".to_string(),
                expected: "always|conditional",
            }
        );
        assert!(config(&[("ADVICE_THRESHOLD", "101")]).is_err());
        assert!(config(&[("ADVICE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("ADVICE_TIMEOUT_SECS", "60")]).is_err());
        assert!(config(&[("ADVICE_FALLBACK", "oracle")]).is_err());
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("MAX_CONCURRENT_ADVICE", "0")]).is_err());
        assert!(config(&[("DEFAULT_TEMPERATURE_C", "NaN")]).is_err());
    }
}
