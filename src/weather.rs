//! Weather Lookup
//!
//! Current temperature for a city from OpenWeather. Any failure (no key,
//! timeout, bad status, odd body) yields `None`; callers substitute their
//! default temperature so the hydration engine always gets a number.
//! Readings are cached per city for a few minutes.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// What we keep from a weather response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_percent: Option<f64>,
    pub description: Option<String>,
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, city: &str) -> Option<WeatherReading>;
}

/// Temperature to feed the engine: the reading if present, else the default.
pub fn temperature_or_default(reading: Option<&WeatherReading>, default_c: f64) -> f64 {
    reading
        .map(|r| r.temperature_c)
        .filter(|t| t.is_finite())
        .unwrap_or(default_c)
}

// ============================================================================
// OpenWeather client
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenWeatherSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for OpenWeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            timeout: Duration::from_secs(3),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

pub struct OpenWeatherClient {
    settings: OpenWeatherSettings,
    http_client: reqwest::Client,
    cache: Cache<String, WeatherReading>,
}

#[derive(Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: Option<f64>,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(settings: OpenWeatherSettings) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(settings.cache_ttl)
            .build();

        Ok(Self { settings, http_client, cache })
    }

    async fn fetch(&self, api_key: &str, city: &str) -> Result<WeatherReading, reqwest::Error> {
        let url = format!("{}/weather", self.settings.base_url.trim_end_matches('/'));
        let body: OwmResponse = self.http_client
            .get(url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric"), ("lang", "en")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(WeatherReading {
            temperature_c: body.main.temp,
            humidity_percent: body.main.humidity,
            description: body.weather.into_iter().next().and_then(|w| w.description),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &str) -> Option<WeatherReading> {
        let api_key = self.settings.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let key = city.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("Weather cache hit for {}", key);
            return Some(cached);
        }

        match self.fetch(api_key, city.trim()).await {
            Ok(reading) => {
                self.cache.insert(key, reading.clone()).await;
                Some(reading)
            }
            Err(e) => {
                tracing::warn!("Weather lookup for {} failed: {}", city, e);
                None
            }
        }
    }
}
