//! Prompt Construction
//!
//! Builds the system + user messages sent to the generative provider.
//! Persona and risk wording are configuration; the plant facts and the
//! output-shape instruction (one sentence, word ceiling) are always present.

use serde::{Deserialize, Serialize};

use super::request::AdviceRequest;

/// Default ceiling on the generated tip length
pub const DEFAULT_MAX_WORDS: u32 = 35;

/// Voice the provider is asked to speak in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Concise plant care coach (friendly, direct)
    #[default]
    Coach,
    /// Knowledgeable botanist (precise, calm)
    Botanist,
    /// Witty robotic assistant (playful, still useful)
    WittyRobot,
}

impl Persona {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "coach" => Some(Persona::Coach),
            "botanist" => Some(Persona::Botanist),
            "witty_robot" | "witty-robot" | "robot" => Some(Persona::WittyRobot),
            _ => None,
        }
    }

    pub fn system_message(&self) -> &'static str {
        match self {
            Persona::Coach => "You are a concise plant care coach.",
            Persona::Botanist => {
                "You are an experienced botanist who gives precise, practical houseplant care advice."
            }
            Persona::WittyRobot => {
                "You are a witty robotic plant assistant. You crack a small joke but always give a real, usable care tip."
            }
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            Persona::Coach => "friendly, direct",
            Persona::Botanist => "precise, calm, expert",
            Persona::WittyRobot => "witty, playful, robotic",
        }
    }
}

/// Which weather risks the provider is asked to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFraming {
    #[default]
    HeatAndCold,
    Heat,
    Cold,
    Off,
}

impl RiskFraming {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "heat_and_cold" | "both" => Some(RiskFraming::HeatAndCold),
            "heat" => Some(RiskFraming::Heat),
            "cold" => Some(RiskFraming::Cold),
            "off" | "none" => Some(RiskFraming::Off),
            _ => None,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            RiskFraming::HeatAndCold => {
                "If heat risk, mention shade/evaporation. If cold risk, mention insulation. "
            }
            RiskFraming::Heat => "If heat risk, mention shade/evaporation. ",
            RiskFraming::Cold => "If cold risk, mention insulation. ",
            RiskFraming::Off => "",
        }
    }
}

/// Prompt configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStyle {
    pub persona: Persona,
    pub risk_framing: RiskFraming,
    pub max_words: u32,
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self {
            persona: Persona::default(),
            risk_framing: RiskFraming::default(),
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

/// A fully built prompt, ready for any provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl PromptStyle {
    /// Prompt for per-plant advice.
    pub fn plant_prompt(&self, request: &AdviceRequest) -> Prompt {
        let user = format!(
            "Plant: {}. City: {}. Temp: {:.1}°C. Soil moisture: {}%. {}",
            display_or(&request.species, "unknown plant"),
            display_or(&request.location, "unknown location"),
            request.temperature_c,
            request.moisture_percent,
            self.shape_instruction("Give"),
        );

        Prompt {
            system: self.persona.system_message().to_string(),
            user,
        }
    }

    /// Prompt for a free-text chat question.
    pub fn chat_prompt(&self, question: &str, location: &str) -> Prompt {
        let user = format!(
            "City: {}. Question: {}. {}",
            display_or(location, "unknown location"),
            question.trim(),
            self.shape_instruction("Respond with"),
        );

        Prompt {
            system: self.persona.system_message().to_string(),
            user,
        }
    }

    fn shape_instruction(&self, verb: &str) -> String {
        format!(
            "{} ONE actionable, specific tip in a single sentence (max {} words). {}Tone: {}. No disclaimers.",
            verb,
            self.max_words,
            self.risk_framing.instruction(),
            self.persona.tone(),
        )
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
