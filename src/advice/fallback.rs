//! Local Fallback Advice
//!
//! Offline text used whenever the generative provider is missing or fails.
//! Two strategies exist for different deployment flavours:
//! - `HeuristicFallback` composes care tips from temperature, moisture and
//!   species keywords (table-driven, deterministic)
//! - `RandomQuoteFallback` picks one pre-written line from a fixed pool and
//!   ignores the plant entirely ("personality assistant" flavour)

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::request::AdviceRequest;

/// Fixed reply for the chat entry point when no answer can be generated
pub const CHAT_FALLBACK: &str =
    "Ask me something specific about watering, light, or protecting your plant from heat or cold.";

// ============================================================================
// Strategy Selection
// ============================================================================

/// Which local strategy to use when the provider can't answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    #[default]
    Heuristic,
    RandomQuote,
}

impl FallbackStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" => Some(FallbackStrategy::Heuristic),
            "random_quote" | "random-quote" | "quotes" => Some(FallbackStrategy::RandomQuote),
            _ => None,
        }
    }

    /// Produce fallback text for a plant. Always non-empty.
    pub fn advise(&self, request: &AdviceRequest) -> String {
        match self {
            FallbackStrategy::Heuristic => HeuristicFallback.advise(request),
            FallbackStrategy::RandomQuote => RandomQuoteFallback.advise(),
        }
    }
}

// ============================================================================
// Heuristic Strategy
// ============================================================================

/// At or above this temperature the heat tip is used
pub const HOT_AT_C: f64 = 32.0;

/// At or below this temperature the cold tip is used
pub const COLD_AT_C: f64 = 10.0;

/// Below this moisture the substrate counts as very dry
pub const DRY_BELOW: u8 = 30;

/// Below this moisture the substrate is drying out
pub const DRYING_BELOW: u8 = 60;

/// Deterministic tips keyed off temperature band, moisture band and species
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFallback;

impl HeuristicFallback {
    pub fn advise(&self, request: &AdviceRequest) -> String {
        [
            temperature_tip(request.temperature_c),
            moisture_tip(request.moisture_percent),
            species_tip(&request.species),
        ]
        .join(" ")
    }
}

fn temperature_tip(temperature_c: f64) -> &'static str {
    if temperature_c >= HOT_AT_C {
        "It's very hot: give partial shade and water early in the morning or at dusk."
    } else if temperature_c <= COLD_AT_C {
        "It's cold: shelter from wind, water less, and find a warmer spot."
    } else {
        "Moderate temperature: keep a regular watering routine and bright indirect light."
    }
}

fn moisture_tip(moisture_percent: u8) -> &'static str {
    if moisture_percent < DRY_BELOW {
        "The soil is very dry: water today and check the drainage."
    } else if moisture_percent < DRYING_BELOW {
        "Water soon; the soil is drying out."
    } else {
        "Moisture looks right: avoid waterlogging."
    }
}

fn species_tip(species: &str) -> &'static str {
    let s = species.to_lowercase();

    if mentions(&s, &["cactus", "succulent", "suculenta"]) {
        "For cacti and succulents: water deeply but rarely, and give plenty of light."
    } else if mentions(&s, &["orchid", "orquídea", "orquidea"]) {
        "Orchids like light watering, good airflow and filtered light."
    } else if mentions(&s, &["fern", "helecho"]) {
        "Ferns want consistently damp soil and high humidity."
    } else {
        "Check the leaves: yellow usually means too much water; dry and crispy means too little water or light."
    }
}

fn mentions(species: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| species.contains(k))
}

// ============================================================================
// Random Quote Strategy
// ============================================================================

/// Pre-written lines for the personality-assistant flavour
pub const QUOTES: &[&str] = &[
    "Beep boop: hydration levels are a plant's love language.",
    "My sensors suggest a glass of water for your green friend.",
    "Sunlight, water, patience. Repeat until leafy.",
    "A watered plant is a happy plant. This is science. Probably.",
    "Remember: roots can't reach the tap by themselves.",
    "Leaves drooping? That's plant for 'a drink, please'.",
    "Talk to your plant today. Then water it. Mostly water it.",
    "Too much love drowns roots. Let the topsoil dry between drinks.",
    "Rotate the pot a quarter turn; your plant will stop leaning.",
    "Dust on the leaves blocks light. A damp cloth works wonders.",
    "Computing optimal care... result: check the soil with a finger.",
    "Even robots know: drainage holes save lives.",
];

/// Uniformly random line from QUOTES, independent of the plant
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomQuoteFallback;

impl RandomQuoteFallback {
    pub fn advise(&self) -> String {
        self.advise_with(&mut rand::thread_rng())
    }

    pub fn advise_with<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> String {
        QUOTES
            .choose(rng)
            .copied()
            .unwrap_or(QUOTES[0])
            .to_string()
    }
}
