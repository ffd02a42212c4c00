//! Advice input and output types

use serde::{Deserialize, Serialize};

/// Everything the resolver knows about one plant when asked for advice
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    /// Free-text species as typed by the user; never validated
    pub species: String,

    /// Current ambient temperature (°C), already defaulted by the caller
    pub temperature_c: f64,

    /// Simulated moisture from the hydration engine
    pub moisture_percent: u8,

    /// City or place name, used only for prompt text
    pub location: String,
}

impl AdviceRequest {
    pub fn new(
        species: impl Into<String>,
        temperature_c: f64,
        moisture_percent: u8,
        location: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            temperature_c,
            moisture_percent,
            location: location.into(),
        }
    }
}

/// Where a piece of advice came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    /// Text produced by the generative provider
    Generated,
    /// Provider was missing or failed; text comes from a local strategy
    LocalFallback,
}

/// Resolved advice text plus its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub text: String,
    pub source: AdviceSource,
}

impl AdviceResult {
    pub fn generated(text: impl Into<String>) -> Self {
        Self { text: text.into(), source: AdviceSource::Generated }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self { text: text.into(), source: AdviceSource::LocalFallback }
    }

    pub fn is_generated(&self) -> bool {
        self.source == AdviceSource::Generated
    }
}
