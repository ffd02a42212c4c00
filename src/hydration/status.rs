//! Hydration Status
//!
//! Discrete classification of a simulated moisture percentage.

use serde::{Deserialize, Serialize};

/// Below this moisture the plant is critical.
pub const CRITICAL_BELOW: u8 = 30;

/// Below this moisture (and at or above CRITICAL_BELOW) the plant is thirsty.
pub const THIRSTY_BELOW: u8 = 60;

/// How the plant is doing, derived only from its moisture percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationStatus {
    /// Moisture >= 60%
    Happy,
    /// 30% <= moisture < 60%
    Thirsty,
    /// Moisture < 30%
    Critical,
}

impl HydrationStatus {
    /// Classify a moisture percentage.
    pub fn from_moisture(moisture_percent: u8) -> Self {
        if moisture_percent < CRITICAL_BELOW {
            HydrationStatus::Critical
        } else if moisture_percent < THIRSTY_BELOW {
            HydrationStatus::Thirsty
        } else {
            HydrationStatus::Happy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HydrationStatus::Happy => "happy",
            HydrationStatus::Thirsty => "thirsty",
            HydrationStatus::Critical => "critical",
        }
    }

    pub fn needs_water(&self) -> bool {
        !matches!(self, HydrationStatus::Happy)
    }
}

impl std::fmt::Display for HydrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
