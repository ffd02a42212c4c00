//! Advice Policy
//!
//! Deployment switches for the resolver: when to call the provider, how long
//! to wait, how to phrase the prompt and which local fallback to use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::fallback::FallbackStrategy;
use super::prompt::PromptStyle;

/// Default moisture ceiling for the conditional policy
pub const DEFAULT_CALL_THRESHOLD: u8 = 60;

/// Default hard deadline for one provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(4);

/// When the generative provider is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CallPolicy {
    /// Every plant gets advice, generated or local
    #[default]
    Always,
    /// Only plants at or below `threshold` moisture get advice at all;
    /// the rest get none and no call is made
    Conditional { threshold: u8 },
}

impl CallPolicy {
    /// Whether a plant at this moisture should receive advice.
    pub fn wants_advice(&self, moisture_percent: u8) -> bool {
        match self {
            CallPolicy::Always => true,
            CallPolicy::Conditional { threshold } => moisture_percent <= *threshold,
        }
    }
}

/// Complete resolver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvicePolicy {
    pub call: CallPolicy,
    pub fallback: FallbackStrategy,
    pub prompt: PromptStyle,
    pub timeout: Duration,
}

impl Default for AdvicePolicy {
    fn default() -> Self {
        Self {
            call: CallPolicy::default(),
            fallback: FallbackStrategy::default(),
            prompt: PromptStyle::default(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}
