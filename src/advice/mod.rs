//! Advice Resolution
//!
//! Produces the short care tip shown next to each plant. A generative
//! provider is tried first (when configured and when the call policy allows),
//! with local text as the fallback for every failure.
//!
//! ## Architecture
//! - `request.rs` - AdviceRequest input, AdviceResult/AdviceSource output
//! - `prompt.rs` - Persona, risk framing and prompt templates
//! - `policy.rs` - Call policy and resolver configuration
//! - `fallback.rs` - Heuristic and random-quote local strategies
//! - `provider.rs` - Provider trait, error taxonomy, OpenAI-compatible client
//! - `resolver.rs` - Orchestration: policy check, deadline, fallback

pub mod request;
pub mod prompt;
pub mod policy;
pub mod fallback;
pub mod provider;
pub mod resolver;

// Re-export public API
pub use request::{AdviceRequest, AdviceResult, AdviceSource};
pub use prompt::{Persona, RiskFraming, PromptStyle, Prompt, DEFAULT_MAX_WORDS};
pub use policy::{AdvicePolicy, CallPolicy, DEFAULT_CALL_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT};
pub use fallback::{
    FallbackStrategy,
    HeuristicFallback,
    RandomQuoteFallback,
    CHAT_FALLBACK,
    QUOTES,
};
pub use provider::{AdviceProvider, OpenAiProvider, OpenAiSettings, ProviderError};
pub use resolver::AdviceResolver;
