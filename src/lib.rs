//! Lifeplants
//!
//! Potted-plant tracking with read-time hydration simulation and care advice.
//!
//! - `hydration/`: Moisture decay model and Happy/Thirsty/Critical status
//! - `advice/`: Advice resolution (generative provider + local fallbacks)
//! - `garden`: Batch evaluation of every plant in the store
//! - `store`, `weather`: Collaborators feeding the evaluation
//! - `config`: Environment-driven configuration
//! - `api_server`: Axum JSON API (feature `api`)

pub mod hydration;
pub mod advice;
pub mod garden;
pub mod store;
pub mod weather;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use hydration::{simulate, HydrationResult, HydrationStatus};
pub use advice::{AdviceRequest, AdviceResolver, AdviceResult, AdviceSource};
pub use config::Config;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
