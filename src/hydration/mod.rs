//! Hydration Engine
//!
//! Estimates how much water is left in a pot from the time since the last
//! watering and the current ambient temperature. There is no sensor behind
//! this: moisture is simulated on every read and never stored.
//!
//! ## Architecture
//! - `status.rs` - HydrationStatus classification (Happy / Thirsty / Critical)
//! - `timestamp.rs` - Lenient parsing of last-watered timestamps from the store
//! - `engine.rs` - Decay model producing a HydrationResult

pub mod status;
pub mod timestamp;
pub mod engine;

// Re-export public API
pub use status::HydrationStatus;
pub use timestamp::{parse_last_watered, hours_since};
pub use engine::{
    HydrationResult,
    simulate,
    simulate_at,
    from_hours,
    DECAY_RATE_PER_HOUR,
    HEAT_THRESHOLD_C,
    HEAT_MULTIPLIER,
};
