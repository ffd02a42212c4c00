//! Moisture Decay Model
//!
//! Soil moisture starts at 100% on watering and drops linearly with time.
//! Hot weather speeds evaporation up by a fixed factor once the temperature
//! is strictly above 30°C. The multiplier is a step, not a curve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::HydrationStatus;
use super::timestamp::hours_since;

/// Moisture points lost per hour at baseline temperature
pub const DECAY_RATE_PER_HOUR: f64 = 5.0;

/// Temperatures strictly above this use HEAT_MULTIPLIER
pub const HEAT_THRESHOLD_C: f64 = 30.0;

/// Evaporation factor applied in hot weather
pub const HEAT_MULTIPLIER: f64 = 2.5;

/// Simulated hydration for one plant at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationResult {
    /// Simulated soil moisture, 0-100
    pub moisture_percent: u8,

    /// Classification of moisture_percent
    pub status: HydrationStatus,
}

/// Simulate hydration as of now.
pub fn simulate(last_watered: Option<&str>, ambient_temperature_c: f64) -> HydrationResult {
    simulate_at(last_watered, ambient_temperature_c, Utc::now())
}

/// Simulate hydration against an explicit clock.
pub fn simulate_at(
    last_watered: Option<&str>,
    ambient_temperature_c: f64,
    now: DateTime<Utc>,
) -> HydrationResult {
    from_hours(hours_since(last_watered, now), ambient_temperature_c)
}

/// Core decay model over elapsed hours.
///
/// Negative or NaN elapsed time is treated as zero. The percentage is
/// truncated, not rounded: 87.5% reports as 87.
pub fn from_hours(hours_elapsed: f64, ambient_temperature_c: f64) -> HydrationResult {
    let hours = if hours_elapsed.is_nan() { 0.0 } else { hours_elapsed.max(0.0) };

    let multiplier = if ambient_temperature_c > HEAT_THRESHOLD_C {
        HEAT_MULTIPLIER
    } else {
        1.0
    };

    let moisture_loss = hours * DECAY_RATE_PER_HOUR * multiplier;
    let moisture = (100.0 - moisture_loss).clamp(0.0, 100.0);
    let moisture_percent = moisture.trunc() as u8;

    HydrationResult {
        moisture_percent,
        status: HydrationStatus::from_moisture(moisture_percent),
    }
}
