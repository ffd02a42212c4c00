//! Garden Evaluation
//!
//! Runs the hydration engine and the advice resolver for every plant in the
//! store. Plants are independent, so they are evaluated concurrently with a
//! cap on in-flight evaluations; the cap bounds simultaneous provider calls.
//! Output order matches input order.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::advice::{AdviceRequest, AdviceResolver, AdviceSource};
use crate::hydration::{simulate_at, HydrationStatus};
use crate::store::PlantRecord;

pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Display label when a record has no type
const UNKNOWN_TYPE: &str = "Unknown";

/// Per-plant status as served to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantReport {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub plant_type: String,
    pub moisture_percent: u8,
    pub status: HydrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice_source: Option<AdviceSource>,
}

/// Shared inputs for one evaluation pass
#[derive(Debug, Clone)]
pub struct GardenConditions {
    pub temperature_c: f64,
    pub location: String,
    pub now: DateTime<Utc>,
}

/// Evaluate one plant.
pub async fn evaluate_plant(
    plant: &PlantRecord,
    conditions: &GardenConditions,
    resolver: &AdviceResolver,
) -> PlantReport {
    let hydration = simulate_at(
        plant.last_watered.as_deref(),
        conditions.temperature_c,
        conditions.now,
    );

    let request = AdviceRequest::new(
        plant.species.clone(),
        conditions.temperature_c,
        hydration.moisture_percent,
        conditions.location.clone(),
    );
    let advice = resolver.resolve(&request).await;

    PlantReport {
        id: plant.id,
        name: plant.name.clone(),
        species: plant.species.clone(),
        plant_type: plant.plant_type.clone().unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        moisture_percent: hydration.moisture_percent,
        status: hydration.status,
        advice_source: advice.as_ref().map(|a| a.source),
        advice: advice.map(|a| a.text),
    }
}

/// Evaluate every plant with at most `max_concurrent` in flight.
pub async fn evaluate_garden(
    plants: &[PlantRecord],
    conditions: &GardenConditions,
    resolver: &AdviceResolver,
    max_concurrent: usize,
) -> Vec<PlantReport> {
    let start = std::time::Instant::now();

    let futures: Vec<_> = plants
        .iter()
        .map(|plant| evaluate_plant(plant, conditions, resolver))
        .collect();
    let reports: Vec<PlantReport> = stream::iter(futures)
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    tracing::info!(
        "Evaluated {} plants at {} ({:.1}°C) in {:?}",
        reports.len(), conditions.location, conditions.temperature_c, start.elapsed()
    );
    reports
}
