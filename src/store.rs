//! Plant Store
//!
//! Source of plant records. The hydration and advice code only ever reads
//! from it; watering is the one write, and it only touches `last_watered`.
//! The bundled implementation is in-memory and lost on restart.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A stored plant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: i64,
    pub name: String,
    pub species: String,
    /// Free-form category (indoor, outdoor, herb...)
    pub plant_type: Option<String>,
    /// Last watering as stored text; may be absent or malformed
    pub last_watered: Option<String>,
}

/// Fields needed to add a plant
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlant {
    pub name: String,
    pub species: String,
    #[serde(default, alias = "type")]
    pub plant_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("plant {0} not found")]
    NotFound(i64),

    #[error("invalid plant: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait PlantStore: Send + Sync {
    async fn list(&self) -> Vec<PlantRecord>;

    /// Add a plant, watered at `now`.
    async fn insert(&self, plant: NewPlant, now: DateTime<Utc>) -> Result<PlantRecord, StoreError>;

    /// Record a watering at `now`.
    async fn water(&self, id: i64, now: DateTime<Utc>) -> Result<PlantRecord, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

fn stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Default)]
pub struct InMemoryPlantStore {
    plants: RwLock<Vec<PlantRecord>>,
    next_id: AtomicI64,
}

impl InMemoryPlantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (e.g. fixtures or imported rows).
    pub fn with_records(records: Vec<PlantRecord>) -> Self {
        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            plants: RwLock::new(records),
            next_id: AtomicI64::new(max_id),
        }
    }
}

#[async_trait]
impl PlantStore for InMemoryPlantStore {
    async fn list(&self) -> Vec<PlantRecord> {
        self.plants.read().await.clone()
    }

    async fn insert(&self, plant: NewPlant, now: DateTime<Utc>) -> Result<PlantRecord, StoreError> {
        let name = plant.name.trim();
        let species = plant.species.trim();
        if name.is_empty() {
            return Err(StoreError::Invalid("name is required".to_string()));
        }
        if species.is_empty() {
            return Err(StoreError::Invalid("species is required".to_string()));
        }

        let record = PlantRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            species: species.to_string(),
            plant_type: plant
                .plant_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            last_watered: Some(stamp(now)),
        };

        self.plants.write().await.push(record.clone());
        tracing::info!("Added plant {} ({})", record.id, record.name);
        Ok(record)
    }

    async fn water(&self, id: i64, now: DateTime<Utc>) -> Result<PlantRecord, StoreError> {
        let mut plants = self.plants.write().await;
        let plant = plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        plant.last_watered = Some(stamp(now));
        tracing::info!("Watered plant {}", id);
        Ok(plant.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut plants = self.plants.write().await;
        let before = plants.len();
        plants.retain(|p| p.id != id);
        if plants.len() == before {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!("Deleted plant {}", id);
        Ok(())
    }
}
