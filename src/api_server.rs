// Axum API Server Module
//
// Purpose: JSON API over the plant store, weather lookup, hydration engine
// and advice resolver. Status and advice are recomputed on every request.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advice::{AdviceProvider, AdviceResolver, OpenAiProvider};
use crate::config::Config;
use crate::garden::{evaluate_garden, GardenConditions, PlantReport};
use crate::store::{InMemoryPlantStore, NewPlant, PlantRecord, PlantStore, StoreError};
use crate::weather::{temperature_or_default, OpenWeatherClient, WeatherReading, WeatherSource};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlantStore>,
    pub weather: Arc<dyn WeatherSource>,
    pub resolver: AdviceResolver,
    pub default_city: String,
    pub default_temperature_c: f64,
    pub max_concurrent_advice: usize,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let provider: Option<Arc<dyn AdviceProvider>> = if config.openai_configured() {
            tracing::info!("Advice provider: {} at {}", config.openai.model, config.openai.base_url);
            Some(Arc::new(OpenAiProvider::new(config.openai.clone())?))
        } else {
            tracing::warn!("OPENAI_API_KEY not set, advice will use local fallback only");
            None
        };

        if config.weather.api_key.is_none() {
            tracing::warn!(
                "OPENWEATHER_API_KEY not set, using default temperature {}°C",
                config.default_temperature_c
            );
        }
        let weather = Arc::new(OpenWeatherClient::new(config.weather.clone())?);

        Ok(Self::from_parts(
            config,
            Arc::new(InMemoryPlantStore::new()),
            weather,
            AdviceResolver::new(provider, config.advice),
        ))
    }

    /// Assemble state from explicit collaborators.
    pub fn from_parts(
        config: &Config,
        store: Arc<dyn PlantStore>,
        weather: Arc<dyn WeatherSource>,
        resolver: AdviceResolver,
    ) -> Self {
        Self {
            store,
            weather,
            resolver,
            default_city: config.default_city.clone(),
            default_temperature_c: config.default_temperature_c,
            max_concurrent_advice: config.max_concurrent_advice,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Plants
        .route("/api/plants", get(list_plants).post(add_plant))
        .route("/api/plants/:id/water", post(water_plant))
        .route("/api/plants/:id", axum::routing::delete(delete_plant))

        // Chat advice
        .route("/api/chatbot", post(chatbot))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GardenQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GardenResponse {
    pub city: String,
    pub temperature_c: f64,
    pub weather: Option<WeatherReading>,
    pub plants: Vec<PlantReport>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Current status and advice for every plant
///
/// GET /api/plants?city=Managua
async fn list_plants(
    State(state): State<AppState>,
    Query(params): Query<GardenQuery>,
) -> Json<GardenResponse> {
    let city = non_blank(params.city).unwrap_or_else(|| state.default_city.clone());

    let weather = state.weather.current(&city).await;
    let temperature_c = temperature_or_default(weather.as_ref(), state.default_temperature_c);

    let plants = state.store.list().await;
    let conditions = GardenConditions {
        temperature_c,
        location: city.clone(),
        now: chrono::Utc::now(),
    };
    let reports = evaluate_garden(&plants, &conditions, &state.resolver, state.max_concurrent_advice).await;

    Json(GardenResponse {
        city,
        temperature_c,
        weather,
        plants: reports,
    })
}

/// POST /api/plants
/// Body: { "name": "...", "species": "...", "plant_type": "indoor" }
async fn add_plant(
    State(state): State<AppState>,
    Json(plant): Json<NewPlant>,
) -> Result<(StatusCode, Json<PlantRecord>), AppError> {
    let record = state.store.insert(plant, chrono::Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn water_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlantRecord>, AppError> {
    let record = state.store.water(id, chrono::Utc::now()).await?;
    Ok(Json(record))
}

async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/chatbot
/// Body: { "message": "...", "city": "León" }
async fn chatbot(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatReply> {
    let city = non_blank(req.city).unwrap_or_else(|| state.default_city.clone());
    let message = req.message.unwrap_or_default();
    let reply = state.resolver.resolve_chat(&message, &city).await;
    Json(ChatReply { reply })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound(e.to_string()),
            StoreError::Invalid(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
