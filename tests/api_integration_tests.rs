// API Integration Tests
//
// Purpose: Drive the router end to end with an in-memory store, a stub
// weather source and scripted advice providers.
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use lifeplants::advice::{
        AdvicePolicy, AdviceProvider, AdviceResolver, CallPolicy, FallbackStrategy, Prompt,
        ProviderError, CHAT_FALLBACK, QUOTES,
    };
    use lifeplants::store::{InMemoryPlantStore, PlantRecord};
    use lifeplants::weather::{WeatherReading, WeatherSource};
    use lifeplants::{create_router, AppState, Config};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    /// Fixed temperature for known cities, nothing for the rest
    struct StubWeather;

    #[async_trait]
    impl WeatherSource for StubWeather {
        async fn current(&self, city: &str) -> Option<WeatherReading> {
            match city {
                "Managua" => Some(WeatherReading {
                    temperature_c: 33.0,
                    humidity_percent: Some(65.0),
                    description: Some("clear sky".to_string()),
                }),
                "Reykjavik" => Some(WeatherReading {
                    temperature_c: 4.0,
                    humidity_percent: None,
                    description: None,
                }),
                _ => None,
            }
        }
    }

    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AdviceProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("AI: {}", prompt.user.len()))
        }
    }

    fn seeded_store() -> InMemoryPlantStore {
        let hours_ago = |h: i64| Some((Utc::now() - Duration::hours(h)).to_rfc3339());
        InMemoryPlantStore::with_records(vec![
            PlantRecord {
                id: 1,
                name: "Spike".into(),
                species: "Golden barrel cactus".into(),
                plant_type: Some("indoor".into()),
                last_watered: hours_ago(0),
            },
            PlantRecord {
                id: 2,
                name: "Fernanda".into(),
                species: "Boston fern".into(),
                plant_type: None,
                last_watered: hours_ago(20),
            },
            PlantRecord {
                id: 3,
                name: "Mystery".into(),
                species: "".into(),
                plant_type: None,
                last_watered: Some("not-a-date".into()),
            },
        ])
    }

    fn app_with(resolver: AdviceResolver) -> axum::Router {
        let state = AppState::from_parts(
            &Config::default(),
            Arc::new(seeded_store()),
            Arc::new(StubWeather),
            resolver,
        );
        create_router(state)
    }

    fn offline_app() -> axum::Router {
        app_with(AdviceResolver::offline(AdvicePolicy::default()))
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = offline_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Plant Status
    // =========================================================================

    #[tokio::test]
    async fn test_list_plants_default_city() {
        let response = offline_app().oneshot(get("/api/plants")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["city"], "Managua");
        assert_eq!(body["temperature_c"], 33.0);
        assert_eq!(body["weather"]["description"], "clear sky");

        let plants = body["plants"].as_array().unwrap();
        assert_eq!(plants.len(), 3);

        // Just watered; a few ms of elapsed time truncate 99.99.. down to 99
        assert!(plants[0]["moisture_percent"].as_u64().unwrap() >= 99);
        assert_eq!(plants[0]["status"], "happy");
        assert_eq!(plants[0]["plant_type"], "indoor");
        assert_eq!(plants[0]["advice_source"], "local_fallback");
        assert!(plants[0]["advice"].as_str().unwrap().contains("cacti"));

        // 20h at 33°C is far past empty
        assert_eq!(plants[1]["moisture_percent"], 0);
        assert_eq!(plants[1]["status"], "critical");
        assert_eq!(plants[1]["plant_type"], "Unknown");

        // Corrupt timestamp counts as just watered; empty species still gets advice
        assert_eq!(plants[2]["moisture_percent"], 100);
        assert!(!plants[2]["advice"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_city_uses_default_temperature() {
        let response = offline_app().oneshot(get("/api/plants?city=Atlantis")).await.unwrap();
        let body = json_response(response).await;

        assert_eq!(body["city"], "Atlantis");
        assert_eq!(body["temperature_c"], 35.0);
        assert!(body["weather"].is_null());
    }

    #[tokio::test]
    async fn test_cold_city_changes_decay_and_advice() {
        let response = offline_app().oneshot(get("/api/plants?city=Reykjavik")).await.unwrap();
        let body = json_response(response).await;

        // 20h at 4°C: 100 - 100 = 0
        let fern = &body["plants"][1];
        assert_eq!(fern["moisture_percent"], 0);
        assert!(fern["advice"].as_str().unwrap().starts_with("It's cold"));
    }

    #[tokio::test]
    async fn test_conditional_policy_omits_advice() {
        let provider = Arc::new(EchoProvider { calls: AtomicUsize::new(0) });
        let policy = AdvicePolicy {
            call: CallPolicy::Conditional { threshold: 60 },
            ..Default::default()
        };
        let app = app_with(AdviceResolver::new(Some(provider.clone()), policy));

        let body = json_response(app.oneshot(get("/api/plants")).await.unwrap()).await;
        let plants = body["plants"].as_array().unwrap();

        assert!(plants[0].get("advice").is_none());
        assert!(plants[2].get("advice").is_none());
        assert_eq!(plants[1]["advice_source"], "generated");
        assert!(plants[1]["advice"].as_str().unwrap().starts_with("AI: "));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    // =========================================================================
    // Section 3: Add / Water / Delete
    // =========================================================================

    #[tokio::test]
    async fn test_add_water_delete_cycle() {
        let app = offline_app();

        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/plants",
                serde_json::json!({"name": "Basil", "species": "Ocimum basilicum", "type": "herb"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_response(response).await;
        assert_eq!(created["id"], 4);
        assert_eq!(created["plant_type"], "herb");
        assert!(created["last_watered"].is_string());

        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri("/api/plants/2/water").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Fern is full again (watering stamps whole seconds)
        let body = json_response(app.clone().oneshot(get("/api/plants")).await.unwrap()).await;
        assert!(body["plants"][1]["moisture_percent"].as_u64().unwrap() >= 99);
        assert_eq!(body["plants"][1]["status"], "happy");
        assert_eq!(body["plants"].as_array().unwrap().len(), 4);

        let response = app
            .clone()
            .oneshot(Request::builder().method("DELETE").uri("/api/plants/4").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = json_response(app.oneshot(get("/api/plants")).await.unwrap()).await;
        assert_eq!(body["plants"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_plants_are_404() {
        let app = offline_app();

        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri("/api/plants/99/water").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_response(response).await["error"], "plant 99 not found");

        let response = app
            .oneshot(Request::builder().method("DELETE").uri("/api/plants/99").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_plant_is_400() {
        let response = offline_app()
            .oneshot(send_json("POST", "/api/plants", serde_json::json!({"name": " ", "species": "fern"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_response(response).await["error"].as_str().unwrap().contains("name"));
    }

    // =========================================================================
    // Section 4: Chatbot
    // =========================================================================

    #[tokio::test]
    async fn test_chatbot_offline_returns_fixed_reminder() {
        let policy = AdvicePolicy { fallback: FallbackStrategy::RandomQuote, ..Default::default() };
        let app = app_with(AdviceResolver::offline(policy));

        let response = app
            .oneshot(send_json("POST", "/api/chatbot", serde_json::json!({"message": "Why is my basil wilting?"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply = json_response(response).await["reply"].as_str().unwrap().to_string();
        assert_eq!(reply, CHAT_FALLBACK);
        assert!(!QUOTES.contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn test_chatbot_generated_and_empty_message() {
        let provider = Arc::new(EchoProvider { calls: AtomicUsize::new(0) });
        let app = app_with(AdviceResolver::new(Some(provider.clone()), AdvicePolicy::default()));

        let body = json_response(
            app.clone()
                .oneshot(send_json("POST", "/api/chatbot", serde_json::json!({"message": "Shade?", "city": "León"})))
                .await
                .unwrap(),
        )
        .await;
        assert!(body["reply"].as_str().unwrap().starts_with("AI: "));

        let body = json_response(
            app.oneshot(send_json("POST", "/api/chatbot", serde_json::json!({})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["reply"], CHAT_FALLBACK);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
