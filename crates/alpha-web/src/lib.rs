//! Alpha Terminal Web Server
//!
//! Axum-based JSON API and WebSocket feed for the terminal UI.

pub mod routes;
pub mod schedule;
pub mod state;
pub mod websocket;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Sessions
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::logout),
        )
        .route("/sessions/{id}/accept-risk", post(routes::sessions::accept_risk))
        .route("/sessions/{id}/login", post(routes::sessions::login))
        .route("/sessions/{id}/admin", post(routes::sessions::unlock_admin))
        // Research
        .route("/sessions/{id}/research/brief", post(routes::research::morning_brief))
        .route("/sessions/{id}/research/ipo-scan", post(routes::research::ipo_scan))
        .route(
            "/sessions/{id}/research/ipo-deep-dive",
            post(routes::research::ipo_deep_dive),
        )
        .route("/sessions/{id}/research/top-down", post(routes::research::top_down))
        .route(
            "/sessions/{id}/research/deep-dive",
            post(routes::research::company_deep_dive),
        )
        .route("/sessions/{id}/research/bottom-up", post(routes::research::bottom_up))
        .route("/sessions/{id}/research/short-term", post(routes::research::short_term))
        .route("/sessions/{id}/research/bulletin", post(routes::research::bulletin))
        // Slots
        .route("/sessions/{id}/slots/{slot}", get(routes::slots::latest_result))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server. Idle sessions are swept in the background.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    tokio::spawn(schedule::sweep_idle_sessions(state.clone()));
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_core::research::ModelRoster;
    use alpha_core::{AdminCredentials, ResearchDesk};
    use alpha_core::research::BulletinKind;
    use alpha_gateway::{
        GatewayError, GatewayResult, GenerateReply, GenerateRequest, GenerativeBackend,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Answers every prompt with the same text and records prompts.
    struct StubBackend {
        reply: GatewayResult<GenerateReply>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn answering(text: &str) -> Arc<Self> {
            Self::replying(Ok(GenerateReply {
                text: Some(text.to_string()),
                grounding: Vec::new(),
            }))
        }

        fn replying(reply: GatewayResult<GenerateReply>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn generate(&self, request: &GenerateRequest) -> GatewayResult<GenerateReply> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            self.reply.clone()
        }
    }

    fn app_with(backend: Arc<StubBackend>) -> (Router, AppState) {
        let desk = ResearchDesk::new(
            backend,
            ModelRoster {
                flash: "flash".to_string(),
                pro: "pro".to_string(),
            },
        );
        let admin = AdminCredentials {
            email: "ops@alpha.test".to_string(),
            password: "s3cret".to_string(),
        };
        let state = AppState::new(desk, Some(admin));
        (create_router(state.clone()), state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn open_session(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn logged_in(app: &Router, email: &str) -> String {
        let id = open_session(app).await;
        let uri = format!("/api/sessions/{}/accept-risk", id);
        assert_eq!(send(app, Method::POST, &uri, None).await.0, StatusCode::OK);
        let uri = format!("/api/sessions/{}/login", id);
        let profile = json!({ "email": email, "name": "Analyst" });
        assert_eq!(send(app, Method::POST, &uri, Some(profile)).await.0, StatusCode::OK);
        id
    }

    #[tokio::test]
    async fn test_research_requires_login() {
        let (app, _) = app_with(StubBackend::answering("brief"));
        let id = open_session(&app).await;

        let uri = format!("/api/sessions/{}/research/brief", id);
        let (status, _) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_before_risk_is_conflict() {
        let (app, _) = app_with(StubBackend::answering("brief"));
        let id = open_session(&app).await;

        let uri = format!("/api/sessions/{}/login", id);
        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "email": "a@b.c", "name": "A" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (app, _) = app_with(StubBackend::answering("brief"));
        let (status, _) = send(&app, Method::GET, "/api/sessions/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_brief_is_committed_and_readable() {
        let (app, state) = app_with(StubBackend::answering("Nifty opens flat."));
        let id = logged_in(&app, "analyst@alpha.test").await;
        let mut events = state.tx.subscribe();

        let uri = format!("/api/sessions/{}/research/brief", id);
        let (status, body) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["slot"], "brief");
        assert_eq!(body["generation"], 1);
        assert_eq!(body["accepted"], true);
        assert_eq!(body["output"]["text"], "Nifty opens flat.");

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            state::WebSocketMessage::ResearchCompleted {
                session_id: id.clone(),
                slot: alpha_core::Slot::Brief,
                generation: 1,
                accepted: true,
            }
        );

        let uri = format!("/api/sessions/{}/slots/brief", id);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"]["text"], "Nifty opens flat.");
    }

    #[tokio::test]
    async fn test_empty_slot_and_unknown_slot() {
        let (app, _) = app_with(StubBackend::answering("x"));
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/slots/top-down", id);
        assert_eq!(send(&app, Method::GET, &uri, None).await.0, StatusCode::NOT_FOUND);
        let uri = format!("/api/sessions/{}/slots/nope", id);
        assert_eq!(send(&app, Method::GET, &uri, None).await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_research_failure_is_still_ok() {
        let backend = StubBackend::replying(Err(GatewayError::Transport("connection refused".into())));
        let (app, _) = app_with(backend);
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/deep-dive", id);
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "company": "Acme" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert_eq!(body["failure"]["kind"], "transport");
        assert_eq!(body["slot"], "audit");
        assert!(body["output"]["text"].as_str().unwrap().contains("Acme"));
        assert_eq!(body["output"]["sources"], json!([]));
    }

    #[tokio::test]
    async fn test_blank_company_is_rejected() {
        let (app, _) = app_with(StubBackend::answering("x"));
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/ipo-deep-dive", id);
        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "company": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deep_dive_carries_simulated_intel() {
        let (app, _) = app_with(StubBackend::answering("# I. CORPORATE FORENSIC AUDIT"));
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/bottom-up", id);
        let body = json!({ "query": "RBI cuts repo rate", "mode": "NEWS_IMPACT" });
        let (status, body) = send(&app, Method::POST, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"]["alphaIntel"]["simulated"], true);
        assert_eq!(body["output"]["alphaIntel"]["moatScore"], 88);
    }

    #[tokio::test]
    async fn test_short_term_uses_ticker_from_brief() {
        let backend = StubBackend::answering("Watch INFY and TCS today.");
        let (app, _) = app_with(backend.clone());
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/brief", id);
        send(&app, Method::POST, &uri, None).await;

        let uri = format!("/api/sessions/{}/research/short-term", id);
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slot"], "audit");
        assert!(backend
            .last_prompt()
            .contains("INFY SHORT TERM TECHNICAL & MOMENTUM AUDIT"));
    }

    #[tokio::test]
    async fn test_bulletin_route() {
        let (app, _) = app_with(StubBackend::answering("**Market Snapshot**"));
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/bulletin", id);
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "kind": "market-snapshot" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slot"], "bulletin");
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_admin_unlock() {
        let (app, _) = app_with(StubBackend::answering("x"));
        let id = logged_in(&app, "OPS@alpha.test").await;

        let (_, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
        assert_eq!(body["isAdmin"], true);

        let uri = format!("/api/sessions/{}/admin", id);
        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "password": "wrong" }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "password": "s3cret" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["adminUnlocked"], true);
    }

    #[tokio::test]
    async fn test_logout_clears_results_and_access() {
        let (app, _) = app_with(StubBackend::answering("brief"));
        let id = logged_in(&app, "analyst@alpha.test").await;

        let uri = format!("/api/sessions/{}/research/top-down", id);
        send(&app, Method::POST, &uri, None).await;

        let (status, body) = send(&app, Method::DELETE, &format!("/api/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["authenticated"], false);
        assert_eq!(body["session"]["acceptedRisk"], true);

        let uri = format!("/api/sessions/{}/slots/top-down", id);
        assert_eq!(send(&app, Method::GET, &uri, None).await.0, StatusCode::UNAUTHORIZED);
        let uri = format!("/api/sessions/{}/research/brief", id);
        assert_eq!(send(&app, Method::POST, &uri, None).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let (app, state) = app_with(StubBackend::answering("x"));
        let state = state.with_session_idle(chrono::Duration::minutes(30));
        let stale = open_session(&app).await;
        let fresh = open_session(&app).await;

        state.sessions.write().await.get_mut(&stale).unwrap().last_seen =
            chrono::Utc::now() - chrono::Duration::hours(1);

        let expired = state.expire_idle_sessions(chrono::Utc::now()).await;
        assert_eq!(expired, vec![stale.clone()]);

        let (status, _) = send(&app, Method::GET, &format!("/api/sessions/{}", stale), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, &format!("/api/sessions/{}", fresh), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_access_keeps_session_alive() {
        let (app, state) = app_with(StubBackend::answering("x"));
        let id = open_session(&app).await;
        let old = chrono::Utc::now()
            - chrono::Duration::hours(state::DEFAULT_SESSION_IDLE_HOURS + 1);
        state.sessions.write().await.get_mut(&id).unwrap().last_seen = old;

        send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
        assert!(state.expire_idle_sessions(chrono::Utc::now()).await.is_empty());
    }

    #[tokio::test]
    async fn test_scheduled_bulletin_reaches_logged_in_sessions() {
        let (app, state) = app_with(StubBackend::answering("**Pre-Market News**"));
        let analyst = logged_in(&app, "analyst@alpha.test").await;
        let _guest = open_session(&app).await;
        let mut events = state.tx.subscribe();

        let delivered = schedule::publish_bulletin(&state, BulletinKind::PreMarket).await;
        assert_eq!(delivered, 1);

        let event = events.recv().await.unwrap();
        assert_eq!(event.session_id(), analyst);

        let uri = format!("/api/sessions/{}/slots/bulletin", analyst);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"]["text"], "**Pre-Market News**");
    }

    #[tokio::test]
    async fn test_scheduled_bulletin_without_sessions_skips_call() {
        let backend = StubBackend::answering("x");
        let (_, state) = app_with(backend.clone());
        assert_eq!(schedule::publish_bulletin(&state, BulletinKind::PostMarket).await, 0);
        assert!(backend.prompts.lock().unwrap().is_empty());
    }
}
