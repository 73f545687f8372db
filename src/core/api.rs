//! HTTP + WebSocket API for SpeakEasy
//!
//! Endpoints:
//! - GET  /health - Health check
//! - GET  /topics - Topic catalog (optional ?lang=en|pt)
//! - POST /session/new - Create new practice session
//! - GET  /session/{id} - Session snapshot
//! - POST /session/{id}/turn - Submit a learner utterance
//! - POST /session/{id}/reset - Reset the session
//! - WS   /ws/{id} - Live practice events

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::core::practice::{PracticeDriver, PracticeEvent};
use crate::core::store::SessionStore;
use crate::types::{catalog, find_topic, Difficulty, DisplayLanguage, SessionSnapshot, Topic};

/// App state: one paced driver per session
pub struct AppState {
    pub sessions: RwLock<HashMap<String, PracticeDriver>>,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub topic_id: Option<String>,
    pub level: Option<String>,
    pub lang: Option<String>,
    /// Seed for deterministic feedback/reply draws
    pub seed: Option<u64>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub snapshot: SessionSnapshot,
}

/// Submit turn request
#[derive(Debug, Deserialize)]
pub struct SubmitTurnRequest {
    pub text: String,
}

/// Submit turn response: results arrive over the WebSocket
#[derive(Debug, Serialize)]
pub struct SubmitTurnResponse {
    pub accepted: bool,
    /// Epoch the scheduled feedback/reply writes are bound to
    pub epoch: u64,
}

/// Reset response
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub epoch: u64,
    pub snapshot: SessionSnapshot,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Topic list query
#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub lang: Option<String>,
}

/// Topic list response
#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub lang: DisplayLanguage,
    pub topics: Vec<Topic>,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/topics", get(list_topics))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/turn", post(submit_turn))
        .route("/session/:id/reset", post(reset_session))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Topic catalog
async fn list_topics(Query(query): Query<TopicsQuery>) -> Result<Json<TopicsResponse>, StatusCode> {
    let lang = match query.lang {
        Some(raw) => raw
            .parse::<DisplayLanguage>()
            .map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DisplayLanguage::En,
    };

    Ok(Json(TopicsResponse {
        lang,
        topics: catalog(lang).to_vec(),
    }))
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let lang = match req.lang {
        Some(raw) => raw
            .parse::<DisplayLanguage>()
            .map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DisplayLanguage::En,
    };

    let mut store = SessionStore::new();
    store.set_language(lang);

    if let Some(raw) = req.level {
        let level = raw
            .parse::<Difficulty>()
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        store.set_level(level);
    }

    if let Some(id) = req.topic_id {
        let topic = find_topic(lang, &id).ok_or(StatusCode::NOT_FOUND)?;
        store.select_topic(topic.clone());
        // Seed the opening line as the first avatar turn
        store.reset();
    }

    let rng: StdRng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let driver = PracticeDriver::new(store, Box::new(rng));

    let snapshot = driver.store().read().await.snapshot();
    let session_id = generate_session_id();

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), driver);

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        snapshot,
    }))
}

/// Get session snapshot
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, StatusCode> {
    let sessions = state.sessions.read().await;
    let driver = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let snapshot = driver.store().read().await.snapshot();
    Ok(Json(snapshot))
}

/// Submit a learner utterance through the paced pipeline
async fn submit_turn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SubmitTurnRequest>,
) -> Result<Json<SubmitTurnResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let driver = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let epoch = driver.submit(&req.text).await;
    Ok(Json(SubmitTurnResponse {
        accepted: true,
        epoch,
    }))
}

/// Reset a session
async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResetResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let driver = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let epoch = driver.reset().await;
    let snapshot = driver.store().read().await.snapshot();
    Ok(Json(ResetResponse { epoch, snapshot }))
}

/// WebSocket handler for live practice events
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let driver = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = driver.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<PracticeEvent>) {
    while let Ok(event) = rx.recv().await {
        let json = serde_json::to_string(&event).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("SpeakEasy API running on {}", addr);
    println!("  GET  /health              - Health check");
    println!("  GET  /topics              - Topic catalog");
    println!("  POST /session/new         - Create session");
    println!("  GET  /session/:id         - Session snapshot");
    println!("  POST /session/:id/turn    - Submit utterance");
    println!("  POST /session/:id/reset   - Reset session");
    println!("  WS   /ws/:id              - Live events");
    axum::serve(listener, router).await?;
    Ok(())
}
