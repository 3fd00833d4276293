//! Integration test fixtures for the Clipjoint booking client.
//!
//! [`TestBackend`] serves an in-process stub of the booking backend - the
//! same endpoint table the real service exposes under `/api` - on an
//! ephemeral port, and hands out clients pointed at it, each with an
//! isolated session marker file.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = TestBackend::spawn().await;
//! let (client, _session_guard) = backend.client();
//!
//! let shops = client.barber_shops().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use clipjoint_client::{BookingClient, ClientConfig};

/// Password the stub backend accepts for `POST /login`.
pub const VALID_PASSWORD: &str = "pw";

/// One request observed by the stub backend.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
struct BackendState {
    hits: Mutex<Vec<Hit>>,
}

/// In-process stub of the booking backend.
pub struct TestBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
}

impl TestBackend {
    /// Bind an ephemeral port and serve the stub router on it.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub backend");
        });

        Self { addr, state }
    }

    /// Base URL of the stub API (`http://127.0.0.1:{port}/api`).
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Requests observed so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the hit log lock is poisoned.
    #[must_use]
    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().expect("hit log lock").clone()
    }

    /// Build a client pointed at this backend with an isolated session file.
    ///
    /// The returned [`TempDir`] guard owns the session file; keep it alive
    /// for the duration of the test.
    ///
    /// # Panics
    ///
    /// Panics if the temp dir or client cannot be created.
    #[must_use]
    pub fn client(&self) -> (BookingClient, TempDir) {
        let dir = tempfile::tempdir().expect("session tempdir");
        let config = ClientConfig::new(
            self.api_url().parse().expect("stub api url"),
            dir.path().join("session.json"),
        );
        let client = BookingClient::new(&config).expect("booking client");
        (client, dir)
    }
}

fn router(state: Arc<BackendState>) -> Router {
    let api = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/barbershop", get(list_shops).post(add_shop))
        .route("/barbershop/{id}", get(get_shop))
        .route(
            "/appointment",
            get(list_appointments).post(add_appointment),
        )
        .route(
            "/appointment/{id}",
            get(get_appointment).delete(delete_appointment),
        )
        .route("/available-times/{id}", get(available_times))
        .with_state(Arc::clone(&state));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state, record_hit))
}

/// Record every request before routing it; the URI keeps the `/api` prefix.
async fn record_hit(
    State(state): State<Arc<BackendState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Ok(mut hits) = state.hits.lock() {
        hits.push(Hit {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(ToString::to_string),
        });
    }
    next.run(request).await
}

// =============================================================================
// Handlers
// =============================================================================

async fn signup(Json(mut body): Json<Value>) -> Json<Value> {
    if let Some(user) = body.as_object_mut() {
        user.remove("password");
        user.insert("id".to_string(), json!(1));
    }
    Json(body)
}

async fn login(Json(body): Json<Value>) -> Response {
    if body.get("password") == Some(&json!(VALID_PASSWORD)) {
        Json(json!({"id": 1, "name": "A"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn logout() -> Json<Value> {
    Json(json!({"ok": true}))
}

async fn list_shops() -> Json<Value> {
    Json(json!([
        {"_id": "shop-1", "name": "Fade Factory"},
        {"_id": "shop-2", "name": "The Chop Shop"},
    ]))
}

async fn add_shop(Json(mut body): Json<Value>) -> Json<Value> {
    if let Some(shop) = body.as_object_mut() {
        shop.insert("_id".to_string(), json!("shop-3"));
    }
    Json(body)
}

async fn get_shop(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"_id": id, "name": "Fade Factory"}))
}

async fn list_appointments() -> Json<Value> {
    Json(json!([
        {"_id": "appt-1", "barbershop": "shop-1", "time": "09:00"},
    ]))
}

async fn add_appointment(Json(mut body): Json<Value>) -> Json<Value> {
    if let Some(appointment) = body.as_object_mut() {
        appointment.insert("_id".to_string(), json!("appt-2"));
    }
    Json(body)
}

async fn get_appointment(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"_id": id, "barbershop": "shop-1", "time": "09:00"}))
}

async fn delete_appointment(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"_id": id, "deleted": true}))
}

async fn available_times(
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({
        "barbershop": id,
        "date": params.get("date"),
        "times": ["09:00", "09:30", "10:00"],
    }))
}
