// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the backend API for integration tests.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stravach_client::config::Config;
use stravach_client::App;

/// Canned response: status plus text body.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    #[allow(dead_code)]
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

impl Default for Canned {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: String::new(),
        }
    }
}

/// Mutable behaviour and call log of the mock backend.
#[derive(Default)]
pub struct MockState {
    /// Activity list payload, keyed by user id
    pub activities: Mutex<HashMap<u64, Value>>,
    /// Status for list calls (body is the JSON payload when 2xx)
    pub list_status: Mutex<Option<StatusCode>>,
    pub generation: Mutex<HashMap<u64, Canned>>,
    pub generation_delay: Mutex<Duration>,
    pub refresh: Mutex<Canned>,
    pub auth: Mutex<Canned>,
    pub broadcast: Mutex<Canned>,
    /// Method and path of every request, in arrival order
    pub calls: Mutex<Vec<String>>,
    /// Cookie header seen on each request, by call index
    pub cookies: Mutex<Vec<Option<String>>>,
    pub last_auth_body: Mutex<Option<Value>>,
    pub last_broadcast_body: Mutex<Option<Value>>,
}

impl MockState {
    fn record(&self, call: String, headers: &HeaderMap) {
        self.calls.lock().unwrap().push(call);
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.cookies.lock().unwrap().push(cookie);
    }

    #[allow(dead_code)]
    pub fn set_activities(&self, user_id: u64, payload: Value) {
        self.activities.lock().unwrap().insert(user_id, payload);
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

/// Running mock backend.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Bind the mock on an ephemeral port and serve it in the background.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/tg-auth", post(tg_auth))
            .route("/api/activities/{user_id}", get(list_activities))
            .route("/api/activity/{activity_id}", post(generate_name))
            .route(
                "/api/activities-refresh-last-10/{user_id}",
                post(refresh_recent),
            )
            .route("/api/broadcast", post(broadcast))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Config pointing at this mock with a short success display window.
    #[allow(dead_code)]
    pub fn config(&self, success_display: Duration) -> Config {
        Config {
            api_url: self.base_url.clone(),
            success_display,
            ..Config::test_default()
        }
    }

    #[allow(dead_code)]
    pub fn app(&self, success_display: Duration) -> App {
        App::new(self.config(success_display)).expect("Failed to build app")
    }
}

fn canned(canned: Canned) -> Response {
    (canned.status, canned.body).into_response()
}

async fn tg_auth(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /tg-auth".to_string(), &headers);
    *state.last_auth_body.lock().unwrap() = Some(body);

    let reply = state.auth.lock().unwrap().clone();
    let mut response = canned(reply.clone());
    if reply.status.is_success() {
        response.headers_mut().insert(
            header::SET_COOKIE,
            "stravach_session=test-session; Path=/; HttpOnly"
                .parse()
                .unwrap(),
        );
    }
    response
}

async fn list_activities(
    State(state): State<Arc<MockState>>,
    Path(user_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("GET /api/activities/{}", user_id), &headers);

    if let Some(status) = *state.list_status.lock().unwrap() {
        if !status.is_success() {
            return (status, "list failed").into_response();
        }
    }

    let payload = state
        .activities
        .lock()
        .unwrap()
        .get(&user_id)
        .cloned()
        .unwrap_or_else(|| Value::Array(vec![]));
    Json(payload).into_response()
}

async fn generate_name(
    State(state): State<Arc<MockState>>,
    Path(activity_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("POST /api/activity/{}", activity_id), &headers);

    let delay = *state.generation_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reply = state
        .generation
        .lock()
        .unwrap()
        .get(&activity_id)
        .cloned()
        .unwrap_or_default();
    canned(reply)
}

async fn refresh_recent(
    State(state): State<Arc<MockState>>,
    Path(user_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.record(
        format!("POST /api/activities-refresh-last-10/{}", user_id),
        &headers,
    );
    let reply = state.refresh.lock().unwrap().clone();
    canned(reply)
}

async fn broadcast(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /api/broadcast".to_string(), &headers);
    *state.last_broadcast_body.lock().unwrap() = Some(body);
    let reply = state.broadcast.lock().unwrap().clone();
    canned(reply)
}
