//! Common test utilities for integration tests.
//!
//! Provides an in-process fake Guacamole server that serves the token and
//! session data endpoints and records every call it receives.

use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::Router;
use guacamole::{ClientConfig, Credentials, GuacamoleClient, SessionMetricsCollector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const TOKEN: &str = "C7A3F0E2B19D4C5A8E6F7D1B2A3C4D5E";
pub const USERNAME: &str = "guacadmin";
pub const PASSWORD: &str = "guacadmin-secret";
pub const DATA_SOURCE: &str = "mysql";

const PERMISSION_DENIED: &str = r#"{"message":"Permission Denied.","type":"PERMISSION_DENIED"}"#;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Calls received by the fake server.
#[derive(Debug, Default)]
pub struct Calls {
    pub logins: AtomicUsize,
    pub fetches: AtomicUsize,
    pub releases: AtomicUsize,
    pub login_forms: Mutex<Vec<HashMap<String, String>>>,
    pub fetch_tokens: Mutex<Vec<Option<String>>>,
    pub released_tokens: Mutex<Vec<String>>,
}

impl Calls {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

/// Configurable stand-in for a Guacamole installation.
#[derive(Debug, Clone)]
pub struct FakeGuacamole {
    pub login: Reply,
    pub history: Reply,
    pub users: Reply,
    pub active: Reply,
    pub release: StatusCode,
    pub calls: Arc<Calls>,
}

impl Default for FakeGuacamole {
    fn default() -> Self {
        Self {
            login: Reply::ok(grant_body(TOKEN, &[DATA_SOURCE])),
            history: Reply::ok("[{},{},{}]"),
            users: Reply::ok(r#"{"alice":{},"bob":{}}"#),
            active: Reply::ok("{}"),
            release: StatusCode::NO_CONTENT,
            calls: Arc::new(Calls::default()),
        }
    }
}

/// Builds a token grant body like the one Guacamole returns.
pub fn grant_body(token: &str, data_sources: &[&str]) -> String {
    serde_json::json!({
        "authToken": token,
        "username": USERNAME,
        "dataSource": data_sources.first().copied().unwrap_or_default(),
        "availableDataSources": data_sources,
    })
    .to_string()
}

/// Starts `fake` on an ephemeral port and returns its base URL.
///
/// The API is mounted under `/guacamole`, as in a default deployment.
pub async fn spawn(fake: FakeGuacamole) -> String {
    let api = Router::new()
        .route("/api/tokens", post(login))
        .route("/api/tokens/{token}", delete(release))
        .route(
            "/api/session/data/{data_source}/history/connections",
            get(history),
        )
        .route("/api/session/data/{data_source}/users", get(users))
        .route(
            "/api/session/data/{data_source}/activeConnections",
            get(active),
        )
        .with_state(fake);
    let app = Router::new().nest("/guacamole", api);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/guacamole")
}

/// An endpoint nothing listens on.
pub fn unreachable_endpoint() -> String {
    "http://127.0.0.1:1/guacamole".to_string()
}

pub fn test_client() -> GuacamoleClient {
    GuacamoleClient::new(&ClientConfig {
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

pub fn test_credentials(endpoint: &str) -> Credentials {
    Credentials::new(endpoint, USERNAME, PASSWORD, DATA_SOURCE)
}

/// Creates a collector pointed at `endpoint` with the default test credentials.
pub fn test_collector(endpoint: &str) -> SessionMetricsCollector {
    SessionMetricsCollector::new(test_client(), test_credentials(endpoint))
}

async fn login(
    State(fake): State<FakeGuacamole>,
    Form(form): Form<HashMap<String, String>>,
) -> Reply {
    fake.calls.logins.fetch_add(1, Ordering::SeqCst);
    fake.calls.login_forms.lock().unwrap().push(form);
    fake.login
}

async fn release(State(fake): State<FakeGuacamole>, Path(token): Path<String>) -> StatusCode {
    fake.calls.releases.fetch_add(1, Ordering::SeqCst);
    fake.calls.released_tokens.lock().unwrap().push(token);
    fake.release
}

async fn history(
    State(fake): State<FakeGuacamole>,
    Path(data_source): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let reply = fake.history.clone();
    session_data(&fake, &data_source, &query, reply)
}

async fn users(
    State(fake): State<FakeGuacamole>,
    Path(data_source): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let reply = fake.users.clone();
    session_data(&fake, &data_source, &query, reply)
}

async fn active(
    State(fake): State<FakeGuacamole>,
    Path(data_source): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let reply = fake.active.clone();
    session_data(&fake, &data_source, &query, reply)
}

fn session_data(
    fake: &FakeGuacamole,
    data_source: &str,
    query: &HashMap<String, String>,
    reply: Reply,
) -> Reply {
    fake.calls.fetches.fetch_add(1, Ordering::SeqCst);
    let token = query.get("token").cloned();
    fake.calls.fetch_tokens.lock().unwrap().push(token.clone());

    if token.as_deref() != Some(TOKEN) {
        return Reply::status(StatusCode::FORBIDDEN, PERMISSION_DENIED);
    }
    if data_source != DATA_SOURCE {
        return Reply::status(StatusCode::NOT_FOUND, r#"{"message":"Not found."}"#);
    }
    reply
}
