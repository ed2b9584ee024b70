use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub mod config;

pub use config::{ConfigError, MockConfig};

/// Path that lists recorded requests instead of being recorded itself.
pub const OBSERVED_PATH: &str = "/_observed";

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// One request as the server saw it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservedRequest {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    /// Header names are lower-case, in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ObservedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub type Log = Arc<RwLock<Vec<ObservedRequest>>>;

#[derive(Clone, Debug)]
pub struct MockState {
    status: StatusCode,
    log: Log,
}

impl MockState {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub async fn observed(&self) -> Vec<ObservedRequest> {
        self.log.read().await.clone()
    }

    /// For synchronous callers. Panics inside an async context.
    pub fn observed_blocking(&self) -> Vec<ObservedRequest> {
        self.log.blocking_read().clone()
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route(OBSERVED_PATH, get(list_observed).fallback(record))
        .fallback(record)
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn list_observed(State(state): State<MockState>) -> Json<Vec<ObservedRequest>> {
    Json(state.observed().await)
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let observed = ObservedRequest {
        id: Uuid::new_v4(),
        method: method.as_str().to_string(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: body.to_vec(),
    };
    tracing::info!(
        id = %observed.id,
        method = %observed.method,
        path = %observed.path,
        body_len = observed.body.len(),
        "observed request"
    );

    let id = observed.id;
    state.log.write().await.push(observed);

    let mut response_headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response_headers.insert(REQUEST_ID_HEADER, value);
    }
    (state.status, response_headers)
}
