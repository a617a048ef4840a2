//! Stand-in routing provider for client tests.
//!
//! Serves the fixture network over HTTP. The destination code of a path
//! request picks the answer, so each provider behaviour has its own route.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

const NORD_PORT: &str = include_str!("../../data/fixtures/paths/nord__port.json");
const NORD_ILE: &str = include_str!("../../data/fixtures/paths/nord__ile.json");
const STATIONS: &str = include_str!("../../data/fixtures/stations.json");

/// A running stub provider.
pub struct StubProvider {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubProvider {
    /// Bind on a free local port and serve in the background.
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/api/path/:from/:to", get(path))
            .route("/api/stations", get(stations))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Path requests received so far.
    pub fn path_requests(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn path(
    State(hits): State<Arc<AtomicUsize>>,
    Path((_from, to)): Path<(String, String)>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    match to.as_str() {
        "port" => NORD_PORT.into_response(),
        "ile" => NORD_ILE.into_response(),
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "locked" => StatusCode::UNAUTHORIZED.into_response(),
        "forbidden" => StatusCode::FORBIDDEN.into_response(),
        "busy" => StatusCode::TOO_MANY_REQUESTS.into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "database on fire").into_response(),
        "garbled" => "<html>maintenance</html>".into_response(),
        _ => (StatusCode::BAD_REQUEST, "unexpected destination").into_response(),
    }
}

async fn stations() -> &'static str {
    STATIONS
}
