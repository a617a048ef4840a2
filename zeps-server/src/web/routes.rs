//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::planner::{RouteSearch, SearchError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/route", get(route_page))
        .route("/api/stations/search", get(search_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Search stations by name or code.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state
        .stations
        .search(&req.q, limit)
        .await
        .iter()
        .map(|s| StationResult::from_station(s))
        .collect();

    Json(StationSearchResponse { stations })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Route between two stations, preferring a hub start when it is faster.
async fn route_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteRequest>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    match find_route(&state, &req, html).await {
        Ok(response) => Ok(response),
        Err(e) if html => Ok(e.into_html_response()),
        Err(e) => Err(e),
    }
}

async fn find_route(
    state: &AppState,
    req: &RouteRequest,
    html: bool,
) -> Result<Response, AppError> {
    let from = state
        .stations
        .resolve(&req.from)
        .await
        .ok_or_else(|| AppError::unknown_station(&req.from))?;
    let to = state
        .stations
        .resolve(&req.to)
        .await
        .ok_or_else(|| AppError::unknown_station(&req.to))?;

    let search = RouteSearch::new(state.backend.as_ref(), &state.config);
    let choice = search
        .search(&from.code, &to.code, req.force_direct())
        .await
        .map_err(|e| match e {
            SearchError::Unreachable { .. } => AppError::NotFound {
                message: format!(
                    "Aucun itinéraire n'existe entre {} et {}",
                    from.display_name, to.display_name
                ),
            },
            SearchError::Provider(e) => {
                tracing::warn!(
                    from = %from.code,
                    to = %to.code,
                    error = %e,
                    "routing provider failed"
                );
                AppError::BadGateway {
                    message: "Erreur inconnue lors de la recherche d'itinéraire".to_string(),
                }
            }
            SearchError::Domain(e) => AppError::Internal {
                message: e.to_string(),
            },
        })?;

    tracing::info!(
        from = %from.code,
        to = %to.code,
        via_hub = choice.via_hub(),
        travel_secs = choice.route().travel_time().num_seconds(),
        "route found"
    );

    if html {
        let template = RouteTemplate {
            route: RouteView::from_choice(&choice),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(RouteResponse::from_choice(&choice)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    fn unknown_station(input: &str) -> Self {
        AppError::BadRequest {
            message: format!("Station inconnue : {}", input.trim()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_message(self) -> String {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = ?self, "request rejected");
        }
    }

    /// Render the error as the HTML error page.
    fn into_html_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let template = ErrorTemplate {
            title: "Erreur".to_string(),
            message: self.into_message(),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => (status, format!("Template error: {}", e)).into_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let body = Json(ErrorResponse {
            error: self.into_message(),
        });
        (status, body).into_response()
    }
}
