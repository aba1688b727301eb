//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::board::BoardView;
use crate::predictions::Transport;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<T: Transport>(state: AppState<T>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page::<T>))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations::<T>))
        .route("/api/predictions", get(predictions::<T>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run one board lookup under the request deadline.
async fn board_view<T: Transport>(state: &AppState<T>, selection: Option<&str>) -> BoardView {
    match tokio::time::timeout(state.deadline, state.board.show(selection)).await {
        Ok(view) => view,
        Err(_) => {
            warn!(?selection, deadline = ?state.deadline, "prediction lookup timed out");
            BoardView::Unavailable {
                station: selection.unwrap_or_default().to_string(),
                reason: format!("no response within {:?}", state.deadline),
            }
        }
    }
}

/// Dashboard page. Shows predictions for `?station=` when present.
async fn index_page<T: Transport>(
    State(state): State<AppState<T>>,
    Query(query): Query<BoardQuery>,
) -> Result<Response, AppError> {
    let selection = query.station.as_deref();
    let view = board_view(&state, selection).await;

    let updated_at = Local::now().format("%H:%M:%S").to_string();
    let panel = BoardPanel::from_view(&view, updated_at);
    let template = IndexTemplate::new(state.board.catalog(), selection, panel);

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html).into_response())
}

/// Station names for the selector.
async fn list_stations<T: Transport>(State(state): State<AppState<T>>) -> Json<StationsResponse> {
    let catalog = state.board.catalog();

    Json(StationsResponse {
        placeholder: catalog.placeholder().to_string(),
        stations: catalog.names().map(str::to_string).collect(),
    })
}

/// Predictions for `?station=` as JSON.
async fn predictions<T: Transport>(
    State(state): State<AppState<T>>,
    Query(query): Query<BoardQuery>,
) -> Response {
    let view = board_view(&state, query.station.as_deref()).await;
    (status_for(&view), Json(BoardResponse::from(view))).into_response()
}

/// HTTP status for a board view.
fn status_for(view: &BoardView) -> StatusCode {
    match view {
        BoardView::UnknownStation { .. } => StatusCode::BAD_REQUEST,
        BoardView::Unavailable { .. } | BoardView::Malformed { .. } => StatusCode::BAD_GATEWAY,
        BoardView::Prompt | BoardView::NoPredictions { .. } | BoardView::Arrivals { .. } => {
            StatusCode::OK
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
