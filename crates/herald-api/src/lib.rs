pub mod error;
pub mod panel;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use herald_panel::Composer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub composer: Composer,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/panel/draft", get(panel::get_draft).patch(panel::update_draft))
        .route("/panel/submit", post(panel::submit))
        .route("/panel/quick-push/{category}", post(panel::quick_push))
        .route("/panel/close", post(panel::close))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
