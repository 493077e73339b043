//! Route handlers

pub mod health;
pub mod task;
pub mod upload;

use axum::{extract::DefaultBodyLimit, Router};

use crate::state::AppState;

/// Request body cap, for both JSON and multipart bodies
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// All routes with their state attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .merge(task::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
