pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers::handle_chat;
use crate::roster::handlers::handle_employee_search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/chat", post(handle_chat))
        .route("/employees/search", get(handle_employee_search))
        .with_state(state)
}
