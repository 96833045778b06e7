pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::sessions::handlers as sessions;
use crate::state::AppState;
use crate::tools::handlers as tools;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tools", get(tools::handle_list_tools))
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", delete(sessions::handle_delete_session))
        .route(
            "/api/v1/sessions/:id/tools/:tool",
            post(tools::handle_invoke_tool),
        )
        .route("/api/v1/resume/pdf", post(tools::handle_resume_pdf))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
