pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .patch(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route("/api/resumes/:id/pdf", get(resumes::handle_download_pdf))
        .route("/api/resumes/:id/preview", get(resumes::handle_preview_pdf))
        .route("/api/resumes/:id/layout", get(resumes::handle_layout))
        // Generation API
        .route(
            "/api/generate-resume",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/suggestions/skills",
            post(generation::handle_suggest_skills),
        )
        .route(
            "/api/suggestions/summary",
            post(generation::handle_suggest_summary),
        )
        .with_state(state)
}
