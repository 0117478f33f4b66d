use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route(
            "/api/habits/:id",
            patch(handlers::update_habit).delete(handlers::delete_habit),
        )
        .route("/api/completions", get(handlers::list_completions))
        .route("/api/completions/toggle", post(handlers::toggle_completion))
        .route("/api/mental-state", post(handlers::set_mental_state))
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/export", get(handlers::export_data))
        .with_state(state)
}
