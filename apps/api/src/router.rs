use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use auth_cell::router::auth_routes;
use calendar_cell::router::calendar_routes;
use medical_report_cell::router::medical_report_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic calendar API is running!" }))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/calendar", calendar_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/medical-reports", medical_report_routes(state))
}
