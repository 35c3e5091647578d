use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::MedicalReportService;

pub fn medical_report_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/{appointment_id}", get(handlers::get_report))
        .route("/{appointment_id}/draft", put(handlers::save_draft))
        .route("/{appointment_id}/complete", post(handlers::complete_report))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(Arc::new(MedicalReportService::new(&config)))
}
