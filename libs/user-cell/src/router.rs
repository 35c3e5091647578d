use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::UserService;

pub fn user_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/personal-info",
            get(handlers::get_personal_info).put(handlers::update_personal_info),
        )
        .route(
            "/patient/personal-info",
            get(handlers::get_patient_personal_info).put(handlers::update_patient_personal_info),
        )
        .route(
            "/doctor/professional-info",
            get(handlers::get_professional_info).put(handlers::update_professional_info),
        )
        .route(
            "/doctor/work-schedule",
            get(handlers::get_work_schedule).put(handlers::update_work_schedule),
        )
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(Arc::new(UserService::new(&config)))
}
