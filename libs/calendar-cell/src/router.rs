// libs/calendar-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, CalendarContext};
use crate::services::{CalendarService, FileFilterStore, FilterStore};

pub fn calendar_routes(config: Arc<AppConfig>) -> Router {
    let store = Arc::new(FileFilterStore::new(config.filter_store_dir.clone()));
    calendar_routes_with_store(config, store)
}

pub fn calendar_routes_with_store(config: Arc<AppConfig>, store: Arc<dyn FilterStore>) -> Router {
    let context = CalendarContext {
        calendar: Arc::new(CalendarService::new(&config)),
        filters: store,
    };

    Router::new()
        .route("/", get(handlers::get_calendar))
        .route("/filters", get(handlers::get_filters).put(handlers::update_filters))
        .route("/filters/{kind}/toggle", post(handlers::toggle_filter))
        .route("/appointments/{appointment_id}", get(handlers::get_appointment_detail))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(context)
}
