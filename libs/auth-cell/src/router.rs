use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, AuthContext};
use crate::services::AuthService;

pub fn auth_routes(config: Arc<AppConfig>) -> Router {
    let service = Arc::new(AuthService::new(&config));
    auth_routes_with_service(config, service)
}

pub fn auth_routes_with_service(config: Arc<AppConfig>, service: Arc<AuthService>) -> Router {
    let context = AuthContext { service };

    Router::new()
        .route("/me", get(handlers::get_me))
        .route("/logout", post(handlers::logout))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(context)
}
