use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::services::AuthService;

#[derive(Clone)]
pub struct AuthContext {
    pub service: Arc<AuthService>,
}

#[axum::debug_handler]
pub async fn get_me(
    State(ctx): State<AuthContext>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting user info for {}", user.id);

    let info = ctx.service.get_user_info(&user.id, auth.token()).await?;

    Ok(Json(json!({
        "user_id": user.id,
        "role": user.role,
        "profile": info
    })))
}

#[axum::debug_handler]
pub async fn logout(
    State(ctx): State<AuthContext>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    ctx.service.logout(&user.id, auth.token()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out"
    })))
}
