use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::auth::{User, UserRole};
use shared_models::error::AppError;

use crate::jwt::validate_token;

pub fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// Validates the bearer token and stores the caller in request extensions
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_value = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    let token = bearer_token(auth_value)
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    let user = validate_token(token, &config.jwt_secret)
        .map_err(|e| AppError::Auth(e.to_string()))?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Resolves the caller's calendar role, rejecting roles the calendar does not serve.
pub fn require_calendar_role(user: &User) -> Result<UserRole, AppError> {
    user.calendar_role().ok_or_else(|| {
        AppError::Forbidden(format!(
            "Role {} cannot access the calendar",
            user.role.as_deref().unwrap_or("none")
        ))
    })
}

pub fn require_role(user: &User, expected: UserRole) -> Result<(), AppError> {
    match require_calendar_role(user)? {
        role if role == expected => Ok(()),
        role => Err(AppError::Forbidden(format!(
            "This action requires the {} role, caller is {}",
            expected, role
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestUser;
    use assert_matches::assert_matches;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_require_role() {
        let doctor = TestUser::doctor("d@example.com").to_user();
        let admin = TestUser::new("a@example.com", "admin").to_user();

        assert!(require_role(&doctor, UserRole::Doctor).is_ok());
        assert_matches!(require_role(&doctor, UserRole::Patient), Err(AppError::Forbidden(_)));
        assert_matches!(require_calendar_role(&admin), Err(AppError::Forbidden(_)));
    }
}
