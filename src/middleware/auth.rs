use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{dto::auth::Claims, entity::users::Role, error::AppError, state::AppState};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

/// Resolve the caller from an `Authorization` header value.
pub fn authenticate(auth_header: Option<&str>, secret: &str) -> Result<AuthUser, AppError> {
    let auth_str = auth_header
        .ok_or_else(|| AppError::Unauthenticated("No token provided".into()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("No token provided".into()))?;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated("Invalid token".into()))?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthenticated("Invalid token".into()))?;

    Ok(AuthUser {
        user_id,
        email: decoded.claims.email,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::Unauthenticated("Invalid Authorization header".into())
            })?),
            None => None,
        };

        authenticate(auth_header, &state.config.jwt_secret)
    }
}
