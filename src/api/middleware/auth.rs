use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::error::AppError;
use crate::utils::auth::{Claims, validate_jwt};

/// Authentication guard: extracts the bearer token, verifies it and attaches
/// the claims to the request for downstream handlers. A missing header is a
/// 401; a present but invalid or expired token is a 403.
pub async fn auth_middleware(
    State(state): State<crate::AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .ok_or(AppError::MissingToken)?;

    let claims = validate_jwt(&token, &state.config.jwt_secret)
        .map_err(|_| AppError::InvalidToken)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Admin guard, layered inside `auth_middleware` on privileged routes.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AppError::MissingToken)?;

    if !claims.admin {
        return Err(AppError::Forbidden(
            "You don't have the permission to make this action".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
