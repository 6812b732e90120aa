use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::AppError;
use crate::api::response::ApiResponse;
use crate::repository;
use crate::utils::auth::create_jwt;
use crate::utils::hash::verify_password;

#[derive(Deserialize, ToSchema)]
pub struct GenerateTokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/v1/auth/generate-token",
    request_body = GenerateTokenRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Token generated successfully", body = TokenResponse),
        (status = 400, description = "Wrong password"),
        (status = 404, description = "No active user with this e-mail")
    )
)]
pub async fn generate_token(
    State(state): State<crate::AppState>,
    Json(payload): Json<GenerateTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.unwrap_or_default();
    let user = repository::users::find_active_by_email(&state.db, email.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found with this e-mail".to_string()))?;

    let password = payload.password.unwrap_or_default();
    if !verify_password(&password, &user.password_hash) {
        return Err(AppError::Validation {
            message: "User credentials are incorrect".to_string(),
            errors: Vec::new(),
        });
    }

    let token = create_jwt(&user, &state.config.jwt_secret, state.config.token_ttl_secs)
        .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;

    Ok(Json(ApiResponse::with_data(
        "Token generated successfully",
        TokenResponse { token },
    )))
}
