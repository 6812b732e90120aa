use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::error::AppError;
use crate::api::response::ApiResponse;
use crate::entities::users;
use crate::repository;
use crate::utils::auth::Claims;
use crate::utils::hash::hash_password;
use crate::validation;

/// Client-facing user shape. The password hash never leaves the service.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            admin: user.admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    security(("jwt" = [])),
    responses(
        (status = 200, description = "Active users, without password fields"),
        (status = 401, description = "Missing token")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = repository::users::list_active(&state.db).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::with_data(
        "Users retrieved successfully",
        data,
    )))
}

#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "users",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found or soft-deleted")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = repository::users::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::with_data(
        "User retrieved successfully",
        UserResponse::from(user),
    )))
}

#[utoipa::path(
    post,
    path = "/v1/users/create",
    tag = "users",
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation failure, all violations listed")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::users::validate_create(&state.db, &payload).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;

    let user = repository::users::insert(
        &state.db,
        repository::users::NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            admin: false,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            "User registered successfully",
            UserResponse::from(user),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/v1/users/update/{id}",
    tag = "users",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Neither the user themselves nor an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    // Ownership is decided before the payload is looked at: a foreign target
    // is 403 no matter how broken the body is.
    if claims.sub != id && !claims.admin {
        return Err(AppError::Forbidden(
            "To update users you must be an admin".to_string(),
        ));
    }

    let input = validation::users::validate_update(&state.db, &payload, &id).await?;

    let user = repository::users::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let user = repository::users::update_profile(&state.db, user, input.name, input.email).await?;

    Ok(Json(ApiResponse::with_data(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

#[utoipa::path(
    put,
    path = "/v1/users/change-password/{id}",
    tag = "users",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Password changed"),
        (status = 403, description = "Only the user can change their own password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_password(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    // Stricter than self-or-admin on purpose: admins cannot set other
    // people's passwords.
    if claims.sub != id {
        return Err(AppError::Forbidden(
            "Only the user can change his own password".to_string(),
        ));
    }

    let password = validation::users::validate_password(&payload)?;

    let user = repository::users::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;
    repository::users::set_password(&state.db, user, password_hash).await?;

    Ok(Json(ApiResponse::ok("Password changed")))
}

#[utoipa::path(
    put,
    path = "/v1/users/change-admin/{id}",
    tag = "users",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Admin flag changed", body = UserResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_admin(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let admin = validation::users::validate_admin_flag(&payload)?;

    let user = repository::users::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let user = repository::users::set_admin(&state.db, user, admin).await?;

    Ok(Json(ApiResponse::with_data(
        "User admin flag updated",
        UserResponse::from(user),
    )))
}

#[utoipa::path(
    delete,
    path = "/v1/users/delete/{id}",
    tag = "users",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User soft-deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = repository::users::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    repository::users::soft_delete(&state.db, user).await?;

    Ok(Json(ApiResponse::ok("User deleted successfully")))
}
