use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::AppError;
use crate::api::response::ApiResponse;
use crate::entities::images;
use crate::repository;
use crate::validation::sanitize_string;

#[derive(Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub product_id: String,
    pub url: String,
    pub position: i32,
}

impl From<images::Model> for ImageResponse {
    fn from(image: images::Model) -> Self {
        Self {
            id: image.id,
            name: image.name,
            description: image.description,
            product_id: image.product_id,
            url: image.url,
            position: image.position,
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/images/{product_id}",
    tag = "images",
    security(("jwt" = [])),
    params(("product_id" = String, Path, description = "Owning product id")),
    responses(
        (status = 200, description = "Gallery of the product, in order"),
        (status = 401, description = "Missing token")
    )
)]
pub async fn list_images(
    State(state): State<crate::AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let images = repository::images::list_by_product(&state.db, &product_id).await?;
    let data: Vec<ImageResponse> = images.into_iter().map(ImageResponse::from).collect();
    Ok(Json(ApiResponse::with_data(
        "Images retrieved successfully",
        data,
    )))
}

/// Multi-step, non-transactional: parent lookup, upload to object storage,
/// image row insert. A failure after the upload leaves the blob behind; there
/// is no compensating rollback.
#[utoipa::path(
    post,
    path = "/v1/images/create",
    tag = "images",
    security(("jwt" = [])),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image registered successfully", body = ImageResponse),
        (status = 400, description = "Missing multipart parts"),
        (status = 404, description = "Owning product not found"),
        (status = 500, description = "Upload or persistence failure")
    )
)]
pub async fn create_image(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name = None;
    let mut description = None;
    let mut product_id = None;
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|_| AppError::Validation {
        message: "Invalid multipart payload".to_string(),
        errors: Vec::new(),
    })? {
        match field.name().unwrap_or_default() {
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to read field: {e}")))?;
                name = Some(sanitize_string(&text));
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to read field: {e}")))?;
                description = Some(sanitize_string(&text));
            }
            "productId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to read field: {e}")))?;
                product_id = Some(text.trim().to_string());
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to read upload: {e}")))?;
                file = Some((data.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let mut errors = Vec::new();
    if name.is_none() {
        errors.push("The name field is required".to_string());
    }
    if description.is_none() {
        errors.push("The description field is required".to_string());
    }
    if product_id.is_none() {
        errors.push("The productId field is required".to_string());
    }
    if file.is_none() {
        errors.push("The file field is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation {
            message: "Error in data sent for image creation".to_string(),
            errors,
        });
    }

    let (name, description, product_id) =
        (name.unwrap(), description.unwrap(), product_id.unwrap());
    let (data, content_type) = file.unwrap();

    let product = repository::products::find_active_by_id(&state.db, &product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let key = format!("uploads/{}", name);
    let url = state
        .storage
        .upload(&key, data, &content_type)
        .await
        .map_err(|e| AppError::Internal(format!("upload failed: {e}")))?;

    let image = repository::images::insert(
        &state.db,
        repository::images::NewImage {
            name,
            description,
            product_id: product.id,
            url,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            "Image registered successfully",
            ImageResponse::from(image),
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/v1/images/delete/{id}",
    tag = "images",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image hard-deleted, gallery entry removed"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Image not found")
    )
)]
pub async fn delete_image(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let image = repository::images::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    repository::images::delete(&state.db, image).await?;

    Ok(Json(ApiResponse::ok("Image deleted successfully")))
}
