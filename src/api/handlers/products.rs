use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::error::AppError;
use crate::api::handlers::images::ImageResponse;
use crate::api::response::ApiResponse;
use crate::entities::products;
use crate::repository;
use crate::validation;

#[derive(Serialize, ToSchema)]
pub struct DimensionsResponse {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct AttributesResponse {
    pub color: Option<String>,
    pub material: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    pub discount: f64,
    pub stock: i32,
    pub sku: String,
    pub weight: Option<f64>,
    pub dimensions: DimensionsResponse,
    pub attributes: AttributesResponse,
    /// Ordered gallery of the product's images.
    pub gallery: Vec<ImageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    fn new(product: products::Model, gallery: Vec<ImageResponse>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            category: product.category,
            brand: product.brand,
            price: product.price,
            discount: product.discount,
            stock: product.stock,
            sku: product.sku,
            weight: product.weight,
            dimensions: DimensionsResponse {
                height: product.height,
                width: product.width,
                depth: product.depth,
            },
            attributes: AttributesResponse {
                color: product.color,
                material: product.material,
            },
            gallery,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

async fn with_gallery(
    db: &DatabaseConnection,
    product: products::Model,
) -> Result<ProductResponse, AppError> {
    let gallery = repository::images::list_by_product(db, &product.id)
        .await?
        .into_iter()
        .map(ImageResponse::from)
        .collect();
    Ok(ProductResponse::new(product, gallery))
}

#[utoipa::path(
    get,
    path = "/v1/products",
    tag = "products",
    security(("jwt" = [])),
    responses(
        (status = 200, description = "Active products with their galleries"),
        (status = 401, description = "Missing token")
    )
)]
pub async fn list_products(
    State(state): State<crate::AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = repository::products::list_active(&state.db).await?;

    let mut data = Vec::with_capacity(products.len());
    for product in products {
        data.push(with_gallery(&state.db, product).await?);
    }

    Ok(Json(ApiResponse::with_data(
        "Products retrieved successfully",
        data,
    )))
}

#[utoipa::path(
    get,
    path = "/v1/products/{id}",
    tag = "products",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found or soft-deleted")
    )
)]
pub async fn get_product(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = repository::products::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(ApiResponse::with_data(
        "Product retrieved successfully",
        with_gallery(&state.db, product).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/v1/products/create",
    tag = "products",
    security(("jwt" = [])),
    responses(
        (status = 201, description = "Product registered successfully", body = ProductResponse),
        (status = 400, description = "Validation failure, all violations listed"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Sku conflict at store level")
    )
)]
pub async fn create_product(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::products::validate(&state.db, &payload, None).await?;
    let product = repository::products::insert(&state.db, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            "Product registered successfully",
            ProductResponse::new(product, Vec::new()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/v1/products/update/{id}",
    tag = "products",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    // Sku uniqueness excludes the product being updated.
    let input = validation::products::validate(&state.db, &payload, Some(&id)).await?;

    let product = repository::products::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let product = repository::products::update(&state.db, product, input).await?;

    Ok(Json(ApiResponse::with_data(
        "Product updated successfully",
        with_gallery(&state.db, product).await?,
    )))
}

#[utoipa::path(
    delete,
    path = "/v1/products/delete/{id}",
    tag = "products",
    security(("jwt" = [])),
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product soft-deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = repository::products::find_active_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    repository::products::soft_delete(&state.db, product).await?;

    Ok(Json(ApiResponse::ok("Product deleted successfully")))
}
