pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod repository;
pub mod services;
pub mod utils;
pub mod validation;

use crate::config::AppConfig;
use crate::services::storage::StorageService;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::generate_token,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::create_user,
        api::handlers::users::update_user,
        api::handlers::users::change_password,
        api::handlers::users::change_admin,
        api::handlers::users::delete_user,
        api::handlers::products::list_products,
        api::handlers::products::get_product,
        api::handlers::products::create_product,
        api::handlers::products::update_product,
        api::handlers::products::delete_product,
        api::handlers::images::list_images,
        api::handlers::images::create_image,
        api::handlers::images::delete_image,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::auth::GenerateTokenRequest,
            api::handlers::auth::TokenResponse,
            api::handlers::users::UserResponse,
            api::handlers::products::ProductResponse,
            api::handlers::products::DimensionsResponse,
            api::handlers::products::AttributesResponse,
            api::handlers::images::ImageResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "users", description = "User management"),
        (name = "products", description = "Product catalog"),
        (name = "images", description = "Product gallery images")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    use api::handlers::{auth, health, images, products, users};
    use api::middleware::auth::{auth_middleware, require_admin};

    let authed = |state: &AppState| from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/v1/auth/generate-token", post(auth::generate_token))
        .route("/v1/users/create", post(users::create_user))
        .route(
            "/v1/users",
            get(users::list_users).layer(authed(&state)),
        )
        .route(
            "/v1/users/:id",
            get(users::get_user).layer(authed(&state)),
        )
        .route(
            "/v1/users/update/:id",
            put(users::update_user).layer(authed(&state)),
        )
        .route(
            "/v1/users/change-password/:id",
            put(users::change_password).layer(authed(&state)),
        )
        .route(
            "/v1/users/change-admin/:id",
            put(users::change_admin)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .route(
            "/v1/users/delete/:id",
            delete(users::delete_user)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .route(
            "/v1/products",
            get(products::list_products).layer(authed(&state)),
        )
        .route(
            "/v1/products/:id",
            get(products::get_product).layer(authed(&state)),
        )
        .route(
            "/v1/products/create",
            post(products::create_product)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .route(
            "/v1/products/update/:id",
            put(products::update_product)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .route(
            "/v1/products/delete/:id",
            delete(products::delete_product)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .route(
            "/v1/images/:product_id",
            get(images::list_images).layer(authed(&state)),
        )
        .route(
            "/v1/images/create",
            post(images::create_image)
                .layer(axum::extract::DefaultBodyLimit::max(
                    state.config.max_upload_size + 1024 * 1024, // multipart overhead
                ))
                .layer(authed(&state)),
        )
        .route(
            "/v1/images/delete/:id",
            delete(images::delete_image)
                .layer(from_fn(require_admin))
                .layer(authed(&state)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
