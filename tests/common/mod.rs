#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_commerce_backend::config::AppConfig;
use rust_commerce_backend::entities::users;
use rust_commerce_backend::infrastructure::database::run_migrations;
use rust_commerce_backend::repository;
use rust_commerce_backend::services::storage::StorageService;
use rust_commerce_backend::utils::auth::create_jwt;
use rust_commerce_backend::utils::hash::hash_password;
use rust_commerce_backend::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret";

/// In-memory stand-in for the object store.
pub struct MemoryStorage {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> anyhow::Result<String> {
        self.files.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("http://storage.local/test-bucket/{}", key))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
        max_upload_size: 10 * 1024 * 1024,
    }
}

pub async fn setup_app() -> (Router, DatabaseConnection, Arc<MemoryStorage>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    run_migrations(&db).await.unwrap();

    let storage = Arc::new(MemoryStorage::new());
    let storage_dyn: Arc<dyn StorageService> = storage.clone();

    let state = AppState {
        db: db.clone(),
        storage: storage_dyn,
        config: test_config(),
    };

    (create_app(state), db, storage)
}

pub async fn seed_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    admin: bool,
) -> users::Model {
    repository::users::insert(
        db,
        repository::users::NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            admin,
        },
    )
    .await
    .unwrap()
}

pub fn token_for(user: &users::Model) -> String {
    create_jwt(user, TEST_SECRET, 3600).unwrap()
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Builds a multipart/form-data body with text fields and one file part.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

pub async fn multipart_request(
    app: &Router,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> (StatusCode, Value) {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let body = multipart_body(boundary, fields, file);

    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
