mod common;

use axum::http::StatusCode;
use common::{request, seed_user, setup_app, token_for};
use serde_json::{Value, json};

fn sample_product(sku: &str) -> Value {
    json!({
        "name": "Ceramic Mug",
        "description": "330ml ceramic mug",
        "category": "kitchen",
        "brand": "Acme",
        "price": 12.5,
        "discount": 0.1,
        "stock": 40,
        "sku": sku,
        "weight": 0.3,
        "dimensions": {"height": 9.5, "width": 8.0, "depth": 8.0},
        "attributes": {"color": "white", "material": "ceramic"},
    })
}

#[tokio::test]
async fn test_create_product_requires_admin() {
    let (app, db, _storage) = setup_app().await;
    let user = seed_user(&db, "Ana", "ana@x.com", "secret", false).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&user)),
        Some(sample_product("MUG-1")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You don't have the permission to make this action"
    );
}

#[tokio::test]
async fn test_create_product_full_payload() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&admin)),
        Some(sample_product("MUG-1")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product registered successfully");
    let product = &body["data"];
    assert_eq!(product["sku"], "MUG-1");
    assert_eq!(product["price"], 12.5);
    assert_eq!(product["stock"], 40);
    assert_eq!(product["dimensions"]["height"], 9.5);
    assert_eq!(product["attributes"]["material"], "ceramic");
    assert_eq!(product["gallery"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_product_missing_required_fields() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&admin)),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Errors in product data sent");
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(
        errors,
        vec![
            "The product name field is required",
            "The product description field is required",
            "The product price field is required",
            "The product stock field is required",
            "The product sku field is required",
        ]
    );
}

#[tokio::test]
async fn test_create_product_type_errors_are_collected() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&admin)),
        Some(json!({
            "name": "Mug",
            "description": "d",
            "price": "ten",
            "stock": 5,
            "sku": "MUG-1",
            "dimensions": "big",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e == "The product price must be a number"));
    assert!(
        errors
            .iter()
            .any(|e| e == "The product dimensions must be an object (height, width, depth)")
    );
}

#[tokio::test]
async fn test_create_product_fractional_stock_is_rejected() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let mut payload = sample_product("MUG-1");
    payload["stock"] = json!(5.9);

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&admin)),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e == "The product stock must be an integer")
    );
}

#[tokio::test]
async fn test_duplicate_sku_rejected_then_allowed_after_delete() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;
    let token = token_for(&admin);

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token),
        Some(sample_product("MUG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token),
        Some(sample_product("MUG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e == "A product with this sku was already created")
    );

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/v1/products/delete/{first_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The sku of a soft-deleted product is free for reuse.
    let (status, _) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token),
        Some(sample_product("MUG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_product_keeps_own_sku() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;
    let token = token_for(&admin);

    let (_, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token),
        Some(sample_product("MUG-1")),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Same sku on the same product is not a conflict.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/v1/products/update/{id}"),
        Some(&token),
        Some(json!({
            "name": "Ceramic Mug v2",
            "description": "New description",
            "price": 14.0,
            "stock": 35,
            "sku": "MUG-1",
            "dimensions": {"height": 10.0},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ceramic Mug v2");
    assert_eq!(body["data"]["price"], 14.0);
    // A provided dimensions object replaces the whole sub-object.
    assert_eq!(body["data"]["dimensions"]["height"], 10.0);
    assert!(body["data"]["dimensions"]["width"].is_null());
    // Absent optional fields stay as they were.
    assert_eq!(body["data"]["attributes"]["color"], "white");
    assert_eq!(body["data"]["weight"], 0.3);
}

#[tokio::test]
async fn test_update_product_sku_conflict_with_other_product() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;
    let token = token_for(&admin);

    for sku in ["MUG-1", "MUG-2"] {
        let (status, _) = request(
            &app,
            "POST",
            "/v1/products/create",
            Some(&token),
            Some(sample_product(sku)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = request(&app, "GET", "/v1/products", Some(&token), None).await;
    let second_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["sku"] == "MUG-2")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/v1/products/update/{second_id}"),
        Some(&token),
        Some(sample_product("MUG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e == "A product with this sku was already created")
    );
}

#[tokio::test]
async fn test_update_unknown_product() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let (status, body) = request(
        &app,
        "PUT",
        "/v1/products/update/unknown-id",
        Some(&token_for(&admin)),
        Some(sample_product("MUG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_list_and_get_exclude_soft_deleted() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;
    let user = seed_user(&db, "Ana", "ana@x.com", "secret", false).await;
    let admin_token = token_for(&admin);
    let user_token = token_for(&user);

    let (_, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&admin_token),
        Some(sample_product("MUG-1")),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Reads are open to any authenticated user.
    let (status, _) = request(
        &app,
        "GET",
        &format!("/v1/products/{id}"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Deletes are not.
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/v1/products/delete/{id}"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/v1/products/delete/{id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "GET", "/v1/products", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/v1/products/{id}"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_text_fields_are_sanitized() {
    let (app, db, _storage) = setup_app().await;
    let admin = seed_user(&db, "Root", "root@x.com", "secret", true).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/products/create",
        Some(&token_for(&admin)),
        Some(json!({
            "name": " <Mug> ",
            "description": "a \"nice\" mug",
            "price": 1,
            "stock": 1,
            "sku": " MUG-9 ",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "&lt;Mug&gt;");
    assert_eq!(body["data"]["description"], "a &quot;nice&quot; mug");
    // The sku is trimmed but never escaped.
    assert_eq!(body["data"]["sku"], "MUG-9");
}
