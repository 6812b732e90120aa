use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::{optional_number, optional_string, required_number, required_string};
use crate::api::error::AppError;
use crate::repository;

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionsInput {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributesInput {
    pub color: Option<String>,
    pub material: Option<String>,
}

/// Typed, sanitized product payload. Optional fields that were absent from
/// the request stay `None`; on update that means "leave unchanged".
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    pub discount: Option<f64>,
    pub stock: i32,
    pub sku: String,
    pub weight: Option<f64>,
    pub dimensions: Option<DimensionsInput>,
    pub attributes: Option<AttributesInput>,
}

#[derive(Default)]
struct ProductFields {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    price: Option<f64>,
    discount: Option<f64>,
    stock: Option<f64>,
    sku: Option<String>,
    weight: Option<f64>,
    dimensions: Option<DimensionsInput>,
    attributes: Option<AttributesInput>,
}

/// Pure pass over the payload: presence and type checks for every field,
/// collecting every failure. Unknown sub-fields of dimensions/attributes are
/// ignored.
fn collect(payload: &Value) -> (ProductFields, Vec<String>) {
    let mut errors = Vec::new();
    let mut fields = ProductFields {
        name: required_string(payload, "name", "product name", &mut errors),
        description: required_string(payload, "description", "product description", &mut errors),
        price: required_number(payload, "price", "product price", &mut errors),
        category: optional_string(payload, "category", "product category", &mut errors),
        brand: optional_string(payload, "brand", "product brand", &mut errors),
        discount: optional_number(payload, "discount", "product discount", &mut errors),
        weight: optional_number(payload, "weight", "product weight", &mut errors),
        ..Default::default()
    };

    // Stock is a unit count and is stored as i32; a fractional or
    // out-of-range number must not silently truncate.
    fields.stock = match required_number(payload, "stock", "product stock", &mut errors) {
        Some(stock)
            if stock.fract() == 0.0
                && stock >= i32::MIN as f64
                && stock <= i32::MAX as f64 =>
        {
            Some(stock)
        }
        Some(_) => {
            errors.push("The product stock must be an integer".to_string());
            None
        }
        None => None,
    };

    // Sku is an identifier: trimmed but not escaped, so the uniqueness check
    // compares what the client actually sent.
    fields.sku = match payload.get("sku") {
        None | Some(Value::Null) => {
            errors.push("The product sku field is required".to_string());
            None
        }
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push("The product sku must be a string".to_string());
            None
        }
    };

    fields.dimensions = match payload.get("dimensions") {
        None => None,
        Some(Value::Object(obj)) => {
            let dims = Value::Object(obj.clone());
            Some(DimensionsInput {
                height: optional_number(&dims, "height", "product height", &mut errors),
                width: optional_number(&dims, "width", "product width", &mut errors),
                depth: optional_number(&dims, "depth", "product depth", &mut errors),
            })
        }
        Some(_) => {
            errors.push(
                "The product dimensions must be an object (height, width, depth)".to_string(),
            );
            None
        }
    };

    fields.attributes = match payload.get("attributes") {
        None => None,
        Some(Value::Object(obj)) => {
            let attrs = Value::Object(obj.clone());
            Some(AttributesInput {
                color: optional_string(&attrs, "color", "product color", &mut errors),
                material: optional_string(&attrs, "material", "product material", &mut errors),
            })
        }
        Some(_) => {
            errors.push("The product attributes must be an object (color, material)".to_string());
            None
        }
    };

    (fields, errors)
}

/// Full rule set: field checks plus the sku uniqueness lookup against active
/// products. `exclude_id` is the product being updated, whose own sku must
/// not count as a conflict.
pub async fn validate(
    db: &DatabaseConnection,
    payload: &Value,
    exclude_id: Option<&str>,
) -> Result<ProductInput, AppError> {
    let (fields, mut errors) = collect(payload);

    if let Some(sku) = &fields.sku {
        if repository::products::find_active_by_sku(db, sku, exclude_id)
            .await?
            .is_some()
        {
            errors.push("A product with this sku was already created".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation {
            message: "Errors in product data sent".to_string(),
            errors,
        });
    }

    Ok(ProductInput {
        name: fields.name.unwrap(),
        description: fields.description.unwrap(),
        category: fields.category,
        brand: fields.brand,
        price: fields.price.unwrap(),
        discount: fields.discount,
        stock: fields.stock.unwrap() as i32,
        sku: fields.sku.unwrap(),
        weight: fields.weight,
        dimensions: fields.dimensions,
        attributes: fields.attributes,
    })
}
