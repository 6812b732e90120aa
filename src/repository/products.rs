use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::entities::{prelude::*, products};
use crate::validation::products::ProductInput;

pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<products::Model>, AppError> {
    let products = Products::find()
        .filter(products::Column::DeletedAt.is_null())
        .order_by_asc(products::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(products)
}

pub async fn find_active_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<products::Model>, AppError> {
    let product = Products::find_by_id(id)
        .filter(products::Column::DeletedAt.is_null())
        .one(db)
        .await?;
    Ok(product)
}

/// Sku uniqueness is scoped to active products: a soft-deleted product does
/// not block reuse of its sku. `exclude_id` skips the product being updated.
pub async fn find_active_by_sku(
    db: &DatabaseConnection,
    sku: &str,
    exclude_id: Option<&str>,
) -> Result<Option<products::Model>, AppError> {
    let mut query = Products::find()
        .filter(products::Column::Sku.eq(sku))
        .filter(products::Column::DeletedAt.is_null());
    if let Some(id) = exclude_id {
        query = query.filter(products::Column::Id.ne(id));
    }
    Ok(query.one(db).await?)
}

pub async fn insert(
    db: &DatabaseConnection,
    input: ProductInput,
) -> Result<products::Model, AppError> {
    let now = Utc::now();
    let (height, width, depth) = input
        .dimensions
        .map(|d| (d.height, d.width, d.depth))
        .unwrap_or((None, None, None));
    let (color, material) = input
        .attributes
        .map(|a| (a.color, a.material))
        .unwrap_or((None, None));

    let product = products::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name),
        description: Set(input.description),
        category: Set(input.category),
        brand: Set(input.brand),
        price: Set(input.price),
        discount: Set(input.discount.unwrap_or(0.0)),
        stock: Set(input.stock),
        sku: Set(input.sku),
        weight: Set(input.weight),
        height: Set(height),
        width: Set(width),
        depth: Set(depth),
        color: Set(color),
        material: Set(material),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    product
        .insert(db)
        .await
        .map_err(|e| super::map_insert_err(e, "product"))
}

/// Required fields always overwrite; absent optional fields are left
/// unchanged; a provided dimensions/attributes object replaces the whole
/// sub-object.
pub async fn update(
    db: &DatabaseConnection,
    product: products::Model,
    input: ProductInput,
) -> Result<products::Model, AppError> {
    let mut active: products::ActiveModel = product.into();
    active.name = Set(input.name);
    active.description = Set(input.description);
    active.price = Set(input.price);
    active.stock = Set(input.stock);
    active.sku = Set(input.sku);

    if let Some(category) = input.category {
        active.category = Set(Some(category));
    }
    if let Some(brand) = input.brand {
        active.brand = Set(Some(brand));
    }
    if let Some(discount) = input.discount {
        active.discount = Set(discount);
    }
    if let Some(weight) = input.weight {
        active.weight = Set(Some(weight));
    }
    if let Some(dimensions) = input.dimensions {
        active.height = Set(dimensions.height);
        active.width = Set(dimensions.width);
        active.depth = Set(dimensions.depth);
    }
    if let Some(attributes) = input.attributes {
        active.color = Set(attributes.color);
        active.material = Set(attributes.material);
    }

    active.updated_at = Set(Utc::now());
    active
        .update(db)
        .await
        .map_err(|e| super::map_insert_err(e, "product"))
}

pub async fn soft_delete(
    db: &DatabaseConnection,
    product: products::Model,
) -> Result<products::Model, AppError> {
    let now = Utc::now();
    let mut active: products::ActiveModel = product.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    Ok(active.update(db).await?)
}
