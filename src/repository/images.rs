use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::entities::{images, prelude::*};

pub struct NewImage {
    pub name: String,
    pub description: String,
    pub product_id: String,
    pub url: String,
}

/// The product's gallery, in insertion order.
pub async fn list_by_product(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Vec<images::Model>, AppError> {
    let images = Images::find()
        .filter(images::Column::ProductId.eq(product_id))
        .order_by_asc(images::Column::Position)
        .all(db)
        .await?;
    Ok(images)
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<images::Model>, AppError> {
    Ok(Images::find_by_id(id).one(db).await?)
}

/// Appends to the owning product's gallery after the highest occupied
/// position. A hard delete leaves a gap; positions are never reused, so the
/// insertion order stays total.
pub async fn insert(db: &DatabaseConnection, new: NewImage) -> Result<images::Model, AppError> {
    let last_position = Images::find()
        .filter(images::Column::ProductId.eq(new.product_id.as_str()))
        .order_by_desc(images::Column::Position)
        .one(db)
        .await?
        .map(|image| image.position)
        .unwrap_or(0);

    let image = images::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(new.name),
        description: Set(new.description),
        product_id: Set(new.product_id),
        url: Set(new.url),
        position: Set(last_position + 1),
    };
    image
        .insert(db)
        .await
        .map_err(|e| super::map_insert_err(e, "image"))
}

/// Hard delete. The gallery is derived from this table, so the reference
/// disappears with the row.
pub async fn delete(db: &DatabaseConnection, image: images::Model) -> Result<(), AppError> {
    image.delete(db).await?;
    Ok(())
}
