use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::entities::{prelude::*, users};

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
}

pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<users::Model>, AppError> {
    let users = Users::find()
        .filter(users::Column::DeletedAt.is_null())
        .order_by_asc(users::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(users)
}

pub async fn find_active_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<users::Model>, AppError> {
    let user = Users::find_by_id(id)
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;
    Ok(user)
}

pub async fn find_active_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    let user = Users::find()
        .filter(users::Column::Email.eq(email))
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;
    Ok(user)
}

pub async fn insert(db: &DatabaseConnection, new: NewUser) -> Result<users::Model, AppError> {
    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(new.name),
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        admin: Set(new.admin),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    user.insert(db).await.map_err(|e| super::map_insert_err(e, "user"))
}

pub async fn update_profile(
    db: &DatabaseConnection,
    user: users::Model,
    name: String,
    email: String,
) -> Result<users::Model, AppError> {
    let mut active: users::ActiveModel = user.into();
    active.name = Set(name);
    active.email = Set(email);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn set_password(
    db: &DatabaseConnection,
    user: users::Model,
    password_hash: String,
) -> Result<users::Model, AppError> {
    let mut active: users::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn set_admin(
    db: &DatabaseConnection,
    user: users::Model,
    admin: bool,
) -> Result<users::Model, AppError> {
    let mut active: users::ActiveModel = user.into();
    active.admin = Set(admin);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Soft delete: the record is retained and excluded from all default reads.
pub async fn soft_delete(
    db: &DatabaseConnection,
    user: users::Model,
) -> Result<users::Model, AppError> {
    let now = Utc::now();
    let mut active: users::ActiveModel = user.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    Ok(active.update(db).await?)
}
