use sea_orm::DatabaseConnection;
use serde_json::Value;
use validator::ValidateEmail;

use super::{required_bool, required_string};
use crate::api::error::AppError;
use crate::repository;

pub struct UserCreateInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct UserUpdateInput {
    pub name: String,
    pub email: String,
}

/// The password goes straight into the hash and is never rendered, so it is
/// taken exactly as sent. Trimming or escaping it here would break the raw
/// comparison at login.
fn take_password(payload: &Value, errors: &mut Vec<String>) -> Option<String> {
    match payload.get("password") {
        None | Some(Value::Null) => {
            errors.push("The password field is required".to_string());
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push("The password must be a string".to_string());
            None
        }
    }
}

/// The e-mail is trimmed but not escaped; escaping would corrupt a valid
/// address before the syntax check.
fn take_email(payload: &Value, errors: &mut Vec<String>) -> Option<String> {
    match payload.get("email") {
        None | Some(Value::Null) => {
            errors.push("The e-mail field is required".to_string());
            None
        }
        Some(Value::String(s)) => {
            let email = s.trim().to_string();
            if email.validate_email() {
                Some(email)
            } else {
                errors.push("Invalid e-mail".to_string());
                None
            }
        }
        Some(_) => {
            errors.push("The e-mail must be a string".to_string());
            None
        }
    }
}

pub async fn validate_create(
    db: &DatabaseConnection,
    payload: &Value,
) -> Result<UserCreateInput, AppError> {
    let mut errors = Vec::new();

    let name = required_string(payload, "name", "name", &mut errors);
    let email = take_email(payload, &mut errors);
    let password = take_password(payload, &mut errors);

    if let Some(email) = &email {
        if repository::users::find_active_by_email(db, email).await?.is_some() {
            errors.push("An user with this e-mail was found".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation {
            message: "Error in data sent for user creation".to_string(),
            errors,
        });
    }

    Ok(UserCreateInput {
        name: name.unwrap(),
        email: email.unwrap(),
        password: password.unwrap(),
    })
}

/// Uniqueness excludes the record being updated.
pub async fn validate_update(
    db: &DatabaseConnection,
    payload: &Value,
    target_id: &str,
) -> Result<UserUpdateInput, AppError> {
    let mut errors = Vec::new();

    let name = required_string(payload, "name", "name", &mut errors);
    let email = take_email(payload, &mut errors);

    if let Some(email) = &email {
        if let Some(existing) = repository::users::find_active_by_email(db, email).await? {
            if existing.id != target_id {
                errors.push("An user with this e-mail was found".to_string());
            }
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation {
            message: "Error in data sent for user update".to_string(),
            errors,
        });
    }

    Ok(UserUpdateInput {
        name: name.unwrap(),
        email: email.unwrap(),
    })
}

pub fn validate_password(payload: &Value) -> Result<String, AppError> {
    let mut errors = Vec::new();
    let password = take_password(payload, &mut errors);

    match password {
        Some(password) if errors.is_empty() => Ok(password),
        _ => Err(AppError::Validation {
            message: "Error in data sent for change password".to_string(),
            errors,
        }),
    }
}

pub fn validate_admin_flag(payload: &Value) -> Result<bool, AppError> {
    let mut errors = Vec::new();
    let admin = required_bool(payload, "admin", "admin", &mut errors);

    match admin {
        Some(admin) if errors.is_empty() => Ok(admin),
        _ => Err(AppError::Validation {
            message: "Error in data sent for change admin".to_string(),
            errors,
        }),
    }
}
