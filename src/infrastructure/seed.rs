use sea_orm::DatabaseConnection;
use std::env;
use tracing::info;

use crate::repository;
use crate::utils::hash::hash_password;

/// Creates a bootstrap admin account from ADMIN_EMAIL / ADMIN_PASSWORD if one
/// does not already exist. Without it a fresh deployment has no way to reach
/// the admin-gated product endpoints.
pub async fn seed_initial_admin(db: &DatabaseConnection) -> anyhow::Result<()> {
    let (Ok(email), Ok(password)) = (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) else {
        return Ok(());
    };

    if repository::users::find_active_by_email(db, &email)
        .await
        .map_err(|e| anyhow::anyhow!("admin seed lookup failed: {e}"))?
        .is_some()
    {
        return Ok(());
    }

    let name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());
    repository::users::insert(
        db,
        repository::users::NewUser {
            name,
            email: email.clone(),
            password_hash: hash_password(&password)?,
            admin: true,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("admin seed insert failed: {e}"))?;

    info!("👤 Seeded initial admin account: {}", email);
    Ok(())
}
