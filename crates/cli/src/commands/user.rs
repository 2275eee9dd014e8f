//! User management commands.

use thiserror::Error;

use bistro_core::UserId;
use bistro_web::config::ConfigError;
use bistro_web::services::auth::{AuthError, AuthService};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database setup error: {0}")]
    Init(#[from] bistro_web::InitError),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create a user with the given credentials.
///
/// Runs pending migrations first, so this works against a fresh database.
/// The bootstrap re-authentication rule does not apply here: an existing
/// email is always an error.
///
/// # Errors
///
/// Returns `UserError::Auth` if the email is invalid or already registered,
/// or the password is empty.
pub async fn create(email: &str, fullname: &str, password: &str) -> Result<UserId, UserError> {
    let config = super::load_config()?;
    let pool = bistro_web::init_database(&config).await?;

    tracing::info!("Creating user: {}", email);
    let registration = AuthService::new(&pool, None)
        .signup(fullname, email, password)
        .await?;

    Ok(registration.user().id)
}
