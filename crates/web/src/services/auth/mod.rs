//! Authentication service.
//!
//! Provides password signup and login backed by the `users` table.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use bistro_core::{Email, UserId};

use crate::config::BootstrapAccount;
use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Result of a signup attempt that let the visitor in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new account was created.
    Created(User),
    /// The bootstrap account signed up again with its own password.
    Reauthenticated(User),
}

impl Registration {
    #[must_use]
    pub const fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Reauthenticated(user) => user,
        }
    }

    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Created(user) | Self::Reauthenticated(user) => user,
        }
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    bootstrap_email: Option<&'a Email>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    ///
    /// `bootstrap_email` names the one account allowed to sign up again
    /// with its existing password.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, bootstrap_email: Option<&'a Email>) -> Self {
        Self {
            users: UserRepository::new(pool),
            bootstrap_email,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered,
    /// unless it is the bootstrap account and the password matches.
    pub async fn signup(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        if let Some((existing, password_hash)) = self.users.get_password_hash(&email).await? {
            if self.is_bootstrap(&email) && verify_password(password, &password_hash).is_ok() {
                return Ok(Registration::Reauthenticated(existing));
            }
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(fullname.trim(), &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(Registration::Created(user))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// malformed, or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_id(user_id).await?)
    }

    /// Create the bootstrap account unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` or `AuthError::PasswordHash` on failure.
    pub async fn ensure_bootstrap_account(
        &self,
        account: &BootstrapAccount,
    ) -> Result<User, AuthError> {
        if let Some(user) = self.users.get_by_email(&account.email).await? {
            return Ok(user);
        }

        let password_hash = hash_password(account.password.expose_secret())?;
        let user = self
            .users
            .create(&account.fullname, &account.email, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Created bootstrap account");
        Ok(user)
    }

    fn is_bootstrap(&self, email: &Email) -> bool {
        self.bootstrap_email == Some(email)
    }
}

/// Validate a password before hashing it.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::WeakPassword("password cannot be empty".to_string()));
    }
    Ok(())
}

/// Hash a password using Argon2id with a random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
