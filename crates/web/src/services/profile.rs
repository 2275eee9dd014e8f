//! Profile edits.

use sqlx::SqlitePool;
use thiserror::Error;

use bistro_core::{Email, EmailError};

use super::auth::hash_password;
use crate::db::RepositoryError;
use crate::db::users::{ProfileUpdate, UserRepository};
use crate::models::User;

/// Errors updating a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The new email belongs to another account.
    #[error("email already in use")]
    EmailTaken,

    #[error("password hashing error")]
    PasswordHash,

    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ProfileError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::EmailTaken,
            other => Self::Repository(other),
        }
    }
}

/// Requested profile changes, as submitted.
#[derive(Debug, Clone, Copy)]
pub struct ProfileChanges<'a> {
    pub fullname: &'a str,
    pub email: &'a str,
    /// Empty means "keep the current password".
    pub password: &'a str,
}

/// Profile service.
pub struct ProfileService<'a> {
    users: UserRepository<'a>,
}

impl<'a> ProfileService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Apply profile changes for `user`.
    ///
    /// The full name is always replaced. The email changes only when it
    /// differs from the current one, and the password only when a new one is
    /// given. Everything commits together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmailTaken` if another account uses the new
    /// email; the user is left unchanged.
    pub async fn update(
        &self,
        user: &User,
        changes: ProfileChanges<'_>,
    ) -> Result<User, ProfileError> {
        let email = Email::parse(changes.email)?;
        let new_email = (email != user.email).then_some(&email);

        if let Some(new_email) = new_email
            && self.users.email_taken_by_other(new_email, user.id).await?
        {
            return Err(ProfileError::EmailTaken);
        }

        let password_hash = if changes.password.is_empty() {
            None
        } else {
            Some(hash_password(changes.password).map_err(|_| ProfileError::PasswordHash)?)
        };

        let updated = self
            .users
            .update_profile(
                user.id,
                ProfileUpdate {
                    fullname: changes.fullname.trim(),
                    email: new_email,
                    password_hash: password_hash.as_deref(),
                },
            )
            .await?;

        tracing::info!(
            user_id = %user.id,
            email_changed = new_email.is_some(),
            password_changed = password_hash.is_some(),
            "Profile updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth::AuthService;

    async fn signup(pool: &SqlitePool, name: &str, email: &str, password: &str) -> User {
        AuthService::new(pool, None)
            .signup(name, email, password)
            .await
            .unwrap()
            .into_user()
    }

    #[tokio::test]
    async fn test_update_name_and_email() {
        let pool = test_pool().await;
        let alice = signup(&pool, "Alice", "alice@example.com", "pw").await;

        let updated = ProfileService::new(&pool)
            .update(
                &alice,
                ProfileChanges {
                    fullname: "Alice Smith",
                    email: "alice.smith@example.com",
                    password: "",
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.fullname, "Alice Smith");
        assert_eq!(updated.email.as_str(), "alice.smith@example.com");

        // Password unchanged.
        let auth = AuthService::new(&pool, None);
        assert!(auth.login("alice.smith@example.com", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_password() {
        let pool = test_pool().await;
        let alice = signup(&pool, "Alice", "alice@example.com", "old").await;

        ProfileService::new(&pool)
            .update(
                &alice,
                ProfileChanges {
                    fullname: "Alice",
                    email: "alice@example.com",
                    password: "new",
                },
            )
            .await
            .unwrap();

        let auth = AuthService::new(&pool, None);
        assert!(auth.login("alice@example.com", "old").await.is_err());
        assert!(auth.login("alice@example.com", "new").await.is_ok());
    }

    #[tokio::test]
    async fn test_email_collision_leaves_user_unchanged() {
        let pool = test_pool().await;
        let alice = signup(&pool, "Alice", "alice@example.com", "pw").await;
        signup(&pool, "Bob", "bob@example.com", "pw").await;

        let err = ProfileService::new(&pool)
            .update(
                &alice,
                ProfileChanges {
                    fullname: "Mallory",
                    email: "bob@example.com",
                    password: "changed",
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::EmailTaken));

        let reloaded = UserRepository::new(&pool)
            .get_by_id(alice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.email.as_str(), "alice@example.com");
        assert_eq!(reloaded.fullname, "Alice");
        assert!(
            AuthService::new(&pool, None)
                .login("alice@example.com", "pw")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let pool = test_pool().await;
        let alice = signup(&pool, "Alice", "alice@example.com", "pw").await;

        let err = ProfileService::new(&pool)
            .update(
                &alice,
                ProfileChanges {
                    fullname: "Alice",
                    email: "alice-at-example",
                    password: "",
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidEmail(_)));
    }
}
