//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use bistro_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    fullname: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            fullname: row.fullname,
            email: Email::from_stored(row.email),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// Profile changes applied in one transaction.
#[derive(Debug, Clone, Copy)]
pub struct ProfileUpdate<'a> {
    pub fullname: &'a str,
    /// New email, or `None` to keep the current one.
    pub email: Option<&'a Email>,
    /// New password hash, or `None` to keep the current one.
    pub password_hash: Option<&'a str>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, fullname, email, created_at
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, fullname, email, created_at
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user together with their password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r"
            SELECT id, fullname, email, created_at, password_hash
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (User::from(r.user), r.password_hash)))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        fullname: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (fullname, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, fullname, email, created_at
            ",
        )
        .bind(fullname)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email"))?;

        Ok(row.into())
    }

    /// Whether `email` belongs to a user other than `except`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_taken_by_other(
        &self,
        email: &Email,
        except: UserId,
    ) -> Result<bool, RepositoryError> {
        let taken: i64 = sqlx::query_scalar(
            r"
            SELECT EXISTS (SELECT 1 FROM users WHERE email = ? AND id != ?)
            ",
        )
        .bind(email.as_str())
        .bind(except.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(taken != 0)
    }

    /// Apply a profile update atomically and return the updated user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate<'_>,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET fullname = ?,
                email = COALESCE(?, email)
            WHERE id = ?
            RETURNING id, fullname, email, created_at
            ",
        )
        .bind(update.fullname)
        .bind(update.email.map(Email::as_str))
        .bind(id.as_i64())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email"))?
        .ok_or(RepositoryError::NotFound)?;

        if let Some(password_hash) = update.password_hash {
            sqlx::query(
                r"
                UPDATE users
                SET password_hash = ?
                WHERE id = ?
                ",
            )
            .bind(password_hash)
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let created = users
            .create("Alice Doe", &email("alice@example.com"), "hash-a")
            .await
            .unwrap();

        let by_email = users
            .get_by_email(&email("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email, created);

        let by_id = users.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.fullname, "Alice Doe");

        let (user, hash) = users
            .get_password_hash(&email("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(hash, "hash-a");
    }

    #[tokio::test]
    async fn test_lookup_missing_user() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        assert!(users.get_by_id(UserId::new(99)).await.unwrap().is_none());
        assert!(
            users
                .get_password_hash(&email("ghost@example.com"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        users
            .create("Alice", &email("alice@example.com"), "h1")
            .await
            .unwrap();
        let err = users
            .create("Other Alice", &email("alice@example.com"), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_email_taken_by_other() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let alice = users
            .create("Alice", &email("alice@example.com"), "h")
            .await
            .unwrap();
        let bob = users
            .create("Bob", &email("bob@example.com"), "h")
            .await
            .unwrap();

        let alice_email = email("alice@example.com");
        assert!(!users.email_taken_by_other(&alice_email, alice.id).await.unwrap());
        assert!(users.email_taken_by_other(&alice_email, bob.id).await.unwrap());
        assert!(
            !users
                .email_taken_by_other(&email("new@example.com"), bob.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_profile_keeps_unset_fields() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let alice = users
            .create("Alice", &email("alice@example.com"), "old-hash")
            .await
            .unwrap();

        let updated = users
            .update_profile(
                alice.id,
                ProfileUpdate {
                    fullname: "Alice Smith",
                    email: None,
                    password_hash: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.fullname, "Alice Smith");
        assert_eq!(updated.email.as_str(), "alice@example.com");

        let (_, hash) = users
            .get_password_hash(&email("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hash, "old-hash");
    }

    #[tokio::test]
    async fn test_update_profile_changes_email_and_password() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let alice = users
            .create("Alice", &email("alice@example.com"), "old-hash")
            .await
            .unwrap();
        let new_email = email("alice@new.example.com");

        users
            .update_profile(
                alice.id,
                ProfileUpdate {
                    fullname: "Alice",
                    email: Some(&new_email),
                    password_hash: Some("new-hash"),
                },
            )
            .await
            .unwrap();

        assert!(
            users
                .get_by_email(&email("alice@example.com"))
                .await
                .unwrap()
                .is_none()
        );
        let (_, hash) = users.get_password_hash(&new_email).await.unwrap().unwrap();
        assert_eq!(hash, "new-hash");
    }

    #[tokio::test]
    async fn test_update_profile_conflict_rolls_back() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let alice = users
            .create("Alice", &email("alice@example.com"), "h")
            .await
            .unwrap();
        users
            .create("Bob", &email("bob@example.com"), "h")
            .await
            .unwrap();
        let bob_email = email("bob@example.com");

        let err = users
            .update_profile(
                alice.id,
                ProfileUpdate {
                    fullname: "Renamed",
                    email: Some(&bob_email),
                    password_hash: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let alice = users.get_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(alice.fullname, "Alice");
        assert_eq!(alice.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);

        let err = users
            .update_profile(
                UserId::new(7),
                ProfileUpdate {
                    fullname: "Nobody",
                    email: None,
                    password_hash: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
