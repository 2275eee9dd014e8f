//! User domain types.

use chrono::{DateTime, Utc};

use bistro_core::{Email, UserId};

/// A site account.
///
/// The password hash stays in the repository; it is only read when
/// verifying credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
