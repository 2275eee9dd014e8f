//! Business logic services.
//!
//! - `auth` - Signup, login, bootstrap account
//! - `orders` - Order intake and order history with derived item-lists
//! - `profile` - Profile edits

pub mod auth;
pub mod orders;
pub mod profile;
