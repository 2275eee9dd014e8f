//! Domain models for the site.
//!
//! - `user` - Site accounts
//! - `order` - Stored orders and the view of an order with its derived item-list
//! - `session` - Values kept in the session store

pub mod order;
pub mod session;
pub mod user;

pub use order::{NewOrder, Order, OrderWithItems};
pub use session::{FlashLevel, FlashMessage, keys as session_keys};
pub use user::User;
