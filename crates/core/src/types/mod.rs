//! Core types for Bistro.

pub mod email;
pub mod form;
pub mod id;
pub mod items;
pub mod menu;
pub mod price;

pub use email::{Email, EmailError};
pub use form::{FixedField, FormFields};
pub use id::*;
pub use items::{
    ItemLine, ItemsBlobError, METADATA_FIELDS, derive_item_list, display_label, is_metadata_field,
};
pub use menu::{MENU, MenuItem, MenuSection, all_items};
pub use price::{CurrencyCode, Price};
