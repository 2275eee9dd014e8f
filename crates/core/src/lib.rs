//! Bistro Core - Shared domain types.
//!
//! This crate holds the types used by the web binary and the CLI:
//! - Type-safe IDs and validated email addresses
//! - The submitted order form (`FormFields`) and its JSON items blob
//! - The derived item-list shown on the order history page
//! - The static restaurant menu
//!
//! # Architecture
//!
//! No I/O, no database access, no HTTP. Everything here is plain data and
//! pure functions so it can be unit tested in isolation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
