//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /            - Landing page
//! GET  /menu        - Menu
//!
//! # Auth
//! GET  /signup      - Signup page
//! POST /signup      - Create account and log in
//! GET  /login       - Login page (?next= return path)
//! POST /login       - Login action
//! GET  /logout      - Logout (requires auth)
//!
//! # Orders (requires auth)
//! GET  /order       - Order form
//! POST /order       - Submit order
//! GET  /orders      - Order history
//!
//! # Profile (requires auth)
//! GET  /profile     - Profile form
//! POST /profile     - Update profile
//! ```

pub mod auth;
pub mod home;
pub mod orders;
pub mod profile;

use axum::{Router, routing::get};

use crate::models::FlashMessage;
use crate::state::AppState;

/// Where visitors land after logging in or signing up.
pub const AFTER_LOGIN_PATH: &str = "/order";

/// Layout data shared by every page.
#[derive(Debug, Default)]
pub struct Page {
    /// Whether the navigation shows account links.
    pub logged_in: bool,
    /// Flash messages queued by the previous request.
    pub flashes: Vec<FlashMessage>,
}

impl Page {
    #[must_use]
    pub const fn new(logged_in: bool, flashes: Vec<FlashMessage>) -> Self {
        Self { logged_in, flashes }
    }
}

/// Create the main router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/menu", get(home::menu))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/order", get(orders::order_page).post(orders::submit_order))
        .route("/orders", get(orders::list_orders))
        .route("/profile", get(profile::profile_page).post(profile::update_profile))
}
