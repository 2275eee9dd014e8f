//! Public pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use bistro_core::{MENU, MenuSection};

use super::Page;
use crate::filters;
use crate::middleware::{Flashes, OptionalAuth};

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: Page,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub page: Page,
    pub sections: &'static [MenuSection],
}

/// Display the landing page.
pub async fn index(
    OptionalAuth(user_id): OptionalAuth,
    Flashes(flashes): Flashes,
) -> impl IntoResponse {
    IndexTemplate {
        page: Page::new(user_id.is_some(), flashes),
    }
}

/// Display the menu.
pub async fn menu(
    OptionalAuth(user_id): OptionalAuth,
    Flashes(flashes): Flashes,
) -> impl IntoResponse {
    MenuTemplate {
        page: Page::new(user_id.is_some(), flashes),
        sections: MENU,
    }
}
