//! Order form and order history handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};

use bistro_core::{FormFields, MENU, MenuSection};

use super::Page;
use crate::error::Result;
use crate::filters;
use crate::middleware::{Flashes, RequireAuth};
use crate::models::{OrderWithItems, User};
use crate::services::orders::OrderService;
use crate::state::AppState;

/// Order form template.
#[derive(Template, WebTemplate)]
#[template(path = "order.html")]
pub struct OrderTemplate {
    pub page: Page,
    pub user: User,
    pub sections: &'static [MenuSection],
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub page: Page,
    pub orders: Vec<OrderWithItems>,
}

/// Display the order form, prefilled with the user's name and email.
pub async fn order_page(
    RequireAuth(user): RequireAuth,
    Flashes(flashes): Flashes,
) -> impl IntoResponse {
    OrderTemplate {
        page: Page::new(true, flashes),
        user,
        sections: MENU,
    }
}

/// Handle order form submission.
///
/// Every submitted field is kept, in order, including repeated keys.
///
/// # Errors
///
/// Returns `AppError` if the order cannot be stored.
pub async fn submit_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = FormFields::from_pairs(pairs);
    OrderService::new(state.pool()).submit(user.id, &form).await?;
    Ok(Redirect::to("/orders"))
}

/// Display the user's orders, newest first.
///
/// # Errors
///
/// Returns `AppError` if the orders cannot be loaded.
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Flashes(flashes): Flashes,
) -> Result<OrdersTemplate> {
    let orders = OrderService::new(state.pool()).list(user.id).await?;

    Ok(OrdersTemplate {
        page: Page::new(true, flashes),
        orders,
    })
}
