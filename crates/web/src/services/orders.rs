//! Order intake and presentation.

use sqlx::SqlitePool;
use thiserror::Error;

use bistro_core::{FormFields, ItemsBlobError, UserId, derive_item_list};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{NewOrder, Order, OrderWithItems};

/// Errors submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("failed to encode order items: {0}")]
    Items(#[from] ItemsBlobError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Persist a submitted form as one order.
    ///
    /// Quantities are stored as submitted; they are only interpreted when
    /// the order history is rendered.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the form cannot be encoded or the insert fails.
    pub async fn submit(&self, user_id: UserId, form: &FormFields) -> Result<Order, OrderError> {
        let new_order = NewOrder::from_form(form)?;
        let order = self.orders.create(user_id, &new_order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            fields = form.len(),
            "Order submitted"
        );
        Ok(order)
    }

    /// A user's orders, newest first, each with its derived item-list.
    ///
    /// Orders whose items blob cannot be read are listed with no items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the orders cannot be loaded.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let orders = self.orders.list_for_user(user_id).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let item_list = derive_item_list(&order.items).unwrap_or_else(|e| {
                    tracing::warn!(order_id = %order.id, error = %e, "Unreadable items blob");
                    Vec::new()
                });
                OrderWithItems { order, item_list }
            })
            .collect())
    }
}
