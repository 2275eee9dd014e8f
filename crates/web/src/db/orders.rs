//! Order repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use bistro_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    items: String,
    name: String,
    phone: String,
    email: String,
    address: String,
    order_type: String,
    delivery_time: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            items: row.items,
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            order_type: row.order_type,
            delivery_time: row.delivery_time,
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// when `user_id` does not reference an existing user.
    pub async fn create(&self, user_id: UserId, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders
                (user_id, items, name, phone, email, address, order_type, delivery_time, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, items, name, phone, email, address,
                      order_type, delivery_time, created_at
            ",
        )
        .bind(user_id.as_i64())
        .bind(&order.items)
        .bind(&order.name)
        .bind(&order.phone)
        .bind(&order.email)
        .bind(&order.address)
        .bind(&order.order_type)
        .bind(&order.delivery_time)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// All orders placed by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, name, phone, email, address,
                   order_type, delivery_time, created_at
            FROM orders
            WHERE user_id = ?
            ORDER BY id DESC
            ",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
