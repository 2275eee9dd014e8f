//! Order domain types.

use chrono::{DateTime, Utc};

use bistro_core::{FixedField, FormFields, ItemLine, ItemsBlobError, OrderId, UserId};

/// A stored order. Orders are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Raw items blob exactly as stored.
    pub items: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub order_type: String,
    pub delivery_time: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Submission time as shown on the history page.
    #[must_use]
    pub fn placed_at(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// An order ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub order_type: String,
    pub delivery_time: String,
}

impl NewOrder {
    /// Build an order from a submitted form.
    ///
    /// The whole form becomes the items blob; the delivery columns are
    /// copied from the fixed fields, empty when not submitted.
    ///
    /// # Errors
    ///
    /// Returns `ItemsBlobError` if the form cannot be serialized.
    pub fn from_form(form: &FormFields) -> Result<Self, ItemsBlobError> {
        let field = |f: FixedField| form.fixed(f).to_owned();

        Ok(Self {
            items: form.to_blob()?,
            name: field(FixedField::Name),
            phone: field(FixedField::Phone),
            email: field(FixedField::Email),
            address: field(FixedField::Address),
            order_type: field(FixedField::OrderType),
            delivery_time: field(FixedField::DeliveryTime),
        })
    }
}

/// An order with its derived item-list, as shown on the history page.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub item_list: Vec<ItemLine>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_copies_fixed_fields() {
        let form = FormFields::from_pairs([
            ("burger", "2"),
            ("name", "Alice"),
            ("phone", "555-0100"),
            ("email", "alice@example.com"),
            ("address", "1 Main St"),
            ("orderType", "delivery"),
            ("deliveryTime", "asap"),
        ]);

        let order = NewOrder::from_form(&form).unwrap();
        assert_eq!(order.name, "Alice");
        assert_eq!(order.phone, "555-0100");
        assert_eq!(order.email, "alice@example.com");
        assert_eq!(order.address, "1 Main St");
        assert_eq!(order.order_type, "delivery");
        assert_eq!(order.delivery_time, "asap");
        assert_eq!(FormFields::from_blob(&order.items).unwrap(), form);
    }

    #[test]
    fn test_from_form_missing_fields_are_empty() {
        let form = FormFields::from_pairs([("fries", "1")]);
        let order = NewOrder::from_form(&form).unwrap();
        assert_eq!(order.name, "");
        assert_eq!(order.delivery_time, "");
        assert_eq!(order.items, r#"{"fries":["1"]}"#);
    }
}
