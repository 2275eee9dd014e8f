//! The restaurant menu.
//!
//! Item IDs double as the order form's quantity input names, so the items
//! blob of an order is keyed by them.

use super::price::{CurrencyCode, Price};

/// A dish on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Form input name, e.g. `"chicken_wings"`.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    price_cents: i64,
}

impl MenuItem {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        price_cents: i64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price_cents,
        }
    }

    #[must_use]
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents, CurrencyCode::USD)
    }
}

/// A titled group of menu items.
#[derive(Debug, Clone, Copy)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

pub const MENU: &[MenuSection] = &[
    MenuSection {
        title: "Mains",
        items: &[
            MenuItem::new("burger", "Burger", "Beef patty, cheddar, pickles", 1150),
            MenuItem::new("veggie_burger", "Veggie Burger", "Black bean patty, avocado", 1095),
            MenuItem::new("chicken_wings", "Chicken Wings", "Eight wings, house hot sauce", 1250),
            MenuItem::new("margherita_pizza", "Margherita Pizza", "Tomato, mozzarella, basil", 1400),
        ],
    },
    MenuSection {
        title: "Sides",
        items: &[
            MenuItem::new("fries", "Fries", "Skin-on, sea salt", 450),
            MenuItem::new("garlic_bread", "Garlic Bread", "Sourdough, garlic butter", 500),
            MenuItem::new("side_salad", "Side Salad", "Greens, lemon vinaigrette", 550),
        ],
    },
    MenuSection {
        title: "Drinks & Dessert",
        items: &[
            MenuItem::new("lemonade", "Lemonade", "Fresh squeezed", 350),
            MenuItem::new("iced_tea", "Iced Tea", "Unsweetened black tea", 300),
            MenuItem::new("apple_pie", "Apple Pie", "Served warm", 600),
        ],
    },
];

/// Iterate over every item on the menu.
pub fn all_items() -> impl Iterator<Item = &'static MenuItem> {
    MENU.iter().flat_map(|section| section.items.iter())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{display_label, items::is_metadata_field};

    #[test]
    fn test_item_ids_are_unique_and_not_metadata() {
        let mut seen = HashSet::new();
        for item in all_items() {
            assert!(seen.insert(item.id), "duplicate menu id {}", item.id);
            assert!(!is_metadata_field(item.id));
        }
    }

    #[test]
    fn test_item_names_match_derived_labels() {
        for item in all_items() {
            assert_eq!(display_label(item.id), item.name);
        }
    }

    #[test]
    fn test_price_display() {
        let fries = all_items().find(|item| item.id == "fries");
        assert_eq!(fries.map(|item| item.price().to_string()).as_deref(), Some("$4.50"));
    }
}
