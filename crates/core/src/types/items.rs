//! Derived item-list for the order history page.
//!
//! The list is computed from the stored items blob each time orders are
//! shown and is never persisted.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Field names that describe the delivery rather than an ordered item.
pub const METADATA_FIELDS: [&str; 10] = [
    "name",
    "phone",
    "email",
    "address",
    "orderType",
    "deliveryTime",
    "order_type",
    "delivery_time",
    "specialInstructions",
    "payment",
];

/// Errors decoding an items blob.
#[derive(Debug, Error)]
pub enum ItemsBlobError {
    /// Not valid JSON, or not the expected shape.
    #[error("invalid items blob: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object.
    #[error("items blob is not a JSON object")]
    NotAnObject,
}

/// One line of the derived item-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    /// Human-readable item name, e.g. `"Chicken Wings"`.
    pub label: String,
    /// Ordered quantity, always positive.
    pub quantity: u64,
}

impl ItemLine {
    #[must_use]
    pub fn new(label: impl Into<String>, quantity: u64) -> Self {
        Self {
            label: label.into(),
            quantity,
        }
    }
}

/// Whether `key` names a delivery metadata field.
#[must_use]
pub fn is_metadata_field(key: &str) -> bool {
    METADATA_FIELDS.contains(&key)
}

/// Derive the item-list from a stored items blob.
///
/// Metadata fields are skipped. Each remaining field's first value is read
/// as a quantity; entries whose value is missing, not a list, or not a plain
/// unsigned number count as zero, and zero quantities are dropped. Lines keep
/// the order the fields were submitted in.
///
/// # Errors
///
/// Returns an error if the blob is not a JSON object. Callers showing order
/// history treat that as an empty list.
pub fn derive_item_list(blob: &str) -> Result<Vec<ItemLine>, ItemsBlobError> {
    let value: Value = serde_json::from_str(blob)?;
    let Value::Object(fields) = value else {
        return Err(ItemsBlobError::NotAnObject);
    };

    let lines = fields
        .iter()
        .filter(|(key, _)| !is_metadata_field(key))
        .filter_map(|(key, values)| {
            let quantity = values
                .as_array()
                .and_then(|values| values.first())
                .and_then(Value::as_str)
                .map_or(0, parse_quantity);
            (quantity > 0).then(|| ItemLine::new(display_label(key), quantity))
        })
        .collect();

    Ok(lines)
}

/// Parse a submitted quantity. Only plain ASCII digits count; anything else,
/// including signs and whitespace, is zero. Huge values saturate at
/// `u64::MAX`.
fn parse_quantity(raw: &str) -> u64 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(u64::MAX)
}

/// Turn a field name into a display label: underscores become spaces and
/// every alphabetic run starts upper-case with the rest lower-case.
///
/// ```
/// use bistro_core::display_label;
///
/// assert_eq!(display_label("chicken_wings"), "Chicken Wings");
/// assert_eq!(display_label("BBQ_ribs"), "Bbq Ribs");
/// ```
#[must_use]
pub fn display_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut in_word = false;

    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            label.push(c);
            in_word = false;
        }
    }

    label
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_burger_fries_name() {
        let lines = derive_item_list(r#"{"burger":["2"],"fries":["0"],"name":["Alice"]}"#).unwrap();
        assert_eq!(lines, vec![ItemLine::new("Burger", 2)]);
    }

    #[test]
    fn test_metadata_excluded_in_any_position() {
        let blob = r#"{
            "payment":["3"],"pizza":["1"],"phone":["555"],"deliveryTime":["7"],
            "specialInstructions":["9"],"orderType":["1"],"address":["12"],
            "email":["4"],"garlic_bread":["2"]
        }"#;
        let lines = derive_item_list(blob).unwrap();
        assert_eq!(
            lines,
            vec![ItemLine::new("Pizza", 1), ItemLine::new("Garlic Bread", 2)]
        );
    }

    #[test]
    fn test_lines_keep_submission_order() {
        let lines = derive_item_list(r#"{"salad":["1"],"burger":["3"],"apple_pie":["2"]}"#).unwrap();
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Salad", "Burger", "Apple Pie"]);
    }

    #[test]
    fn test_bad_quantities_count_as_zero() {
        let blob = r#"{
            "a":["-1"],"b":["two"],"c":[],"d":"3","e":[" 4"],
            "g":[5],"h":["1.5"],"i":[""],"j":["03"]
        }"#;
        let lines = derive_item_list(blob).unwrap();
        assert_eq!(lines, vec![ItemLine::new("J", 3)]);
    }

    #[test]
    fn test_large_quantities_are_kept() {
        let blob = r#"{"burger":["5000000000"],"fries":["99999999999999999999999"]}"#;
        let lines = derive_item_list(blob).unwrap();
        assert_eq!(
            lines,
            vec![
                ItemLine::new("Burger", 5_000_000_000),
                ItemLine::new("Fries", u64::MAX),
            ]
        );
    }

    #[test]
    fn test_only_first_value_counts() {
        let lines = derive_item_list(r#"{"soda":["0","5"],"tea":["2","0"]}"#).unwrap();
        assert_eq!(lines, vec![ItemLine::new("Tea", 2)]);
    }

    #[test]
    fn test_malformed_blobs_error() {
        assert!(matches!(
            derive_item_list("{not json"),
            Err(ItemsBlobError::Json(_))
        ));
        assert!(matches!(
            derive_item_list(r#"["burger"]"#),
            Err(ItemsBlobError::NotAnObject)
        ));
        assert!(matches!(derive_item_list(""), Err(ItemsBlobError::Json(_))));
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("burger"), "Burger");
        assert_eq!(display_label("chicken_wings"), "Chicken Wings");
        assert_eq!(display_label("iced_TEA"), "Iced Tea");
        assert_eq!(display_label("combo2go"), "Combo2Go");
        assert_eq!(display_label("__x"), "  X");
    }
}
