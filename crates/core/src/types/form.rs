//! The submitted order form.
//!
//! An order form carries one quantity input per menu item plus a fixed set
//! of delivery fields. Every field is kept verbatim, in submission order, and
//! stored as the order's items blob: a JSON object mapping each field name to
//! the array of values submitted under it.

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::items::{ItemsBlobError, is_metadata_field};

/// Delivery fields every order form carries alongside the item quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedField {
    Name,
    Phone,
    Email,
    Address,
    OrderType,
    DeliveryTime,
}

impl FixedField {
    /// All fixed fields, in form order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::OrderType,
        Self::DeliveryTime,
    ];

    /// Input name used by the order form.
    #[must_use]
    pub const fn form_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::OrderType => "orderType",
            Self::DeliveryTime => "deliveryTime",
        }
    }

    /// Column name in the `orders` table, also accepted as an input name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::OrderType => "order_type",
            Self::DeliveryTime => "delivery_time",
            other => other.form_key(),
        }
    }
}

/// Ordered mapping from form field name to the values submitted under it.
///
/// Repeated names collect into one entry; entries keep the position at which
/// their name first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, Vec<String>)>,
}

impl FormFields {
    /// Create an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a form from raw `(name, value)` pairs as decoded from
    /// `application/x-www-form-urlencoded`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (key, value) in pairs {
            form.push(key, value);
        }
        form
    }

    /// Append a value under `key`.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// All values submitted under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// First value submitted under `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Value of a fixed delivery field, or `""` when it was not submitted.
    #[must_use]
    pub fn fixed(&self, field: FixedField) -> &str {
        self.first(field.form_key())
            .or_else(|| self.first(field.column()))
            .unwrap_or_default()
    }

    /// All entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Entries that are not delivery metadata, i.e. the item quantities.
    pub fn item_fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter().filter(|(key, _)| !is_metadata_field(key))
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the JSON items blob stored on the order row.
    ///
    /// # Errors
    ///
    /// Returns `ItemsBlobError::Json` if serialization fails.
    pub fn to_blob(&self) -> Result<String, ItemsBlobError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an items blob strictly.
    ///
    /// # Errors
    ///
    /// Returns `ItemsBlobError::Json` unless the blob is a JSON object whose
    /// values are all arrays of strings.
    pub fn from_blob(blob: &str) -> Result<Self, ItemsBlobError> {
        Ok(serde_json::from_str(blob)?)
    }
}

impl Serialize for FormFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormFieldsVisitor;

        impl<'de> Visitor<'de> for FormFieldsVisitor {
            type Value = FormFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to arrays of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FormFields, A::Error> {
                let mut form = FormFields::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    for value in values {
                        form.push(key.clone(), value);
                    }
                    if form.get(&key).is_none() {
                        form.entries.push((key, Vec::new()));
                    }
                }
                Ok(form)
            }
        }

        deserializer.deserialize_map(FormFieldsVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> FormFields {
        FormFields::from_pairs([
            ("burger", "2"),
            ("name", "Alice"),
            ("fries", "0"),
            ("orderType", "delivery"),
            ("extra_sauce", "1"),
            ("extra_sauce", "3"),
        ])
    }

    #[test]
    fn test_repeated_names_collect_in_first_seen_order() {
        let form = sample();
        let keys: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            ["burger", "name", "fries", "orderType", "extra_sauce"]
        );
        assert_eq!(form.get("extra_sauce").unwrap(), ["1", "3"]);
        assert_eq!(form.len(), 5);
    }

    #[test]
    fn test_fixed_fields() {
        let form = sample();
        assert_eq!(form.fixed(FixedField::Name), "Alice");
        assert_eq!(form.fixed(FixedField::OrderType), "delivery");
        assert_eq!(form.fixed(FixedField::Phone), "");
    }

    #[test]
    fn test_fixed_field_accepts_column_name() {
        let form = FormFields::from_pairs([("delivery_time", "18:30")]);
        assert_eq!(form.fixed(FixedField::DeliveryTime), "18:30");
    }

    #[test]
    fn test_item_fields_skip_metadata() {
        let form = sample();
        let items: Vec<&str> = form.item_fields().map(|(k, _)| k).collect();
        assert_eq!(items, ["burger", "fries", "extra_sauce"]);
    }

    #[test]
    fn test_blob_preserves_order_and_values() {
        let form = sample();
        let blob = form.to_blob().unwrap();
        assert_eq!(
            blob,
            r#"{"burger":["2"],"name":["Alice"],"fries":["0"],"orderType":["delivery"],"extra_sauce":["1","3"]}"#
        );
        assert_eq!(FormFields::from_blob(&blob).unwrap(), form);
    }

    #[test]
    fn test_blob_keeps_empty_value_lists() {
        let form = FormFields::from_blob(r#"{"burger":[]}"#).unwrap();
        assert_eq!(form.get("burger").unwrap(), &[] as &[String]);
        assert_eq!(form.to_blob().unwrap(), r#"{"burger":[]}"#);
    }

    #[test]
    fn test_from_blob_rejects_wrong_shapes() {
        assert!(FormFields::from_blob("not json").is_err());
        assert!(FormFields::from_blob(r#"["burger"]"#).is_err());
        assert!(FormFields::from_blob(r#"{"burger":"2"}"#).is_err());
    }
}
