//! Primary key definitions and runtime key values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sql::value::SqlValue;

/// Ordered set of property names forming a primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyDef {
    /// Key property names, in key order.
    pub props: Vec<String>,

    /// True when the key is a generated, immutable object identity rather
    /// than a natural key.
    #[serde(default)]
    pub object_id: bool,
}

impl PrimaryKeyDef {
    /// Create a single-property object-identity key.
    pub fn object_id(prop: impl Into<String>) -> Self {
        Self {
            props: vec![prop.into()],
            object_id: true,
        }
    }

    /// Create a natural key over the given properties.
    pub fn natural(props: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            props: props.into_iter().map(Into::into).collect(),
            object_id: false,
        }
    }

    /// Whether the key spans more than one property.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.props.len() > 1
    }
}

/// A key definition bound to actual values on one object instance.
///
/// Supports equality comparison and string serialization; identity-defining
/// values are immutable once the object is persisted (enforced by the
/// owning object's write-once rules, not by this type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectKey {
    entries: Vec<(String, SqlValue)>,
}

impl ObjectKey {
    /// Create an empty key.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a property/value pair in key order.
    pub fn push(&mut self, prop: impl Into<String>, value: SqlValue) {
        self.entries.push((prop.into(), value));
    }

    /// Ordered property/value pairs.
    pub fn entries(&self) -> &[(String, SqlValue)] {
        &self.entries
    }

    /// Value for a property name, if present.
    pub fn value_of(&self, prop: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == prop)
            .map(|(_, value)| value)
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Number of key properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the key has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ObjectKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.to_literal()))
            .collect();
        write!(f, "{}", rendered.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_constructors() {
        let pk = PrimaryKeyDef::object_id("ShapeID");
        assert!(pk.object_id);
        assert!(!pk.is_composite());
        assert_eq!(pk.props, vec!["ShapeID"]);

        let pk = PrimaryKeyDef::natural(["Surname", "FirstName"]);
        assert!(!pk.object_id);
        assert!(pk.is_composite());
    }

    #[test]
    fn test_object_key_equality() {
        let mut a = ObjectKey::new();
        a.push("ShapeID", SqlValue::from("X"));
        let mut b = ObjectKey::new();
        b.push("ShapeID", SqlValue::from("X"));
        let mut c = ObjectKey::new();
        c.push("ShapeID", SqlValue::from("Y"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_object_key_display() {
        let mut key = ObjectKey::new();
        key.push("Surname", SqlValue::from("O'Brien"));
        key.push("FirstName", SqlValue::from("Ann"));
        assert_eq!(key.to_string(), "Surname='O''Brien';FirstName='Ann'");
    }

    #[test]
    fn test_value_lookup() {
        let mut key = ObjectKey::new();
        key.push("ShapeID", SqlValue::from("X"));
        assert_eq!(key.value_of("ShapeID"), Some(&SqlValue::from("X")));
        assert_eq!(key.value_of("Other"), None);
    }
}
