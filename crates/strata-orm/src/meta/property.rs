//! Property definitions.

use serde::{Deserialize, Serialize};

use crate::error::{OrmError, Result};
use crate::sql::value::SqlValue;

/// Declared value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    Bool,
    I32,
    I64,
    F64,
    Text,
    Uuid,
    Decimal,
    DateTime,
    Date,
    Time,
}

/// Read/write rule governing when a property may be assigned.
///
/// `WriteOnce` and `ReadManyWriteOnce` close after the object is first
/// persisted; identity-defining properties use them to stay immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadWriteRule {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnce,
    ReadManyWriteOnce,
    ReadManyWriteMany,
}

impl ReadWriteRule {
    /// Whether a write is permitted given the object's persistence state.
    #[must_use]
    pub fn allows_write(&self, is_new: bool) -> bool {
        match self {
            ReadWriteRule::ReadWrite | ReadWriteRule::ReadManyWriteMany => true,
            ReadWriteRule::ReadOnly => false,
            ReadWriteRule::WriteOnce | ReadWriteRule::ReadManyWriteOnce => is_new,
        }
    }
}

/// One property definition: name, declared type, column, rule, default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    /// Property name (unique within its class).
    pub name: String,

    /// Database column name.
    pub column: String,

    /// Declared value type.
    #[serde(rename = "type")]
    pub prop_type: PropType,

    /// Read/write rule.
    #[serde(default)]
    pub rule: ReadWriteRule,

    /// Default value applied when an object is constructed.
    #[serde(default)]
    pub default: Option<SqlValue>,
}

impl PropDef {
    /// Create a property definition with the column named after the property.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            prop_type,
            rule: ReadWriteRule::default(),
            default: None,
        }
    }

    /// Set the database column name.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Set the read/write rule.
    pub fn with_rule(mut self, rule: ReadWriteRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: SqlValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered, name-unique collection of property definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropDefCol {
    defs: Vec<PropDef>,
}

impl PropDefCol {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, rejecting duplicate names.
    ///
    /// `class` is only used to label the error.
    pub fn add(&mut self, class: &str, def: PropDef) -> Result<()> {
        if self.contains(&def.name) {
            return Err(OrmError::duplicate_property(class, &def.name));
        }
        self.defs.push(def);
        Ok(())
    }

    /// Get a definition by property name.
    pub fn get(&self, name: &str) -> Option<&PropDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// Get a definition by property name, failing with the class label.
    pub fn require(&self, class: &str, name: &str) -> Result<&PropDef> {
        self.get(name)
            .ok_or_else(|| OrmError::property_not_found(class, name))
    }

    /// Check whether a property name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropDef> {
        self.defs.iter()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropDefCol {
    type Item = &'a PropDef;
    type IntoIter = std::slice::Iter<'a, PropDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.defs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_def_builder() {
        let def = PropDef::new("ShapeID", PropType::Text)
            .with_column("ShapeID_field")
            .with_rule(ReadWriteRule::WriteOnce);

        assert_eq!(def.name, "ShapeID");
        assert_eq!(def.column, "ShapeID_field");
        assert_eq!(def.rule, ReadWriteRule::WriteOnce);
        assert!(def.default.is_none());
    }

    #[test]
    fn test_column_defaults_to_name() {
        let def = PropDef::new("Radius", PropType::I32);
        assert_eq!(def.column, "Radius");
    }

    #[test]
    fn test_col_rejects_duplicates() {
        let mut col = PropDefCol::new();
        col.add("Shape", PropDef::new("ShapeName", PropType::Text))
            .unwrap();

        let err = col
            .add("Shape", PropDef::new("ShapeName", PropType::Text))
            .unwrap_err();
        assert!(matches!(err, OrmError::DuplicateProperty { .. }));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn test_col_require_reports_class_and_property() {
        let col = PropDefCol::new();
        let err = col.require("Circle", "Radius").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property 'Radius' not found on class 'Circle'"
        );
    }

    #[test]
    fn test_write_rules() {
        assert!(ReadWriteRule::ReadWrite.allows_write(false));
        assert!(!ReadWriteRule::ReadOnly.allows_write(true));
        assert!(ReadWriteRule::WriteOnce.allows_write(true));
        assert!(!ReadWriteRule::WriteOnce.allows_write(false));
        assert!(!ReadWriteRule::ReadManyWriteOnce.allows_write(false));
        assert!(ReadWriteRule::ReadManyWriteMany.allows_write(false));
    }
}
