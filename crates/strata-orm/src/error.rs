//! Error types for the statement generation library.

use thiserror::Error;

/// Main error type for mapping and statement generation operations.
///
/// Everything here is a configuration or programming defect: statement
/// generation is a pure in-memory transformation, so errors are fatal to the
/// current operation and never retried.
#[derive(Error, Debug)]
pub enum OrmError {
    /// No class definition registered under the given name.
    #[error("Class definition not found: {0}")]
    ClassNotDefined(String),

    /// A property lookup failed on a class definition.
    #[error("Property '{property}' not found on class '{class}'")]
    PropertyNotFound { class: String, property: String },

    /// Two property definitions share a name within one class.
    #[error("Duplicate property '{property}' on class '{class}'")]
    DuplicateProperty { class: String, property: String },

    /// The superclass chain loops back on itself.
    #[error("Inheritance cycle detected at class '{0}'")]
    InheritanceCycle(String),

    /// Neither the class nor any ancestor declares a primary key.
    #[error("Class '{0}' has no primary key in its inheritance chain")]
    MissingPrimaryKey(String),

    /// Super-class key resolution was requested for a root class.
    #[error("Class '{0}' has no superclass definition")]
    NoSuperClass(String),

    /// A write was attempted against a property whose rule forbids it.
    #[error("Property '{property}' is not writable under rule {rule:?}")]
    PropertyNotWritable {
        property: String,
        rule: crate::meta::ReadWriteRule,
    },

    /// A value of the wrong type was assigned to a property.
    #[error("Type mismatch on property '{property}': expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        property: String,
        expected: crate::meta::PropType,
        actual: crate::meta::PropType,
    },

    /// Configuration error (invalid bundle, dangling reference, unknown
    /// dialect, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (bundle file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl OrmError {
    /// Create a PropertyNotFound error.
    pub fn property_not_found(class: impl Into<String>, property: impl Into<String>) -> Self {
        OrmError::PropertyNotFound {
            class: class.into(),
            property: property.into(),
        }
    }

    /// Create a DuplicateProperty error.
    pub fn duplicate_property(class: impl Into<String>, property: impl Into<String>) -> Self {
        OrmError::DuplicateProperty {
            class: class.into(),
            property: property.into(),
        }
    }

    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        OrmError::Config(message.into())
    }
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, OrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_names() {
        let err = OrmError::property_not_found("Circle", "Radius");
        assert_eq!(
            err.to_string(),
            "Property 'Radius' not found on class 'Circle'"
        );

        let err = OrmError::ClassNotDefined("Shape".to_string());
        assert!(err.to_string().contains("Shape"));
    }

    #[test]
    fn test_config_helper() {
        let err = OrmError::config("unknown dialect: foo");
        assert_eq!(err.to_string(), "Configuration error: unknown dialect: foo");
    }
}
