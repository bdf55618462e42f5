//! YAML class-definition bundles.
//!
//! Metadata can be declared in a YAML document and applied to a registry in
//! one step. The loader validates the bundle as a whole before touching the
//! registry, so a bad bundle never leaves partial state behind.
//!
//! ```yaml
//! classes:
//!   - class: Shape
//!     table: Shape_table
//!     primary_key: { props: [ShapeID], object_id: true }
//!     properties:
//!       - { name: ShapeID, column: ShapeID_field, type: text, rule: write_once }
//!       - { name: ShapeName, column: ShapeName, type: text }
//!   - class: Circle
//!     table: circle_table
//!     primary_key: { props: [CircleID], object_id: true }
//!     super_class: { class: Shape, mapping: class_table }
//!     properties:
//!       - { name: CircleID, column: CircleID_field, type: text, rule: write_once }
//!       - { name: Radius, column: Radius, type: i32 }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OrmError, Result};
use crate::meta::class::ClassDef;
use crate::meta::registry::ClassRegistry;

/// A set of class definitions loaded together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDefBundle {
    /// The class definitions, in declaration order.
    pub classes: Vec<ClassDef>,
}

impl ClassDefBundle {
    /// Parse a bundle from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let bundle: ClassDefBundle = serde_yaml::from_str(yaml)?;
        Ok(bundle)
    }

    /// Load a bundle from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize the bundle back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate internal consistency without touching a registry.
    ///
    /// Checks for duplicate class names, dangling superclass and
    /// relationship references, and key properties that don't exist on
    /// their declaring class.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for def in &self.classes {
            if !names.insert(def.class.as_str()) {
                return Err(OrmError::Config(format!(
                    "Duplicate class definition: {}",
                    def.class
                )));
            }
        }

        for def in &self.classes {
            if let Some(sc) = &def.super_class {
                if !names.contains(sc.class.as_str()) {
                    return Err(OrmError::Config(format!(
                        "Class '{}' names unknown superclass '{}'",
                        def.class, sc.class
                    )));
                }
                if sc.class == def.class {
                    return Err(OrmError::InheritanceCycle(def.class.clone()));
                }
                if let Some(id) = &sc.id {
                    def.require_prop(id)?;
                }
            }

            if let Some(pk) = &def.primary_key {
                for prop in &pk.props {
                    def.require_prop(prop)?;
                }
            }

            for rel in &def.relationships {
                if !names.contains(rel.related_class.as_str()) {
                    return Err(OrmError::Config(format!(
                        "Relationship '{}' on class '{}' names unknown class '{}'",
                        rel.name, def.class, rel.related_class
                    )));
                }
                for link in &rel.links {
                    def.require_prop(&link.owner_prop)?;
                }
            }
        }

        Ok(())
    }

    /// Validate the bundle and register every class.
    pub fn apply(self, registry: &mut ClassRegistry) -> Result<()> {
        self.validate()?;
        debug!(classes = self.classes.len(), "applying class definition bundle");
        for def in self.classes {
            registry.register(def);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SHAPES_YAML: &str = r#"
classes:
  - class: Shape
    table: Shape_table
    primary_key: { props: [ShapeID], object_id: true }
    properties:
      - { name: ShapeID, column: ShapeID_field, type: text, rule: write_once }
      - { name: ShapeName, column: ShapeName, type: text }
  - class: Circle
    table: circle_table
    primary_key: { props: [CircleID], object_id: true }
    super_class: { class: Shape, mapping: class_table }
    properties:
      - { name: CircleID, column: CircleID_field, type: text, rule: write_once }
      - { name: Radius, column: Radius, type: i32 }
"#;

    #[test]
    fn test_parse_and_apply() {
        let bundle = ClassDefBundle::from_yaml(SHAPES_YAML).unwrap();
        assert_eq!(bundle.classes.len(), 2);

        let mut registry = ClassRegistry::new();
        bundle.apply(&mut registry).unwrap();

        let circle = registry.require("Circle").unwrap();
        assert_eq!(circle.table, "circle_table");
        let sc = circle.super_class.as_ref().unwrap();
        assert_eq!(sc.class, "Shape");

        let key = registry.effective_primary_key("Circle").unwrap();
        assert_eq!(key.props[0].column, "CircleID_field");
    }

    #[test]
    fn test_dangling_superclass_rejected() {
        let yaml = r#"
classes:
  - class: Circle
    table: circle_table
    super_class: { class: Shape, mapping: class_table }
    properties:
      - { name: CircleID, column: CircleID, type: text }
"#;
        let bundle = ClassDefBundle::from_yaml(yaml).unwrap();
        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("unknown superclass 'Shape'"));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let yaml = r#"
classes:
  - class: Shape
    table: a
    properties: []
  - class: Shape
    table: b
    properties: []
"#;
        let bundle = ClassDefBundle::from_yaml(yaml).unwrap();
        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate class definition"));
    }

    #[test]
    fn test_key_prop_must_exist() {
        let yaml = r#"
classes:
  - class: Shape
    table: Shape_table
    primary_key: { props: [MissingID] }
    properties:
      - { name: ShapeID, column: ShapeID, type: text }
"#;
        let bundle = ClassDefBundle::from_yaml(yaml).unwrap();
        assert!(matches!(
            bundle.validate(),
            Err(OrmError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHAPES_YAML.as_bytes()).unwrap();

        let bundle = ClassDefBundle::load(file.path()).unwrap();
        assert_eq!(bundle.classes.len(), 2);
    }

    #[test]
    fn test_yaml_round_trip() {
        let bundle = ClassDefBundle::from_yaml(SHAPES_YAML).unwrap();
        let rendered = bundle.to_yaml().unwrap();
        let reparsed = ClassDefBundle::from_yaml(&rendered).unwrap();
        assert_eq!(bundle.classes, reparsed.classes);
    }
}
