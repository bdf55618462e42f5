//! Class-definition registry for explicit dependency injection.
//!
//! The [`ClassRegistry`] is the single source of truth for how a class maps
//! to table(s). Unlike a process-wide singleton, it is explicitly
//! constructed and passed to the generators, enabling test isolation and
//! deterministic configuration.
//!
//! # Concurrency contract
//!
//! Not thread-safe by design: registration and `set_super_class` happen in a
//! single-writer configuration phase; afterwards the registry is shared by
//! reference for read-only use. Wrap it in a lock if the configuration phase
//! must overlap with readers.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{OrmError, Result};
use crate::meta::class::{ClassDef, SuperClassDef};
use crate::meta::key::PrimaryKeyDef;
use crate::meta::property::PropDef;

/// The primary key a class effectively persists under, after walking the
/// inheritance chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    /// Class that declares the key definition.
    pub owner: String,
    /// The key definition.
    pub def: PrimaryKeyDef,
    /// Property definitions backing the key, in key order.
    pub props: Vec<PropDef>,
}

/// Registry of class definitions, keyed by class name.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassDef>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class definition. A later registration under the same
    /// name replaces the earlier one.
    pub fn register(&mut self, def: ClassDef) {
        debug!(class = %def.class, table = %def.table, "registering class definition");
        self.classes.insert(def.class.clone(), def);
    }

    /// Whether metadata is registered for the given class.
    #[must_use]
    pub fn is_defined(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Get a class definition by name.
    pub fn get(&self, class: &str) -> Option<&ClassDef> {
        self.classes.get(class)
    }

    /// Get a class definition by name, returning an error if undefined.
    pub fn require(&self, class: &str) -> Result<&ClassDef> {
        self.get(class)
            .ok_or_else(|| OrmError::ClassNotDefined(class.to_string()))
    }

    /// Attach or replace the superclass declaration of a registered class.
    ///
    /// Mutates in place; safe only before statement generation starts for
    /// that class, since generators read this field at generation time.
    pub fn set_super_class(&mut self, class: &str, sc: SuperClassDef) -> Result<()> {
        let def = self
            .classes
            .get_mut(class)
            .ok_or_else(|| OrmError::ClassNotDefined(class.to_string()))?;
        def.super_class = Some(sc);
        Ok(())
    }

    /// All registered class names.
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Remove all definitions. Explicit lifecycle operation for teardown.
    pub fn clear(&mut self) {
        self.classes.clear();
    }

    /// Resolve the primary key a class persists under.
    ///
    /// A class's own key wins; otherwise the chain is walked upward until an
    /// ancestor declares one (single-table and concrete-table subclasses
    /// routinely inherit the root's key).
    ///
    /// # Errors
    ///
    /// - [`OrmError::MissingPrimaryKey`] when no class in the chain has one.
    /// - [`OrmError::InheritanceCycle`] when the chain loops.
    /// - [`OrmError::PropertyNotFound`] when a key names a missing property.
    pub fn effective_primary_key(&self, class: &str) -> Result<ResolvedKey> {
        let mut visited = HashSet::new();
        let mut current = self.require(class)?;

        loop {
            if !visited.insert(current.class.clone()) {
                return Err(OrmError::InheritanceCycle(current.class.clone()));
            }

            if let Some(pk) = &current.primary_key {
                let props = pk
                    .props
                    .iter()
                    .map(|name| current.require_prop(name).cloned())
                    .collect::<Result<Vec<_>>>()?;
                return Ok(ResolvedKey {
                    owner: current.class.clone(),
                    def: pk.clone(),
                    props,
                });
            }

            match &current.super_class {
                Some(sc) => current = self.require(&sc.class)?,
                None => return Err(OrmError::MissingPrimaryKey(class.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::class::InheritanceMapping;
    use crate::meta::property::PropType;

    fn shape() -> ClassDef {
        ClassDef::new("Shape", "Shape_table")
            .with_prop(PropDef::new("ShapeID", PropType::Text))
            .unwrap()
            .with_prop(PropDef::new("ShapeName", PropType::Text))
            .unwrap()
            .with_primary_key(PrimaryKeyDef::object_id("ShapeID"))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ClassRegistry::new();
        assert!(!registry.is_defined("Shape"));

        registry.register(shape());
        assert!(registry.is_defined("Shape"));
        assert_eq!(registry.require("Shape").unwrap().table, "Shape_table");
        assert!(matches!(
            registry.require("Missing"),
            Err(OrmError::ClassNotDefined(_))
        ));
    }

    #[test]
    fn test_set_super_class_in_place() {
        let mut registry = ClassRegistry::new();
        registry.register(shape());
        registry.register(ClassDef::new("Circle", "circle_table"));

        registry
            .set_super_class(
                "Circle",
                SuperClassDef::new("Shape", InheritanceMapping::ClassTable),
            )
            .unwrap();

        let circle = registry.require("Circle").unwrap();
        assert_eq!(circle.super_class.as_ref().unwrap().class, "Shape");

        assert!(registry
            .set_super_class(
                "Missing",
                SuperClassDef::new("Shape", InheritanceMapping::ClassTable)
            )
            .is_err());
    }

    #[test]
    fn test_clear() {
        let mut registry = ClassRegistry::new();
        registry.register(shape());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_effective_primary_key_own() {
        let mut registry = ClassRegistry::new();
        registry.register(shape());

        let key = registry.effective_primary_key("Shape").unwrap();
        assert_eq!(key.owner, "Shape");
        assert!(key.def.object_id);
        assert_eq!(key.props[0].name, "ShapeID");
    }

    #[test]
    fn test_effective_primary_key_inherited() {
        let mut registry = ClassRegistry::new();
        registry.register(shape());
        registry.register(
            ClassDef::new("CircleNoPrimaryKey", "Shape_table")
                .with_prop(PropDef::new("Radius", PropType::I32))
                .unwrap()
                .with_super_class(SuperClassDef::new(
                    "Shape",
                    InheritanceMapping::SingleTable,
                )),
        );

        let key = registry.effective_primary_key("CircleNoPrimaryKey").unwrap();
        assert_eq!(key.owner, "Shape");
        assert_eq!(key.props[0].name, "ShapeID");
    }

    #[test]
    fn test_effective_primary_key_missing() {
        let mut registry = ClassRegistry::new();
        registry.register(ClassDef::new("Orphan", "orphan_table"));

        assert!(matches!(
            registry.effective_primary_key("Orphan"),
            Err(OrmError::MissingPrimaryKey(_))
        ));
    }

    #[test]
    fn test_effective_primary_key_detects_cycle() {
        let mut registry = ClassRegistry::new();
        registry.register(
            ClassDef::new("A", "a").with_super_class(SuperClassDef::new(
                "B",
                InheritanceMapping::ClassTable,
            )),
        );
        registry.register(
            ClassDef::new("B", "b").with_super_class(SuperClassDef::new(
                "A",
                InheritanceMapping::ClassTable,
            )),
        );

        assert!(matches!(
            registry.effective_primary_key("A"),
            Err(OrmError::InheritanceCycle(_))
        ));
    }
}
