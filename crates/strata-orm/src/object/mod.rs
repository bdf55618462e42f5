//! Runtime object state.
//!
//! [`ObjectState`] is the value bag the generators read: one slot per
//! property across the whole inheritance chain, each slot tracking its
//! current value and a dirty flag. Generators consume it through the
//! [`PropertySource`] trait, so callers with their own object model can
//! feed the generators without going through `ObjectState`.

use tracing::debug;
use uuid::Uuid;

use crate::error::{OrmError, Result};
use crate::mapping::plan::MappingPlan;
use crate::meta::key::ObjectKey;
use crate::meta::property::{PropDef, PropType};
use crate::meta::registry::ClassRegistry;
use crate::sql::value::SqlValue;

/// Read access to an object's property values, as seen by the generators.
pub trait PropertySource {
    /// Concrete class name of the object.
    fn class_name(&self) -> &str;

    /// Current value of a property.
    fn property_value(&self, name: &str) -> Result<SqlValue>;

    /// Whether a property has been assigned since the last persist.
    fn is_dirty(&self, name: &str) -> bool;
}

/// One property slot: definition plus current value and dirty flag.
#[derive(Debug, Clone)]
pub struct Property {
    /// The backing definition.
    pub def: PropDef,
    value: SqlValue,
    dirty: bool,
}

impl Property {
    /// Current value.
    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Whether the slot has been assigned since the last persist.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// The property bag for one object instance.
///
/// Construction walks the object's mapping plan and creates a slot for
/// every property of every level, applies declared defaults, and (for
/// generated object-identity keys) seeds a fresh identity that is shared
/// across all levels' key and link properties.
#[derive(Debug, Clone)]
pub struct ObjectState {
    class: String,
    props: Vec<Property>,
    is_new: bool,
}

impl ObjectState {
    /// Create a new (unpersisted) object for the given class.
    pub fn new(registry: &ClassRegistry, class: &str) -> Result<Self> {
        let plan = MappingPlan::build(registry, class)?;

        let mut state = Self {
            class: class.to_string(),
            props: Vec::new(),
            is_new: true,
        };
        for level in &plan.levels {
            for def in level.key_props.iter().chain(level.props.iter()) {
                if state.find(&def.name).is_none() {
                    state.props.push(Property {
                        value: def.default.clone().unwrap_or(SqlValue::Null),
                        def: def.clone(),
                        dirty: false,
                    });
                }
            }
        }

        if plan.key.def.object_id && plan.key.props.len() == 1 {
            let id = match plan.key.props[0].prop_type {
                PropType::Uuid => Some(SqlValue::Uuid(Uuid::new_v4())),
                PropType::Text => Some(SqlValue::Text(Uuid::new_v4().to_string())),
                _ => None,
            };
            if let Some(id) = id {
                debug!(class = %class, id = %id.to_literal(), "generated object identity");
                state.propagate_key(&plan, std::slice::from_ref(&id));
            }
        }

        Ok(state)
    }

    /// Replace a single-property key's value, propagating it to every
    /// level's key and link properties.
    ///
    /// # Errors
    ///
    /// Fails when the class's effective key is composite; use
    /// [`set_key_values`](Self::set_key_values) for those.
    pub fn set_id(&mut self, registry: &ClassRegistry, value: SqlValue) -> Result<()> {
        let plan = MappingPlan::build(registry, &self.class)?;
        if plan.key.props.len() != 1 {
            return Err(OrmError::config(format!(
                "Class '{}' has a composite key; set all key values together",
                self.class
            )));
        }
        self.propagate_key(&plan, std::slice::from_ref(&value));
        Ok(())
    }

    /// Replace all key values, in key order, propagating each to every
    /// level's key and link properties.
    pub fn set_key_values(&mut self, registry: &ClassRegistry, values: &[SqlValue]) -> Result<()> {
        let plan = MappingPlan::build(registry, &self.class)?;
        if values.len() != plan.key.props.len() {
            return Err(OrmError::config(format!(
                "Class '{}' has {} key properties but {} values were given",
                self.class,
                plan.key.props.len(),
                values.len()
            )));
        }
        self.propagate_key(&plan, values);
        Ok(())
    }

    /// Copy key values into every level's key, link, and absorbed-key
    /// slots, silently (no dirty marking, no write-rule check: identity is
    /// set by the library, not by user code).
    fn propagate_key(&mut self, plan: &MappingPlan, values: &[SqlValue]) {
        for level in &plan.levels {
            for (i, kp) in level.key_props.iter().enumerate() {
                self.set_silent(&kp.name, values[i].clone());
            }
            for (i, lp) in level.link_props.iter().enumerate() {
                self.set_silent(&lp.name, values[i].clone());
            }
            for group in &level.absorbed_keys {
                for (i, ap) in group.iter().enumerate() {
                    self.set_silent(&ap.name, values[i].clone());
                }
            }
        }
    }

    fn set_silent(&mut self, name: &str, value: SqlValue) {
        if let Some(prop) = self.props.iter_mut().find(|p| p.def.name == name) {
            prop.value = value;
        }
    }

    fn find(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.def.name == name)
    }

    /// Assign a property value, enforcing its read/write rule and declared
    /// type, and marking the slot dirty.
    pub fn set(&mut self, name: &str, value: SqlValue) -> Result<()> {
        let is_new = self.is_new;
        let prop = self
            .props
            .iter_mut()
            .find(|p| p.def.name == name)
            .ok_or_else(|| OrmError::property_not_found(&self.class, name))?;

        if !prop.def.rule.allows_write(is_new) {
            return Err(OrmError::PropertyNotWritable {
                property: prop.def.name.clone(),
                rule: prop.def.rule,
            });
        }
        if let Some(actual) = value.prop_type() {
            if actual != prop.def.prop_type {
                return Err(OrmError::TypeMismatch {
                    property: prop.def.name.clone(),
                    expected: prop.def.prop_type,
                    actual,
                });
            }
        }

        prop.value = value;
        prop.dirty = true;
        Ok(())
    }

    /// Current value of a property.
    pub fn get(&self, name: &str) -> Result<&SqlValue> {
        self.find(name)
            .map(Property::value)
            .ok_or_else(|| OrmError::property_not_found(&self.class, name))
    }

    /// Whether the object has been persisted yet.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// All property slots.
    pub fn properties(&self) -> &[Property] {
        &self.props
    }

    /// Mark the object persisted: clears every dirty flag and closes
    /// write-once properties.
    pub fn mark_persisted(&mut self) {
        self.is_new = false;
        for prop in &mut self.props {
            prop.dirty = false;
        }
    }

    /// The object's effective primary key bound to its current values.
    pub fn object_key(&self, registry: &ClassRegistry) -> Result<ObjectKey> {
        let resolved = registry.effective_primary_key(&self.class)?;
        let mut key = ObjectKey::new();
        for prop in &resolved.props {
            key.push(prop.name.clone(), self.get(&prop.name)?.clone());
        }
        Ok(key)
    }
}

impl PropertySource for ObjectState {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn property_value(&self, name: &str) -> Result<SqlValue> {
        self.get(name).cloned()
    }

    fn is_dirty(&self, name: &str) -> bool {
        self.find(name).is_some_and(Property::is_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::class::{ClassDef, InheritanceMapping, SuperClassDef};
    use crate::meta::key::PrimaryKeyDef;
    use crate::meta::property::ReadWriteRule;

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.register(
            ClassDef::new("Shape", "Shape_table")
                .with_prop(
                    PropDef::new("ShapeID", PropType::Text).with_rule(ReadWriteRule::WriteOnce),
                )
                .unwrap()
                .with_prop(PropDef::new("ShapeName", PropType::Text))
                .unwrap()
                .with_primary_key(PrimaryKeyDef::object_id("ShapeID")),
        );
        registry.register(
            ClassDef::new("Circle", "circle_table")
                .with_prop(
                    PropDef::new("CircleID", PropType::Text).with_rule(ReadWriteRule::WriteOnce),
                )
                .unwrap()
                .with_prop(PropDef::new("Radius", PropType::I32))
                .unwrap()
                .with_primary_key(PrimaryKeyDef::object_id("CircleID"))
                .with_super_class(SuperClassDef::new("Shape", InheritanceMapping::ClassTable)),
        );
        registry
    }

    #[test]
    fn test_bag_spans_the_chain() {
        let registry = registry();
        let circle = ObjectState::new(&registry, "Circle").unwrap();

        assert!(circle.get("Radius").is_ok());
        assert!(circle.get("ShapeName").is_ok());
        assert!(circle.get("CircleID").is_ok());
        assert!(circle.get("ShapeID").is_ok());
        assert!(circle.get("Missing").is_err());
    }

    #[test]
    fn test_generated_identity_is_shared() {
        let registry = registry();
        let circle = ObjectState::new(&registry, "Circle").unwrap();

        let id = circle.get("CircleID").unwrap();
        assert!(!id.is_null());
        assert_eq!(circle.get("ShapeID").unwrap(), id);
        assert!(!circle.is_dirty("CircleID"));
    }

    #[test]
    fn test_set_id_propagates() {
        let registry = registry();
        let mut circle = ObjectState::new(&registry, "Circle").unwrap();
        circle.set_id(&registry, SqlValue::from("X")).unwrap();

        assert_eq!(circle.get("CircleID").unwrap(), &SqlValue::from("X"));
        assert_eq!(circle.get("ShapeID").unwrap(), &SqlValue::from("X"));
    }

    #[test]
    fn test_identity_reaches_absorbed_parent_key() {
        let mut registry = registry();
        registry.register(
            ClassDef::new("Circle", "circle_concrete")
                .with_prop(
                    PropDef::new("CircleID", PropType::Text).with_rule(ReadWriteRule::WriteOnce),
                )
                .unwrap()
                .with_prop(PropDef::new("Radius", PropType::I32))
                .unwrap()
                .with_primary_key(PrimaryKeyDef::object_id("CircleID"))
                .with_super_class(SuperClassDef::new(
                    "Shape",
                    InheritanceMapping::ConcreteTable,
                )),
        );

        let mut circle = ObjectState::new(&registry, "Circle").unwrap();
        circle.set_id(&registry, SqlValue::from("X")).unwrap();

        // The parent key column lives on the one concrete table as an
        // ordinary column, but still carries the shared identity.
        assert_eq!(circle.get("ShapeID").unwrap(), &SqlValue::from("X"));
        assert!(!circle.is_dirty("ShapeID"));
    }

    #[test]
    fn test_set_marks_dirty_and_checks_type() {
        let registry = registry();
        let mut circle = ObjectState::new(&registry, "Circle").unwrap();

        circle.set("Radius", SqlValue::from(10i32)).unwrap();
        assert!(circle.is_dirty("Radius"));

        let err = circle.set("Radius", SqlValue::from("ten")).unwrap_err();
        assert!(matches!(err, OrmError::TypeMismatch { .. }));

        // Null is typeless and always accepted.
        circle.set("Radius", SqlValue::Null).unwrap();
    }

    #[test]
    fn test_write_once_closes_after_persist() {
        let registry = registry();
        let mut circle = ObjectState::new(&registry, "Circle").unwrap();

        circle.set("CircleID", SqlValue::from("X")).unwrap();
        circle.mark_persisted();

        assert!(!circle.is_new());
        assert!(!circle.is_dirty("CircleID"));
        let err = circle.set("CircleID", SqlValue::from("Y")).unwrap_err();
        assert!(matches!(err, OrmError::PropertyNotWritable { .. }));
    }

    #[test]
    fn test_object_key_uses_own_key() {
        let registry = registry();
        let mut circle = ObjectState::new(&registry, "Circle").unwrap();
        circle.set_id(&registry, SqlValue::from("X")).unwrap();

        let key = circle.object_key(&registry).unwrap();
        assert_eq!(key.value_of("CircleID"), Some(&SqlValue::from("X")));
    }

    #[test]
    fn test_defaults_applied() {
        let mut registry = ClassRegistry::new();
        registry.register(
            ClassDef::new("Shape", "Shape_table")
                .with_prop(PropDef::new("ShapeID", PropType::Text))
                .unwrap()
                .with_prop(
                    PropDef::new("ShapeName", PropType::Text)
                        .with_default(SqlValue::from("unnamed")),
                )
                .unwrap()
                .with_primary_key(PrimaryKeyDef::object_id("ShapeID")),
        );

        let shape = ObjectState::new(&registry, "Shape").unwrap();
        assert_eq!(shape.get("ShapeName").unwrap(), &SqlValue::from("unnamed"));
        assert!(!shape.is_dirty("ShapeName"));
    }

    #[test]
    fn test_composite_key_values() {
        let mut registry = ClassRegistry::new();
        registry.register(
            ClassDef::new("Person", "person")
                .with_prop(PropDef::new("Surname", PropType::Text))
                .unwrap()
                .with_prop(PropDef::new("FirstName", PropType::Text))
                .unwrap()
                .with_primary_key(PrimaryKeyDef::natural(["Surname", "FirstName"])),
        );

        let mut person = ObjectState::new(&registry, "Person").unwrap();
        assert!(person.set_id(&registry, SqlValue::from("X")).is_err());

        person
            .set_key_values(&registry, &[SqlValue::from("Smith"), SqlValue::from("Ann")])
            .unwrap();
        assert_eq!(person.get("Surname").unwrap(), &SqlValue::from("Smith"));

        assert!(person
            .set_key_values(&registry, &[SqlValue::from("Smith")])
            .is_err());
    }
}
