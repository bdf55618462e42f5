//! Class definitions and superclass mapping declarations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::meta::key::PrimaryKeyDef;
use crate::meta::property::{PropDef, PropDefCol};

/// Strategy for mapping an inheritance hierarchy onto tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceMapping {
    /// Every class in the chain has its own table; child rows reference
    /// parent rows through a shared key value.
    ClassTable,
    /// Only the concrete class has a table, containing all inherited
    /// columns.
    ConcreteTable,
    /// The whole chain collapses onto the root's table, disambiguated by a
    /// discriminator column.
    SingleTable,
}

/// Declares how a class relates to its immediate parent.
///
/// Owned exclusively by the child [`ClassDef`]; the parent is referenced by
/// name and resolved through the registry at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperClassDef {
    /// Parent class name.
    pub class: String,

    /// Mapping strategy for this link.
    pub mapping: InheritanceMapping,

    /// Child property holding the copied parent key. `None` means the
    /// parent's own key property name is reused.
    #[serde(default)]
    pub id: Option<String>,

    /// Discriminator column for single-table mapping. Defaults to
    /// `<ParentClass>Type` when unset.
    #[serde(default)]
    pub discriminator: Option<String>,

    /// Discriminator value override. Defaults to the concrete class name.
    #[serde(default)]
    pub discriminator_value: Option<String>,
}

impl SuperClassDef {
    /// Declare a link to a parent with the given strategy.
    pub fn new(class: impl Into<String>, mapping: InheritanceMapping) -> Self {
        Self {
            class: class.into(),
            mapping,
            id: None,
            discriminator: None,
            discriminator_value: None,
        }
    }

    /// Name the child property that carries the parent key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Name the discriminator column.
    pub fn with_discriminator(mut self, column: impl Into<String>) -> Self {
        self.discriminator = Some(column.into());
        self
    }

    /// Override the discriminator value.
    pub fn with_discriminator_value(mut self, value: impl Into<String>) -> Self {
        self.discriminator_value = Some(value.into());
        self
    }
}

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Points at one related object.
    Single,
    /// Points at a collection of related objects.
    Multiple,
}

/// One property-to-property link within a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelPropLink {
    /// Property on the owning class.
    pub owner_prop: String,
    /// Property on the related class.
    pub related_prop: String,
}

/// A named relationship from one class to another.
///
/// Navigation is out of the generator's scope; relationships are carried on
/// the class definition and validated by the bundle loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDef {
    /// Relationship name (unique within the class).
    pub name: String,

    /// Related class name.
    pub related_class: String,

    /// Cardinality.
    pub kind: RelationshipKind,

    /// Ordered property links joining the two classes.
    pub links: Vec<RelPropLink>,
}

impl RelationshipDef {
    /// Create a relationship definition.
    pub fn new(
        name: impl Into<String>,
        related_class: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            name: name.into(),
            related_class: related_class.into(),
            kind,
            links: Vec::new(),
        }
    }

    /// Add a property link.
    pub fn with_link(
        mut self,
        owner_prop: impl Into<String>,
        related_prop: impl Into<String>,
    ) -> Self {
        self.links.push(RelPropLink {
            owner_prop: owner_prop.into(),
            related_prop: related_prop.into(),
        });
        self
    }
}

/// In-memory metadata for one mapped class.
///
/// At most one superclass: the mapping forms a tree, never multiple
/// inheritance. Created during the configuration phase and read-only
/// thereafter (see [`ClassRegistry`](crate::meta::ClassRegistry)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Class name (registry key).
    pub class: String,

    /// Physical table name.
    pub table: String,

    /// Declared properties.
    #[serde(default)]
    pub properties: PropDefCol,

    /// Primary key, when this class declares its own.
    #[serde(default)]
    pub primary_key: Option<PrimaryKeyDef>,

    /// Relationships to other classes.
    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,

    /// Link to the immediate parent, if any.
    #[serde(default)]
    pub super_class: Option<SuperClassDef>,
}

impl ClassDef {
    /// Create a class definition.
    pub fn new(class: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            table: table.into(),
            properties: PropDefCol::new(),
            primary_key: None,
            relationships: Vec::new(),
            super_class: None,
        }
    }

    /// Add a property definition.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate property name.
    pub fn with_prop(mut self, def: PropDef) -> Result<Self> {
        let class = self.class.clone();
        self.properties.add(&class, def)?;
        Ok(self)
    }

    /// Set the primary key.
    pub fn with_primary_key(mut self, pk: PrimaryKeyDef) -> Self {
        self.primary_key = Some(pk);
        self
    }

    /// Attach the superclass declaration.
    pub fn with_super_class(mut self, sc: SuperClassDef) -> Self {
        self.super_class = Some(sc);
        self
    }

    /// Add a relationship definition.
    pub fn with_relationship(mut self, rel: RelationshipDef) -> Self {
        self.relationships.push(rel);
        self
    }

    /// Get a property definition by name.
    pub fn get_prop(&self, name: &str) -> Option<&PropDef> {
        self.properties.get(name)
    }

    /// Get a property definition by name, failing with a lookup error.
    pub fn require_prop(&self, name: &str) -> Result<&PropDef> {
        self.properties.require(&self.class, name)
    }

    /// Get a relationship by name.
    pub fn get_relationship(&self, name: &str) -> Option<&RelationshipDef> {
        self.relationships.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::property::PropType;

    #[test]
    fn test_class_builder() {
        let class = ClassDef::new("Shape", "Shape_table")
            .with_prop(PropDef::new("ShapeID", PropType::Text))
            .unwrap()
            .with_prop(PropDef::new("ShapeName", PropType::Text))
            .unwrap()
            .with_primary_key(PrimaryKeyDef::object_id("ShapeID"));

        assert_eq!(class.class, "Shape");
        assert_eq!(class.table, "Shape_table");
        assert_eq!(class.properties.len(), 2);
        assert!(class.get_prop("ShapeName").is_some());
        assert!(class.super_class.is_none());
    }

    #[test]
    fn test_duplicate_prop_rejected() {
        let result = ClassDef::new("Shape", "Shape_table")
            .with_prop(PropDef::new("ShapeID", PropType::Text))
            .unwrap()
            .with_prop(PropDef::new("ShapeID", PropType::Text));

        assert!(result.is_err());
    }

    #[test]
    fn test_super_class_builder() {
        let sc = SuperClassDef::new("Shape", InheritanceMapping::SingleTable)
            .with_discriminator("ShapeType_field")
            .with_discriminator_value("RoundThing");

        assert_eq!(sc.class, "Shape");
        assert_eq!(sc.mapping, InheritanceMapping::SingleTable);
        assert_eq!(sc.discriminator.as_deref(), Some("ShapeType_field"));
        assert_eq!(sc.discriminator_value.as_deref(), Some("RoundThing"));
        assert!(sc.id.is_none());
    }

    #[test]
    fn test_relationship_lookup() {
        let class = ClassDef::new("Circle", "circle_table").with_relationship(
            RelationshipDef::new("owner", "ContactPerson", RelationshipKind::Single)
                .with_link("OwnerID", "ContactPersonID"),
        );

        let rel = class.get_relationship("owner").unwrap();
        assert_eq!(rel.related_class, "ContactPerson");
        assert_eq!(rel.links.len(), 1);
        assert!(class.get_relationship("missing").is_none());
    }
}
