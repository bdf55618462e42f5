//! Class and property definition model.
//!
//! In-memory metadata describing mapped types:
//!
//! - [`property`]: property definitions, types, and read/write rules
//! - [`key`]: primary key definitions and runtime key values
//! - [`class`]: class definitions and superclass mapping declarations
//! - [`registry`]: the injectable class-definition catalog
//! - [`loader`]: YAML bundle loading and validation

pub mod class;
pub mod key;
pub mod loader;
pub mod property;
pub mod registry;

pub use class::{
    ClassDef, InheritanceMapping, RelPropLink, RelationshipDef, RelationshipKind, SuperClassDef,
};
pub use key::{ObjectKey, PrimaryKeyDef};
pub use loader::ClassDefBundle;
pub use property::{PropDef, PropDefCol, PropType, ReadWriteRule};
pub use registry::{ClassRegistry, ResolvedKey};
