//! # strata-orm
//!
//! Inheritance-aware SQL statement generation library.
//!
//! Maps class hierarchies onto relational tables and generates the
//! parameterized statement collections that persist them, with support
//! for:
//!
//! - **Class-table inheritance**: one table per class, rows linked by a
//!   shared key value
//! - **Concrete-table inheritance**: one table per concrete class holding
//!   all inherited columns
//! - **Single-table inheritance**: one table per hierarchy with a
//!   discriminator column
//! - **Pluggable dialects** via the [`SqlFormatter`] strategy (MySQL,
//!   SQL Server, PostgreSQL, ANSI)
//! - **YAML metadata** bundles validated and applied as a unit
//!
//! ## Example
//!
//! ```rust
//! use strata_orm::{
//!     ClassDefBundle, ClassRegistry, InsertStatementGenerator, MysqlFormatter, ObjectState,
//! };
//!
//! fn main() -> strata_orm::Result<()> {
//!     let yaml = r#"
//! classes:
//!   - class: Shape
//!     table: Shape_table
//!     primary_key: { props: [ShapeID], object_id: true }
//!     properties:
//!       - { name: ShapeID, column: ShapeID, type: text, rule: write_once }
//!       - { name: ShapeName, column: ShapeName, type: text }
//! "#;
//!     let mut registry = ClassRegistry::new();
//!     ClassDefBundle::from_yaml(yaml)?.apply(&mut registry)?;
//!
//!     let mut shape = ObjectState::new(&registry, "Shape")?;
//!     shape.set("ShapeName", "circle".into())?;
//!
//!     let formatter = MysqlFormatter::new();
//!     let statements = InsertStatementGenerator::new(&registry, &formatter).generate(&shape)?;
//!     for stmt in &statements {
//!         println!("{}", stmt);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mapping;
pub mod meta;
pub mod object;
pub mod sql;

// Re-exports for convenient access
pub use error::{OrmError, Result};
pub use mapping::{
    super_class_key, DeleteStatementGenerator, Discriminator, InsertStatementGenerator,
    MappingLevel, MappingPlan, SelectStatementBuilder, UpdateStatementGenerator,
};
pub use meta::{
    ClassDef, ClassDefBundle, ClassRegistry, InheritanceMapping, ObjectKey, PrimaryKeyDef,
    PropDef, PropType, ReadWriteRule, SuperClassDef,
};
pub use object::{ObjectState, PropertySource};
pub use sql::{
    AnsiFormatter, FormatterImpl, MssqlFormatter, MysqlFormatter, PostgresFormatter, SqlFormatter,
    SqlParam, SqlStatement, SqlStatementCollection, SqlValue,
};
