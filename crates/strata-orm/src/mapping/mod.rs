//! Inheritance mapping and statement generation.
//!
//! [`plan`] flattens an inheritance chain into explicit levels; the
//! generator modules turn a plan plus an object's property values into
//! parameterized statement collections:
//!
//! - [`insert`]: one INSERT per level, root table first
//! - [`update`]: one UPDATE per dirty level, leaf table first
//! - [`delete`]: one DELETE per level, leaf table first
//! - [`select`]: a single joined SELECT loading the object by key
//! - [`superkey`]: the key an object holds in its parent's table

pub mod delete;
pub mod insert;
pub mod plan;
pub mod select;
pub mod superkey;
pub mod update;

pub use delete::DeleteStatementGenerator;
pub use insert::InsertStatementGenerator;
pub use plan::{Discriminator, MappingLevel, MappingPlan};
pub use select::SelectStatementBuilder;
pub use superkey::super_class_key;
pub use update::UpdateStatementGenerator;
