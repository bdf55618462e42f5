//! UPDATE statement generation.

use tracing::debug;

use crate::error::Result;
use crate::mapping::plan::MappingPlan;
use crate::meta::registry::ClassRegistry;
use crate::object::PropertySource;
use crate::sql::formatter::SqlFormatter;
use crate::sql::statement::{SqlStatement, SqlStatementCollection};
use crate::sql::value::SqlValue;

/// Generates the UPDATE statement collection for one object.
///
/// Only levels with at least one dirty property produce a statement, so
/// editing a single property of a three-level class yields exactly one
/// UPDATE. Clean objects yield an empty collection.
pub struct UpdateStatementGenerator<'a> {
    registry: &'a ClassRegistry,
    formatter: &'a dyn SqlFormatter,
}

impl<'a> UpdateStatementGenerator<'a> {
    /// Create a generator over the given registry and dialect.
    pub fn new(registry: &'a ClassRegistry, formatter: &'a dyn SqlFormatter) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    /// Generate the UPDATE collection for an object, leaf level first.
    ///
    /// Each statement sets the level's dirty columns (plus the
    /// discriminator on a single-table level) and filters on the level's
    /// key columns. SET parameters precede WHERE parameters.
    pub fn generate(&self, object: &dyn PropertySource) -> Result<SqlStatementCollection> {
        let plan = MappingPlan::build(self.registry, object.class_name())?;
        let key_values = plan
            .key
            .props
            .iter()
            .map(|p| object.property_value(&p.name))
            .collect::<Result<Vec<_>>>()?;

        let mut collection = SqlStatementCollection::new();
        for level in &plan.levels {
            let dirty: Vec<_> = level
                .props
                .iter()
                .filter(|p| object.is_dirty(&p.name))
                .collect();
            if dirty.is_empty() {
                continue;
            }

            let mut stmt = SqlStatement::new();
            let mut assignments = Vec::new();
            for prop in &dirty {
                let placeholder =
                    stmt.add_parameter(self.formatter, object.property_value(&prop.name)?);
                assignments.push(format!(
                    "{} = {}",
                    self.formatter.delimit_field(&prop.column),
                    placeholder
                ));
            }
            if let Some(disc) = &level.discriminator {
                let placeholder =
                    stmt.add_parameter(self.formatter, SqlValue::Text(disc.value.clone()));
                assignments.push(format!(
                    "{} = {}",
                    self.formatter.delimit_field(&disc.column),
                    placeholder
                ));
            }

            let mut conditions = Vec::new();
            for (i, kp) in level.key_props.iter().enumerate() {
                let placeholder = stmt.add_parameter(self.formatter, key_values[i].clone());
                conditions.push(format!(
                    "{} = {}",
                    self.formatter.delimit_field(&kp.column),
                    placeholder
                ));
            }

            stmt.push_text(&format!(
                "UPDATE {} SET {} WHERE {}",
                self.formatter.delimit_table(&level.table),
                assignments.join(", "),
                conditions.join(" AND ")
            ));
            collection.add(stmt);
        }

        debug!(
            class = %object.class_name(),
            statements = collection.len(),
            "generated update statements"
        );
        Ok(collection)
    }
}
