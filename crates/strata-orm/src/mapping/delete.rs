//! DELETE statement generation.

use tracing::debug;

use crate::error::Result;
use crate::mapping::plan::MappingPlan;
use crate::meta::registry::ClassRegistry;
use crate::object::PropertySource;
use crate::sql::formatter::SqlFormatter;
use crate::sql::statement::{SqlStatement, SqlStatementCollection};

/// Generates the DELETE statement collection for one object.
///
/// One statement per mapping level, child table first (the reverse of
/// insert order) so parent rows outlive the child rows that reference
/// them. Single-table and concrete-table chains collapse to one statement
/// against one table; the single-table case needs no discriminator
/// predicate because the key value alone identifies the row.
pub struct DeleteStatementGenerator<'a> {
    registry: &'a ClassRegistry,
    formatter: &'a dyn SqlFormatter,
}

impl<'a> DeleteStatementGenerator<'a> {
    /// Create a generator over the given registry and dialect.
    pub fn new(registry: &'a ClassRegistry, formatter: &'a dyn SqlFormatter) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    /// Generate the DELETE collection for an object, leaf level first.
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
            let mut stmt = SqlStatement::new();
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
                "DELETE FROM {} WHERE {}",
                self.formatter.delimit_table(&level.table),
                conditions.join(" AND ")
            ));
            collection.add(stmt);
        }

        debug!(
            class = %object.class_name(),
            statements = collection.len(),
            "generated delete statements"
        );
        Ok(collection)
    }
}
