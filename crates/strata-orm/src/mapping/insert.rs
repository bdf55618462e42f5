//! INSERT statement generation.

use tracing::debug;

use crate::error::Result;
use crate::mapping::plan::MappingPlan;
use crate::meta::registry::ClassRegistry;
use crate::object::PropertySource;
use crate::sql::formatter::SqlFormatter;
use crate::sql::statement::{SqlStatement, SqlStatementCollection};
use crate::sql::value::SqlValue;

/// Generates the INSERT statement collection for one object.
///
/// One statement per mapping level, emitted root table first so that
/// foreign-key constraints from child rows to parent rows are satisfied
/// when the collection runs in order.
pub struct InsertStatementGenerator<'a> {
    registry: &'a ClassRegistry,
    formatter: &'a dyn SqlFormatter,
}

impl<'a> InsertStatementGenerator<'a> {
    /// Create a generator over the given registry and dialect.
    pub fn new(registry: &'a ClassRegistry, formatter: &'a dyn SqlFormatter) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    /// Generate the INSERT collection for an object.
    ///
    /// Column order per statement: key columns, declared properties, then
    /// the discriminator (single-table only). Every value travels as a
    /// parameter, discriminator included. Key columns on every level carry
    /// the leaf object's key values.
    pub fn generate(&self, object: &dyn PropertySource) -> Result<SqlStatementCollection> {
        let plan = MappingPlan::build(self.registry, object.class_name())?;
        let key_values = plan
            .key
            .props
            .iter()
            .map(|p| object.property_value(&p.name))
            .collect::<Result<Vec<_>>>()?;

        let mut collection = SqlStatementCollection::new();
        for level in plan.levels.iter().rev() {
            let mut pairs: Vec<(String, SqlValue)> = Vec::new();
            for (i, kp) in level.key_props.iter().enumerate() {
                pairs.push((self.formatter.delimit_field(&kp.column), key_values[i].clone()));
            }
            for prop in &level.props {
                // Link columns that double as key columns are already in;
                // explicit link columns appear among declared props and get
                // the shared key value through the object state.
                pairs.push((
                    self.formatter.delimit_field(&prop.column),
                    object.property_value(&prop.name)?,
                ));
            }
            if let Some(disc) = &level.discriminator {
                pairs.push((
                    self.formatter.delimit_field(&disc.column),
                    SqlValue::Text(disc.value.clone()),
                ));
            }

            let mut stmt = SqlStatement::new();
            let mut placeholders = Vec::with_capacity(pairs.len());
            for (_, value) in &pairs {
                placeholders.push(stmt.add_parameter(self.formatter, value.clone()));
            }
            let columns: Vec<&str> = pairs.iter().map(|(col, _)| col.as_str()).collect();
            stmt.push_text(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.formatter.delimit_table(&level.table),
                columns.join(", "),
                placeholders.join(", ")
            ));
            collection.add(stmt);
        }

        debug!(
            class = %object.class_name(),
            statements = collection.len(),
            "generated insert statements"
        );
        Ok(collection)
    }
}
