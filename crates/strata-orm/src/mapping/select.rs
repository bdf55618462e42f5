//! SELECT statement generation.

use tracing::debug;

use crate::error::{OrmError, Result};
use crate::mapping::plan::MappingPlan;
use crate::meta::key::ObjectKey;
use crate::meta::registry::ClassRegistry;
use crate::sql::formatter::SqlFormatter;
use crate::sql::statement::SqlStatement;
use crate::sql::value::{escape_single_quotes, SqlValue};

/// Builds the SELECT statement that loads one object by key.
///
/// Class-table chains become a join across the level tables; single-table
/// and concrete-table chains read one table. Column lists are sorted per
/// level so statement text is deterministic regardless of declaration
/// order.
pub struct SelectStatementBuilder<'a> {
    registry: &'a ClassRegistry,
    formatter: &'a dyn SqlFormatter,
}

impl<'a> SelectStatementBuilder<'a> {
    /// Create a builder over the given registry and dialect.
    pub fn new(registry: &'a ClassRegistry, formatter: &'a dyn SqlFormatter) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    /// Build the SELECT for one object of `class` identified by `key`.
    ///
    /// Columns come level by level, leaf first, each level's columns in
    /// ascending column-name order and table-qualified only when the
    /// statement spans more than one table. The WHERE clause filters on
    /// the discriminator (as an escaped literal, single-table only) and
    /// the leaf key columns (as parameters). `limit` is placed where the
    /// dialect wants it.
    pub fn statement_for_key(
        &self,
        class: &str,
        key: &ObjectKey,
        limit: Option<usize>,
    ) -> Result<SqlStatement> {
        let plan = MappingPlan::build(self.registry, class)?;
        let qualify = plan.levels.len() > 1;

        let mut columns = Vec::new();
        for level in &plan.levels {
            let mut level_cols: Vec<_> =
                level.key_props.iter().chain(level.props.iter()).collect();
            level_cols.sort_by(|a, b| a.column.cmp(&b.column));
            for prop in level_cols {
                if qualify {
                    columns.push(format!(
                        "{}.{}",
                        self.formatter.delimit_table(&level.table),
                        self.formatter.delimit_field(&prop.column)
                    ));
                } else {
                    columns.push(self.formatter.delimit_field(&prop.column));
                }
            }
        }

        let mut stmt = SqlStatement::new();
        let mut text = String::from("SELECT ");
        if let Some(limit) = limit {
            let fragment = self.formatter.limit_clause_at_start(limit);
            if !fragment.is_empty() {
                text.push_str(&fragment);
                text.push(' ');
            }
        }
        text.push_str(&columns.join(", "));
        text.push_str(" FROM ");
        text.push_str(&self.formatter.delimit_table(&plan.levels[0].table));

        for pair in plan.levels.windows(2) {
            let (child, parent) = (&pair[0], &pair[1]);
            let conditions: Vec<String> = child
                .link_props
                .iter()
                .zip(parent.key_props.iter())
                .map(|(link, pk)| {
                    format!(
                        "{}.{} = {}.{}",
                        self.formatter.delimit_table(&child.table),
                        self.formatter.delimit_field(&link.column),
                        self.formatter.delimit_table(&parent.table),
                        self.formatter.delimit_field(&pk.column)
                    )
                })
                .collect();
            text.push_str(" INNER JOIN ");
            text.push_str(&self.formatter.delimit_table(&parent.table));
            text.push_str(" ON ");
            text.push_str(&conditions.join(" AND "));
        }

        let mut conditions = Vec::new();
        if let Some(disc) = &plan.levels[0].discriminator {
            conditions.push(format!(
                "{} = '{}'",
                self.formatter.delimit_field(&disc.column),
                escape_single_quotes(&disc.value)
            ));
        }
        for (i, kp) in plan.key.props.iter().enumerate() {
            let value = key_value_for(key, &kp.name, i).ok_or_else(|| {
                OrmError::config(format!(
                    "No key value supplied for property '{}' of class '{}'",
                    kp.name, class
                ))
            })?;
            let placeholder = stmt.add_parameter(self.formatter, value);
            // The leaf table owns the key columns; qualify them in joined
            // statements in case an ancestor table reuses the column name.
            let column = if qualify {
                format!(
                    "{}.{}",
                    self.formatter.delimit_table(&plan.levels[0].table),
                    self.formatter.delimit_field(&kp.column)
                )
            } else {
                self.formatter.delimit_field(&kp.column)
            };
            conditions.push(format!("{} = {}", column, placeholder));
        }
        text.push_str(" WHERE ");
        text.push_str(&conditions.join(" AND "));

        if let Some(limit) = limit {
            let fragment = self.formatter.limit_clause_at_end(limit);
            if !fragment.is_empty() {
                text.push(' ');
                text.push_str(&fragment);
            }
        }

        stmt.push_text(&text);
        debug!(class = %class, "built select statement");
        Ok(stmt)
    }
}

/// Look a key value up by property name, falling back to position for
/// keys supplied without names.
fn key_value_for(key: &ObjectKey, prop: &str, index: usize) -> Option<SqlValue> {
    key.value_of(prop)
        .or_else(|| key.entries().get(index).map(|(_, value)| value))
        .cloned()
}
