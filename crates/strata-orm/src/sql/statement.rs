//! Parameterized SQL statements and statement collections.
//!
//! A [`SqlStatement`] is SQL text plus an ordered parameter list; a
//! [`SqlStatementCollection`] is the ordered sequence of statements needed
//! to persist one object, possibly across several tables. Parameter order
//! within a statement always matches placeholder order in the text.

use std::fmt;

use crate::sql::formatter::SqlFormatter;
use crate::sql::value::SqlValue;

/// One named, positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    /// Parameter name without placeholder sigil (`Param0`, `Param1`, …).
    pub name: String,
    /// Bound value.
    pub value: SqlValue,
}

/// A single parameterized SQL statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlStatement {
    text: String,
    params: Vec<SqlParam>,
}

impl SqlStatement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a statement from pre-rendered text with no parameters.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Append raw text to the statement.
    pub fn push_text(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    /// Bind the next parameter and return its placeholder for embedding.
    ///
    /// Parameters are numbered sequentially from zero per statement, so the
    /// returned placeholder (`?Param0`, `?Param1`, …) is always position
    /// `n` in [`params`](Self::params).
    pub fn add_parameter(&mut self, formatter: &dyn SqlFormatter, value: SqlValue) -> String {
        let index = self.params.len();
        self.params.push(SqlParam {
            name: format!("Param{}", index),
            value,
        });
        formatter.param_placeholder(index)
    }

    /// The statement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The ordered parameter list.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if !self.params.is_empty() {
            let rendered: Vec<String> = self
                .params
                .iter()
                .map(|p| format!("{}={}", p.name, p.value.to_literal()))
                .collect();
            write!(f, " [{}]", rendered.join(", "))?;
        }
        Ok(())
    }
}

/// An ordered sequence of statements for one logical save or delete.
///
/// Ordering is load-bearing: insert collections run parent table before
/// child table, delete collections the reverse.
#[derive(Debug, Clone, Default)]
pub struct SqlStatementCollection {
    statements: Vec<SqlStatement>,
}

impl SqlStatementCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn add(&mut self, statement: SqlStatement) {
        self.statements.push(statement);
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Get a statement by position.
    pub fn get(&self, index: usize) -> Option<&SqlStatement> {
        self.statements.get(index)
    }

    /// Iterate over statements in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, SqlStatement> {
        self.statements.iter()
    }
}

impl IntoIterator for SqlStatementCollection {
    type Item = SqlStatement;
    type IntoIter = std::vec::IntoIter<SqlStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a SqlStatementCollection {
    type Item = &'a SqlStatement;
    type IntoIter = std::slice::Iter<'a, SqlStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
