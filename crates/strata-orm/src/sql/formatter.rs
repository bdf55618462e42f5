//! SQL formatter strategy.
//!
//! Identifier delimiting and clause placement are the only things the
//! generators vary across database back-ends, so they sit behind one
//! strategy trait. Data values always travel as parameters; identifiers
//! cannot, which is why delimiting lives here and escapes the closing
//! delimiter by doubling it.

/// SQL syntax strategy for a database back-end.
///
/// Implementations differ in field delimiters and row-limit placement.
/// Parameter placeholders default to the `?Param<N>` convention (zero-based,
/// sequential per statement); a formatter may override it.
pub trait SqlFormatter: Send + Sync {
    /// Formatter identifier (e.g. "mysql", "mssql").
    fn name(&self) -> &str;

    /// Opening delimiter for field and table names.
    fn left_field_delimiter(&self) -> &str;

    /// Closing delimiter for field and table names.
    fn right_field_delimiter(&self) -> &str;

    /// Delimit a column name, doubling any embedded closing delimiter.
    fn delimit_field(&self, name: &str) -> String {
        let right = self.right_field_delimiter();
        let escaped = if right.is_empty() {
            name.to_string()
        } else {
            name.replace(right, &format!("{0}{0}", right))
        };
        format!(
            "{}{}{}",
            self.left_field_delimiter(),
            escaped,
            self.right_field_delimiter()
        )
    }

    /// Delimit a table name. Same rules as fields for every bundled dialect.
    fn delimit_table(&self, name: &str) -> String {
        self.delimit_field(name)
    }

    /// Placeholder for the parameter at the given zero-based index.
    fn param_placeholder(&self, index: usize) -> String {
        format!("?Param{}", index)
    }

    /// Row-limit fragment placed directly after `SELECT`, or empty.
    fn limit_clause_at_start(&self, _limit: usize) -> String {
        String::new()
    }

    /// Row-limit fragment appended to the statement, or empty.
    fn limit_clause_at_end(&self, limit: usize) -> String {
        format!("LIMIT {}", limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BracketFormatter;

    impl SqlFormatter for BracketFormatter {
        fn name(&self) -> &str {
            "bracket"
        }

        fn left_field_delimiter(&self) -> &str {
            "["
        }

        fn right_field_delimiter(&self) -> &str {
            "]"
        }
    }

    struct BareFormatter;

    impl SqlFormatter for BareFormatter {
        fn name(&self) -> &str {
            "bare"
        }

        fn left_field_delimiter(&self) -> &str {
            ""
        }

        fn right_field_delimiter(&self) -> &str {
            ""
        }
    }

    #[test]
    fn test_delimit_field_escapes_closing_delimiter() {
        let f = BracketFormatter;
        assert_eq!(f.delimit_field("ShapeID"), "[ShapeID]");
        assert_eq!(f.delimit_field("odd]name"), "[odd]]name]");
    }

    #[test]
    fn test_empty_delimiters_pass_through() {
        let f = BareFormatter;
        assert_eq!(f.delimit_field("ShapeID"), "ShapeID");
    }

    #[test]
    fn test_default_placeholder_convention() {
        let f = BareFormatter;
        assert_eq!(f.param_placeholder(0), "?Param0");
        assert_eq!(f.param_placeholder(12), "?Param12");
    }
}
