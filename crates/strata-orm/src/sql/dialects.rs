//! Bundled formatter implementations.
//!
//! One formatter per supported back-end family, plus [`FormatterImpl`] for
//! static dispatch. Adding a back-end means implementing [`SqlFormatter`],
//! adding an enum variant, and extending [`FormatterImpl::from_db_type`].

use crate::error::{OrmError, Result};
use crate::sql::formatter::SqlFormatter;

/// MySQL/MariaDB formatter: backtick delimiters, `LIMIT` at the end.
#[derive(Debug, Clone, Default)]
pub struct MysqlFormatter;

impl MysqlFormatter {
    /// Create a new MySQL formatter.
    pub fn new() -> Self {
        Self
    }
}

impl SqlFormatter for MysqlFormatter {
    fn name(&self) -> &str {
        "mysql"
    }

    fn left_field_delimiter(&self) -> &str {
        "`"
    }

    fn right_field_delimiter(&self) -> &str {
        "`"
    }
}

/// SQL Server formatter: bracket delimiters, `TOP n` after `SELECT`.
#[derive(Debug, Clone, Default)]
pub struct MssqlFormatter;

impl MssqlFormatter {
    /// Create a new SQL Server formatter.
    pub fn new() -> Self {
        Self
    }
}

impl SqlFormatter for MssqlFormatter {
    fn name(&self) -> &str {
        "mssql"
    }

    fn left_field_delimiter(&self) -> &str {
        "["
    }

    fn right_field_delimiter(&self) -> &str {
        "]"
    }

    fn limit_clause_at_start(&self, limit: usize) -> String {
        format!("TOP {}", limit)
    }

    fn limit_clause_at_end(&self, _limit: usize) -> String {
        String::new()
    }
}

/// PostgreSQL formatter: double-quote delimiters, `LIMIT` at the end.
#[derive(Debug, Clone, Default)]
pub struct PostgresFormatter;

impl PostgresFormatter {
    /// Create a new PostgreSQL formatter.
    pub fn new() -> Self {
        Self
    }
}

impl SqlFormatter for PostgresFormatter {
    fn name(&self) -> &str {
        "postgres"
    }

    fn left_field_delimiter(&self) -> &str {
        "\""
    }

    fn right_field_delimiter(&self) -> &str {
        "\""
    }
}

/// Plain ANSI formatter: no delimiters at all.
///
/// Useful for back-ends that accept bare identifiers and for readable test
/// output.
#[derive(Debug, Clone, Default)]
pub struct AnsiFormatter;

impl AnsiFormatter {
    /// Create a new ANSI formatter.
    pub fn new() -> Self {
        Self
    }
}

impl SqlFormatter for AnsiFormatter {
    fn name(&self) -> &str {
        "ansi"
    }

    fn left_field_delimiter(&self) -> &str {
        ""
    }

    fn right_field_delimiter(&self) -> &str {
        ""
    }
}

/// Enum-based static dispatch over the bundled formatters.
#[derive(Debug, Clone)]
pub enum FormatterImpl {
    Mysql(MysqlFormatter),
    Mssql(MssqlFormatter),
    Postgres(PostgresFormatter),
    Ansi(AnsiFormatter),
}

impl FormatterImpl {
    /// Create a formatter from a database type string.
    ///
    /// # Errors
    ///
    /// Returns an error if the database type is not recognized.
    pub fn from_db_type(db_type: &str) -> Result<Self> {
        match db_type.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(FormatterImpl::Mysql(MysqlFormatter::new())),
            "mssql" | "sqlserver" | "sql_server" => Ok(FormatterImpl::Mssql(MssqlFormatter::new())),
            "postgres" | "postgresql" | "pg" => {
                Ok(FormatterImpl::Postgres(PostgresFormatter::new()))
            }
            "ansi" => Ok(FormatterImpl::Ansi(AnsiFormatter::new())),
            other => Err(OrmError::Config(format!(
                "Unknown database type: '{}'. Supported types: mysql, mssql, postgres, ansi",
                other
            ))),
        }
    }
}

impl SqlFormatter for FormatterImpl {
    fn name(&self) -> &str {
        match self {
            FormatterImpl::Mysql(f) => f.name(),
            FormatterImpl::Mssql(f) => f.name(),
            FormatterImpl::Postgres(f) => f.name(),
            FormatterImpl::Ansi(f) => f.name(),
        }
    }

    fn left_field_delimiter(&self) -> &str {
        match self {
            FormatterImpl::Mysql(f) => f.left_field_delimiter(),
            FormatterImpl::Mssql(f) => f.left_field_delimiter(),
            FormatterImpl::Postgres(f) => f.left_field_delimiter(),
            FormatterImpl::Ansi(f) => f.left_field_delimiter(),
        }
    }

    fn right_field_delimiter(&self) -> &str {
        match self {
            FormatterImpl::Mysql(f) => f.right_field_delimiter(),
            FormatterImpl::Mssql(f) => f.right_field_delimiter(),
            FormatterImpl::Postgres(f) => f.right_field_delimiter(),
            FormatterImpl::Ansi(f) => f.right_field_delimiter(),
        }
    }

    fn limit_clause_at_start(&self, limit: usize) -> String {
        match self {
            FormatterImpl::Mysql(f) => f.limit_clause_at_start(limit),
            FormatterImpl::Mssql(f) => f.limit_clause_at_start(limit),
            FormatterImpl::Postgres(f) => f.limit_clause_at_start(limit),
            FormatterImpl::Ansi(f) => f.limit_clause_at_start(limit),
        }
    }

    fn limit_clause_at_end(&self, limit: usize) -> String {
        match self {
            FormatterImpl::Mysql(f) => f.limit_clause_at_end(limit),
            FormatterImpl::Mssql(f) => f.limit_clause_at_end(limit),
            FormatterImpl::Postgres(f) => f.limit_clause_at_end(limit),
            FormatterImpl::Ansi(f) => f.limit_clause_at_end(limit),
        }
    }
}
