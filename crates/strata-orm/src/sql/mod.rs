//! SQL statement representation and rendering strategy.
//!
//! - [`value`]: typed parameter values
//! - [`statement`]: parameterized statements and ordered collections
//! - [`formatter`]: the dialect strategy trait
//! - [`dialects`]: bundled formatter implementations

pub mod dialects;
pub mod formatter;
pub mod statement;
pub mod value;

pub use dialects::{AnsiFormatter, FormatterImpl, MssqlFormatter, MysqlFormatter, PostgresFormatter};
pub use formatter::SqlFormatter;
pub use statement::{SqlParam, SqlStatement, SqlStatementCollection};
pub use value::SqlValue;
