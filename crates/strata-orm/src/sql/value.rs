//! SQL parameter values.
//!
//! Statement generators carry property values as [`SqlValue`]: an owned,
//! typed representation that parameter lists and WHERE-clause literals are
//! rendered from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meta::PropType;

/// A typed SQL value bound to a statement parameter.
///
/// Variants mirror [`PropType`] one-to-one; `Null` matches any declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
    /// Text/string data.
    Text(String),
    /// UUID/GUID value.
    Uuid(Uuid),
    /// Decimal value with fixed precision.
    Decimal(Decimal),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
    /// Date without time component.
    Date(NaiveDate),
    /// Time without date component.
    Time(NaiveTime),
}

impl SqlValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// The declared property type this value satisfies.
    ///
    /// Returns `None` for `Null`, which satisfies every type.
    #[must_use]
    pub fn prop_type(&self) -> Option<PropType> {
        match self {
            SqlValue::Null => None,
            SqlValue::Bool(_) => Some(PropType::Bool),
            SqlValue::I32(_) => Some(PropType::I32),
            SqlValue::I64(_) => Some(PropType::I64),
            SqlValue::F64(_) => Some(PropType::F64),
            SqlValue::Text(_) => Some(PropType::Text),
            SqlValue::Uuid(_) => Some(PropType::Uuid),
            SqlValue::Decimal(_) => Some(PropType::Decimal),
            SqlValue::DateTime(_) => Some(PropType::DateTime),
            SqlValue::Date(_) => Some(PropType::Date),
            SqlValue::Time(_) => Some(PropType::Time),
        }
    }

    /// Render the value as an inline SQL literal.
    ///
    /// Single quotes in text are doubled. Used for discriminator predicates
    /// and debug output; data values travel as parameters, never literals.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
            SqlValue::I32(v) => v.to_string(),
            SqlValue::I64(v) => v.to_string(),
            SqlValue::F64(v) => v.to_string(),
            SqlValue::Text(v) => format!("'{}'", escape_single_quotes(v)),
            SqlValue::Uuid(v) => format!("'{}'", v),
            SqlValue::Decimal(v) => v.to_string(),
            SqlValue::DateTime(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S")),
            SqlValue::Date(v) => format!("'{}'", v.format("%Y-%m-%d")),
            SqlValue::Time(v) => format!("'{}'", v.format("%H:%M:%S")),
        }
    }
}

/// Double single quotes for safe embedding in a quoted SQL literal.
pub(crate) fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', "''")
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}
