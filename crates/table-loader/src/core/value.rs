//! SQL value scalars bound as statement parameters.
//!
//! Rows handed to the loader are ordered sequences of [`SqlValue`]s. The
//! loader never interprets values beyond passing them to the database
//! handle as parameters of the prepared INSERT statement.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

/// A scalar value occupying one cell of a row.
///
/// Untyped configuration data (YAML/JSON) deserializes onto the first five
/// variants; the typed variants are available to programmatic callers and
/// custom row sources.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (all integer widths collapse to 64-bit).
    Int(i64),

    /// Floating point value.
    Float(f64),

    /// Text value.
    Text(String),

    /// UUID/GUID value.
    Uuid(Uuid),

    /// Exact decimal value.
    Decimal(Decimal),

    /// Date without time component.
    Date(NaiveDate),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Borrow the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        SqlValue::Float(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
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

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

impl<'de> Deserialize<'de> for SqlValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = SqlValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar value (null, boolean, number, or string)")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<SqlValue, E> {
                Ok(SqlValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SqlValue, E> {
                Ok(SqlValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SqlValue, E> {
                i64::try_from(v)
                    .map(SqlValue::Int)
                    .map_err(|_| E::custom(format!("integer {} out of range", v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<SqlValue, E> {
                Ok(SqlValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SqlValue, E> {
                Ok(SqlValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<SqlValue, E> {
                Ok(SqlValue::Text(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<SqlValue, E> {
                Ok(SqlValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<SqlValue, E> {
                Ok(SqlValue::Null)
            }

            fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<SqlValue, D2::Error> {
                d.deserialize_any(ScalarVisitor)
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}
