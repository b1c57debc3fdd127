//! Capability traits consumed by the loader.
//!
//! This module defines the seams between the loader core and its external
//! collaborators:
//!
//! - [`DatabaseHandle`]: statement execution, transactions, identifier
//!   quoting, and default-type lookup on an open connection
//! - [`PreparedStatement`]: repeated parameterized execution of one INSERT
//!
//! # Design Patterns
//!
//! - **Strategy**: a handle implementation carries all dialect knowledge
//!   (quoting rules, placeholder syntax, type names); the core composes
//!   statements from the answers and never escapes identifiers itself.

use serde::Deserialize;

use crate::core::value::SqlValue;
use crate::error::Result;

/// SQL-standard type families a driver can be asked to name.
///
/// Used by [`DatabaseHandle::default_type_for`] to resolve the default
/// column type when the configuration does not name one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlTypeTag {
    /// Fixed-length character data.
    Char,

    /// Variable-length character data.
    Varchar,

    /// Long variable-length character data; the default family for
    /// columns with no explicit type.
    #[default]
    LongVarchar,

    /// Integer data.
    Integer,

    /// Approximate numeric data.
    Float,

    /// Date without time component.
    Date,

    /// Date and time without timezone.
    Timestamp,
}

/// An open database connection, as the loader sees it.
///
/// Implementations adapt a concrete driver (or a test double) to the small
/// synchronous surface the loader needs. All statements of one load execute
/// sequentially on the one handle; nothing here is pooled or retried.
pub trait DatabaseHandle {
    /// Execute a complete SQL statement (DDL, or anything non-parameterized).
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Prepare a parameterized statement for repeated execution.
    ///
    /// The returned statement may share state with the handle (e.g. via
    /// reference counting); the loader drops it before commit/rollback.
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn PreparedStatement>>;

    /// Begin a transaction.
    fn begin(&mut self) -> Result<()>;

    /// Commit the current transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the current transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Quote an identifier, optionally qualified by catalog and schema.
    ///
    /// All quoting/escaping is the handle's responsibility; the loader
    /// passes name parts through and embeds the result verbatim.
    fn quote_identifier(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        name: &str,
    ) -> String;

    /// The driver's name for a SQL-standard type family, or `None` when the
    /// driver cannot answer.
    fn default_type_for(&self, tag: SqlTypeTag) -> Option<String>;

    /// Parameter placeholder for the given 1-based index.
    ///
    /// Defaults to `?`; dialects with positional placeholders (e.g. `$1`)
    /// override this.
    fn placeholder(&self, index: usize) -> String {
        let _ = index;
        "?".to_string()
    }
}

/// A prepared INSERT statement, executed once per pipeline row.
pub trait PreparedStatement {
    /// Execute with one row of parameters.
    fn execute(&mut self, params: &[SqlValue]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullHandle;

    impl DatabaseHandle for NullHandle {
        fn execute(&mut self, _sql: &str) -> Result<()> {
            Ok(())
        }

        fn prepare(&mut self, _sql: &str) -> Result<Box<dyn PreparedStatement>> {
            unimplemented!("not needed for this test")
        }

        fn begin(&mut self) -> Result<()> {
            Ok(())
        }

        fn commit(&mut self) -> Result<()> {
            Ok(())
        }

        fn rollback(&mut self) -> Result<()> {
            Ok(())
        }

        fn quote_identifier(
            &self,
            _catalog: Option<&str>,
            _schema: Option<&str>,
            name: &str,
        ) -> String {
            name.to_string()
        }

        fn default_type_for(&self, _tag: SqlTypeTag) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_placeholder_defaults_to_question_mark() {
        let handle = NullHandle;
        assert_eq!(handle.placeholder(1), "?");
        assert_eq!(handle.placeholder(7), "?");
    }

    #[test]
    fn test_sql_type_tag_default() {
        assert_eq!(SqlTypeTag::default(), SqlTypeTag::LongVarchar);
    }

    #[test]
    fn test_sql_type_tag_deserialization() {
        let tag: SqlTypeTag = serde_yaml::from_str("long_varchar").unwrap();
        assert_eq!(tag, SqlTypeTag::LongVarchar);
        let tag: SqlTypeTag = serde_yaml::from_str("varchar").unwrap();
        assert_eq!(tag, SqlTypeTag::Varchar);
    }
}
