//! Column model: resolving caller-supplied column specs into `(name, type)`
//! pairs describing the target table.
//!
//! Callers may describe columns loosely (bare names, or names with explicit
//! types); resolution completes every bare name with the default column type
//! so that downstream SQL generation always sees a full definition.

use serde::Deserialize;

use crate::core::value::SqlValue;
use crate::error::{LoaderError, Result};

/// A resolved column: always a name plus a data type, never a bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, quoted by the database handle at SQL generation time.
    pub name: String,

    /// Data type string, emitted verbatim into the CREATE statement.
    pub data_type: String,
}

impl Column {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A caller-supplied column description, prior to resolution.
///
/// Untyped configuration accepts a plain string, a two-element sequence,
/// or a `{name, type}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Bare column name; completed with the default column type.
    Name(String),

    /// Explicit `(name, type)` pair.
    Pair(String, String),

    /// Explicit name/type mapping form.
    Entry {
        name: String,
        #[serde(rename = "type")]
        data_type: String,
    },
}

impl ColumnSpec {
    /// The column name.
    pub fn name(&self) -> &str {
        match self {
            ColumnSpec::Name(name) => name,
            ColumnSpec::Pair(name, _) => name,
            ColumnSpec::Entry { name, .. } => name,
        }
    }

    /// The explicit data type, if one was given.
    pub fn data_type(&self) -> Option<&str> {
        match self {
            ColumnSpec::Name(_) => None,
            ColumnSpec::Pair(_, data_type) => Some(data_type),
            ColumnSpec::Entry { data_type, .. } => Some(data_type),
        }
    }

    /// Whether this spec is a bare name needing the default type.
    pub fn is_bare(&self) -> bool {
        self.data_type().is_none()
    }

    fn resolve(&self, default_type: &str) -> Column {
        Column::new(self.name(), self.data_type().unwrap_or(default_type))
    }
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::Name(name.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(name: String) -> Self {
        ColumnSpec::Name(name)
    }
}

impl From<(&str, &str)> for ColumnSpec {
    fn from((name, data_type): (&str, &str)) -> Self {
        ColumnSpec::Pair(name.to_string(), data_type.to_string())
    }
}

impl From<(String, String)> for ColumnSpec {
    fn from((name, data_type): (String, String)) -> Self {
        ColumnSpec::Pair(name, data_type)
    }
}

/// Resolve the column list for a load.
///
/// Explicit specs win; otherwise `first_raw_row` (the first row obtained
/// from the raw source, consumed rather than treated as data) supplies
/// bare column names. Bare names are completed with `default_type`,
/// explicit pairs are untouched, and input order is preserved.
///
/// # Errors
///
/// Returns [`LoaderError::Config`] when the resolved list would be empty,
/// or when an inferred column name is not a text value.
pub fn resolve_columns(
    specs: &[ColumnSpec],
    first_raw_row: Option<Vec<SqlValue>>,
    default_type: &str,
) -> Result<Vec<Column>> {
    let columns = if specs.is_empty() {
        let header = first_raw_row.unwrap_or_default();
        header
            .into_iter()
            .map(|value| match value {
                SqlValue::Text(name) => Ok(Column::new(name, default_type)),
                other => Err(LoaderError::config(format!(
                    "column names inferred from the first row must be text, got {:?}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        specs.iter().map(|spec| spec.resolve(default_type)).collect()
    };

    if columns.is_empty() {
        return Err(LoaderError::config(
            "no columns defined and none could be inferred from the data",
        ));
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_names_get_default_type() {
        let specs: Vec<ColumnSpec> = vec!["color".into(), "smell".into()];
        let columns = resolve_columns(&specs, None, "text").unwrap();
        assert_eq!(
            columns,
            vec![Column::new("color", "text"), Column::new("smell", "text")]
        );
    }

    #[test]
    fn test_mixed_specs_preserve_order_and_explicit_types() {
        let specs: Vec<ColumnSpec> = vec![
            "id".into(),
            ("count", "integer").into(),
            "label".into(),
        ];
        let columns = resolve_columns(&specs, None, "varchar(255)").unwrap();
        assert_eq!(
            columns,
            vec![
                Column::new("id", "varchar(255)"),
                Column::new("count", "integer"),
                Column::new("label", "varchar(255)"),
            ]
        );
    }

    #[test]
    fn test_infer_from_first_row() {
        let header = vec![SqlValue::from("a"), SqlValue::from("b")];
        let columns = resolve_columns(&[], Some(header), "text").unwrap();
        assert_eq!(
            columns,
            vec![Column::new("a", "text"), Column::new("b", "text")]
        );
    }

    #[test]
    fn test_infer_rejects_non_text_names() {
        let header = vec![SqlValue::from("a"), SqlValue::Int(2)];
        let result = resolve_columns(&[], Some(header), "text");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_resolution_fails() {
        assert!(resolve_columns(&[], None, "text").is_err());
        assert!(resolve_columns(&[], Some(vec![]), "text").is_err());
    }

    #[test]
    fn test_spec_deserialization_forms() {
        let specs: Vec<ColumnSpec> = serde_yaml::from_str(
            "- color\n- [size, integer]\n- {name: smell, type: varchar(10)}\n",
        )
        .unwrap();
        assert_eq!(specs[0], ColumnSpec::Name("color".to_string()));
        assert_eq!(
            specs[1],
            ColumnSpec::Pair("size".to_string(), "integer".to_string())
        );
        assert_eq!(
            specs[2],
            ColumnSpec::Entry {
                name: "smell".to_string(),
                data_type: "varchar(10)".to_string(),
            }
        );
    }
}
