//! Configuration type definitions.
//!
//! [`LoaderConfig`] is the explicit-field configuration a loader is built
//! from; it is immutable once the loader is constructed. [`LoaderOptions`]
//! is its serde mirror for configuration arriving from untyped sources
//! (YAML/JSON), where unknown keys must be rejected.

use serde::Deserialize;

use crate::core::column::ColumnSpec;
use crate::core::traits::SqlTypeTag;
use crate::core::value::SqlValue;
use crate::pipeline::policy::InvalidRowPolicy;
use crate::pipeline::{RowFilter, RowTransform};
use crate::source::RowSource;

/// Loader configuration with named fields and defaults.
///
/// Construct with [`LoaderConfig::default`] and the `with_*` builders, or
/// from an untyped source via [`LoaderOptions`]. Hooks (row source, filter,
/// transform, invalid-row policy) are builder-only: they are not
/// representable in serialized options.
pub struct LoaderConfig {
    /// Column specs; empty means "infer bare names from the first raw row".
    pub columns: Vec<ColumnSpec>,

    /// In-memory row data, used when no custom row source is set.
    pub data: Vec<Vec<SqlValue>>,

    /// Explicit base table name; `None` falls back to the row source's
    /// default name, then to `"data"`.
    pub name: Option<String>,

    /// Prepended to the base table name.
    pub name_prefix: String,

    /// Appended to the base table name.
    pub name_suffix: String,

    /// Catalog qualifier passed to the quoting capability.
    pub catalog: Option<String>,

    /// Schema qualifier passed to the quoting capability.
    pub schema: Option<String>,

    /// Table type embedded in the default CREATE prefix (e.g. `TEMPORARY`).
    /// Never appears in the default DROP statement.
    pub table_type: String,

    /// Execute the CREATE statement (default: true).
    pub create: bool,

    /// Override the generated CREATE prefix verbatim.
    pub create_prefix: Option<String>,

    /// Override the generated CREATE suffix verbatim.
    pub create_suffix: Option<String>,

    /// Override the whole CREATE statement verbatim.
    pub create_sql: Option<String>,

    /// Execute the DROP statement before CREATE (default: false).
    pub drop: bool,

    /// Override the generated DROP prefix verbatim.
    pub drop_prefix: Option<String>,

    /// Override the generated DROP suffix verbatim.
    pub drop_suffix: Option<String>,

    /// Override the whole DROP statement verbatim.
    pub drop_sql: Option<String>,

    /// Explicit default column type; `None` asks the database handle.
    pub default_column_type: Option<String>,

    /// Type family the handle is asked about when no explicit default
    /// column type is configured.
    pub default_sql_type: SqlTypeTag,

    /// Wrap the load in a transaction (default: true).
    pub transaction: bool,

    /// Custom row-producing hook replacing the in-memory `data` source.
    pub row_source: Option<Box<dyn RowSource>>,

    /// Filter hook: rows returning false are discarded.
    pub row_filter: Option<RowFilter>,

    /// Transform hook: maps each kept row to its replacement.
    pub row_transform: Option<RowTransform>,

    /// Strategy for rows failing arity validation.
    pub invalid_row_policy: InvalidRowPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            data: Vec::new(),
            name: None,
            name_prefix: String::new(),
            name_suffix: String::new(),
            catalog: None,
            schema: None,
            table_type: String::new(),
            create: true,
            create_prefix: None,
            create_suffix: None,
            create_sql: None,
            drop: false,
            drop_prefix: None,
            drop_suffix: None,
            drop_sql: None,
            default_column_type: None,
            default_sql_type: SqlTypeTag::default(),
            transaction: true,
            row_source: None,
            row_filter: None,
            row_transform: None,
            invalid_row_policy: InvalidRowPolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// Set the column specs.
    pub fn with_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnSpec>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the in-memory row data.
    pub fn with_data(mut self, data: Vec<Vec<SqlValue>>) -> Self {
        self.data = data;
        self
    }

    /// Set the explicit base table name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the table name prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Set the table name suffix.
    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = suffix.into();
        self
    }

    /// Set the catalog qualifier.
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the schema qualifier.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the table type used by the default CREATE prefix.
    pub fn with_table_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = table_type.into();
        self
    }

    /// Enable or disable the CREATE statement.
    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Override the CREATE prefix.
    pub fn with_create_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.create_prefix = Some(prefix.into());
        self
    }

    /// Override the CREATE suffix.
    pub fn with_create_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.create_suffix = Some(suffix.into());
        self
    }

    /// Override the whole CREATE statement.
    pub fn with_create_sql(mut self, sql: impl Into<String>) -> Self {
        self.create_sql = Some(sql.into());
        self
    }

    /// Enable or disable the DROP statement.
    pub fn with_drop(mut self, drop: bool) -> Self {
        self.drop = drop;
        self
    }

    /// Override the DROP prefix.
    pub fn with_drop_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.drop_prefix = Some(prefix.into());
        self
    }

    /// Override the DROP suffix.
    pub fn with_drop_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.drop_suffix = Some(suffix.into());
        self
    }

    /// Override the whole DROP statement.
    pub fn with_drop_sql(mut self, sql: impl Into<String>) -> Self {
        self.drop_sql = Some(sql.into());
        self
    }

    /// Set the explicit default column type.
    pub fn with_default_column_type(mut self, data_type: impl Into<String>) -> Self {
        self.default_column_type = Some(data_type.into());
        self
    }

    /// Set the type family used for driver default-type lookup.
    pub fn with_default_sql_type(mut self, tag: SqlTypeTag) -> Self {
        self.default_sql_type = tag;
        self
    }

    /// Enable or disable the wrapping transaction.
    pub fn with_transaction(mut self, transaction: bool) -> Self {
        self.transaction = transaction;
        self
    }

    /// Set a custom row source, replacing the in-memory data.
    pub fn with_row_source(mut self, source: impl RowSource + 'static) -> Self {
        self.row_source = Some(Box::new(source));
        self
    }

    /// Set the filter hook.
    pub fn with_row_filter(mut self, filter: impl FnMut(&[SqlValue]) -> bool + 'static) -> Self {
        self.row_filter = Some(Box::new(filter));
        self
    }

    /// Set the transform hook.
    pub fn with_row_transform(
        mut self,
        transform: impl FnMut(Vec<SqlValue>) -> Vec<SqlValue> + 'static,
    ) -> Self {
        self.row_transform = Some(Box::new(transform));
        self
    }

    /// Set the invalid-row policy.
    pub fn with_invalid_row_policy(mut self, policy: InvalidRowPolicy) -> Self {
        self.invalid_row_policy = policy;
        self
    }
}

impl std::fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("columns", &self.columns)
            .field("data_rows", &self.data.len())
            .field("name", &self.name)
            .field("name_prefix", &self.name_prefix)
            .field("name_suffix", &self.name_suffix)
            .field("catalog", &self.catalog)
            .field("schema", &self.schema)
            .field("table_type", &self.table_type)
            .field("create", &self.create)
            .field("drop", &self.drop)
            .field("transaction", &self.transaction)
            .field("default_column_type", &self.default_column_type)
            .field("default_sql_type", &self.default_sql_type)
            .field("invalid_row_policy", &self.invalid_row_policy)
            .field("has_row_source", &self.row_source.is_some())
            .field("has_row_filter", &self.row_filter.is_some())
            .field("has_row_transform", &self.row_transform.is_some())
            .finish()
    }
}

/// Options as they arrive from an untyped source.
///
/// Every field is optional; unknown keys are a deserialization error, which
/// the loading entry points surface as a configuration error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderOptions {
    pub columns: Vec<ColumnSpec>,
    pub data: Vec<Vec<SqlValue>>,
    pub name: Option<String>,
    pub name_prefix: Option<String>,
    pub name_suffix: Option<String>,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_type: Option<String>,
    pub create: Option<bool>,
    pub create_prefix: Option<String>,
    pub create_suffix: Option<String>,
    pub create_sql: Option<String>,
    pub drop: Option<bool>,
    pub drop_prefix: Option<String>,
    pub drop_suffix: Option<String>,
    pub drop_sql: Option<String>,
    pub default_column_type: Option<String>,
    pub default_sql_type: Option<SqlTypeTag>,
    pub transaction: Option<bool>,
}

impl LoaderOptions {
    /// Convert into a [`LoaderConfig`], applying defaults for unset fields.
    pub fn into_config(self) -> LoaderConfig {
        let mut config = LoaderConfig {
            columns: self.columns,
            data: self.data,
            name: self.name,
            catalog: self.catalog,
            schema: self.schema,
            create_prefix: self.create_prefix,
            create_suffix: self.create_suffix,
            create_sql: self.create_sql,
            drop_prefix: self.drop_prefix,
            drop_suffix: self.drop_suffix,
            drop_sql: self.drop_sql,
            default_column_type: self.default_column_type,
            ..LoaderConfig::default()
        };
        if let Some(prefix) = self.name_prefix {
            config.name_prefix = prefix;
        }
        if let Some(suffix) = self.name_suffix {
            config.name_suffix = suffix;
        }
        if let Some(table_type) = self.table_type {
            config.table_type = table_type;
        }
        if let Some(create) = self.create {
            config.create = create;
        }
        if let Some(drop) = self.drop {
            config.drop = drop;
        }
        if let Some(tag) = self.default_sql_type {
            config.default_sql_type = tag;
        }
        if let Some(transaction) = self.transaction {
            config.transaction = transaction;
        }
        config
    }
}
