//! Load orchestrator: sequences drop/create/insert-all with optional
//! all-or-nothing transaction semantics.
//!
//! A [`TableLoader`] is built once per table-load operation. Construction
//! validates the configuration and resolves the column model (consuming the
//! first raw row when columns are inferred); `load` runs the statements.
//! The generated SQL, quoted name, and default column type are memoized on
//! first access and never recomputed; `load` consumes the loader, so an
//! instance cannot be reused against a table whose identity may have
//! changed.

use std::cell::OnceCell;

use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::core::column::{resolve_columns, Column, ColumnSpec};
use crate::core::traits::{DatabaseHandle, SqlTypeTag};
use crate::error::Result;
use crate::pipeline::{PipelineContext, RowPipeline};
use crate::source::{MemorySource, RowSource};
use crate::sql;

/// Fallback column type when neither configuration nor the driver names one.
const FALLBACK_COLUMN_TYPE: &str = "text";

/// Loads one table from a row source through a database handle.
pub struct TableLoader<'h, H: DatabaseHandle> {
    handle: &'h mut H,
    config: LoaderConfig,
    columns: Vec<Column>,
    pipeline: RowPipeline,
    effective_name: String,
    default_type: OnceCell<String>,
    quoted_name: OnceCell<String>,
    create_statement: OnceCell<String>,
    drop_statement: OnceCell<String>,
    insert_statement: OnceCell<String>,
}

fn resolve_default_type<H: DatabaseHandle>(
    explicit: Option<&str>,
    tag: SqlTypeTag,
    handle: &H,
) -> String {
    match explicit {
        Some(data_type) => data_type.to_string(),
        None => handle
            .default_type_for(tag)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_COLUMN_TYPE.to_string()),
    }
}

impl<'h, H: DatabaseHandle> TableLoader<'h, H> {
    /// Construct a loader, resolving the column model eagerly.
    ///
    /// When no columns are configured, the first raw row is consumed from
    /// the source here (bypassing filter/transform) and its text values
    /// become the column names.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoaderError::Config`] for invalid options or an
    /// empty resolved column set.
    pub fn new(mut config: LoaderConfig, handle: &'h mut H) -> Result<Self> {
        config.validate()?;

        let mut source: Box<dyn RowSource> = match config.row_source.take() {
            Some(source) => source,
            None => Box::new(MemorySource::new(std::mem::take(&mut config.data))),
        };

        let default_type = OnceCell::new();
        let needs_default =
            config.columns.is_empty() || config.columns.iter().any(ColumnSpec::is_bare);
        if needs_default {
            let resolved = resolve_default_type(
                config.default_column_type.as_deref(),
                config.default_sql_type,
                &*handle,
            );
            let _ = default_type.set(resolved);
        }

        let first = if config.columns.is_empty() {
            source.next_raw()?
        } else {
            None
        };

        let columns = resolve_columns(
            &config.columns,
            first,
            default_type
                .get()
                .map(String::as_str)
                .unwrap_or(FALLBACK_COLUMN_TYPE),
        )?;

        let base = config
            .name
            .as_deref()
            .or_else(|| source.default_name())
            .unwrap_or(sql::DEFAULT_NAME);
        let effective_name = format!("{}{}{}", config.name_prefix, base, config.name_suffix);

        let pipeline = RowPipeline::new(
            source,
            config.row_filter.take(),
            config.row_transform.take(),
            std::mem::take(&mut config.invalid_row_policy),
        );

        Ok(Self {
            handle,
            config,
            columns,
            pipeline,
            effective_name,
            default_type,
            quoted_name: OnceCell::new(),
            create_statement: OnceCell::new(),
            drop_statement: OnceCell::new(),
            insert_statement: OnceCell::new(),
        })
    }

    /// The resolved column model, in declared order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The effective (unquoted) table name: `prefix + base + suffix`.
    pub fn effective_name(&self) -> &str {
        &self.effective_name
    }

    /// The default column type, memoized per instance.
    pub fn default_column_type(&self) -> &str {
        self.default_type.get_or_init(|| {
            resolve_default_type(
                self.config.default_column_type.as_deref(),
                self.config.default_sql_type,
                &*self.handle,
            )
        })
    }

    /// The quoted (and optionally catalog/schema qualified) table name.
    pub fn quoted_name(&self) -> &str {
        self.quoted_name.get_or_init(|| {
            self.handle.quote_identifier(
                self.config.catalog.as_deref(),
                self.config.schema.as_deref(),
                &self.effective_name,
            )
        })
    }

    /// The CREATE statement, memoized on first access.
    pub fn create_statement(&self) -> &str {
        self.create_statement.get_or_init(|| {
            if let Some(ref sql) = self.config.create_sql {
                return sql.clone();
            }
            let prefix = match self.config.create_prefix {
                Some(ref prefix) => prefix.clone(),
                None => sql::default_create_prefix(&self.config.table_type, self.quoted_name()),
            };
            let suffix = self
                .config
                .create_suffix
                .as_deref()
                .unwrap_or(sql::DEFAULT_CREATE_SUFFIX);
            let definitions = sql::column_definitions(&self.columns, |name| {
                self.handle.quote_identifier(None, None, name)
            });
            sql::compose(&prefix, &definitions, suffix)
        })
    }

    /// The DROP statement, memoized on first access.
    pub fn drop_statement(&self) -> &str {
        self.drop_statement.get_or_init(|| {
            if let Some(ref sql) = self.config.drop_sql {
                return sql.clone();
            }
            let prefix = self
                .config
                .drop_prefix
                .as_deref()
                .unwrap_or(sql::DEFAULT_DROP_PREFIX);
            let suffix = self
                .config
                .drop_suffix
                .as_deref()
                .unwrap_or(sql::DEFAULT_DROP_SUFFIX);
            sql::compose(prefix, self.quoted_name(), suffix)
        })
    }

    /// The parameterized INSERT statement, memoized on first access.
    pub fn insert_statement(&self) -> &str {
        self.insert_statement.get_or_init(|| {
            sql::insert_statement(
                self.quoted_name(),
                &self.columns,
                |name| self.handle.quote_identifier(None, None, name),
                |index| self.handle.placeholder(index),
            )
        })
    }

    /// Run the load: optional drop, optional create, then insert every row
    /// the pipeline produces. Returns the number of rows inserted.
    ///
    /// With `transaction` enabled (the default), any failure rolls back the
    /// whole load and the original error propagates; a rollback failure is
    /// logged but does not mask it. Without a transaction, rows inserted
    /// before a failure remain.
    pub fn load(mut self) -> Result<u64> {
        let transaction = self.config.transaction;
        if transaction {
            self.handle.begin()?;
        }

        match self.execute_statements() {
            Ok(count) => {
                if transaction {
                    self.handle.commit()?;
                }
                info!("Loaded {} rows into {}", count, self.effective_name);
                Ok(count)
            }
            Err(err) => {
                if transaction {
                    if let Err(rollback_err) = self.handle.rollback() {
                        warn!("Rollback failed after load error: {}", rollback_err);
                    }
                }
                Err(err)
            }
        }
    }

    fn execute_statements(&mut self) -> Result<u64> {
        if self.config.drop {
            let sql = self.drop_statement().to_owned();
            self.handle.execute(&sql)?;
            debug!("Dropped table {}", self.effective_name);
        }

        if self.config.create {
            let sql = self.create_statement().to_owned();
            self.handle.execute(&sql)?;
            debug!("Created table {}", self.effective_name);
        }

        let insert = self.insert_statement().to_owned();
        let mut statement = self.handle.prepare(&insert)?;
        let mut count = 0u64;
        let ctx = PipelineContext {
            table: &self.effective_name,
            columns: &self.columns,
        };
        while let Some(row) = self.pipeline.next_row(&ctx)? {
            statement.execute(&row)?;
            count += 1;
        }
        Ok(count)
    }
}
