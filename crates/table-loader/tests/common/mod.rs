//! Shared test double: an in-memory database handle that records every
//! statement, keeps a tiny table store with transaction snapshots, and can
//! inject an insert failure at a chosen row.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use table_loader::{
    DatabaseHandle, LoaderError, PreparedStatement, Result, SqlTypeTag, SqlValue,
};

type Tables = BTreeMap<String, Vec<Vec<SqlValue>>>;

#[derive(Default)]
struct Store {
    tables: Tables,
    snapshot: Option<Tables>,
    log: Vec<String>,
    fail_on_insert: Option<u64>,
    inserts_seen: u64,
}

/// Extract the target table token following `keyword` (e.g. `INTO`,
/// `TABLE`), up to the column list if present.
fn target_after(sql: &str, keyword: &str) -> Option<String> {
    let idx = sql.find(keyword)? + keyword.len();
    let rest = sql[idx..].trim_start();
    let end = rest.find(" (").unwrap_or(rest.len());
    let target = rest[..end].trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

/// Number of parameters the VALUES clause expects, if one is present.
fn placeholder_count(sql: &str) -> Option<usize> {
    let idx = sql.find("VALUES(")? + "VALUES(".len();
    let rest = &sql[idx..];
    let end = rest.find(')')?;
    let body = rest[..end].trim();
    if body.is_empty() {
        Some(0)
    } else {
        Some(body.split(',').count())
    }
}

/// Recording in-memory database handle.
pub struct RecordingHandle {
    store: Rc<RefCell<Store>>,
    default_type: Option<String>,
    positional_placeholders: bool,
}

impl RecordingHandle {
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(Store::default())),
            default_type: Some("text".to_string()),
            positional_placeholders: false,
        }
    }

    /// Use `$1, $2, ...` placeholders instead of `?`.
    pub fn with_positional_placeholders(mut self) -> Self {
        self.positional_placeholders = true;
        self
    }

    /// Answer default-type lookups with this type (or refuse with `None`).
    pub fn with_default_type(mut self, default_type: Option<&str>) -> Self {
        self.default_type = default_type.map(str::to_string);
        self
    }

    /// Fail the `n`th INSERT execution (1-based).
    pub fn fail_on_insert(self, n: u64) -> Self {
        self.store.borrow_mut().fail_on_insert = Some(n);
        self
    }

    /// Every statement executed or prepared, in order.
    pub fn log(&self) -> Vec<String> {
        self.store.borrow().log.clone()
    }

    /// Rows currently stored for the quoted table name, if the table exists.
    pub fn rows(&self, quoted_table: &str) -> Option<Vec<Vec<SqlValue>>> {
        self.store.borrow().tables.get(quoted_table).cloned()
    }

    pub fn table_exists(&self, quoted_table: &str) -> bool {
        self.store.borrow().tables.contains_key(quoted_table)
    }
}

impl DatabaseHandle for RecordingHandle {
    fn execute(&mut self, sql: &str) -> Result<()> {
        let mut store = self.store.borrow_mut();
        store.log.push(sql.to_string());

        if sql.trim_start().starts_with("DROP") {
            if let Some(target) = target_after(sql, "TABLE") {
                store.tables.remove(&target);
            }
        } else if sql.contains("TABLE") && sql.trim_start().starts_with("CREATE") {
            if let Some(target) = target_after(sql, "TABLE") {
                store.tables.entry(target).or_default();
            }
        }
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<Box<dyn PreparedStatement>> {
        let mut store = self.store.borrow_mut();
        store.log.push(sql.to_string());

        let table = target_after(sql, "INTO").ok_or_else(|| {
            LoaderError::execution("preparing statement", format!("unparseable insert: {}", sql))
        })?;
        let expected_params = placeholder_count(sql);

        Ok(Box::new(RecordingStatement {
            store: Rc::clone(&self.store),
            table,
            expected_params,
        }))
    }

    fn begin(&mut self) -> Result<()> {
        let mut store = self.store.borrow_mut();
        store.log.push("BEGIN".to_string());
        let snapshot = store.tables.clone();
        store.snapshot = Some(snapshot);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let mut store = self.store.borrow_mut();
        store.log.push("COMMIT".to_string());
        store.snapshot = None;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        let mut store = self.store.borrow_mut();
        store.log.push("ROLLBACK".to_string());
        if let Some(snapshot) = store.snapshot.take() {
            store.tables = snapshot;
        }
        Ok(())
    }

    fn quote_identifier(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        name: &str,
    ) -> String {
        let quote = |part: &str| format!("\"{}\"", part.replace('"', "\"\""));
        let mut parts = Vec::new();
        if let Some(catalog) = catalog {
            parts.push(quote(catalog));
        }
        if let Some(schema) = schema {
            parts.push(quote(schema));
        }
        parts.push(quote(name));
        parts.join(".")
    }

    fn default_type_for(&self, _tag: SqlTypeTag) -> Option<String> {
        self.default_type.clone()
    }

    fn placeholder(&self, index: usize) -> String {
        if self.positional_placeholders {
            format!("${}", index)
        } else {
            "?".to_string()
        }
    }
}

struct RecordingStatement {
    store: Rc<RefCell<Store>>,
    table: String,
    expected_params: Option<usize>,
}

impl PreparedStatement for RecordingStatement {
    fn execute(&mut self, params: &[SqlValue]) -> Result<()> {
        let mut store = self.store.borrow_mut();
        store.inserts_seen += 1;

        if store.fail_on_insert == Some(store.inserts_seen) {
            return Err(LoaderError::execution(
                "executing insert",
                "simulated statement failure",
            ));
        }

        // Real drivers reject parameter-count mismatches; so does this one.
        if let Some(expected) = self.expected_params {
            if params.len() != expected {
                return Err(LoaderError::execution(
                    "executing insert",
                    format!(
                        "statement expects {} parameters, got {}",
                        expected,
                        params.len()
                    ),
                ));
            }
        }

        store
            .tables
            .entry(self.table.clone())
            .or_default()
            .push(params.to_vec());
        Ok(())
    }
}
