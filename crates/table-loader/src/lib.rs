//! # table-loader
//!
//! Materialize tabular data as a database table.
//!
//! Given a database handle abstraction and a row source, the loader
//! generates and executes `DROP TABLE` / `CREATE TABLE` / `INSERT`
//! statements, with support for:
//!
//! - **Column resolution** from explicit specs or the first raw row, with a
//!   driver-derived default type
//! - **Row pipeline hooks**: filter, transform, and a pluggable invalid-row
//!   policy
//! - **Overridable SQL**: every statement fragment can be replaced verbatim
//! - **Transactional loads** with rollback on failure (default on)
//!
//! ## Example
//!
//! ```rust,no_run
//! use table_loader::{DatabaseHandle, LoaderConfig, Result, TableLoader};
//!
//! fn load_pets<H: DatabaseHandle>(handle: &mut H) -> Result<u64> {
//!     let config = LoaderConfig::default()
//!         .with_name("pets")
//!         .with_columns(["color", "smell", "size"])
//!         .with_data(vec![
//!             vec!["black".into(), "skunk".into(), "medium".into()],
//!             vec!["green".into(), "frog".into(), "small".into()],
//!         ]);
//!     let loader = TableLoader::new(config, handle)?;
//!     loader.load()
//! }
//! ```
//!
//! The loader is single-threaded and synchronous: all statements of one
//! `load` execute sequentially on the one handle, and there is no retry or
//! cancellation machinery. Connection management, pooling, and dialect
//! specifics live behind the [`DatabaseHandle`] seam.

pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod source;
pub mod sql;

// Re-exports for convenient access
pub use crate::core::column::{resolve_columns, Column, ColumnSpec};
pub use crate::core::traits::{DatabaseHandle, PreparedStatement, SqlTypeTag};
pub use crate::core::value::SqlValue;
pub use config::{LoaderConfig, LoaderOptions};
pub use error::{LoaderError, Result};
pub use loader::TableLoader;
pub use pipeline::policy::{InvalidRowHandler, InvalidRowPolicy, RowOutcome};
pub use pipeline::{PipelineContext, RowFilter, RowPipeline, RowTransform};
pub use source::{FnSource, MemorySource, RowSource};
