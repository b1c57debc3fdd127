//! Row pipeline: produces exactly the rows that should be inserted.
//!
//! Each row moves through a fixed sequence of steps:
//!
//! 1. **Fetch** a raw row from the configured [`RowSource`]; exhaustion
//!    propagates immediately.
//! 2. **Filter** (optional): a false return discards the row and fetches
//!    the next one; discarded rows are neither counted nor emitted.
//! 3. **Transform** (optional): must return the replacement row; arity may
//!    change.
//! 4. **Validate** the row's value count against the column count; failures
//!    are routed through the configured [`InvalidRowPolicy`].
//!
//! # Design Patterns
//!
//! - **Template Method**: the step sequence is fixed; the hooks customize
//!   individual steps.
//! - **Strategy**: the invalid-row policy is an interchangeable recovery
//!   strategy rather than hard-coded behavior.

pub mod policy;

pub use policy::{InvalidRowHandler, InvalidRowPolicy, RowOutcome};

use crate::core::column::Column;
use crate::core::value::SqlValue;
use crate::error::{LoaderError, Result};
use crate::source::RowSource;

/// Filter hook: keep the raw row when this returns true.
pub type RowFilter = Box<dyn FnMut(&[SqlValue]) -> bool>;

/// Transform hook: consumes the (post-filter) row and returns its
/// replacement.
pub type RowTransform = Box<dyn FnMut(Vec<SqlValue>) -> Vec<SqlValue>>;

/// Read-only view of the loader handed to custom invalid-row handlers.
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext<'a> {
    /// Effective (unquoted) table name.
    pub table: &'a str,

    /// Resolved column model.
    pub columns: &'a [Column],
}

/// The row pipeline for one load invocation.
///
/// Holds the source cursor and hooks; validation parameters arrive per call
/// through [`PipelineContext`].
pub struct RowPipeline {
    source: Box<dyn RowSource>,
    filter: Option<RowFilter>,
    transform: Option<RowTransform>,
    policy: InvalidRowPolicy,
}

impl RowPipeline {
    /// Assemble a pipeline from a source and optional hooks.
    pub fn new(
        source: Box<dyn RowSource>,
        filter: Option<RowFilter>,
        transform: Option<RowTransform>,
        policy: InvalidRowPolicy,
    ) -> Self {
        Self {
            source,
            filter,
            transform,
            policy,
        }
    }

    /// Produce the next row to insert, or `None` when the source is
    /// exhausted.
    ///
    /// There is no cap on consecutive filter rejections: an always-false
    /// filter over a finite source legitimately exhausts with zero rows,
    /// and a filter that never matches over a source that never terminates
    /// loops forever. Callers own that hazard.
    pub fn next_row(&mut self, ctx: &PipelineContext<'_>) -> Result<Option<Vec<SqlValue>>> {
        loop {
            let Some(raw) = self.source.next_raw()? else {
                return Ok(None);
            };

            if let Some(filter) = self.filter.as_mut() {
                if !filter(&raw) {
                    continue;
                }
            }

            let row = match self.transform.as_mut() {
                Some(transform) => transform(raw),
                None => raw,
            };

            let expected = ctx.columns.len();
            if row.len() == expected {
                return Ok(Some(row));
            }

            let err = LoaderError::RowValidation {
                expected,
                actual: row.len(),
            };
            match self.policy.apply(ctx, err, row) {
                RowOutcome::Replace(row) => return Ok(Some(row)),
                RowOutcome::Skip => continue,
                RowOutcome::Abort(err) => return Err(err),
            }
        }
    }
}
