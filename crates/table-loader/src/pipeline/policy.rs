//! Invalid-row handling policies (Strategy pattern).
//!
//! When a row fails arity validation the pipeline routes it through the
//! configured policy instead of failing outright. The built-in policies
//! cover the common cases; `Custom` accepts an arbitrary handler returning
//! a [`RowOutcome`].

use tracing::warn;

use crate::core::value::SqlValue;
use crate::error::LoaderError;

use super::PipelineContext;

/// What an invalid-row handler decided to do with a failed row.
#[derive(Debug)]
pub enum RowOutcome {
    /// Emit this row (the original, or a repaired replacement). The
    /// replacement is not re-validated.
    Replace(Vec<SqlValue>),

    /// Discard the row; it counts toward nothing.
    Skip,

    /// Abort the load with this error.
    Abort(LoaderError),
}

/// Custom invalid-row handler: `(context, error, row) -> outcome`.
pub type InvalidRowHandler =
    Box<dyn FnMut(&PipelineContext<'_>, &LoaderError, Vec<SqlValue>) -> RowOutcome>;

/// Strategy for rows that fail arity validation.
#[derive(Default)]
pub enum InvalidRowPolicy {
    /// No handler: the bad row passes through unmodified and the database
    /// layer surfaces the resulting parameter-count mismatch.
    #[default]
    PassThrough,

    /// Re-raise the validation error immediately, aborting the load.
    Raise,

    /// Emit a diagnostic, then pass the original row through unmodified.
    Warn,

    /// Delegate the decision to a caller-supplied handler.
    Custom(InvalidRowHandler),
}

impl InvalidRowPolicy {
    /// Route one failed row through this policy.
    pub(crate) fn apply(
        &mut self,
        ctx: &PipelineContext<'_>,
        err: LoaderError,
        row: Vec<SqlValue>,
    ) -> RowOutcome {
        match self {
            InvalidRowPolicy::PassThrough => RowOutcome::Replace(row),
            InvalidRowPolicy::Raise => RowOutcome::Abort(err),
            InvalidRowPolicy::Warn => {
                warn!("Invalid row for table {}: {} (row passed through)", ctx.table, err);
                RowOutcome::Replace(row)
            }
            InvalidRowPolicy::Custom(handler) => handler(ctx, &err, row),
        }
    }
}

impl std::fmt::Debug for InvalidRowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InvalidRowPolicy::PassThrough => "PassThrough",
            InvalidRowPolicy::Raise => "Raise",
            InvalidRowPolicy::Warn => "Warn",
            InvalidRowPolicy::Custom(_) => "Custom(..)",
        };
        f.write_str(name)
    }
}
