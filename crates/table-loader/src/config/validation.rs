//! Configuration validation.

use super::LoaderConfig;
use crate::error::{LoaderError, Result};

/// Validate a configuration before loader construction.
///
/// The empty-column check cannot happen here: columns may still be inferred
/// from the first raw row, so that error surfaces during resolution.
pub fn validate(config: &LoaderConfig) -> Result<()> {
    if let Some(ref name) = config.name {
        if name.is_empty() {
            return Err(LoaderError::config("name must not be empty when set"));
        }
    }

    for spec in &config.columns {
        if spec.name().is_empty() {
            return Err(LoaderError::config("column names must not be empty"));
        }
        if let Some(data_type) = spec.data_type() {
            if data_type.is_empty() {
                return Err(LoaderError::config(format!(
                    "column '{}' has an empty data type",
                    spec.name()
                )));
            }
        }
    }

    if let Some(ref data_type) = config.default_column_type {
        if data_type.is_empty() {
            return Err(LoaderError::config(
                "default_column_type must not be empty when set",
            ));
        }
    }

    if config.columns.is_empty() {
        // First row doubles as the header when columns are inferred; it
        // must not be empty or resolution would produce zero columns.
        if let Some(first) = config.data.first() {
            if first.is_empty() {
                return Err(LoaderError::config(
                    "first data row is empty; cannot infer columns from it",
                ));
            }
        }
    }

    Ok(())
}
