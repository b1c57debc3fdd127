//! Configuration loading and validation.

mod types;
mod validation;

pub use types::{LoaderConfig, LoaderOptions};

use std::path::Path;

use crate::error::{LoaderError, Result};

impl LoaderOptions {
    /// Load options from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string.
    ///
    /// Unknown option keys are a configuration error.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| LoaderError::config(e.to_string()))
    }

    /// Parse options from a JSON string.
    ///
    /// Unknown option keys are a configuration error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoaderError::config(e.to_string()))
    }
}

impl LoaderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::column::ColumnSpec;
    use crate::core::value::SqlValue;

    #[test]
    fn test_from_yaml_full_options() {
        let options = LoaderOptions::from_yaml(
            r#"
name: pets
schema: public
drop: true
table_type: TEMPORARY
columns:
  - color
  - [size, integer]
data:
  - [black, 3]
  - [green, 1]
"#,
        )
        .unwrap();
        assert_eq!(options.name.as_deref(), Some("pets"));
        assert_eq!(options.drop, Some(true));
        assert_eq!(options.columns.len(), 2);
        assert_eq!(options.data[1][0], SqlValue::Text("green".to_string()));

        let config = options.into_config();
        assert!(config.drop);
        assert_eq!(config.table_type, "TEMPORARY");
        assert_eq!(
            config.columns[1],
            ColumnSpec::Pair("size".to_string(), "integer".to_string())
        );
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        let result = LoaderOptions::from_yaml("name: pets\nbogus_option: 1\n");
        let err = result.unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
        assert!(err.to_string().contains("bogus_option"));
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let result = LoaderOptions::from_json(r#"{"name": "pets", "tranzaction": false}"#);
        assert!(matches!(result.unwrap_err(), LoaderError::Config(_)));
    }

    #[test]
    fn test_from_json_round_trip() {
        let options = LoaderOptions::from_json(
            r#"{"name": "works", "transaction": false, "data": [["a", 1]]}"#,
        )
        .unwrap();
        let config = options.into_config();
        assert_eq!(config.name.as_deref(), Some("works"));
        assert!(!config.transaction);
        assert_eq!(
            config.data,
            vec![vec![SqlValue::Text("a".to_string()), SqlValue::Int(1)]]
        );
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = LoaderOptions::load("/nonexistent/options.yaml").unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }
}
