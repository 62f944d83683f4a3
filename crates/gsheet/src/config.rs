//! Worksheet connection settings.
//!
//! Loaded from YAML or JSON, with environment overrides for the values that
//! usually differ between machines.

use crate::client::WorksheetSelector;
use crate::error::{GsheetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`GsheetConfig::sheet_id`].
pub const SHEET_ID_ENV: &str = "FUNCBOX_SHEET_ID";
/// Environment variable overriding [`GsheetConfig::credentials_path`].
pub const CREDENTIALS_ENV: &str = "FUNCBOX_CREDENTIALS";

/// Settings for opening one worksheet.
///
/// ```
/// use funcbox_gsheet::{GsheetConfig, WorksheetSelector};
///
/// let config = GsheetConfig::from_yaml_str(
///     "credentials_path: creds.json\nsheet_id: abc123\nworksheet_name: Data\n",
/// )
/// .unwrap();
/// assert_eq!(config.selector(), WorksheetSelector::Title("Data".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GsheetConfig {
    /// Service-account credentials file, handed to the client as-is.
    pub credentials_path: PathBuf,
    /// Spreadsheet key.
    pub sheet_id: String,
    #[serde(default)]
    pub worksheet_index: usize,
    /// Takes precedence over `worksheet_index` when set.
    #[serde(default)]
    pub worksheet_name: Option<String>,
}

impl GsheetConfig {
    pub fn new(credentials_path: impl Into<PathBuf>, sheet_id: impl Into<String>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            sheet_id: sheet_id.into(),
            worksheet_index: 0,
            worksheet_name: None,
        }
    }

    #[must_use]
    pub fn with_worksheet_name(mut self, name: impl Into<String>) -> Self {
        self.worksheet_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_worksheet_index(mut self, index: usize) -> Self {
        self.worksheet_index = index;
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(GsheetError::Config(format!(
                "Unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    /// Apply `FUNCBOX_SHEET_ID` and `FUNCBOX_CREDENTIALS` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(SHEET_ID_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("sheet_id overridden from {}", SHEET_ID_ENV);
            self.sheet_id = id;
        }
        if let Some(path) = lookup(CREDENTIALS_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("credentials_path overridden from {}", CREDENTIALS_ENV);
            self.credentials_path = PathBuf::from(path);
        }
        self.validate()?;
        Ok(self)
    }

    /// Worksheet selection described by this config.
    #[must_use]
    pub fn selector(&self) -> WorksheetSelector {
        WorksheetSelector::new(self.worksheet_index, self.worksheet_name.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.sheet_id.trim().is_empty() {
            return Err(GsheetError::Config("sheet_id must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_yaml_defaults() {
        let config =
            GsheetConfig::from_yaml_str("credentials_path: /tmp/creds.json\nsheet_id: key\n")
                .unwrap();
        assert_eq!(config.worksheet_index, 0);
        assert_eq!(config.worksheet_name, None);
        assert_eq!(config.selector(), WorksheetSelector::Index(0));
    }

    #[test]
    fn test_json() {
        let config = GsheetConfig::from_json_str(
            r#"{"credentials_path": "c.json", "sheet_id": "k", "worksheet_index": 2}"#,
        )
        .unwrap();
        assert_eq!(config.selector(), WorksheetSelector::Index(2));
    }

    #[test]
    fn test_empty_sheet_id_rejected() {
        let result = GsheetConfig::from_yaml_str("credentials_path: c.json\nsheet_id: ''\n");
        assert!(matches!(result, Err(GsheetError::Config(_))));
    }

    #[test]
    fn test_missing_field() {
        let result = GsheetConfig::from_yaml_str("sheet_id: k\n");
        assert!(matches!(result, Err(GsheetError::Yaml(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(SHEET_ID_ENV, "from-env"), (CREDENTIALS_ENV, "")]
            .into_iter()
            .collect();
        let config = GsheetConfig::new("c.json", "k")
            .with_overrides_from(|key| env.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.sheet_id, "from-env");
        assert_eq!(config.credentials_path, PathBuf::from("c.json"));
    }
}
