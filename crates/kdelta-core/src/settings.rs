//! Update settings: which selectors to compare, and whether a diff block is wanted.

use crate::kdelta_core_types::schema::OP_LOAD_SETTINGS;
use crate::selector::{Selector, SelectorSyntaxError};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Selectors to compare for one kind of object.
///
/// Deserializes from `{ fields = [...], includeDiff = true }`; `include_diff`
/// is accepted as an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSetting {
    /// Selectors, in evaluation order
    #[serde(default)]
    pub fields: Vec<String>,
    /// Whether callers want the textual diff block or only "changed or not"
    #[serde(default, alias = "include_diff")]
    pub include_diff: bool,
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported settings format {0:?} (expected .toml, .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

impl UpdateSetting {
    pub fn new<I, S>(fields: I, include_diff: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            include_diff,
        }
    }

    /// Parse every selector up front.
    ///
    /// # Errors
    ///
    /// Returns every syntax error, in selector order.
    pub fn validate(&self) -> Result<(), Vec<SelectorSyntaxError>> {
        let errors: Vec<SelectorSyntaxError> = self
            .fields
            .iter()
            .filter_map(|field| Selector::parse(field).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Toml`] on malformed input.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] on malformed input.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Yaml`] on malformed input.
    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load settings from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnsupportedFormat`] for unknown extensions,
    /// [`SettingsError::Io`] if the file cannot be read, and a parse error
    /// for malformed content.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let started = Instant::now();
        log_op_start!(OP_LOAD_SETTINGS, path = %path.display());

        let result = Self::load_inner(path);
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(settings) => log_op_end!(
                OP_LOAD_SETTINGS,
                duration_ms = duration_ms,
                selector_count = settings.fields.len()
            ),
            Err(err) => log_op_error!(OP_LOAD_SETTINGS, err, duration_ms = duration_ms),
        }
        result
    }

    fn load_inner(path: &Path) -> Result<Self, SettingsError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse: fn(&str) -> Result<Self, SettingsError> = match extension.as_str() {
            "toml" => Self::from_toml_str,
            "json" => Self::from_json_str,
            "yaml" | "yml" => Self::from_yaml_str,
            _ => return Err(SettingsError::UnsupportedFormat(extension)),
        };

        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&text)
    }
}
