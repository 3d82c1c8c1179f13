use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Format, Json},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ShieldConfig, bytes_to_mb};

/// User-supplied configuration document.
///
/// Every field is optional; a present field replaces the matching default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(rename = "maxFileSizeMB", skip_serializing_if = "Option::is_none")]
    pub max_file_size_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_bytes: Option<u64>,

    #[serde(alias = "disallowPathGlobs", skip_serializing_if = "Option::is_none")]
    pub disallow_globs: Option<Vec<String>>,

    #[serde(alias = "disallowFilenameGlobs", skip_serializing_if = "Option::is_none")]
    pub disallow_filenames: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_content_patterns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_globs: Option<Vec<String>>,
}

impl ConfigOverrides {
    /// Parse an overrides document from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        Figment::new()
            .merge(Json::file(path))
            .extract()
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse an overrides document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Figment::new()
            .merge(Json::string(json))
            .extract()
            .context("Failed to parse config document")
    }

    /// Render as a pretty JSON document
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }
}

impl From<&ShieldConfig> for ConfigOverrides {
    /// A fully populated document spelling out every value of `config`
    fn from(config: &ShieldConfig) -> Self {
        Self {
            max_file_size_mb: Some(bytes_to_mb(config.max_file_size_bytes)),
            max_file_size_bytes: None,
            disallow_globs: Some(config.disallow_path_globs.clone()),
            disallow_filenames: Some(config.disallow_filename_globs.clone()),
            disallow_content_patterns: Some(config.disallow_content_patterns.clone()),
            ignore_globs: Some(config.ignore_globs.clone()),
        }
    }
}
