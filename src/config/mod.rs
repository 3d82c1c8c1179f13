//! Configuration management for commit-shield
//!
//! Rules start from built-in defaults and can be overridden per repository by a
//! JSON document at `<repo-root>/commit-shield.config.json`. Overrides are
//! shallow: every key present in the document replaces the default value
//! wholesale, absent keys keep their default.

use std::path::Path;

mod overrides;

#[cfg(test)]
mod tests;

pub use overrides::ConfigOverrides;

/// File name of the per-repository configuration document
pub const CONFIG_FILE_NAME: &str = "commit-shield.config.json";

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Default size limit for a single changed file
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

const DEFAULT_DISALLOW_GLOBS: &[&str] = &["node_modules/**", "dist/**", "build/**"];

const DEFAULT_DISALLOW_FILENAMES: &[&str] = &[
    ".env",
    ".env.*",
    "*serviceAccount*.json",
    "*-firebase-adminsdk-*.json",
];

const DEFAULT_CONTENT_PATTERNS: &[&str] = &[
    // PEM private keys (RSA, EC, OPENSSH, ...)
    r"-----BEGIN [A-Z ]*PRIVATE KEY-----",
    // Service account JSON
    r#""type"\s*:\s*"service_account""#,
    r#""private_key"\s*:\s*"-----BEGIN"#,
    // Vendor tokens: fixed prefix + fixed-length alphanumeric body
    r"AIza[0-9A-Za-z_\-]{35}",
    r"AKIA[0-9A-Z]{16}",
    r"ghp_[0-9A-Za-z]{36}",
    r"xox[baprs]-[0-9A-Za-z-]+",
];

const DEFAULT_IGNORE_GLOBS: &[&str] = &[".git/**"];

/// Effective rule configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldConfig {
    /// Files larger than this are reported
    pub max_file_size_bytes: u64,

    /// Globs matched against the full repository-relative path
    pub disallow_path_globs: Vec<String>,

    /// Globs matched against the file name (and the full path)
    pub disallow_filename_globs: Vec<String>,

    /// Regular expressions searched for in text file contents
    pub disallow_content_patterns: Vec<String>,

    /// Globs exempting files from every rule
    pub ignore_globs: Vec<String>,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * BYTES_PER_MB,
            disallow_path_globs: to_strings(DEFAULT_DISALLOW_GLOBS),
            disallow_filename_globs: to_strings(DEFAULT_DISALLOW_FILENAMES),
            disallow_content_patterns: to_strings(DEFAULT_CONTENT_PATTERNS),
            ignore_globs: to_strings(DEFAULT_IGNORE_GLOBS),
        }
    }
}

impl ShieldConfig {
    /// Load the configuration for the repository rooted at `root`
    pub fn load(root: &Path) -> Self {
        Self::load_from(&root.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from an explicit document path.
    ///
    /// A missing document yields the defaults. A document that cannot be
    /// parsed is reported as a warning and also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match ConfigOverrides::from_file(path) {
            Ok(overrides) => {
                tracing::debug!("Loaded config overrides from {}", path.display());
                Self::default().with_overrides(overrides)
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable config {}: {:#}. Falling back to defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply user overrides key by key, replacing whole values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(mb) = overrides.max_file_size_mb {
            self.max_file_size_bytes = mb_to_bytes(mb);
        }
        if let Some(bytes) = overrides.max_file_size_bytes {
            self.max_file_size_bytes = bytes;
        }
        if let Some(globs) = overrides.disallow_globs {
            self.disallow_path_globs = globs;
        }
        if let Some(globs) = overrides.disallow_filenames {
            self.disallow_filename_globs = globs;
        }
        if let Some(patterns) = overrides.disallow_content_patterns {
            self.disallow_content_patterns = patterns;
        }
        if let Some(globs) = overrides.ignore_globs {
            self.ignore_globs = globs;
        }
        self
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}

fn mb_to_bytes(mb: f64) -> u64 {
    // Negative and NaN values saturate to zero
    (mb * BYTES_PER_MB as f64) as u64
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
