//! Site configuration module.
//!
//! Handles loading and validating the optional `config.toml` at the content
//! root. Stock defaults are overridden by whatever keys the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! extension = "mdx"          # Content file extension (no dot)
//!
//! [breadcrumbs]
//! root_label = "Content"     # Leading crumb before the section chain; "" disables
//!
//! [breadcrumbs.labels]       # Path segment → display label overrides
//! "32-ict" = "Information & Communication Technology (ICT)"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [breadcrumbs]
//! root_label = ""
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::CONFIG_FILE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content file extension, without the dot.
    pub extension: String,
    /// Breadcrumb labelling.
    pub breadcrumbs: BreadcrumbConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            extension: "mdx".to_string(),
            breadcrumbs: BreadcrumbConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation("extension must not be empty".into()));
        }
        if self.extension.contains('.') || self.extension.contains('/') {
            return Err(ConfigError::Validation(
                "extension must be a bare extension like \"mdx\"".into(),
            ));
        }
        if self.breadcrumbs.labels.keys().any(|k| k.is_empty()) {
            return Err(ConfigError::Validation(
                "breadcrumbs.labels keys must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Breadcrumb labelling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreadcrumbConfig {
    /// Label of the leading crumb (href `#`). Empty disables it.
    pub root_label: String,
    /// Display labels for path segments that have no `_index` title,
    /// e.g. department codes.
    pub labels: BTreeMap<String, String>,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            root_label: "Content".to_string(),
            labels: BTreeMap::new(),
        }
    }
}

impl BreadcrumbConfig {
    pub fn root_label(&self) -> Option<&str> {
        Some(self.root_label.as_str()).filter(|l| !l.is_empty())
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Returns stock defaults when the file doesn't exist. Unknown keys and
/// invalid values are errors.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file at the content root.
# Unknown keys will cause an error.

# Extension of content files (no dot). Files with any other extension are
# listed as downloadable files, not content.
extension = "mdx"

# ---------------------------------------------------------------------------
# Breadcrumbs
# ---------------------------------------------------------------------------
[breadcrumbs]
# Leading crumb shown before the section chain (links to "#").
# Set to "" to start breadcrumbs at the section itself.
root_label = "Content"

# Labels for path segments whose directory has no _index title.
# Checked after _index, before falling back to "Title Cased Segment".
[breadcrumbs.labels]
# "32-ict" = "Information & Communication Technology (ICT)"
# "00-general" = "General / All Departments"
"##
}
