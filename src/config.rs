//! Outliner configuration module.
//!
//! Handles loading, validating, and merging `outliner.toml`. The file is
//! optional and lives in the Hugo site root next to `config.toml`/`hugo.toml`.
//! Stock defaults are the base layer; user values override them key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"  # Where Hugo keeps content, relative to the site root
//! locale = "ja"             # Language suffix in `_index.<locale>.md`
//!
//! [generator]
//! binary = "hugo"           # Site generator executable
//! chapter_kind = "chapter"  # Archetype kind passed as `--kind` for chapters
//! fail_on_error = true      # Abort when the generator exits non-zero
//!
//! [front_matter]
//! delimiter = "+++"         # Line that opens and closes the front matter block
//! closing_newline = true    # Write a newline after the closing delimiter
//! emphasis_tag = "b"        # Tag wrapped around the `pre` numbering prefix
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! locale = "en"
//!
//! [generator]
//! binary = "/opt/hugo/bin/hugo"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the site root.
pub const CONFIG_FILENAME: &str = "outliner.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Outliner configuration loaded from `outliner.toml`.
///
/// All fields have defaults matching a stock Hugo site with the `chapter`
/// archetype installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlinerConfig {
    /// Content directory, relative to the site root.
    pub content_root: String,
    /// Language code used in generated file names.
    pub locale: String,
    /// External generator invocation settings.
    pub generator: GeneratorConfig,
    /// Front matter block format.
    pub front_matter: FrontMatterConfig,
}

impl Default for OutlinerConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            locale: "ja".to_string(),
            generator: GeneratorConfig::default(),
            front_matter: FrontMatterConfig::default(),
        }
    }
}

impl OutlinerConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        let locale_ok = !self.locale.is_empty()
            && self
                .locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !locale_ok {
            return Err(ConfigError::Validation(format!(
                "locale must be a non-empty language code, got {:?}",
                self.locale
            )));
        }
        if self.generator.binary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "generator.binary must not be empty".into(),
            ));
        }
        if self.generator.chapter_kind.trim().is_empty() {
            return Err(ConfigError::Validation(
                "generator.chapter_kind must not be empty".into(),
            ));
        }
        let delimiter = &self.front_matter.delimiter;
        if delimiter.is_empty() || delimiter.contains('\n') || delimiter.contains('\r') {
            return Err(ConfigError::Validation(
                "front_matter.delimiter must be a non-empty single line".into(),
            ));
        }
        let tag = &self.front_matter.emphasis_tag;
        if !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "front_matter.emphasis_tag must be a bare tag name like \"b\", got {tag:?}"
            )));
        }
        Ok(())
    }
}

/// How the site generator is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Executable name or path.
    pub binary: String,
    /// Archetype kind requested for chapter index pages.
    pub chapter_kind: String,
    /// When false, a failing generator is only reported and the run continues
    /// to the front matter rewrite.
    pub fail_on_error: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            binary: "hugo".to_string(),
            chapter_kind: "chapter".to_string(),
            fail_on_error: true,
        }
    }
}

/// Front matter block format.
///
/// The delimiter is matched as a whole line (`"+++\n"`), never trimmed, so a
/// `+++ ` with trailing space is body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontMatterConfig {
    pub delimiter: String,
    /// Whether the closing delimiter is followed by a newline when written.
    /// Without it the closing delimiter runs into the body, which only reads
    /// back as a delimiter line when the body starts with a blank line.
    pub closing_newline: bool,
    /// HTML tag wrapped around the numbering prefix (`<b>1. </b>`).
    /// Empty writes the bare prefix.
    pub emphasis_tag: String,
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            delimiter: "+++".to_string(),
            closing_newline: true,
            emphasis_tag: "b".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(OutlinerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `outliner.toml` from a site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(site_root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = site_root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<OutlinerConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: OutlinerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for the site rooted at `site_root`.
pub fn load_config(site_root: &Path) -> Result<OutlinerConfig, ConfigError> {
    resolve_config(load_raw_config(site_root)?)
}

/// Returns a fully-commented stock `outliner.toml`.
///
/// Used by the `--gen-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# Hugo Outliner Configuration
# ===========================
# Place this file as `outliner.toml` in the Hugo site root.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Content directory, relative to the site root. Created if missing.
content_root = "content"

# Language code used for generated index pages: `<chapter>/_index.<locale>.md`.
locale = "ja"

[generator]
# Site generator executable. Invoked as `<binary> new [--kind <kind>] <path>`
# from the site root.
binary = "hugo"

# Archetype kind requested for chapter pages. Sections use the default kind.
chapter_kind = "chapter"

# Abort the run when the generator exits non-zero. Set to false to only print
# its error output and carry on.
fail_on_error = true

[front_matter]
# Line that opens and closes the front matter block. Matched exactly.
delimiter = "+++"

# Write a newline after the closing delimiter.
closing_newline = true

# Tag wrapped around the numbering prefix, e.g. `<b>1.2. </b>`.
# Leave empty for a bare prefix.
emphasis_tag = "b"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        OutlinerConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, OutlinerConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "locale = \"en\"\n\n[generator]\nbinary = \"/usr/local/bin/hugo\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.generator.binary, "/usr/local/bin/hugo");
        assert_eq!(config.generator.chapter_kind, "chapter");
        assert!(config.generator.fail_on_error);
        assert_eq!(config.content_root, "content");
        assert_eq!(config.front_matter.delimiter, "+++");
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[generator]\nbinnary = \"hugo\"\n",
        )
        .unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_toml_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "locale = \n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_locale_rejected() {
        let overlay: toml::Value = toml::from_str("locale = \"\"").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn multiline_delimiter_rejected() {
        let overlay: toml::Value =
            toml::from_str("[front_matter]\ndelimiter = \"+++\\n+++\"").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn emphasis_tag_with_markup_rejected() {
        let mut config = OutlinerConfig::default();
        config.front_matter.emphasis_tag = "<b>".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_emphasis_tag_allowed() {
        let mut config = OutlinerConfig::default();
        config.front_matter.emphasis_tag = String::new();
        config.validate().unwrap();
    }

    #[test]
    fn merge_toml_overlays_nested_tables() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        assert_eq!(config, OutlinerConfig::default());
    }
}
