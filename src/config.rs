//! Engine settings loaded from TOML.
//!
//! Every field has a default, so an empty document (or no file at all) gives
//! the stock behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub preedit: PreeditSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreeditSettings {
    /// Highlight flag attached to every preedit update.
    pub highlight: bool,
    /// Fallback for sessions the registry creates before the host has
    /// declared its capabilities. Ignored once capabilities are given.
    pub default_client_preedit: bool,
}

impl Default for PreeditSettings {
    fn default() -> Self {
        Self {
            highlight: true,
            default_client_preedit: true,
        }
    }
}

impl Settings {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn defaults_highlight_inline() {
        let s = Settings::default();
        assert!(s.preedit.highlight);
        assert!(s.preedit.default_client_preedit);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let s = Settings::from_toml_str("[preedit]\ndefault_client_preedit = false\n").unwrap();
        assert!(s.preedit.highlight);
        assert!(!s.preedit.default_client_preedit);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Settings::from_toml_str("[preedit]\nunderline = true\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Settings::from_toml_str("[preedit]\nhighlight = \"yes\"\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load("/nonexistent/sayura.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/sayura.toml"));
    }
}
