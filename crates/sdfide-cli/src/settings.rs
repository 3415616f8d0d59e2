//! User settings
//!
//! Stored in `{config_dir}/sdfide/settings.json`. Every field is optional in
//! the file; missing ones take their defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How `sample` prints its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Defaults for the sampling commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target grid points for `sample`
    pub samples: u64,
    /// Points per parallel work item
    pub chunk_size: usize,
    /// Report format
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            samples: 1 << 20,
            chunk_size: 1 << 16,
            format: OutputFormat::Text,
        }
    }
}

/// Get the path to the settings file
fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sdfide").join("settings.json"))
}

fn read_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

/// Load settings
///
/// An explicit path must exist and parse. The default location falls back to
/// defaults when the file is missing or broken.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    let Some(path) = settings_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }

    match read_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!("{e:#}; using default settings");
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "samples": 4096 }}"#).unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.samples, 4096);
        assert_eq!(settings.chunk_size, Settings::default().chunk_size);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn format_is_lowercase() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "format": "json" }}"#).unwrap();
        assert_eq!(
            load_settings(Some(file.path())).unwrap().format,
            OutputFormat::Json
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn explicit_broken_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "samples = 3").unwrap();
        assert!(load_settings(Some(file.path())).is_err());
    }
}
