//! Settings file handling.
//!
//! Settings live in a JSON file. A missing file is materialized with
//! defaults on first use so there is always something on disk to
//! edit; unknown fields are ignored and missing fields fall back to
//! their defaults, so old settings files keep working across
//! upgrades.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Global settings shared by all reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory report files are written to. A leading `~` expands
    /// to the home directory.
    pub output_dir: PathBuf,

    /// chrono format string for the filename timestamp.
    pub date_format: String,

    /// Disable the pager on open and restore the terminal on close.
    pub modify_term: bool,

    /// Directory holding the TextFSM template files.
    pub template_dir: PathBuf,

    /// Include VLANs with zero assigned ports in the VLAN summary.
    pub show_all_vlans: bool,

    /// Commands captured by the `document` report.
    pub document_commands: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("~/netscribe/output"),
            date_format: "%Y-%m-%d-%H-%M-%S".to_string(),
            modify_term: true,
            template_dir: PathBuf::from("templates"),
            show_all_vlans: false,
            document_commands: vec![
                "show version".to_string(),
                "show inventory".to_string(),
                "show cdp neighbors".to_string(),
                "show interface status".to_string(),
                "show ip interface brief".to_string(),
                "show running-config".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, creating it with defaults if it
    /// does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.is_file() {
            let text = fs::read_to_string(path).map_err(|e| SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let settings = serde_json::from_str(&text).map_err(|e| SettingsError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.write(path)?;
            info!("created default settings file at {}", path.display());
            Ok(settings)
        }
    }

    /// Write settings to a JSON file, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let text = serde_json::to_string_pretty(self).expect("settings serialize");
        fs::write(path, text).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.modify_term);
        assert!(!settings.show_all_vlans);
        assert_eq!(settings.date_format, "%Y-%m-%d-%H-%M-%S");
        assert!(!settings.document_commands.is_empty());
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings::load_or_create(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(settings.date_format, Settings::default().date_format);

        // Second load reads the file it just wrote.
        let again = Settings::load_or_create(&path).unwrap();
        assert_eq!(again.output_dir, settings.output_dir);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"output_dir": "/srv/reports"}"#).unwrap();

        let settings = Settings::load_or_create(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("/srv/reports"));
        assert_eq!(settings.date_format, Settings::default().date_format);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        assert!(Settings::load_or_create(&path).is_err());
    }
}
