//! Output filename templating.
//!
//! Report files are named `<hostname>-<description>-<timestamp>` with
//! the timestamp format taken from the settings, resolved against the
//! expanded output directory.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{ReportError, Result};
use crate::settings::Settings;

/// Remove filename-hostile characters from a description.
pub fn sanitize_desc(desc: &str) -> String {
    desc.replace(['/', '.', ':', ' '], "-")
        .replace('\\', "")
        .replace("| ", "")
        .replace('|', "")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_path(base: &Path) -> PathBuf {
    if let Ok(stripped) = base.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    base.to_path_buf()
}

/// Build the full output path for a report file.
pub fn create_output_filename(
    settings: &Settings,
    hostname: &str,
    desc: &str,
    ext: &str,
    include_date: bool,
) -> PathBuf {
    let clean_desc = sanitize_desc(desc);

    let mut file_bits = vec![hostname.to_string(), clean_desc];
    if include_date {
        let stamp = Local::now().format(&settings.date_format).to_string();
        file_bits.push(stamp);
    }

    let filename = format!("{}{}", file_bits.join("-"), ext);
    expand_path(&settings.output_dir).join(filename)
}

/// Create the parent directory of an output path if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(output_dir: &str, date_format: &str) -> Settings {
        Settings {
            output_dir: PathBuf::from(output_dir),
            date_format: date_format.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_sanitize_desc() {
        assert_eq!(sanitize_desc("show cdp neighbors detail"), "show-cdp-neighbors-detail");
        assert_eq!(sanitize_desc("show terminal | i Length"), "show-terminal-i-Length");
        assert_eq!(sanitize_desc("mac-addr"), "mac-addr");
    }

    #[test]
    fn test_filename_shape() {
        let settings = settings_with("/tmp/reports", "%Y-%m-%d");
        let path = create_output_filename(&settings, "switch01", "cdp", ".csv", true);

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("switch01-cdp-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(path.parent().unwrap(), Path::new("/tmp/reports"));
    }

    #[test]
    fn test_filename_without_date() {
        let settings = settings_with("/tmp/reports", "%Y-%m-%d");
        let path = create_output_filename(&settings, "switch01", "PortMap", ".csv", false);
        assert_eq!(
            path,
            Path::new("/tmp/reports/switch01-PortMap.csv")
        );
    }

    #[test]
    fn test_expand_home() {
        // Only check the shape; HOME differs per environment.
        if std::env::var_os("HOME").is_some() {
            let expanded = expand_path(Path::new("~/reports"));
            assert!(!expanded.starts_with("~"));
            assert!(expanded.ends_with("reports"));
        }
    }
}
