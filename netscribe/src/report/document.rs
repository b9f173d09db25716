//! Device documentation capture.
//!
//! Runs the settings-provided command list and saves each raw output
//! to its own text file. Output is streamed line by line, so a full
//! `show running-config` or `show tech` does not have to fit in one
//! capture buffer.

use std::path::PathBuf;

use log::info;

use super::output_file;
use crate::error::Result;
use crate::session::Session;
use crate::settings::Settings;

/// Capture every configured command to a text file. Returns the
/// written file paths.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(settings.document_commands.len());

    for command in &settings.document_commands {
        let path = output_file(settings, session.hostname(), command, ".txt")?;
        session.write_command_to_file(command, &path).await?;
        info!("captured '{}' to {}", command, path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NetworkOs;
    use crate::report::testing::ScriptedSession;

    #[tokio::test]
    async fn test_document_captures_each_command() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            document_commands: vec!["show version".to_string(), "show inventory".to_string()],
            ..Settings::default()
        };

        let mut session = ScriptedSession::new("switch01", NetworkOs::Ios)
            .reply("show version", "Cisco IOS Software\n")
            .reply("show inventory", "NAME: \"1\", DESCR: \"WS-C3750X\"\n");

        let written = run(&mut session, &settings).await.unwrap();
        assert_eq!(written.len(), 2);

        let version = std::fs::read_to_string(&written[0]).unwrap();
        assert!(version.contains("Cisco IOS Software"));

        let name = written[0].file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("switch01-show-version-"));
        assert!(name.ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_unscripted_command_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            document_commands: vec!["show clock".to_string()],
            ..Settings::default()
        };

        let mut session = ScriptedSession::new("switch01", NetworkOs::Ios);
        assert!(run(&mut session, &settings).await.is_err());
    }
}
