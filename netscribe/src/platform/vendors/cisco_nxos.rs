//! Cisco NX-OS (Nexus) platform definition.
//!
//! NX-OS prompts look like IOS prompts, but the terminal setup
//! differs: width is capped at 511 and the commands are spelled
//! `terminal length` / `terminal width` only.

use crate::platform::{PlatformDefinition, PromptMode, PromptRule};

/// Platform name for Cisco NX-OS.
pub const NAME: &str = "cisco_nxos";

/// Create the Cisco NX-OS platform definition.
pub fn platform() -> PlatformDefinition {
    let config = PromptRule::new(
        PromptMode::Config,
        r"(?m)^[\w.\-@/:]{1,48}\([\w.\-]+\)#\s*$",
    )
    .unwrap();

    let privileged = PromptRule::new(PromptMode::Privileged, r"(?m)^[\w.\-@/:]{1,63}#\s*$")
        .unwrap()
        .with_not_contains("(config");

    let user_exec = PromptRule::new(PromptMode::UserExec, r"(?m)^[\w.\-@/:]{1,63}>\s*$").unwrap();

    PlatformDefinition::new(NAME)
        .with_prompt_rule(config)
        .with_prompt_rule(privileged)
        .with_prompt_rule(user_exec)
        .with_pager_prompt(r"--More--")
        .with_failure_pattern("% Invalid command")
        .with_failure_pattern("Invalid command at")
        .with_failure_pattern("% Permission denied")
        .with_failure_pattern("% Incomplete command")
        .with_disable_paging_command("terminal length 0")
        .with_disable_paging_command("terminal width 511")
        .with_restore_length("terminal length {}")
        .with_restore_width("terminal width {}")
        .with_terminal_size(511, 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_classification() {
        let platform = platform();
        assert_eq!(
            platform.classify_prompt("nexus5k#"),
            Some(PromptMode::Privileged)
        );
        assert_eq!(
            platform.classify_prompt("nexus5k(config)#"),
            Some(PromptMode::Config)
        );
        assert_eq!(
            platform.classify_prompt("nexus5k>"),
            Some(PromptMode::UserExec)
        );
    }

    #[test]
    fn test_terminal_commands() {
        let platform = platform();
        assert_eq!(
            platform.disable_paging_commands,
            vec!["terminal length 0", "terminal width 511"]
        );
    }

    #[test]
    fn test_failure_patterns() {
        let platform = platform();
        assert!(
            platform
                .detect_failure("% Invalid command at '^' marker.")
                .is_some()
        );
    }
}
