//! Cisco ASA platform definition.
//!
//! ASA uses `terminal pager` instead of `terminal length`, and its
//! pager prompt is `<--- More --->`. There is no width restore: the
//! pager value is the only terminal setting the session touches.

use crate::platform::{PlatformDefinition, PromptMode, PromptRule};

/// Platform name for Cisco ASA.
pub const NAME: &str = "cisco_asa";

/// Create the Cisco ASA platform definition.
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
        .with_pager_prompt(r"<--- More --->")
        .with_failure_pattern("ERROR: % Invalid input")
        .with_failure_pattern("Command authorization failed")
        .with_failure_pattern("ERROR: Command requires")
        .with_disable_paging_command("terminal pager 0")
        .with_restore_length("terminal pager {}")
        .with_terminal_size(511, 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_classification() {
        let platform = platform();
        assert_eq!(
            platform.classify_prompt("asa-fw#"),
            Some(PromptMode::Privileged)
        );
        assert_eq!(
            platform.classify_prompt("asa-fw(config)#"),
            Some(PromptMode::Config)
        );
    }

    #[test]
    fn test_pager_prompt() {
        let platform = platform();
        let pager = platform.pager_prompt.as_ref().unwrap();
        assert!(pager.is_match(b"<--- More --->"));
        assert!(!pager.is_match(b"--More--"));
    }

    #[test]
    fn test_no_width_restore() {
        let platform = platform();
        assert!(platform.restore_width_command.is_none());
        assert_eq!(
            platform.restore_length_command.as_deref(),
            Some("terminal pager {}")
        );
    }
}
