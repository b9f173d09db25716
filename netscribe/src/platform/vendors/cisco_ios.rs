//! Cisco IOS / IOS-XE platform definition.
//!
//! Covers classic IOS and IOS-XE, which share prompts, pager behavior
//! and the `terminal length`/`terminal width` commands.
//!
//! # Prompt Examples
//!
//! ```text
//! switch01>                 # user exec mode
//! switch01#                 # privileged (enable) mode
//! switch01(config)#         # global config mode
//! switch01(config-if)#      # interface config mode
//! ```

use crate::platform::{PlatformDefinition, PromptMode, PromptRule};

/// Platform name for Cisco IOS and IOS-XE.
pub const NAME: &str = "cisco_ios";

/// Create the Cisco IOS platform definition.
///
/// Prompt character classes follow scrapli's IOS-XE driver: hostnames
/// may carry dots, dashes, at-signs, slashes and colons.
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
        .with_failure_pattern("% Invalid input detected")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Unknown command")
        .with_failure_pattern("% Bad IP address")
        .with_disable_paging_command("terminal length 0")
        .with_disable_paging_command("terminal width 0")
        .with_restore_length("terminal length {}")
        .with_restore_width("terminal width {}")
        .with_terminal_size(511, 24)
}
