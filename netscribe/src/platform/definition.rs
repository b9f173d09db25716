//! Platform definition for vendor-specific configuration.

use regex::bytes::Regex;

/// Terminal mode a prompt can indicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptMode {
    /// User exec mode (`switch>`). Reports refuse to run here.
    UserExec,
    /// Privileged exec / enable mode (`switch#`).
    Privileged,
    /// Any configuration mode (`switch(config)#`).
    Config,
}

/// A prompt classification rule: a pattern plus negative substrings.
#[derive(Debug, Clone)]
pub struct PromptRule {
    /// Mode this rule classifies a prompt into.
    pub mode: PromptMode,

    /// Regex matched against the prompt line.
    pub pattern: Regex,

    /// Strings that must NOT be in the prompt for this rule to match.
    /// Used for disambiguation (`#` ends both enable and config prompts).
    pub not_contains: Vec<String>,
}

impl PromptRule {
    /// Create a new prompt rule.
    pub fn new(mode: PromptMode, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            mode,
            pattern: Regex::new(pattern)?,
            not_contains: vec![],
        })
    }

    /// Add a not_contains disambiguator.
    pub fn with_not_contains(mut self, text: impl Into<String>) -> Self {
        self.not_contains.push(text.into());
        self
    }

    /// Check whether this rule matches a prompt.
    pub fn matches(&self, prompt: &str) -> bool {
        for nc in &self.not_contains {
            if prompt.contains(nc) {
                return false;
            }
        }
        self.pattern.is_match(prompt.as_bytes())
    }
}

/// Platform definition containing all vendor-specific configuration.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "cisco_ios", "cisco_nxos").
    pub name: String,

    /// Prompt classification rules, checked in order; first match wins.
    pub prompt_rules: Vec<PromptRule>,

    /// Pattern for the pager continuation prompt, if the OS has one.
    pub pager_prompt: Option<Regex>,

    /// Substrings that indicate command failure.
    pub failed_when_contains: Vec<String>,

    /// Commands sent after open to disable paging and line wrapping.
    pub disable_paging_commands: Vec<String>,

    /// Command template restoring terminal length, `{}` = saved value.
    pub restore_length_command: Option<String>,

    /// Command template restoring terminal width, `{}` = saved value.
    pub restore_width_command: Option<String>,

    /// Terminal width for the PTY.
    pub terminal_width: u32,

    /// Terminal height for the PTY.
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Create a new platform definition with minimal required fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_rules: vec![],
            pager_prompt: None,
            failed_when_contains: vec![],
            disable_paging_commands: vec![],
            restore_length_command: None,
            restore_width_command: None,
            terminal_width: 511,
            terminal_height: 24,
        }
    }

    /// Add a prompt classification rule.
    pub fn with_prompt_rule(mut self, rule: PromptRule) -> Self {
        self.prompt_rules.push(rule);
        self
    }

    /// Set the pager continuation prompt pattern.
    pub fn with_pager_prompt(mut self, pattern: &str) -> Self {
        self.pager_prompt = Some(Regex::new(pattern).expect("static pager pattern"));
        self
    }

    /// Add a failure substring.
    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    /// Add a paging-disable command.
    pub fn with_disable_paging_command(mut self, command: impl Into<String>) -> Self {
        self.disable_paging_commands.push(command.into());
        self
    }

    /// Set the terminal length restore template.
    pub fn with_restore_length(mut self, template: impl Into<String>) -> Self {
        self.restore_length_command = Some(template.into());
        self
    }

    /// Set the terminal width restore template.
    pub fn with_restore_width(mut self, template: impl Into<String>) -> Self {
        self.restore_width_command = Some(template.into());
        self
    }

    /// Set terminal dimensions.
    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Classify a prompt line into a terminal mode.
    pub fn classify_prompt(&self, prompt: &str) -> Option<PromptMode> {
        self.prompt_rules
            .iter()
            .find(|rule| rule.matches(prompt))
            .map(|rule| rule.mode)
    }

    /// Check output for a configured failure substring.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlatformDefinition {
        PlatformDefinition::new("sample")
            .with_prompt_rule(
                PromptRule::new(PromptMode::Config, r"\(config[\w\-]*\)#\s*$").unwrap(),
            )
            .with_prompt_rule(
                PromptRule::new(PromptMode::Privileged, r"#\s*$")
                    .unwrap()
                    .with_not_contains("(config"),
            )
            .with_prompt_rule(PromptRule::new(PromptMode::UserExec, r">\s*$").unwrap())
            .with_failure_pattern("% Invalid input")
    }

    #[test]
    fn test_classify_first_match_wins() {
        let platform = sample();
        assert_eq!(
            platform.classify_prompt("sw1(config)#"),
            Some(PromptMode::Config)
        );
        assert_eq!(platform.classify_prompt("sw1#"), Some(PromptMode::Privileged));
        assert_eq!(platform.classify_prompt("sw1>"), Some(PromptMode::UserExec));
        assert_eq!(platform.classify_prompt("sw1$"), None);
    }

    #[test]
    fn test_detect_failure() {
        let platform = sample();
        assert_eq!(
            platform.detect_failure("% Invalid input detected at '^' marker."),
            Some("% Invalid input")
        );
        assert_eq!(platform.detect_failure("Gi1/0/1 up up"), None);
    }
}
