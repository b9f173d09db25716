//! Pattern helpers for prompt detection.

use regex::bytes::Regex;

/// Build a regex that matches one literal device prompt at the end of
/// output.
///
/// Device prompts contain regex metacharacters often enough
/// (`switch01(config)#` being the obvious one) that the discovered
/// prompt is always escaped before use.
pub fn literal_prompt_pattern(prompt: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}\s*$", regex::escape(prompt.trim())))
}
