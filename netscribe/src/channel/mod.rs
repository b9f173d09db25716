//! Channel layer for pattern matching on terminal output.
//!
//! This module owns output accumulation, ANSI stripping and the
//! pattern-based prompt detection used by the session layer.

mod ansi;
mod buffer;
mod patterns;

pub use ansi::strip_ansi;
pub use buffer::PatternBuffer;
pub use patterns::literal_prompt_pattern;
