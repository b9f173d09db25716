//! Pattern buffer with efficient tail-search optimization.
//!
//! Only the last N bytes of the buffer are searched for prompt
//! patterns rather than the entire output. For large captures (a full
//! MAC table or route table), this keeps prompt detection cheap.

use regex::bytes::Regex;

use super::ansi::strip_ansi;

/// Buffer for accumulating output and efficiently searching for patterns.
#[derive(Debug)]
pub struct PatternBuffer {
    /// The accumulated output buffer.
    buffer: Vec<u8>,

    /// How many bytes from the end to search for patterns.
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a new pattern buffer with the specified search depth.
    ///
    /// # Arguments
    ///
    /// * `search_depth` - Number of bytes from the end to search for patterns.
    ///   Default recommendation is 1000 bytes.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Extend the buffer with new data, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Search only the tail of the buffer for the pattern.
    ///
    /// Returns the match if found, with byte offsets relative to the
    /// start of the search region (not the full buffer).
    pub fn search_tail(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        let tail = &self.buffer[start..];
        pattern.find(tail)
    }

    /// Search the entire buffer for a pattern.
    ///
    /// Use sparingly - prefer `search_tail` for prompt detection.
    pub fn search_full(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        pattern.find(&self.buffer)
    }

    /// Check if the tail contains a pattern match.
    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        self.search_tail(pattern).is_some()
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// If the pattern matches in the tail, split the buffer at the end
    /// of the match: return everything up to and including the match
    /// and keep the remainder buffered.
    ///
    /// Output that arrives after a prompt (a trailing space, the next
    /// unsolicited line) must not leak into this capture, and must not
    /// be lost for the next one.
    pub fn take_through(&mut self, pattern: &Regex) -> Option<Vec<u8>> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        let end = start + pattern.find(&self.buffer[start..])?.end();

        let rest = self.buffer.split_off(end);
        Some(std::mem::replace(&mut self.buffer, rest))
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the search depth setting.
    pub fn search_depth(&self) -> usize {
        self.search_depth
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}
