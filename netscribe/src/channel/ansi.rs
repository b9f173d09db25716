//! ANSI escape stripping for raw terminal output.
//!
//! Device CLIs routinely emit color codes, cursor movement and other
//! escape sequences that would confuse prompt matching and parsing.
//! This runs the raw bytes through a vte state machine and keeps only
//! printable text plus the control bytes the capture layer cares
//! about (CR, LF, TAB and BS - backspaces are left in place so pager
//! erase artifacts stay visible to the output normalizer).

use vte::{Params, Parser, Perform};

/// Strip ANSI escape sequences from raw terminal bytes.
pub fn strip_ansi(data: &[u8]) -> Vec<u8> {
    let mut stripper = Stripper {
        out: Vec::with_capacity(data.len()),
    };
    let mut parser = Parser::new();
    parser.advance(&mut stripper, data);
    stripper.out
}

struct Stripper {
    out: Vec<u8>,
}

impl Perform for Stripper {
    fn print(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        // Keep line structure and the backspace overwrites from pagers.
        if matches!(byte, b'\r' | b'\n' | b'\t' | 0x08) {
            self.out.push(byte);
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}
