//! Line reassembly for the host byte stream.
//!
//! The host link delivers bytes in arbitrary chunks; [`LineReader`] collects
//! them into terminator-delimited lines. Only printable ASCII is kept, so
//! `\r\n` hosts and line-noise bytes need no special handling upstream.

use heapless::String;

/// Default line terminator
pub const DEFAULT_TERMINATOR: u8 = b'\n';

/// Maximum line length in bytes
///
/// Input beyond this on a single line is silently dropped until the
/// terminator arrives; the surviving prefix is delivered as the line.
pub const MAX_LINE_LEN: usize = 512;

/// A completed command line
pub type Line = String<MAX_LINE_LEN>;

/// State machine for reassembling incoming lines
#[derive(Debug, Clone)]
pub struct LineReader {
    buffer: Line,
    terminator: u8,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Create a reader using the default `\n` terminator
    pub fn new() -> Self {
        Self::with_terminator(DEFAULT_TERMINATOR)
    }

    /// Create a reader with a custom terminator byte
    pub fn with_terminator(terminator: u8) -> Self {
        Self {
            buffer: String::new(),
            terminator,
        }
    }

    /// Discard any partially accumulated line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed a single byte to the reader
    ///
    /// Returns `Some(line)` when the terminator completes a line (possibly
    /// empty), `None` when more bytes are needed. Non-printable bytes other
    /// than the terminator are discarded.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == self.terminator {
            let line = self.buffer.clone();
            self.buffer.clear();
            return Some(line);
        }

        if byte == b' ' || byte.is_ascii_graphic() {
            // Full buffer: drop the byte, keep the accumulated prefix
            let _ = self.buffer.push(byte as char);
        }

        None
    }
}
