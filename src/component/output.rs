//! Captured callback output.

use std::fmt;

/// Buffer a route callback writes its output to.
///
/// Callbacks never see the real output channel; the buffer is returned to
/// the caller only when the callback succeeds.
#[derive(Debug, Default)]
pub struct Output {
    buf: String,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string to the buffer.
    pub fn print(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Write for Output {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}
