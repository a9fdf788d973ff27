//! `OutputBuffer`: batched ANSI output with pen tracking.

use crate::frame::Rgb;
use std::io::Write;

/// Pre-allocated buffer for building one terminal update.
///
/// Everything is accumulated here and flushed with a single write. The
/// buffer remembers the colors it last selected, so repeated cells of the
/// same color cost only their glyph.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl OutputBuffer {
    /// Create an output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            fg: None,
            bg: None,
        }
    }

    /// Create a buffer sized for a full half-block frame (64KB).
    pub fn new() -> Self {
        Self::with_capacity(65536)
    }

    /// Drop the contents and forget the pen.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.fg = None;
        self.bg = None;
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write text at the cursor in the current pen.
    #[inline]
    pub fn text(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a single glyph at the cursor in the current pen.
    #[inline]
    pub fn glyph(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move the cursor to a 0-based (`column`, `row`).
    #[inline]
    pub fn move_to(&mut self, column: u16, row: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(row) + 1, u32::from(column) + 1);
    }

    /// Show or hide the cursor.
    #[inline]
    pub fn cursor_visible(&mut self, visible: bool) {
        self.data
            .extend_from_slice(if visible { b"\x1b[?25h" } else { b"\x1b[?25l" });
    }

    /// Select true-color foreground and background, emitting only what
    /// changed since the last selection.
    pub fn pen(&mut self, fg: Rgb, bg: Rgb) {
        match (self.fg != Some(fg), self.bg != Some(bg)) {
            (true, true) => {
                let _ = write!(
                    self.data,
                    "\x1b[38;2;{};{};{};48;2;{};{};{}m",
                    fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
                );
            }
            (true, false) => {
                let _ = write!(self.data, "\x1b[38;2;{};{};{}m", fg.r, fg.g, fg.b);
            }
            (false, true) => {
                let _ = write!(self.data, "\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b);
            }
            (false, false) => return,
        }
        self.fg = Some(fg);
        self.bg = Some(bg);
    }

    /// Reset all attributes and forget the pen.
    #[inline]
    pub fn reset(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
        self.fg = None;
        self.bg = None;
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Write the contents to `writer` and flush it.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_emits_changes_only() {
        let mut out = OutputBuffer::with_capacity(64);
        out.move_to(0, 0);
        out.pen(Rgb::new(1, 2, 3), Rgb::BLACK);
        out.glyph('▀');
        out.pen(Rgb::new(1, 2, 3), Rgb::BLACK);
        out.glyph('▀');
        out.pen(Rgb::new(1, 2, 3), Rgb::WHITE);
        assert_eq!(
            out.as_bytes(),
            "\x1b[1;1H\x1b[38;2;1;2;3;48;2;0;0;0m▀▀\x1b[48;2;255;255;255m".as_bytes()
        );
    }

    #[test]
    fn test_reset_forgets_pen() {
        let mut out = OutputBuffer::with_capacity(64);
        out.pen(Rgb::RED, Rgb::BLUE);
        out.reset();
        let before = out.len();
        out.pen(Rgb::RED, Rgb::BLUE);
        assert!(out.len() > before);

        out.clear();
        assert!(out.is_empty());
        out.pen(Rgb::RED, Rgb::BLUE);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::new();
        out.text("abc");
        out.cursor_visible(false);
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"abc\x1b[?25l");
    }
}
