//! TerminalRenderer: flushes a framebuffer to the terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only rewrite runs of changed cells.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written to the terminal
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`Self::enter`]. Safe to call after a partial enter.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller can render over, so two
    /// buffers are reused forever without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = other.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Command stream that remembers the active style and cursor position, so
/// consecutive cells only pay for what actually changes.
struct CellWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    /// Where the next printed cell lands, if known
    cursor: Option<(u16, u16)>,
}

impl<'a> CellWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            cursor: None,
        }
    }

    fn write(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            write_style(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut writer = CellWriter::new(out);
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            writer.write(x, y, fb.get(x, y).unwrap_or_default())?;
        }
    }
    writer.finish()
}

/// Encode only the cells that differ between `prev` and `next`.
///
/// Frames of different sizes are redrawn cell by cell.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();

    let mut writer = CellWriter::new(out);
    for y in 0..next.height() {
        for x in 0..next.width() {
            let cell = next.get(x, y).unwrap_or_default();
            if same_size && prev.get(x, y) == Some(cell) {
                continue;
            }
            writer.write(x, y, cell)?;
        }
    }
    writer.finish()
}

fn write_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(color(style.fg)))?
        .queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of `ESC [ row ; col H` sequences
    fn moves(out: &[u8]) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i + 1 < out.len() {
            if out[i] != 0x1b || out[i + 1] != b'[' {
                i += 1;
                continue;
            }
            let mut j = i + 2;
            while j < out.len() && (out[j].is_ascii_digit() || out[j] == b';') {
                j += 1;
            }
            if j < out.len() && out[j] == b'H' {
                count += 1;
            }
            i = j;
        }
        count
    }

    fn encoded_diff(a: &FrameBuffer, b: &FrameBuffer) -> Vec<u8> {
        let mut out = Vec::new();
        encode_diff_into(a, b, &mut out).unwrap();
        out
    }

    #[test]
    fn test_adjacent_changes_share_one_move() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        let style = CellStyle::default();
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(5, 1, 'Y', style);

        let out = encoded_diff(&a, &b);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("XXX"));
        assert!(text.contains('Y'));
        assert_eq!(moves(&out), 2);
    }

    #[test]
    fn test_identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(4, 4);
        let out = encoded_diff(&a, &a.clone());
        assert!(!out.contains(&b' '));
        assert_eq!(moves(&out), 0);
    }

    #[test]
    fn test_size_change_redraws_everything() {
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(3, 2);
        b.put_str(0, 1, "abc", CellStyle::default());
        let text = String::from_utf8_lossy(&encoded_diff(&a, &b)).into_owned();
        assert!(text.contains("abc"));
        assert!(text.matches(' ').count() >= 3);
    }

    #[test]
    fn test_full_encode_positions_each_row() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(0, 0, "HELLO", CellStyle::default());
        fb.put_str(0, 1, "WORLD", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("HELLO"));
        assert!(text.contains("WORLD"));
        assert!(!text.contains("\r\n"));
        assert_eq!(moves(&out), 2);
    }
}
