//! GameView: draws a [`Snapshot`] into a framebuffer.
//!
//! Pure, no I/O. Board row 0 is drawn at the bottom of the frame, and cells
//! above the top row (where pieces can spawn) are not drawn.

use crate::core::{Phase, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameOverCause, PieceKind};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    /// Board cell height in terminal rows
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as wide.
        Self::new(2, 1)
    }
}

/// Screen placement of the board frame for one render
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    columns: i32,
    rows: i32,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered board for a snapshot
    pub fn frame_size(&self, snap: &Snapshot) -> (u16, u16) {
        (
            scaled(snap.columns, self.cell_w).saturating_add(2),
            scaled(snap.rows, self.cell_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (w, h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            columns: snap.columns,
            rows: snap.rows,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.fill_rect(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            w.saturating_sub(2),
            h.saturating_sub(2),
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        draw_border(fb, frame.x, frame.y, w, h, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        for y in 0..snap.rows {
            for x in 0..snap.columns {
                match snap.cell(x, y) {
                    Some(kind) => self.fill_cell(fb, frame, x, y, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, x, y, '·', empty),
                }
            }
        }

        if let Some(active) = &snap.active {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for &(x, y) in &active.ghost {
                if snap.cell(x, y).is_none() {
                    self.fill_cell(fb, frame, x, y, '░', ghost);
                }
            }
            let style = piece_style(active.kind);
            for &(x, y) in &active.cells {
                self.fill_cell(fb, frame, x, y, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if let Phase::GameOver(_) = snap.phase {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Board cells outside the board (e.g. above the top row) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= frame.columns || y >= frame.rows {
            return;
        }
        let px = frame.x.saturating_add(1).saturating_add(scaled(x, self.cell_w));
        let py = frame
            .y
            .saturating_add(1)
            .saturating_add(scaled(frame.rows - 1 - y, self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "ROWS", label);
        fb.put_u32(panel_x, y + 1, snap.rows_cleared, value);
        y += 3;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y + 1, snap.pieces_spawned, value);
        y += 3;

        fb.put_str(panel_x, y, "NOW", label);
        let now = snap.active.as_ref().map(|a| a.kind.letter()).unwrap_or("-");
        fb.put_str(panel_x, y + 1, now, value);
        y += 3;

        fb.put_str(panel_x, y, "STATUS", label);
        fb.put_str(panel_x, y + 1, status_text(snap), value);
    }
}

/// `n` board cells in terminal cells, clamped to the screen coordinate range
fn scaled(n: i32, cell: u16) -> u16 {
    u16::try_from(n.max(0)).unwrap_or(u16::MAX).saturating_mul(cell)
}

fn status_text(snap: &Snapshot) -> &'static str {
    match snap.phase {
        Phase::GameOver(GameOverCause::BlockOut) => "BLOCKED",
        Phase::GameOver(GameOverCause::LockOut) => "TOPPED OUT",
        _ if snap.paused => "PAUSED",
        Phase::Idle => "READY",
        Phase::Falling => "PLAYING",
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, PLAYFIELD_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    // Only the part inside the buffer can be drawn.
    for px in x.saturating_add(1)..right.min(fb.width()) {
        fb.put_char(px, y, '─', style);
        fb.put_char(px, bottom, '─', style);
    }
    for py in y.saturating_add(1)..bottom.min(fb.height()) {
        fb.put_char(x, py, '│', style);
        fb.put_char(right, py, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, frame.y.saturating_add(frame.h / 2), text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot(columns: i32, rows: i32) -> Snapshot {
        Snapshot {
            columns,
            rows,
            cells: vec![None; (columns * rows) as usize],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_frame_size_includes_border() {
        let view = GameView::default();
        assert_eq!(view.frame_size(&empty_snapshot(10, 18)), (22, 20));
    }

    #[test]
    fn test_bottom_row_is_drawn_last() {
        let mut snap = empty_snapshot(4, 3);
        snap.cells[0] = Some(PieceKind::Z);
        let fb = GameView::default().render(&snap, Viewport::new(10, 5));

        // Frame is 10x5; row 0 sits just above the bottom border.
        assert_eq!(fb.get(1, 3).unwrap().ch, '█');
        assert_eq!(fb.get(2, 3).unwrap().ch, '█');
        assert_eq!(fb.get(1, 1).unwrap().ch, '·');
    }

    #[test]
    fn test_frame_size_saturates() {
        let view = GameView::default();
        assert_eq!(view.frame_size(&empty_snapshot(33000, 4)), (u16::MAX, 6));
        assert_eq!(scaled(-3, 2), 0);
        assert_eq!(scaled(i32::MAX, 1), u16::MAX);
    }

    #[test]
    fn test_status_text() {
        let mut snap = empty_snapshot(4, 4);
        assert_eq!(status_text(&snap), "READY");
        snap.phase = Phase::Falling;
        snap.paused = true;
        assert_eq!(status_text(&snap), "PAUSED");
        snap.phase = Phase::GameOver(GameOverCause::BlockOut);
        assert_eq!(status_text(&snap), "BLOCKED");
    }
}
