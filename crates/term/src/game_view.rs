//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{shape_of, GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const MIN_PANEL_W: u16 = 12;

/// Terminal viewport dimensions.
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

/// Board-and-panel renderer
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    anchor_y: AnchorY,
    /// Clear markers alternate between bright and dim
    flash_on: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
            flash_on: true,
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Select the clear-marker flash phase for the next render.
    pub fn set_flash(&mut self, on: bool) {
        self.flash_on = on;
    }

    fn frame_size(&self) -> (u16, u16) {
        (BOARD_WIDTH as u16 * self.cell_w + 2, BOARD_HEIGHT as u16 + 2)
    }

    /// Top-left corner of the well border
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Terminal position of the left column of board cell `(x, y)`
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let (fx, fy) = self.frame_origin(viewport);
        (fx + 1 + x * self.cell_w, fy + 1 + y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (start_x, start_y) = self.frame_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            Style::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_board_cell(fb, viewport, x as u16, y as u16, *cell);
            }
        }

        if let Some(active) = &snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|gy| *gy != active.position.y) {
                let ghost = Style::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                self.draw_shape(fb, viewport, &active.shape, active.position.x, ghost_y, '░', ghost);
            }

            // A grounded piece is dimmed while its lock timer runs.
            let mut style = Style::new(piece_color(active.kind), WELL_BG).bold();
            if active.grounded {
                style = Style::new(piece_color(active.kind), WELL_BG).dim();
            }
            self.draw_shape(
                fb,
                viewport,
                &active.shape,
                active.position.x,
                active.position.y,
                '█',
                style,
            );
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, "PAUSED");
        } else if !snap.started {
            self.draw_overlay_text(fb, start_x, start_y, "PRESS ENTER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16, cell: Cell) {
        let (ch, style) = match cell {
            Cell::Empty => ('·', Style::new(Rgb::new(90, 90, 100), WELL_BG).dim()),
            Cell::Filled(kind) => ('█', Style::new(piece_color(kind), WELL_BG)),
            Cell::Clearing if self.flash_on => ('█', Style::new(Rgb::new(255, 255, 255), WELL_BG).bold()),
            Cell::Clearing => ('░', Style::new(Rgb::new(160, 160, 160), WELL_BG).dim()),
        };
        let (px, py) = self.cell_origin(viewport, x, y);
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    /// Draw a shape's filled cells at board position `(x, y)`, clipped to the well.
    #[allow(clippy::too_many_arguments)]
    fn draw_shape(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        shape: &Shape,
        x: i8,
        y: i8,
        ch: char,
        style: Style,
    ) {
        for (dx, dy, _) in shape.filled() {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i8 || by < 0 || by >= BOARD_HEIGHT as i8 {
                continue;
            }
            let (px, py) = self.cell_origin(viewport, bx as u16, by as u16);
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    /// Two-row preview of a kind in spawn orientation. Returns rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, style: Style) -> u16 {
        let shape = shape_of(kind);
        let top = shape.filled().map(|(_, dy, _)| dy).min().unwrap_or(0);
        for (dx, dy, _) in shape.filled() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + (dy - top) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
        2
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_W {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                let mut style = Style::new(piece_color(kind), PANEL_BG);
                if !snap.can_hold {
                    style = style.dim();
                }
                y += self.draw_preview(fb, panel_x, y, kind, style);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y += 2;
            }
        }
        y += 1;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if !snap.started {
            return;
        }
        for kind in snap.next {
            if y + 2 > viewport.height {
                break;
            }
            y += self.draw_preview(fb, panel_x, y, kind, Style::new(piece_color(kind), PANEL_BG));
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let text_w = text.chars().count() as u16;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, start_y + frame_h / 2, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, Position};

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn glyph_at(fb: &FrameBuffer, view: &GameView, x: u16, y: u16) -> char {
        let (px, py) = view.cell_origin(VIEW, x, y);
        fb.get(px, py).map(|g| g.ch).unwrap_or('?')
    }

    #[test]
    fn frame_is_centered() {
        let view = GameView::default();
        assert_eq!(view.frame_origin(VIEW), (19, 1));
        assert_eq!(view.cell_origin(VIEW, 0, 0), (20, 2));
        assert_eq!(view.cell_origin(VIEW, 9, 19), (38, 21));
    }

    #[test]
    fn clearing_rows_flash() {
        let mut snap = GameSnapshot::default();
        snap.started = true;
        snap.board[19] = [Cell::Clearing; 10];

        let mut view = GameView::default();
        let on = view.render(&snap, VIEW);
        view.set_flash(false);
        let off = view.render(&snap, VIEW);

        assert_eq!(glyph_at(&on, &view, 0, 19), '█');
        assert_eq!(glyph_at(&off, &view, 0, 19), '░');
    }

    #[test]
    fn grounded_piece_is_dimmed() {
        let mut snap = GameSnapshot::default();
        snap.started = true;
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            shape: shape_of(PieceKind::O).clone(),
            position: Position::new(4, 18),
            grounded: true,
        });
        snap.ghost_y = Some(18);

        let view = GameView::default();
        let fb = view.render(&snap, VIEW);
        let (px, py) = view.cell_origin(VIEW, 4, 18);
        let glyph = fb.get(px, py).unwrap_or_default();
        assert_eq!(glyph.ch, '█');
        assert!(glyph.style.dim);
    }

    #[test]
    fn overlays_follow_state() {
        let view = GameView::default();
        let idle = view.render(&GameSnapshot::default(), VIEW);
        assert!(idle.row_text(12).contains("PRESS ENTER"));

        let mut snap = GameSnapshot::default();
        snap.started = true;
        snap.paused = true;
        assert!(view.render(&snap, VIEW).row_text(12).contains("PAUSED"));

        snap.game_over = true;
        assert!(view.render(&snap, VIEW).row_text(12).contains("GAME OVER"));
    }

    #[test]
    fn narrow_viewport_skips_panel() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(24, 22));
        assert!(!(0..22).any(|y| fb.row_text(y).contains("SCORE")));
    }
}
