//! GameView: maps a `core::BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style, BLACK};
use crate::types::Shape;

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

/// Play-area background.
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Block color per shape.
pub fn shape_color(shape: Shape) -> Rgb {
    match shape {
        Shape::Beam => Rgb::new(150, 242, 242),
        Shape::J => Rgb::new(117, 197, 255),
        Shape::L => Rgb::new(255, 175, 117),
        Shape::S => Rgb::new(153, 242, 145),
        Shape::ReverseS => Rgb::new(255, 117, 117),
        Shape::Square => Rgb::new(240, 242, 121),
        Shape::Tee => Rgb::new(222, 153, 255),
    }
}

const HELP: [&str; 6] = [
    "←→ h l a d slide",
    "↓ j s     down",
    "↑ k w     rotate",
    "space     drop",
    "p pause r reset",
    "q         quit",
];

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size needed to show the whole board frame (without the side panel).
    pub fn frame_size(&self, snap: &BoardSnapshot) -> (u16, u16) {
        let w = (snap.width.max(0) as u16).saturating_mul(self.cell_w);
        let h = (snap.height.max(0) as u16).saturating_mul(self.cell_h);
        (w.saturating_add(2), h.saturating_add(2))
    }

    /// Render a snapshot into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill(
            start_x + 1,
            start_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            Style::new(Rgb::new(80, 80, 90), WELL_BG).glyph(' '),
        );
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            Style::new(Rgb::new(200, 200, 200), BLACK),
        );

        // Settled cells; falling fragments are dimmed.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.shape_at(x, y) {
                    Some(shape) => {
                        let style = Style::new(shape_color(shape), WELL_BG);
                        let style = if snap.is_falling(x, y) { style.dimmed() } else { style };
                        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
                    }
                    None => self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = &snap.active {
            let style = Style::new(shape_color(active.shape), WELL_BG).bold();
            for cell in &active.cells {
                if cell.x >= 0 && cell.x < snap.width && cell.y >= 0 && cell.y < snap.height {
                    let ch = if Some(*cell) == active.pivot { '▓' } else { '█' };
                    self.fill_cell_rect(fb, start_x, start_y, cell.x as u16, cell.y as u16, ch, style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.paused() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = Style::new(Rgb::new(90, 90, 100), WELL_BG).dimmed();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill(px, py, self.cell_w, self.cell_h, style.glyph(ch));
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), BLACK);
        let dim = value.dimmed();

        let state = if snap.game_over {
            "GAME OVER"
        } else if snap.running {
            "RUNNING"
        } else {
            "PAUSED"
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, state, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SIZE", label);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, snap.width.max(0) as u32, value);
        let x = fb.put_str(x, y, "x", value);
        fb.put_u32(x, y, snap.height.max(0) as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.piece_count as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "FALLING", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.settling_count as u32, value);
        y = y.saturating_add(2);

        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, Style::new(Rgb::new(255, 255, 255), BLACK).bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Cell, GameConfig};

    fn snapshot_with_floor() -> BoardSnapshot {
        let mut board = Board::empty(&GameConfig::new(4, 6), 1);
        board
            .place_piece(Shape::Tee, vec![Cell::new(0, 5), Cell::new(1, 5)])
            .unwrap();
        board.snapshot()
    }

    #[test]
    fn test_frame_size_tracks_board_width() {
        let view = GameView::default();
        let snap = snapshot_with_floor();
        assert_eq!(view.frame_size(&snap), (4 * 2 + 2, 6 + 2));
    }

    #[test]
    fn test_settled_cells_use_shape_color() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = snapshot_with_floor();
        let fb = view.render(&snap, Viewport::new(10, 8));

        // Frame starts at x = 0; row 5 of the board is terminal row 6.
        let cell = fb.get(1, 6).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, shape_color(Shape::Tee));
        assert_eq!(fb.get(5, 6).unwrap().ch, '·');
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    }

    #[test]
    fn test_paused_overlay() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = snapshot_with_floor();
        let fb = view.render(&snap, Viewport::new(40, 10));
        let text: String = (0..10).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("PAUSED"));
        assert!(text.contains("STATE"));
    }

    #[test]
    fn test_running_board_has_no_overlay() {
        let view = GameView::default();
        let board = Board::new(&GameConfig::default(), 7);
        let fb = view.render(&board.snapshot(), Viewport::new(60, 30));
        let text: String = (0..30).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("RUNNING"));
        assert!(!text.contains("PAUSED"));
        assert!(!text.contains("GAME OVER"));
        assert!(text.contains("h l a d slide"));
        assert!(text.contains("k w     rotate"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let snap = snapshot_with_floor();
        let fb = view.render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
