use arrayvec::ArrayVec;

use crate::board::{ActivePiece, Board};
use crate::cell::Cell;
use crate::types::Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub cells: ArrayVec<Cell, 4>,
    pub pivot: Option<Cell>,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            shape: value.piece.shape(),
            cells: value.piece.cells().iter().take(4).copied().collect(),
            pivot: value.piece.pivot_cell(),
        }
    }
}

/// Read-only copy of everything a view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major settled grid: `cells[y * width + x]`
    pub cells: Vec<Option<Shape>>,
    /// Row-major mask of cells owned by settling fragments
    pub falling: Vec<bool>,
    pub active: Option<ActiveSnapshot>,
    pub running: bool,
    pub game_over: bool,
    pub revision: u64,
    pub piece_count: usize,
    pub settling_count: usize,
}

impl BoardSnapshot {
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Settled shape at (x, y), `None` for empty or out-of-range cells
    pub fn shape_at(&self, x: i32, y: i32) -> Option<Shape> {
        self.index(x, y).and_then(|i| self.cells.get(i).copied().flatten())
    }

    pub fn is_falling(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .and_then(|i| self.falling.get(i).copied())
            .unwrap_or(false)
    }

    pub fn paused(&self) -> bool {
        !self.running && !self.game_over
    }
}

impl Board {
    /// Fill `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        let len = (self.width() * self.height()) as usize;
        out.width = self.width();
        out.height = self.height();
        out.cells.clear();
        out.cells.resize(len, None);
        out.falling.clear();
        out.falling.resize(len, false);

        for (cell, shape) in self.settled_cells() {
            let i = (cell.y * out.width + cell.x) as usize;
            out.cells[i] = Some(shape);
        }
        for id in self.settling() {
            if let Some(piece) = self.piece(*id) {
                for cell in piece.cells() {
                    out.falling[(cell.y * out.width + cell.x) as usize] = true;
                }
            }
        }

        out.active = self.active().map(ActiveSnapshot::from);
        out.running = self.is_running();
        out.game_over = self.game_over();
        out.revision = self.revision();
        out.piece_count = self.piece_count();
        out.settling_count = self.settling().len();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
