//! Piece module - shapes, spawn templates and piece geometry
//!
//! A piece is a shape tag plus the cells it currently occupies. Spawned pieces
//! have four cells; row clears can shrink them and split them apart.
//!
//! Pieces never look at the board themselves. Every legality check takes a
//! `can_occupy` predicate from the caller, which is how the board answers
//! "may this piece stand on that cell" without the piece holding a reference
//! back to it.

use arrayvec::ArrayVec;

use crate::cell::Cell;
use crate::types::{Direction, Shape};

/// Offset of a single cell relative to the spawn anchor
pub type CellOffset = (i32, i32);

/// Spawn template - 4 offsets from the anchor, pivot first when the shape has one
pub type SpawnTemplate = [CellOffset; 4];

/// Stable handle of a piece inside a board's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Get the spawn template for a shape
pub fn spawn_template(shape: Shape) -> SpawnTemplate {
    match shape {
        Shape::S => [(0, 0), (0, -1), (1, 0), (1, 1)],
        Shape::ReverseS => [(0, 0), (1, -1), (1, 0), (0, 1)],
        Shape::Beam => [(0, 0), (0, -1), (0, 1), (0, 2)],
        Shape::Square => [(0, 0), (1, -1), (1, 0), (0, -1)],
        Shape::Tee => [(0, 0), (-1, 0), (0, -1), (1, 0)],
        Shape::L => [(0, 0), (0, -1), (0, 1), (1, 1)],
        Shape::J => [(0, 0), (0, -1), (0, 1), (-1, 1)],
    }
}

/// Lay a shape out around the spawn anchor
pub fn spawn_cells(shape: Shape, anchor: Cell) -> ArrayVec<Cell, 4> {
    spawn_template(shape)
        .iter()
        .map(|&(dx, dy)| anchor.offset(dx, dy))
        .collect()
}

/// A named shape and the cells it currently occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    cells: Vec<Cell>,
    /// Index into `cells` of the rotation pivot, so the pivot travels with the piece
    pivot: Option<usize>,
}

impl Piece {
    /// Create a piece without a pivot (fragments, imported pile groups)
    pub fn new(shape: Shape, cells: Vec<Cell>) -> Self {
        Self {
            shape,
            cells,
            pivot: None,
        }
    }

    /// Create a freshly spawned piece laid out around `anchor`
    pub fn spawn(shape: Shape, anchor: Cell) -> Self {
        Self {
            shape,
            cells: spawn_cells(shape, anchor).to_vec(),
            pivot: shape.has_pivot().then_some(0),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Current position of the rotation pivot
    pub fn pivot_cell(&self) -> Option<Cell> {
        self.pivot.map(|i| self.cells[i])
    }

    /// Forget the pivot (the piece has settled and will never rotate again)
    pub fn clear_pivot(&mut self) {
        self.pivot = None;
    }

    /// Check that every cell, moved `steps` in `direction`, may be occupied
    pub fn can_slide(
        &self,
        direction: Direction,
        steps: i32,
        can_occupy: impl Fn(Cell) -> bool,
    ) -> bool {
        let (dx, dy) = direction.offset(steps);
        self.cells.iter().all(|c| can_occupy(c.offset(dx, dy)))
    }

    /// Move every cell `steps` in `direction`
    ///
    /// No bounds checking: callers validate with [`Piece::can_slide`] first.
    pub fn slide(&mut self, direction: Direction, steps: i32) {
        let (dx, dy) = direction.offset(steps);
        for cell in &mut self.cells {
            *cell = cell.offset(dx, dy);
        }
    }

    pub fn can_move_down(&self, can_occupy: impl Fn(Cell) -> bool) -> bool {
        self.can_slide(Direction::Down, 1, can_occupy)
    }

    pub fn move_down(&mut self) {
        self.slide(Direction::Down, 1);
    }

    /// Check that every non-pivot cell, turned 90° clockwise around `pivot`, may be occupied
    pub fn can_rotate(&self, pivot: Cell, can_occupy: impl Fn(Cell) -> bool) -> bool {
        self.cells
            .iter()
            .filter(|&&c| c != pivot)
            .all(|&c| can_occupy(rotated(c, pivot)))
    }

    /// Turn every non-pivot cell 90° clockwise around `pivot`
    ///
    /// Callers validate with [`Piece::can_rotate`] first.
    pub fn rotate(&mut self, pivot: Cell) {
        for cell in &mut self.cells {
            if *cell != pivot {
                *cell = rotated(*cell, pivot);
            }
        }
    }

    /// Drop every cell that sits on `row`
    pub fn remove_blocks_in_row(&mut self, row: i32) {
        self.retain_cells(|c| c.y != row);
    }

    /// True when more than one cell is left and no two of them touch.
    ///
    /// Weaker than a connected-components test: one adjacent pair anywhere
    /// reports the piece as whole.
    pub fn is_broken(&self) -> bool {
        let n = self.cells.len();
        if n <= 1 {
            return false;
        }
        for i in 0..n - 1 {
            for j in i + 1..n {
                if self.cells[i].adjacent_to(self.cells[j]) {
                    return false;
                }
            }
        }
        true
    }

    /// Split off the first cell plus every remaining cell adjacent to it.
    ///
    /// A single pass: whatever is left in `self` is not split further, callers
    /// re-check [`Piece::is_broken`] if they need to.
    pub fn break_figure(&mut self) -> Piece {
        let Some(&seed) = self.cells.first() else {
            return Piece::new(self.shape, Vec::new());
        };
        let mut split = vec![seed];
        for &cell in self.cells[1..].iter().rev() {
            if seed.adjacent_to(cell) {
                split.push(cell);
            }
        }
        self.retain_cells(|c| !split.contains(&c));
        Piece::new(self.shape, split)
    }

    /// Re-key one cell in place (row compaction)
    pub(crate) fn move_cell(&mut self, from: Cell, to: Cell) {
        if let Some(cell) = self.cells.iter_mut().find(|c| **c == from) {
            *cell = to;
        }
    }

    fn retain_cells(&mut self, keep: impl Fn(Cell) -> bool) {
        let pivot = self.pivot_cell();
        self.cells.retain(|&c| keep(c));
        self.pivot = pivot.and_then(|p| self.cells.iter().position(|&c| c == p));
    }
}

/// Clockwise quarter turn of `cell` around `pivot` (screen coordinates, y down)
#[inline(always)]
fn rotated(cell: Cell, pivot: Cell) -> Cell {
    let dx = pivot.x - cell.x;
    let dy = pivot.y - cell.y;
    Cell::new(pivot.x + dy, pivot.y - dx)
}
