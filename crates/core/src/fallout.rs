//! Row clearing, piece splitting and fragment fallout
//!
//! After a row clear, settled pieces whose support was removed become
//! "settling": they fall one row per tick, all at once, until each of them
//! is blocked. While anything is settling the board spawns nothing.

use std::collections::HashSet;

use crate::board::Board;
use crate::cell::Cell;
use crate::piece::PieceId;

/// Outcome of [`Board::remove_filled_rows`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowClear {
    /// Full rows erased in this pass
    pub rows_removed: i32,
    /// Pieces that started falling because of this pass
    pub new_settling: usize,
}

impl Board {
    /// Erase every full row, compact the rows above and mark unsupported pieces as settling.
    ///
    /// Rows are scanned bottom to top. A full row has its cells removed from
    /// their owners; an owner left with no touching cells is split once.
    /// Every non-full row above `k` erased rows moves down by `k`. Floating
    /// pieces are queued even when no row was full (e.g. an imported pile
    /// group hanging in mid-air).
    pub fn remove_filled_rows(&mut self) -> RowClear {
        let width = self.width();
        let mut removed = 0;

        for row in (0..self.height()).rev() {
            let row_cells: Vec<(Cell, PieceId)> = (0..width)
                .filter_map(|x| {
                    let cell = Cell::new(x, row);
                    self.settled.get(&cell).map(|&id| (cell, id))
                })
                .collect();

            if row_cells.len() == width as usize {
                let mut owners: Vec<PieceId> = Vec::new();
                for &(cell, id) in &row_cells {
                    self.settled.remove(&cell);
                    if !owners.contains(&id) {
                        owners.push(id);
                    }
                }
                for id in owners {
                    self.cut_row_from(id, row);
                }
                removed += 1;
            } else if removed > 0 {
                for (cell, _) in &row_cells {
                    self.settled.remove(cell);
                }
                for (cell, id) in row_cells {
                    let target = cell.offset(0, removed);
                    if let Some(piece) = self.pieces.get_mut(&id) {
                        piece.move_cell(cell, target);
                    }
                    self.settled.insert(target, id);
                }
            }
        }

        let new_settling = self.mark_floating();
        RowClear {
            rows_removed: removed,
            new_settling,
        }
    }

    /// Move every settling piece down one row, then keep only those that can still fall.
    ///
    /// Other settling pieces count as obstacles for the landing check, so a
    /// fragment resting on another falling fragment lands here and is picked
    /// up again by the next floating scan.
    pub fn advance_fallout(&mut self) {
        let settling = std::mem::take(&mut self.settling);

        for id in &settling {
            if let Some(piece) = self.pieces.get(id) {
                for cell in piece.cells() {
                    self.settled.remove(cell);
                }
            }
        }
        for id in &settling {
            if let Some(piece) = self.pieces.get_mut(id) {
                piece.move_down();
                for &cell in piece.cells() {
                    let previous = self.settled.insert(cell, *id);
                    debug_assert!(previous.is_none(), "fallout collided at {:?}", cell);
                }
            }
        }

        self.settling = settling
            .into_iter()
            .filter(|&id| {
                self.pieces
                    .get(&id)
                    .is_some_and(|piece| piece.can_move_down(|c| self.can_occupy(id, c)))
            })
            .collect();
    }

    /// Settled pieces held up by the floor, directly or through a chain of other pieces.
    ///
    /// A piece is grounded when one of its cells is on the bottom row, or sits
    /// directly above a cell of a different grounded piece. Computed as a
    /// fixed point from the floor upward, so mutually resting pieces with no
    /// path to the floor are not grounded.
    pub fn grounded_pieces(&self) -> HashSet<PieceId> {
        let bottom = self.height() - 1;
        let mut grounded: HashSet<PieceId> = HashSet::new();
        let mut stack: Vec<PieceId> = Vec::new();

        for x in 0..self.width() {
            if let Some(&id) = self.settled.get(&Cell::new(x, bottom)) {
                if grounded.insert(id) {
                    stack.push(id);
                }
            }
        }

        while let Some(id) = stack.pop() {
            let Some(piece) = self.pieces.get(&id) else {
                continue;
            };
            for cell in piece.cells() {
                let above = cell.offset(0, -1);
                if let Some(&other) = self.settled.get(&above) {
                    if other != id && grounded.insert(other) {
                        stack.push(other);
                    }
                }
            }
        }

        grounded
    }

    /// Whether a settled piece has no chain of support down to the floor
    pub fn is_floating(&self, id: PieceId) -> bool {
        match self.pieces.get(&id) {
            Some(piece) if !piece.is_empty() => !self.grounded_pieces().contains(&id),
            _ => false,
        }
    }

    /// Remove `row` from one piece, splitting it if nothing it keeps touches
    fn cut_row_from(&mut self, id: PieceId, row: i32) {
        let Some(piece) = self.pieces.get_mut(&id) else {
            return;
        };
        piece.remove_blocks_in_row(row);

        if piece.is_empty() {
            self.pieces.remove(&id);
            return;
        }
        if !piece.is_broken() {
            return;
        }

        let split = piece.break_figure();
        let split_id = self.alloc_id();
        for &cell in split.cells() {
            self.settled.insert(cell, split_id);
        }
        self.pieces.insert(split_id, split);
    }

    /// Bottom-up scan that queues every floating piece once; returns how many were queued
    fn mark_floating(&mut self) -> usize {
        let grounded = self.grounded_pieces();
        let mut checked: HashSet<Cell> = HashSet::new();
        let mut queued = 0;

        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let cell = Cell::new(x, y);
                if checked.contains(&cell) {
                    continue;
                }
                let Some(&id) = self.settled.get(&cell) else {
                    continue;
                };
                let Some(piece) = self.pieces.get(&id) else {
                    continue;
                };
                checked.extend(piece.cells().iter().copied());

                if !grounded.contains(&id) && !self.settling.contains(&id) {
                    self.settling.push(id);
                    queued += 1;
                }
            }
        }

        queued
    }
}
