//! Board module - grid state and the tick state machine
//!
//! The board owns every piece. Settled pieces live in an arena keyed by
//! [`PieceId`], and the `settled` map points each occupied cell at its owner,
//! so row compaction and fallout re-key the map instead of chasing pointers.
//! The active piece is held outside the map until it settles.
//!
//! Coordinates: (x, y) with x in `0..width` (left to right) and y in
//! `0..height` (top to bottom). New pieces spawn around (`width / 2 - 1`, 1).
//!
//! One driver owns the board and calls [`Board::advance`] (or [`Board::tick`]
//! directly) and [`Board::apply`]; nothing here is shared across threads.

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use crate::cell::Cell;
use crate::config::GameConfig;
use crate::piece::{Piece, PieceId};
use crate::pile::PileLayout;
use crate::rng::SimpleRng;
use crate::timer::TickTimer;
use crate::types::{Command, Direction, Shape, MIN_HEIGHT, MIN_WIDTH};

/// Parameterless "state changed" notification
///
/// Receivers re-read the whole board (usually via [`Board::snapshot`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChanged;

/// The piece currently under player and gravity control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub id: PieceId,
    pub piece: Piece,
}

/// The game board
#[derive(Debug)]
pub struct Board {
    width: i32,
    height: i32,
    /// Settled and settling pieces
    pub(crate) pieces: HashMap<PieceId, Piece>,
    /// Occupied cell -> owning piece
    pub(crate) settled: HashMap<Cell, PieceId>,
    active: Option<ActivePiece>,
    /// Fragments detached by a row clear, still falling one row per tick
    pub(crate) settling: Vec<PieceId>,
    game_over: bool,
    next_id: u32,
    rng: SimpleRng,
    timer: TickTimer,
    pile: Option<PileLayout>,
    revision: u64,
    observer: Option<Sender<StateChanged>>,
}

impl Board {
    /// Create a running board with a freshly spawned piece
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        Self::with_pile(config, seed, None)
    }

    /// Create a running board on top of an imported pile
    pub fn with_pile(config: &GameConfig, seed: u32, pile: Option<PileLayout>) -> Self {
        let mut board = Self::empty(config, seed);
        board.pile = pile;
        board.install_pile();
        if board.spawn_piece() {
            board.timer.arm();
        }
        board
    }

    /// Create an empty, paused board with no active piece
    ///
    /// Useful for scripted setups: place pieces, then spawn or tick by hand.
    pub fn empty(config: &GameConfig, seed: u32) -> Self {
        Self {
            width: config.width.max(MIN_WIDTH),
            height: config.height.max(MIN_HEIGHT),
            pieces: HashMap::new(),
            settled: HashMap::new(),
            active: None,
            settling: Vec::new(),
            game_over: false,
            next_id: 0,
            rng: SimpleRng::new(seed),
            timer: TickTimer::new(config.step_interval_ms),
            pile: None,
            revision: 0,
            observer: None,
        }
    }

    /// Publish a [`StateChanged`] message on `sender` for every notification
    pub fn with_observer(mut self, sender: Sender<StateChanged>) -> Self {
        self.observer = Some(sender);
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether a step is scheduled (false while paused and after game over)
    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    /// Number of notifications published so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn active_cells(&self) -> &[Cell] {
        match &self.active {
            Some(active) => active.piece.cells(),
            None => &[],
        }
    }

    pub fn active_shape(&self) -> Option<Shape> {
        self.active.as_ref().map(|a| a.piece.shape())
    }

    pub fn active_pivot(&self) -> Option<Cell> {
        self.active.as_ref().and_then(|a| a.piece.pivot_cell())
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Owner of a settled cell
    pub fn piece_at(&self, cell: Cell) -> Option<PieceId> {
        self.settled.get(&cell).copied()
    }

    pub fn settled_shape_at(&self, cell: Cell) -> Option<Shape> {
        self.piece_at(cell)
            .and_then(|id| self.pieces.get(&id))
            .map(Piece::shape)
    }

    /// Number of settled cells
    pub fn settled_len(&self) -> usize {
        self.settled.len()
    }

    /// Number of settled pieces (including falling fragments)
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Fragments currently falling after a row clear
    pub fn settling(&self) -> &[PieceId] {
        &self.settling
    }

    /// All settled cells with their owners' shapes
    pub fn settled_cells(&self) -> impl Iterator<Item = (Cell, Shape)> + '_ {
        self.settled
            .iter()
            .filter_map(|(&cell, id)| self.pieces.get(id).map(|p| (cell, p.shape())))
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Whether `owner` may stand on `cell`: inside the grid and not settled by another piece
    pub fn can_occupy(&self, owner: PieceId, cell: Cell) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        match self.settled.get(&cell) {
            Some(&id) => id == owner,
            None => true,
        }
    }

    /// Install a settled piece directly (pile import and scripted setups)
    ///
    /// Returns `None` without changing anything if a cell is out of bounds,
    /// already settled, or covered by the active piece.
    pub fn place_piece(&mut self, shape: Shape, cells: Vec<Cell>) -> Option<PieceId> {
        let blocked = |c: &Cell| {
            !self.in_bounds(*c)
                || self.settled.contains_key(c)
                || self.active_cells().contains(c)
        };
        if cells.is_empty() || cells.iter().any(blocked) {
            return None;
        }
        let id = self.alloc_id();
        for &cell in &cells {
            self.settled.insert(cell, id);
        }
        self.pieces.insert(id, Piece::new(shape, cells));
        Some(id)
    }

    /// Settle the active piece, then spawn a new one at the top
    pub fn spawn(&mut self) -> bool {
        let spawned = self.spawn_piece();
        self.notify();
        spawned
    }

    /// Like [`Board::spawn`] with a chosen shape instead of a random one
    pub fn spawn_shape(&mut self, shape: Shape) -> bool {
        let spawned = self.spawn_with(shape);
        self.notify();
        spawned
    }

    /// Slide the active piece `steps` unit cells, one legal unit at a time.
    ///
    /// A blocked unit step does not stop the loop: every remaining unit is
    /// still tried. Returns whether at least one unit step happened.
    pub fn try_to_slide(&mut self, direction: Direction, steps: u32) -> bool {
        let mut moved = false;
        for _ in 0..steps {
            let Some(active) = self.active.as_ref() else {
                break;
            };
            let id = active.id;
            if active
                .piece
                .can_slide(direction, 1, |c| self.can_occupy(id, c))
            {
                if let Some(active) = self.active.as_mut() {
                    active.piece.slide(direction, 1);
                }
                moved = true;
            }
        }

        if moved {
            self.notify();
        }
        self.debug_check();
        moved
    }

    /// Hard drop: move down while legal, settle, and restart the step countdown
    pub fn try_to_drop(&mut self) -> bool {
        let mut moved = false;
        while self.active_can_move_down() {
            if let Some(active) = self.active.as_mut() {
                active.piece.move_down();
            }
            moved = true;
        }

        if moved {
            self.settle_active();
            self.timer.arm();
            self.notify();
        }
        self.debug_check();
        moved
    }

    /// Rotate the active piece clockwise around its pivot, if it has one and the turn is legal
    pub fn rotate_figure(&mut self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let Some(pivot) = active.piece.pivot_cell() else {
            return false;
        };
        let id = active.id;
        if !active.piece.can_rotate(pivot, |c| self.can_occupy(id, c)) {
            return false;
        }

        if let Some(active) = self.active.as_mut() {
            active.piece.rotate(pivot);
        }
        self.notify();
        self.debug_check();
        true
    }

    /// One step of the state machine.
    ///
    /// 1. Game over: nothing happens and no further step is scheduled.
    /// 2. Fragments falling: advance them one row.
    /// 3. No active piece: clear rows; spawn unless the clear set fragments falling.
    /// 4. Otherwise move the active piece down, or settle it and clear rows.
    ///
    /// Returns false only in the terminal game-over state.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            self.timer.cancel();
            return false;
        }

        if !self.settling.is_empty() {
            self.advance_fallout();
        } else if self.active.is_none() {
            let cleared = self.remove_filled_rows();
            if cleared.new_settling == 0 {
                self.spawn_piece();
            }
        } else if self.active_can_move_down() {
            if let Some(active) = self.active.as_mut() {
                active.piece.move_down();
            }
        } else {
            self.settle_active();
            self.remove_filled_rows();
        }

        if !self.game_over {
            self.timer.arm();
        }
        self.notify();
        self.debug_check();
        true
    }

    /// Feed elapsed time to the step timer; runs [`Board::tick`] when it is due
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.timer.advance(elapsed_ms) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Cancel the pending step without touching the board
    pub fn pause(&mut self) -> bool {
        if !self.timer.is_armed() {
            return false;
        }
        self.timer.cancel();
        self.notify();
        true
    }

    /// Schedule the next step from the current state (not after game over)
    pub fn resume(&mut self) -> bool {
        if self.game_over || self.timer.is_armed() {
            return false;
        }
        self.timer.arm();
        self.notify();
        true
    }

    /// Start over in place: clear everything, re-import the pile, spawn, resume
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.active = None;
        self.pieces.clear();
        self.settled.clear();
        self.settling.clear();
        self.game_over = false;
        self.install_pile();
        if self.spawn_piece() {
            self.timer.arm();
        }
        self.notify();
        self.debug_check();
    }

    /// Dispatch one input command; returns whether anything changed.
    ///
    /// Piece movement is ignored while paused.
    pub fn apply(&mut self, command: Command) -> bool {
        if command.is_movement() && !self.is_running() {
            return false;
        }
        match command {
            Command::Slide { direction, steps } => self.try_to_slide(direction, steps),
            Command::Rotate => self.rotate_figure(),
            Command::HardDrop => self.try_to_drop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Verify the settled map and the arena agree with each other
    pub fn check_invariants(&self) -> Result<(), String> {
        for (cell, id) in &self.settled {
            let Some(piece) = self.pieces.get(id) else {
                return Err(format!("{:?} is owned by missing piece {:?}", cell, id));
            };
            if !piece.contains(*cell) {
                return Err(format!("{:?} maps to {:?} which does not hold it", cell, id));
            }
        }
        for (id, piece) in &self.pieces {
            for cell in piece.cells() {
                if self.settled.get(cell) != Some(id) {
                    return Err(format!("{:?} cell {:?} is not keyed to it", id, cell));
                }
            }
        }
        for (i, id) in self.settling.iter().enumerate() {
            if !self.pieces.contains_key(id) {
                return Err(format!("settling piece {:?} is not in the arena", id));
            }
            if self.settling[..i].contains(id) {
                return Err(format!("settling piece {:?} is listed twice", id));
            }
        }
        if let Some(active) = &self.active {
            if let Some(cell) = active.piece.cells().iter().find(|c| self.settled.contains_key(*c)) {
                return Err(format!("active piece overlaps settled cell {:?}", cell));
            }
        }
        Ok(())
    }

    pub(crate) fn alloc_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub(crate) fn notify(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        if let Some(tx) = &self.observer {
            // A dropped receiver just means nobody is listening any more.
            let _ = tx.send(StateChanged);
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    fn active_can_move_down(&self) -> bool {
        match &self.active {
            Some(active) => active
                .piece
                .can_move_down(|c| self.can_occupy(active.id, c)),
            None => false,
        }
    }

    /// Fold the active piece into the settled map
    fn settle_active(&mut self) {
        let Some(ActivePiece { id, mut piece }) = self.active.take() else {
            return;
        };
        piece.clear_pivot();
        for &cell in piece.cells() {
            let previous = self.settled.insert(cell, id);
            debug_assert!(previous.is_none(), "active piece settled onto {:?}", cell);
        }
        self.pieces.insert(id, piece);
    }

    /// Settle any active piece and spawn a random shape; sets game over on overlap
    fn spawn_piece(&mut self) -> bool {
        let shape = self.rng.next_shape();
        self.spawn_with(shape)
    }

    fn spawn_with(&mut self, shape: Shape) -> bool {
        self.settle_active();

        let anchor = Cell::new(self.width / 2 - 1, 1);
        let piece = Piece::spawn(shape, anchor);

        if piece.cells().iter().any(|c| self.settled.contains_key(c)) {
            self.game_over = true;
            self.timer.cancel();
            return false;
        }

        let id = self.alloc_id();
        self.active = Some(ActivePiece { id, piece });
        true
    }

    fn install_pile(&mut self) {
        let Some(pile) = self.pile.take() else {
            return;
        };
        for (_, cells) in pile.groups() {
            let shape = self.rng.next_shape();
            let placed = self.place_piece(shape, cells.to_vec());
            debug_assert!(placed.is_some(), "pile group does not fit the board");
        }
        self.pile = Some(pile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(width: i32, height: i32) -> GameConfig {
        GameConfig::new(width, height)
    }

    #[test]
    fn test_new_board_is_running_with_active_piece() {
        let board = Board::new(&GameConfig::default(), 12345);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 22);
        assert!(board.is_running());
        assert!(board.active().is_some());
        assert!(!board.game_over());
        assert_eq!(board.settled_len(), 0);
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn test_empty_board_is_idle() {
        let board = Board::empty(&small(4, 4), 1);
        assert!(!board.is_running());
        assert!(board.active().is_none());
        assert_eq!(board.check_invariants(), Ok(()));
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let board = Board::empty(&small(1, 2), 1);
        assert_eq!(board.width(), MIN_WIDTH);
        assert_eq!(board.height(), MIN_HEIGHT);
    }

    #[test]
    fn test_can_occupy_rules() {
        let mut board = Board::empty(&small(4, 4), 1);
        let a = board.place_piece(Shape::Tee, vec![Cell::new(1, 3)]).unwrap();
        let other = PieceId(999);

        assert!(!board.can_occupy(other, Cell::new(-1, 0)));
        assert!(!board.can_occupy(other, Cell::new(4, 0)));
        assert!(!board.can_occupy(other, Cell::new(0, 4)));
        assert!(!board.can_occupy(other, Cell::new(1, 3)));
        assert!(board.can_occupy(a, Cell::new(1, 3)));
        assert!(board.can_occupy(other, Cell::new(2, 3)));
    }

    #[test]
    fn test_place_piece_rejects_overlap() {
        let mut board = Board::empty(&small(4, 4), 1);
        assert!(board.place_piece(Shape::L, vec![Cell::new(0, 3)]).is_some());
        assert!(board.place_piece(Shape::L, vec![Cell::new(0, 3)]).is_none());
        assert!(board.place_piece(Shape::L, vec![Cell::new(9, 3)]).is_none());
        assert!(board.place_piece(Shape::L, Vec::new()).is_none());
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_spawn_anchor_and_pivot() {
        let mut board = Board::empty(&small(10, 22), 3);
        assert!(board.spawn());
        let shape = board.active_shape().unwrap();
        let cx = 10 / 2 - 1;
        if shape.has_pivot() {
            assert_eq!(board.active_pivot(), Some(Cell::new(cx, 1)));
        } else {
            assert_eq!(board.active_pivot(), None);
        }
        assert_eq!(board.active_cells().len(), 4);
    }

    #[test]
    fn test_beam_spawns_vertical_with_pivot() {
        let mut board = Board::empty(&small(10, 22), 1);
        assert!(board.spawn_shape(Shape::Beam));
        let cx = 4;
        let expected: Vec<Cell> = [1, 0, 2, 3].iter().map(|&y| Cell::new(cx, y)).collect();
        let mut cells = board.active_cells().to_vec();
        cells.sort();
        let mut expected_sorted = expected.clone();
        expected_sorted.sort();
        assert_eq!(cells, expected_sorted);
        assert_eq!(board.active_pivot(), Some(Cell::new(cx, 1)));
    }

    #[test]
    fn test_slide_against_wall_changes_nothing() {
        let mut board = Board::empty(&small(4, 22), 1);
        board.spawn_shape(Shape::Beam);
        // Beam stands in column 1; one step left reaches the wall.
        assert!(board.try_to_slide(Direction::Left, 1));
        let cells = board.active_cells().to_vec();
        let revision = board.revision();

        assert!(!board.try_to_slide(Direction::Left, 3));
        assert_eq!(board.active_cells(), cells.as_slice());
        assert_eq!(board.revision(), revision);
    }

    #[test]
    fn test_slide_reports_partial_movement() {
        let mut board = Board::empty(&small(10, 22), 1);
        board.spawn_shape(Shape::Beam);
        assert!(board.try_to_slide(Direction::Right, 10));
        assert!(board.active_cells().iter().all(|c| c.x == 9));
    }

    #[test]
    fn test_rotate_beam_lies_flat() {
        let mut board = Board::empty(&small(10, 22), 1);
        board.spawn_shape(Shape::Beam);
        assert!(board.rotate_figure());
        assert!(board.active_cells().iter().all(|c| c.y == 1));
        assert_eq!(board.active_pivot(), Some(Cell::new(4, 1)));
    }

    #[test]
    fn test_square_never_rotates() {
        let mut board = Board::empty(&small(10, 22), 1);
        board.spawn_shape(Shape::Square);
        let revision = board.revision();
        assert!(!board.rotate_figure());
        assert_eq!(board.revision(), revision);
    }

    #[test]
    fn test_hard_drop_settles_on_floor() {
        let mut board = Board::new(&GameConfig::default(), 77);
        board.advance(400);
        assert!(board.try_to_drop());
        assert!(board.active().is_none());
        assert_eq!(board.settled_len(), 4);
        assert!((0..10).any(|x| board.piece_at(Cell::new(x, 21)).is_some()));
        // The countdown restarts in full.
        assert_eq!(board.timer().remaining_ms(), Some(1000));
        assert!(!board.try_to_drop());
    }

    #[test]
    fn test_tick_moves_active_down() {
        let mut board = Board::empty(&small(10, 22), 1);
        board.spawn_shape(Shape::Tee);
        let before: Vec<Cell> = board.active_cells().to_vec();
        board.tick();
        let after: Vec<Cell> = board.active_cells().to_vec();
        let moved: Vec<Cell> = before.iter().map(|c| c.below()).collect();
        assert_eq!(after, moved);
        assert!(board.is_running());
    }

    #[test]
    fn test_tick_settles_then_spawns() {
        let mut board = Board::empty(&small(10, 22), 1);
        board.spawn_shape(Shape::Square);
        board.try_to_drop();
        assert!(board.active().is_none());

        board.tick();
        assert!(board.active().is_some());
        assert_eq!(board.settled_len(), 4);
    }

    #[test]
    fn test_tick_clears_row_after_landing() {
        let mut board = Board::empty(&small(4, 22), 1);
        board.place_piece(Shape::L, vec![Cell::new(0, 21), Cell::new(1, 21)]).unwrap();
        board.spawn_shape(Shape::Square);
        // Square occupies columns 1 and 2; move it to columns 2 and 3.
        assert!(board.try_to_slide(Direction::Right, 1));
        while board.try_to_slide(Direction::Down, 1) {}

        board.tick();
        assert!(board.active().is_none());
        assert_eq!(board.settled_len(), 2);
        assert!(board.piece_at(Cell::new(2, 21)).is_some());
        assert!(board.piece_at(Cell::new(3, 21)).is_some());
    }

    #[test]
    fn test_reset_restores_pile_and_spawns() {
        let pile = PileLayout::parse("aa\n", 10, 22).unwrap();
        let mut board = Board::with_pile(&GameConfig::default(), 3, Some(pile));
        assert_eq!(board.settled_len(), 2);
        board.try_to_drop();
        board.pause();

        assert!(board.apply(Command::Reset));
        assert_eq!(board.settled_len(), 2);
        assert!(board.piece_at(Cell::new(0, 21)).is_some());
        assert!(board.active().is_some());
        assert!(board.is_running());
        assert!(!board.game_over());
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut board = Board::new(&small(6, 12), 2024);
        for i in 0..2_000u32 {
            if i % 3 == 0 {
                board.apply(Command::Slide {
                    direction: if i % 2 == 0 { Direction::Left } else { Direction::Right },
                    steps: 1 + i % 4,
                });
            }
            if i % 7 == 0 {
                board.apply(Command::Rotate);
            }
            if i % 11 == 0 {
                board.apply(Command::HardDrop);
            }
            board.tick();
            assert_eq!(board.check_invariants(), Ok(()));
            if board.game_over() {
                board.reset();
            }
        }
    }

    #[test]
    fn test_spawn_settles_previous_piece() {
        let mut board = Board::empty(&small(10, 22), 3);
        board.spawn();
        // Drop the first piece out of the spawn area by hand.
        while board.try_to_slide(Direction::Down, 1) {}
        let first_cells = board.active_cells().to_vec();
        board.spawn();
        assert_eq!(board.settled_len(), 4);
        for cell in first_cells {
            assert!(board.piece_at(cell).is_some());
        }
    }

    #[test]
    fn test_spawn_onto_pile_is_game_over() {
        let mut board = Board::empty(&small(4, 6), 1);
        let cells: Vec<Cell> = (0..4)
            .flat_map(|x| (0..4).map(move |y| Cell::new(x, y)))
            .collect();
        board.place_piece(Shape::Square, cells).unwrap();

        assert!(!board.spawn());
        assert!(board.game_over());
        assert!(board.active().is_none());
    }

    #[test]
    fn test_tick_is_noop_after_game_over() {
        let mut board = Board::empty(&small(4, 6), 1);
        let cells: Vec<Cell> = (0..4).map(|x| Cell::new(x, 1)).collect();
        board.place_piece(Shape::Beam, cells).unwrap();
        board.spawn();
        assert!(board.game_over());

        let revision = board.revision();
        let settled = board.settled_len();
        assert!(!board.tick());
        assert_eq!(board.revision(), revision);
        assert_eq!(board.settled_len(), settled);
        assert!(!board.is_running());
    }

    #[test]
    fn test_pause_and_resume_toggle_schedule() {
        let mut board = Board::new(&GameConfig::default(), 1);
        let cells = board.active_cells().to_vec();

        assert!(board.pause());
        assert!(!board.is_running());
        assert!(!board.pause());
        assert!(!board.advance(10_000));
        assert_eq!(board.active_cells(), cells.as_slice());

        assert!(board.resume());
        assert!(board.is_running());
        assert!(!board.resume());
    }

    #[test]
    fn test_movement_commands_ignored_while_paused() {
        let mut board = Board::new(&GameConfig::default(), 1);
        board.pause();
        assert!(!board.apply(Command::Slide {
            direction: Direction::Down,
            steps: 1
        }));
        assert!(!board.apply(Command::HardDrop));
        assert!(board.apply(Command::Resume));
        assert!(board.apply(Command::Slide {
            direction: Direction::Down,
            steps: 1
        }));
    }

    #[test]
    fn test_observer_receives_one_message_per_notification() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut board = Board::new(&GameConfig::default(), 9).with_observer(tx);

        board.tick();
        board.pause();
        board.resume();

        assert_eq!(rx.try_iter().count(), 3);
        assert_eq!(board.revision(), 3);
    }

    #[test]
    fn test_dropped_observer_is_harmless() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut board = Board::new(&GameConfig::default(), 9).with_observer(tx);
        drop(rx);
        assert!(board.tick());
        assert_eq!(board.revision(), 1);
    }
}
