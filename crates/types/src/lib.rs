//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns by default, overridable at startup (never below 4)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - **Spawn anchor**: (`width / 2 - 1`, 1)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STEP_INTERVAL_MS` | 1000 | Delay between two board steps |
//! | `FRAME_MS` | 16 | Input poll / redraw cadence of the terminal driver |
//! | `DEFAULT_DAS_MS` | 150 | Delay before a held slide key repeats |
//! | `DEFAULT_ARR_MS` | 50 | Interval between slide repeats |
//! | `SOFT_DROP_ARR_MS` | 50 | Interval between downward slide repeats |
//!
//! # Examples
//!
//! ```
//! use cascade_tetris_types::{Command, Direction, Shape, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! assert!(Shape::Tee.has_pivot());
//! assert!(!Shape::Square.has_pivot());
//!
//! assert_eq!(Direction::Left.offset(3), (-3, 0));
//!
//! let cmd = Command::Slide { direction: Direction::Left, steps: 3 };
//! assert!(cmd.is_movement());
//! assert!(!Command::Pause.is_movement());
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, 22);
//! ```

/// Default board width in cells
pub const DEFAULT_WIDTH: i32 = 10;

/// Board height in cells (fixed)
pub const DEFAULT_HEIGHT: i32 = 22;

/// Narrowest board the spawn templates fit into
pub const MIN_WIDTH: i32 = 4;

/// Shortest board a vertical beam fits into
pub const MIN_HEIGHT: i32 = 4;

/// Delay between two board steps (one row of gravity)
pub const STEP_INTERVAL_MS: u32 = 1000;

/// Terminal driver frame interval (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Downward slide DAS in milliseconds.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Downward slide ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(STEP_INTERVAL_MS, 1000);
        assert_eq!(DEFAULT_DAS_MS, 150);
        assert_eq!(DEFAULT_ARR_MS, 50);
        assert_eq!(SOFT_DROP_DAS_MS, 0);
        assert_eq!(SOFT_DROP_ARR_MS, 50);
    }

    #[test]
    fn only_square_lacks_pivot() {
        let without: Vec<Shape> = Shape::ALL.into_iter().filter(|s| !s.has_pivot()).collect();
        assert_eq!(without, vec![Shape::Square]);
    }
}

/// The seven named piece shapes
///
/// Shape tags drive spawn geometry and coloring:
/// - **S**: green, vertical S
/// - **ReverseS**: red, mirror of S
/// - **Beam**: cyan, four in a column
/// - **Square**: yellow, 2x2 (never rotates)
/// - **Tee**: purple, T-shaped
/// - **L**: orange
/// - **J**: blue (mirror of L)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    S,
    ReverseS,
    Beam,
    Square,
    Tee,
    L,
    J,
}

impl Shape {
    /// All shapes in spawn-index order
    pub const ALL: [Shape; 7] = [
        Shape::S,
        Shape::ReverseS,
        Shape::Beam,
        Shape::Square,
        Shape::Tee,
        Shape::L,
        Shape::J,
    ];

    /// Whether a spawned piece of this shape carries a rotation pivot
    pub fn has_pivot(&self) -> bool {
        !matches!(self, Shape::Square)
    }
}

/// Slide directions understood by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Cell offset for moving `steps` cells in this direction (y grows downwards)
    pub fn offset(&self, steps: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-steps, 0),
            Direction::Right => (steps, 0),
            Direction::Down => (0, steps),
        }
    }
}

/// Commands issued by the input layer against the board
///
/// Each command reports back only whether anything changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Slide the active piece `steps` unit cells
    Slide { direction: Direction, steps: u32 },
    /// Rotate the active piece 90° clockwise around its pivot
    Rotate,
    /// Drop the active piece as far as it goes and settle it
    HardDrop,
    /// Cancel the pending tick
    Pause,
    /// Reschedule ticking from the current state
    Resume,
    /// Start a new game on the same board
    Reset,
}

impl Command {
    /// Whether the command moves the active piece (ignored while paused)
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Command::Slide { .. } | Command::Rotate | Command::HardDrop
        )
    }
}
