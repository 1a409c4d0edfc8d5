//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a cascade-style falling-block game without a
//! terminal: the board, pieces, row clearing with piece splitting, fragment
//! fallout, the step timer and pile import. No UI and no I/O apart from
//! reading an optional pile file.
//!
//! # Module Structure
//!
//! - [`board`]: Grid state, piece arena, commands and the tick state machine
//! - [`cell`]: Grid coordinates and adjacency
//! - [`config`]: Board configuration from the environment
//! - [`fallout`]: Row clearing, splitting and settling fragments
//! - [`piece`]: Shapes, spawn templates, movement and rotation
//! - [`pile`]: Text pile layouts imported at start and on reset
//! - [`rng`]: Seeded shape generator
//! - [`snapshot`]: Read-only frames for views
//! - [`timer`]: One-shot step countdown
//!
//! # Game Rules
//!
//! - Pieces spawn around the top middle and fall one row per step.
//! - Rotation is a clockwise quarter turn around the pivot, with no wall kicks.
//! - A full row is erased; rows above it move down, and any piece the clear
//!   left without support falls as a unit until it lands.
//! - A piece whose remaining cells no longer touch each other is split.
//!
//! # Example
//!
//! ```
//! use cascade_tetris_core::{Board, GameConfig};
//! use cascade_tetris_types::{Command, Direction};
//!
//! let mut board = Board::new(&GameConfig::default(), 12345);
//! board.apply(Command::Slide { direction: Direction::Left, steps: 1 });
//! board.apply(Command::HardDrop);
//! assert_eq!(board.settled_len(), 4);
//!
//! // Feed elapsed time; a step runs once the interval has passed.
//! assert!(board.advance(1000));
//! ```

pub mod board;
pub mod cell;
pub mod config;
pub mod fallout;
pub mod piece;
pub mod pile;
pub mod rng;
pub mod snapshot;
pub mod timer;

pub use cascade_tetris_types as types;

pub use board::{ActivePiece, Board, StateChanged};
pub use cell::Cell;
pub use config::GameConfig;
pub use fallout::RowClear;
pub use piece::{spawn_cells, spawn_template, Piece, PieceId};
pub use pile::{PileError, PileLayout};
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
pub use timer::TickTimer;
