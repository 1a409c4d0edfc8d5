//! Terminal renderer for the board.
//!
//! Renders a [`core::BoardSnapshot`] into a plain framebuffer of styled
//! character cells, then flushes only the changed runs to the terminal.
//! Board cells are two columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use cascade_tetris_core as core;
pub use cascade_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Run, Style};
pub use game_view::{shape_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
