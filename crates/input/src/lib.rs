//! Terminal input module (board-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and provides a
//! DAS/ARR input handler for terminals, including terminals without
//! key-release events. Held keys are coalesced into multi-step slides.

pub mod handler;
pub mod map;

pub use cascade_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
