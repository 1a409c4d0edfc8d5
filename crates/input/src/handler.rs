//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! Repeats produced in one update are coalesced into a single multi-step slide
//! per axis, so the board sees `Slide { steps: n }` instead of n separate slides.

use crossterm::event::{KeyCode, KeyEvent};

use arrayvec::ArrayVec;

use crate::map::handle_key_event;

use crate::types::{
    Command, Direction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: std::time::Instant,
    horizontal_das_timer: u32,
    down_das_timer: u32,
    horizontal_arr_accumulator: u32,
    down_arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// Without key-release events, a tap would otherwise stay "held" forever.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

fn slide(direction: Direction, steps: u32) -> Command {
    Command::Slide { direction, steps }
}

// Slide keys come from the key map so held and tapped keys agree.
fn key_direction(code: KeyCode) -> Option<Direction> {
    match handle_key_event(KeyEvent::from(code)) {
        Some(Command::Slide { direction, .. }) => Some(direction),
        _ => None,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            horizontal_das_timer: 0,
            down_das_timer: 0,
            horizontal_arr_accumulator: 0,
            down_arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Register a press; returns the immediate one-step slide for a fresh press.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let direction = key_direction(code)?;
        self.last_key_time = std::time::Instant::now();

        match direction {
            Direction::Left | Direction::Right => {
                let wanted = if direction == Direction::Left {
                    HorizontalDirection::Left
                } else {
                    HorizontalDirection::Right
                };
                if self.horizontal == wanted {
                    None
                } else {
                    self.horizontal = wanted;
                    self.horizontal_das_timer = 0;
                    self.horizontal_arr_accumulator = 0;
                    Some(slide(direction, 1))
                }
            }
            Direction::Down => {
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_das_timer = 0;
                    self.down_arr_accumulator = 0;
                    Some(slide(Direction::Down, 1))
                }
            }
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match key_direction(code) {
            Some(Direction::Left) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(Direction::Right) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(Direction::Down) => self.release_down(),
            _ => {}
        }
    }

    /// Advance held-key timers; at most one slide per axis.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 2> {
        let mut commands = ArrayVec::<Command, 2>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        let direction = match self.horizontal {
            HorizontalDirection::Left => Some(Direction::Left),
            HorizontalDirection::Right => Some(Direction::Right),
            HorizontalDirection::None => None,
        };
        if let Some(direction) = direction {
            let prev_das = self.horizontal_das_timer;
            self.horizontal_das_timer = self.horizontal_das_timer.saturating_add(elapsed_ms);

            if self.horizontal_das_timer >= self.das_delay {
                let excess = if prev_das < self.das_delay {
                    self.horizontal_das_timer - self.das_delay
                } else {
                    elapsed_ms
                };
                self.horizontal_arr_accumulator += excess;

                let steps = self.horizontal_arr_accumulator / self.arr_rate;
                self.horizontal_arr_accumulator %= self.arr_rate;
                if steps > 0 {
                    commands.push(slide(direction, steps));
                }
            }
        } else {
            self.horizontal_das_timer = 0;
            self.horizontal_arr_accumulator = 0;
        }

        if self.down_held {
            let prev_das = self.down_das_timer;
            self.down_das_timer = self.down_das_timer.saturating_add(elapsed_ms);

            if self.down_das_timer >= SOFT_DROP_DAS_MS {
                let excess = if prev_das < SOFT_DROP_DAS_MS {
                    self.down_das_timer - SOFT_DROP_DAS_MS
                } else {
                    elapsed_ms
                };
                self.down_arr_accumulator += excess;

                let steps = self.down_arr_accumulator / SOFT_DROP_ARR_MS;
                self.down_arr_accumulator %= SOFT_DROP_ARR_MS;
                if steps > 0 {
                    commands.push(slide(Direction::Down, steps));
                }
            }
        } else {
            self.down_das_timer = 0;
            self.down_arr_accumulator = 0;
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = std::time::Instant::now();
        self.horizontal_das_timer = 0;
        self.down_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
        self.down_arr_accumulator = 0;
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_das_timer = 0;
        self.down_arr_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Left),
            Some(slide(Direction::Left, 1))
        );

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still nothing accumulated past the delay.
        assert!(ih.update(1).is_empty());

        let commands = ih.update(25);
        assert_eq!(commands.as_slice(), &[slide(Direction::Left, 1)]);
    }

    #[test]
    fn test_vim_keys_slide_like_arrows() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Char('h')),
            Some(slide(Direction::Left, 1))
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('L')),
            Some(slide(Direction::Right, 1))
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('j')),
            Some(slide(Direction::Down, 1))
        );
        // k rotates; it is not a held slide key.
        assert_eq!(ih.handle_key_press(KeyCode::Char('k')), None);

        ih.handle_key_release(KeyCode::Char('l'));
        let commands = ih.update(500);
        assert!(!commands.is_empty());
        assert!(commands
            .iter()
            .all(|c| matches!(c, Command::Slide { direction: Direction::Down, .. })));
    }

    #[test]
    fn test_repeat_burst_is_coalesced() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Right);

        // 100ms of DAS, then 110ms of repeats: four steps with 10ms carried over.
        let commands = ih.update(210);
        assert_eq!(commands.as_slice(), &[slide(Direction::Right, 4)]);

        let commands = ih.update(15);
        assert_eq!(commands.as_slice(), &[slide(Direction::Right, 1)]);
    }

    #[test]
    fn test_held_axes_produce_one_slide_each() {
        let mut ih = InputHandler::with_config(0, 50).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_press(KeyCode::Down);

        let commands = ih.update(100);
        assert_eq!(
            commands.as_slice(),
            &[slide(Direction::Left, 2), slide(Direction::Down, 2)]
        );
    }

    #[test]
    fn test_repeated_press_does_not_restart() {
        let mut ih = InputHandler::new();
        assert!(ih.handle_key_press(KeyCode::Left).is_some());
        assert_eq!(ih.handle_key_press(KeyCode::Left), None);
        assert!(ih.handle_key_press(KeyCode::Right).is_some());
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert!(ih.handle_key_press(KeyCode::Left).is_some());
        assert_eq!(ih.horizontal, HorizontalDirection::Left);

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(0, 10).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Char('d'));
        ih.handle_key_release(KeyCode::Char('d'));
        assert!(ih.update(100).is_empty());
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Down),
            Some(slide(Direction::Down, 1))
        );

        assert!(ih.update(49).is_empty());

        let commands = ih.update(1);
        assert_eq!(commands.as_slice(), &[slide(Direction::Down, 1)]);

        let commands = ih.update(100);
        assert_eq!(commands.as_slice(), &[slide(Direction::Down, 2)]);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert!(ih.handle_key_press(KeyCode::Left).is_some());
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
