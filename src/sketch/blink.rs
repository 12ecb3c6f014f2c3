use super::Sketch;
use crate::board::Board;
use crate::hardware::{PinMode, PinState};

pub const DEFAULT_BLINK_PIN: i32 = 2;
pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 50;

/// Toggle one output pin: HIGH, wait, LOW, wait.
#[derive(Debug, Clone)]
pub struct Blink {
    pub pin: i32,
    pub interval_ms: u64,
}

impl Blink {
    pub fn new(pin: i32, interval_ms: u64) -> Self {
        Self { pin, interval_ms }
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_PIN, DEFAULT_BLINK_INTERVAL_MS)
    }
}

impl Sketch for Blink {
    fn name(&self) -> &str {
        "blink"
    }

    fn setup(&mut self, board: &mut Board) {
        board.pin_mode(self.pin, PinMode::Output);
    }

    fn run_once(&mut self, board: &mut Board) {
        board.digital_write(self.pin, PinState::High);
        board.delay(self.interval_ms);
        board.digital_write(self.pin, PinState::Low);
        board.delay(self.interval_ms);
    }
}
