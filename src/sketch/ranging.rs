// src/sketch/ranging.rs - HC-SR04 style distance readout over serial
use super::Sketch;
use crate::board::Board;
use crate::hardware::{echo_to_cm, PinMode, PinState};

pub const DEFAULT_TRIGGER_PIN: i32 = 12;
pub const DEFAULT_ECHO_PIN: i32 = 13;
pub const DEFAULT_RANGING_INTERVAL_MS: u64 = 100;
pub const DEFAULT_BAUD: u32 = 9600;

/// Fire the trigger pin, time the echo and print the distance.
#[derive(Debug, Clone)]
pub struct Ranging {
    pub trigger_pin: i32,
    pub echo_pin: i32,
    pub interval_ms: u64,
    pub baud: u32,
    last_distance_cm: Option<f64>,
}

impl Ranging {
    pub fn new(trigger_pin: i32, echo_pin: i32, interval_ms: u64, baud: u32) -> Self {
        Self {
            trigger_pin,
            echo_pin,
            interval_ms,
            baud,
            last_distance_cm: None,
        }
    }

    pub fn last_distance_cm(&self) -> Option<f64> {
        self.last_distance_cm
    }
}

impl Default for Ranging {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRIGGER_PIN,
            DEFAULT_ECHO_PIN,
            DEFAULT_RANGING_INTERVAL_MS,
            DEFAULT_BAUD,
        )
    }
}

impl Sketch for Ranging {
    fn name(&self) -> &str {
        "ranging"
    }

    fn setup(&mut self, board: &mut Board) {
        board.serial().begin(self.baud);
        board.pin_mode(self.trigger_pin, PinMode::Output);
        board.pin_mode(self.echo_pin, PinMode::Input);
    }

    fn run_once(&mut self, board: &mut Board) {
        // 10us trigger pulse after a short settle
        board.digital_write(self.trigger_pin, PinState::Low);
        board.delay_microseconds(2);
        board.digital_write(self.trigger_pin, PinState::High);
        board.delay_microseconds(10);
        board.digital_write(self.trigger_pin, PinState::Low);

        let duration_us = board.pulse_in(self.echo_pin, PinState::High);
        let distance = echo_to_cm(duration_us);
        self.last_distance_cm = Some(distance);
        tracing::debug!(duration_us, distance, "Echo measured");

        let serial = board.serial();
        serial.print("Distance: ");
        serial.print(format!("{:.1}", distance));
        serial.println(" cm");

        board.delay(self.interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{CaptureConsole, EchoPulse};
    use crate::scheduler::ManualClock;
    use crate::sketch::SketchRunner;
    use std::time::Duration;

    #[test]
    fn test_ranging_cycle_output() {
        let capture = CaptureConsole::new();
        let clock = ManualClock::new();
        let mut board = Board::new(capture.shared(), Box::new(clock.clone()))
            .with_echo(EchoPulse::seeded(42));
        let mut ranging = Ranging::default();

        SketchRunner::new(Some(1)).run(&mut ranging, &mut board).unwrap();

        let lines = capture.stdout_lines();
        assert_eq!(lines[0], "Initializing serial communication at 9600 baud rate.");
        assert_eq!(lines[1], "Configuring pin 12 as output");
        assert_eq!(lines[2], "Configuring pin 13 as input");
        assert_eq!(&lines[3..6], ["pin OFF on 12", "pin ON on 12", "pin OFF on 12"]);
        assert!(lines[6].starts_with("Distance: "));
        assert!(lines[6].ends_with(" cm"));
        assert_eq!(lines.len(), 7);

        let distance = ranging.last_distance_cm().unwrap();
        assert!((34.0..=510.0).contains(&distance));
        assert_eq!(lines[6], format!("Distance: {:.1} cm", distance));
        assert_eq!(
            clock.elapsed(),
            Duration::from_micros(12) + Duration::from_millis(100)
        );
        assert!(capture.stderr().is_empty());
    }
}
