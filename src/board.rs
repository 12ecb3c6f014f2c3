// src/board.rs - Arduino-style facade over the pin registry, serial channel and clock
use crate::hardware::{
    ConfigurationError, EchoPulse, PinMode, PinRegistry, PinState, Serial, SharedConsole,
    StdConsole, WriteOutcome,
};
use crate::scheduler::{SystemClock, TimeInterface};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board configuration failed: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Everything a sketch can touch: pins, serial, time and the echo sensor.
pub struct Board {
    pins: PinRegistry,
    serial: Serial,
    clock: Box<dyn TimeInterface>,
    echo: EchoPulse,
}

impl Board {
    pub fn new(console: SharedConsole, clock: Box<dyn TimeInterface>) -> Self {
        Self {
            pins: PinRegistry::new(console.clone()),
            serial: Serial::new(console),
            clock,
            echo: EchoPulse::default(),
        }
    }

    /// Board wired to the process streams and the real clock.
    pub fn standard() -> Self {
        Self::new(StdConsole::shared(), Box::new(SystemClock))
    }

    pub fn with_echo(mut self, echo: EchoPulse) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_strict_writes(mut self, strict: bool) -> Self {
        self.pins = self.pins.with_strict_writes(strict);
        self
    }

    pub fn pin_mode(&mut self, pin: i32, mode: impl Into<i32>) {
        self.pins.register(pin, mode);
    }

    /// Apply every registered pin mode. An error here is fatal for the
    /// sketch.
    pub fn configure(&mut self) -> Result<(), BoardError> {
        self.pins.apply_configuration()?;
        Ok(())
    }

    pub fn digital_write(&mut self, pin: i32, state: PinState) -> WriteOutcome {
        self.pins.write_digital(pin, state)
    }

    pub fn analog_write(&mut self, pin: i32, value: i32) -> WriteOutcome {
        self.pins.write_analog(pin, value)
    }

    pub fn digital_read(&self, pin: i32) -> PinState {
        self.pins.read_digital(pin)
    }

    pub fn delay(&self, milliseconds: u64) {
        self.clock.sleep(Duration::from_millis(milliseconds));
    }

    pub fn delay_microseconds(&self, microseconds: u64) {
        self.clock.sleep(Duration::from_micros(microseconds));
    }

    /// Simulated echo duration in microseconds.
    pub fn pulse_in(&mut self, pin: i32, expected: PinState) -> u64 {
        self.echo.measure(pin, expected)
    }

    pub fn serial(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    pub fn mode_of(&self, pin: i32) -> Option<PinMode> {
        self.pins.get(pin).and_then(|record| record.mode())
    }

    pub fn clock(&self) -> &dyn TimeInterface {
        self.clock.as_ref()
    }
}
