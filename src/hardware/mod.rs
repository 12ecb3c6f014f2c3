// src/hardware/mod.rs - Emulated pin interface: modes, levels, registry and I/O stubs
pub mod hardware_traits;
pub mod pins;
pub mod serial;
pub mod ultrasonic;

pub use hardware_traits::{CaptureConsole, Console, SharedConsole, StdConsole};
pub use pins::{ConfigurationError, PinRecord, PinRegistry, WriteOutcome};
pub use serial::Serial;
pub use ultrasonic::{echo_to_cm, measure_echo_pulse, EchoPulse, ECHO_MAX_US, ECHO_MIN_US};

use std::fmt;

/// Raw code for an input pin.
pub const INPUT: i32 = 0x0;
/// Raw code for an output pin.
pub const OUTPUT: i32 = 0x1;
/// Raw code for an input pin with the internal pull-up enabled.
pub const INPUT_PULLUP: i32 = 0x2;

/// Pin direction as understood by the emulated board.
///
/// The discriminants match the integer codes used by firmware sources, so
/// existing pin-mode constants keep their meaning when passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PinMode {
    Input = INPUT,
    Output = OUTPUT,
    InputPullup = INPUT_PULLUP,
}

impl PinMode {
    /// Decode a raw mode code, returning `None` for anything unrecognized.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            INPUT => Some(PinMode::Input),
            OUTPUT => Some(PinMode::Output),
            INPUT_PULLUP => Some(PinMode::InputPullup),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Parse the lowercase name used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "input" => Some(PinMode::Input),
            "output" => Some(PinMode::Output),
            "input_pullup" => Some(PinMode::InputPullup),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PinMode::Input => "input",
            PinMode::Output => "output",
            PinMode::InputPullup => "input_pullup",
        }
    }
}

impl From<PinMode> for i32 {
    fn from(mode: PinMode) -> Self {
        mode.code()
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PinState {
    #[default]
    Low = 0x0,
    High = 0x1,
}

impl PinState {
    pub fn is_high(self) -> bool {
        self == PinState::High
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high { PinState::High } else { PinState::Low }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinState::Low => f.write_str("LOW"),
            PinState::High => f.write_str("HIGH"),
        }
    }
}
