// src/hardware/pins.rs - Pin registry: registration, configuration and digital/analog I/O
use super::hardware_traits::SharedConsole;
use super::{PinMode, PinState};
use thiserror::Error;

/// Fatal setup failure. The board cannot continue with a pin whose mode it
/// does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid pin mode {code} for pin {pin}")]
    InvalidMode { pin: i32, code: i32 },
}

/// What a write actually did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The pin is an output and the write was reported.
    Driven,
    /// The pin exists but is not an output; a warning was emitted.
    ModeMismatch,
    /// No pin with that id is registered.
    UnknownPin,
}

/// One registered pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    id: i32,
    mode_code: i32,
    active: bool,
    configured: bool,
}

impl PinRecord {
    fn new(id: i32, mode_code: i32) -> Self {
        Self {
            id,
            mode_code,
            active: false,
            configured: false,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Raw mode code as registered, valid or not.
    pub fn mode_code(&self) -> i32 {
        self.mode_code
    }

    pub fn mode(&self) -> Option<PinMode> {
        PinMode::from_code(self.mode_code)
    }

    pub fn is_output(&self) -> bool {
        self.mode() == Some(PinMode::Output)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> PinState {
        PinState::from(self.active)
    }

    /// Whether `apply_configuration` has confirmed this pin.
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Ordered collection of pin records, exclusively owned by the board.
///
/// Lookups are by id. Re-registering an id reconfigures the existing
/// record in place instead of adding a shadowed duplicate.
pub struct PinRegistry {
    pins: Vec<PinRecord>,
    console: SharedConsole,
    strict_writes: bool,
}

impl PinRegistry {
    pub fn new(console: SharedConsole) -> Self {
        Self {
            pins: Vec::new(),
            console,
            strict_writes: false,
        }
    }

    /// Refuse to change the recorded state of non-output pins on digital
    /// writes. Off by default: a mismatched write still records the level
    /// but reports no physical effect.
    pub fn with_strict_writes(mut self, strict: bool) -> Self {
        self.strict_writes = strict;
        self
    }

    pub fn strict_writes(&self) -> bool {
        self.strict_writes
    }

    /// Register a pin with a mode. Accepts a [`PinMode`] or a raw integer
    /// code; unknown codes are only rejected by [`apply_configuration`].
    ///
    /// [`apply_configuration`]: PinRegistry::apply_configuration
    pub fn register(&mut self, id: i32, mode: impl Into<i32>) {
        let mode_code = mode.into();
        match self.find_mut(id) {
            Some(existing) => {
                tracing::debug!(pin = id, from = existing.mode_code, to = mode_code, "Re-registering pin");
                *existing = PinRecord::new(id, mode_code);
            }
            None => {
                tracing::debug!(pin = id, mode = mode_code, "Registering pin");
                self.pins.push(PinRecord::new(id, mode_code));
            }
        }
    }

    /// Validate and confirm every registered pin in registration order.
    ///
    /// Stops at the first unrecognized mode: pins after it stay
    /// unconfigured and the error must be treated as fatal.
    pub fn apply_configuration(&mut self) -> Result<(), ConfigurationError> {
        for pin in self.pins.iter_mut() {
            match pin.mode() {
                Some(mode) => {
                    self.console
                        .write_out(&format!("Configuring pin {} as {}\n", pin.id, mode.name()));
                    pin.configured = true;
                }
                None => {
                    self.console.write_err("Invalid pin mode!\n");
                    tracing::error!(pin = pin.id, code = pin.mode_code, "Invalid pin mode");
                    return Err(ConfigurationError::InvalidMode {
                        pin: pin.id,
                        code: pin.mode_code,
                    });
                }
            }
        }
        tracing::info!("Configured {} pin(s)", self.pins.len());
        Ok(())
    }

    pub fn write_digital(&mut self, id: i32, state: PinState) -> WriteOutcome {
        let strict = self.strict_writes;
        let Some(pin) = self.find_mut(id) else {
            tracing::trace!(pin = id, "Digital write to unknown pin ignored");
            return WriteOutcome::UnknownPin;
        };

        let is_output = pin.is_output();
        if is_output || !strict {
            pin.active = state.is_high();
        }

        if !is_output {
            self.warn_not_output(id);
            return WriteOutcome::ModeMismatch;
        }

        let line = match state {
            PinState::High => format!("pin ON on {}\n", id),
            PinState::Low => format!("pin OFF on {}\n", id),
        };
        self.console.write_out(&line);
        tracing::debug!(pin = id, %state, "Digital write");
        WriteOutcome::Driven
    }

    /// Report an analog value. The digital state of the pin is untouched
    /// and the value is not range-checked.
    pub fn write_analog(&mut self, id: i32, value: i32) -> WriteOutcome {
        let Some(pin) = self.get(id) else {
            tracing::trace!(pin = id, "Analog write to unknown pin ignored");
            return WriteOutcome::UnknownPin;
        };

        if !pin.is_output() {
            self.warn_not_output(id);
            return WriteOutcome::ModeMismatch;
        }

        self.console
            .write_out(&format!("Analog write {} to pin {}\n", value, id));
        tracing::debug!(pin = id, value, "Analog write");
        WriteOutcome::Driven
    }

    /// Last recorded level of a pin. Unknown pins read LOW.
    pub fn read_digital(&self, id: i32) -> PinState {
        self.get(id).map(PinRecord::state).unwrap_or_default()
    }

    pub fn get(&self, id: i32) -> Option<&PinRecord> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinRecord> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    fn find_mut(&mut self, id: i32) -> Option<&mut PinRecord> {
        self.pins.iter_mut().find(|pin| pin.id == id)
    }

    fn warn_not_output(&self, id: i32) {
        self.console
            .write_err(&format!("Pin {} is not an output pin!\n", id));
        tracing::warn!(pin = id, "Write to non-output pin");
    }
}

impl std::fmt::Debug for PinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinRegistry")
            .field("pins", &self.pins)
            .field("strict_writes", &self.strict_writes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{CaptureConsole, INPUT, OUTPUT};

    fn registry() -> (PinRegistry, CaptureConsole) {
        let capture = CaptureConsole::new();
        (PinRegistry::new(capture.shared()), capture)
    }

    #[test]
    fn test_register_defaults_low_and_unconfigured() {
        let (mut pins, _) = registry();
        pins.register(4, PinMode::Output);
        let record = pins.get(4).unwrap();
        assert_eq!(record.mode(), Some(PinMode::Output));
        assert_eq!(record.state(), PinState::Low);
        assert!(!record.is_configured());
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn test_register_accepts_raw_codes() {
        let (mut pins, _) = registry();
        pins.register(1, OUTPUT);
        pins.register(2, INPUT);
        pins.register(3, 9);
        assert_eq!(pins.get(1).unwrap().mode(), Some(PinMode::Output));
        assert_eq!(pins.get(2).unwrap().mode(), Some(PinMode::Input));
        assert_eq!(pins.get(3).unwrap().mode(), None);
        assert_eq!(pins.get(3).unwrap().mode_code(), 9);
    }

    #[test]
    fn test_reregister_overwrites_in_place() {
        let (mut pins, _) = registry();
        pins.register(5, PinMode::Output);
        pins.register(6, PinMode::Input);
        pins.write_digital(5, PinState::High);
        pins.register(5, PinMode::Input);

        assert_eq!(pins.len(), 2);
        let ids: Vec<i32> = pins.iter().map(PinRecord::id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert_eq!(pins.get(5).unwrap().mode(), Some(PinMode::Input));
        assert_eq!(pins.read_digital(5), PinState::Low);
    }

    #[test]
    fn test_apply_configuration_messages() {
        let (mut pins, capture) = registry();
        pins.register(2, PinMode::Output);
        pins.register(3, PinMode::Input);
        pins.register(4, PinMode::InputPullup);
        pins.apply_configuration().unwrap();

        assert_eq!(
            capture.stdout_lines(),
            vec![
                "Configuring pin 2 as output",
                "Configuring pin 3 as input",
                "Configuring pin 4 as input_pullup",
            ]
        );
        assert!(pins.iter().all(PinRecord::is_configured));
    }

    #[test]
    fn test_invalid_mode_stops_configuration() {
        let (mut pins, capture) = registry();
        pins.register(2, PinMode::Output);
        pins.register(7, 5);
        pins.register(8, PinMode::Input);

        let err = pins.apply_configuration().unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidMode { pin: 7, code: 5 });
        assert_eq!(capture.stdout_lines(), vec!["Configuring pin 2 as output"]);
        assert_eq!(capture.stderr_lines(), vec!["Invalid pin mode!"]);
        assert!(pins.get(2).unwrap().is_configured());
        assert!(!pins.get(8).unwrap().is_configured());
    }

    #[test]
    fn test_digital_write_output() {
        let (mut pins, capture) = registry();
        pins.register(2, PinMode::Output);
        assert_eq!(pins.write_digital(2, PinState::High), WriteOutcome::Driven);
        assert_eq!(pins.read_digital(2), PinState::High);
        assert_eq!(pins.write_digital(2, PinState::Low), WriteOutcome::Driven);
        assert_eq!(pins.read_digital(2), PinState::Low);
        assert_eq!(capture.stdout_lines(), vec!["pin ON on 2", "pin OFF on 2"]);
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn test_digital_write_unknown_pin_is_silent() {
        let (mut pins, capture) = registry();
        assert_eq!(pins.write_digital(40, PinState::High), WriteOutcome::UnknownPin);
        assert_eq!(pins.read_digital(40), PinState::Low);
        assert!(capture.stdout().is_empty());
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn test_digital_write_mismatch_updates_state_by_default() {
        let (mut pins, capture) = registry();
        pins.register(13, PinMode::Input);
        assert_eq!(pins.write_digital(13, PinState::High), WriteOutcome::ModeMismatch);
        assert_eq!(pins.read_digital(13), PinState::High);
        assert!(capture.stdout().is_empty());
        assert_eq!(capture.stderr_lines(), vec!["Pin 13 is not an output pin!"]);
    }

    #[test]
    fn test_digital_write_mismatch_strict_keeps_state() {
        let capture = CaptureConsole::new();
        let mut pins = PinRegistry::new(capture.shared()).with_strict_writes(true);
        pins.register(13, PinMode::InputPullup);
        assert_eq!(pins.write_digital(13, PinState::High), WriteOutcome::ModeMismatch);
        assert_eq!(pins.read_digital(13), PinState::Low);
        assert_eq!(capture.stderr_lines(), vec!["Pin 13 is not an output pin!"]);
    }

    #[test]
    fn test_analog_write() {
        let (mut pins, capture) = registry();
        pins.register(9, PinMode::Output);
        pins.register(10, PinMode::Input);

        assert_eq!(pins.write_analog(9, 128), WriteOutcome::Driven);
        assert_eq!(pins.read_digital(9), PinState::Low);
        assert_eq!(pins.write_analog(10, 64), WriteOutcome::ModeMismatch);
        assert_eq!(pins.read_digital(10), PinState::Low);
        assert_eq!(pins.write_analog(11, 1), WriteOutcome::UnknownPin);
        // No range check
        assert_eq!(pins.write_analog(9, -5), WriteOutcome::Driven);

        assert_eq!(
            capture.stdout_lines(),
            vec!["Analog write 128 to pin 9", "Analog write -5 to pin 9"]
        );
        assert_eq!(capture.stderr_lines(), vec!["Pin 10 is not an output pin!"]);
    }

    #[test]
    fn test_analog_write_keeps_digital_state() {
        let (mut pins, _) = registry();
        pins.register(9, PinMode::Output);
        pins.write_digital(9, PinState::High);
        pins.write_analog(9, 0);
        assert_eq!(pins.read_digital(9), PinState::High);
    }

    #[test]
    fn test_unconfigured_pins_are_usable() {
        let (mut pins, capture) = registry();
        pins.register(2, PinMode::Output);
        assert_eq!(pins.write_digital(2, PinState::High), WriteOutcome::Driven);
        assert_eq!(pins.read_digital(2), PinState::High);
        assert!(!capture.stdout().contains("Configuring"));
    }
}
