// src/hardware/ultrasonic.rs - Echo pulse stub for HC-SR04 style range finders
use super::PinState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest simulated echo, in microseconds.
pub const ECHO_MIN_US: u64 = 2_000;
/// Longest simulated echo, in microseconds.
pub const ECHO_MAX_US: u64 = 30_000;

/// Speed of sound in cm per microsecond.
const SOUND_CM_PER_US: f64 = 0.034;

/// Measure the length of an echo pulse on `pin`.
///
/// This is a stub: the result is uniform in
/// [`ECHO_MIN_US`, `ECHO_MAX_US`] and neither argument affects it.
pub fn measure_echo_pulse(pin: i32, expected: PinState) -> u64 {
    tracing::trace!(pin, %expected, "Measuring echo pulse");
    rand::rng().random_range(ECHO_MIN_US..=ECHO_MAX_US)
}

/// Convert a round-trip echo time to a one-way distance in centimetres.
pub fn echo_to_cm(duration_us: u64) -> f64 {
    duration_us as f64 * SOUND_CM_PER_US / 2.0
}

/// Source of echo pulse durations for a board.
///
/// `EchoPulse::default()` draws from the thread RNG like
/// [`measure_echo_pulse`]; `EchoPulse::seeded` is reproducible.
#[derive(Debug, Default)]
pub enum EchoPulse {
    #[default]
    Random,
    Seeded(StdRng),
}

impl EchoPulse {
    pub fn seeded(seed: u64) -> Self {
        EchoPulse::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn measure(&mut self, pin: i32, expected: PinState) -> u64 {
        match self {
            EchoPulse::Random => measure_echo_pulse(pin, expected),
            EchoPulse::Seeded(rng) => rng.random_range(ECHO_MIN_US..=ECHO_MAX_US),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_pulse_stays_in_range() {
        for _ in 0..10_000 {
            let us = measure_echo_pulse(13, PinState::High);
            assert!((ECHO_MIN_US..=ECHO_MAX_US).contains(&us), "out of range: {}", us);
        }
    }

    #[test]
    fn test_echo_pulse_is_not_constant() {
        let samples: Vec<u64> = (0..100).map(|_| measure_echo_pulse(13, PinState::High)).collect();
        assert!(samples.iter().any(|&s| s != samples[0]));
    }

    #[test]
    fn test_seeded_echo_is_reproducible() {
        let mut a = EchoPulse::seeded(7);
        let mut b = EchoPulse::seeded(7);
        for _ in 0..50 {
            let x = a.measure(13, PinState::High);
            assert_eq!(x, b.measure(99, PinState::Low));
            assert!((ECHO_MIN_US..=ECHO_MAX_US).contains(&x));
        }
    }

    #[test]
    fn test_echo_to_cm() {
        assert!((echo_to_cm(2_000) - 34.0).abs() < 1e-9);
        assert!((echo_to_cm(30_000) - 510.0).abs() < 1e-9);
    }
}
