//! Blocking delay primitives.
//!
//! `delay` and `delay_microseconds` pause the calling thread for the full
//! duration. They pace firmware loops; no precision is promised.

pub mod time_interface;

pub use time_interface::{ManualClock, SystemClock, TimeInterface};

use std::time::Duration;

pub fn delay(milliseconds: u64) {
    std::thread::sleep(Duration::from_millis(milliseconds));
}

pub fn delay_microseconds(microseconds: u64) {
    std::thread::sleep(Duration::from_micros(microseconds));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_delay_blocks_at_least_requested_time() {
        let start = Instant::now();
        delay(20);
        assert!(start.elapsed() >= Duration::from_millis(20));

        let start = Instant::now();
        delay_microseconds(500);
        assert!(start.elapsed() >= Duration::from_micros(500));
    }

    #[test]
    fn test_zero_delay_returns() {
        delay(0);
        delay_microseconds(0);
    }
}
