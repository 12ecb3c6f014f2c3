// src/hardware/serial.rs - Emulated serial text channel
use super::hardware_traits::SharedConsole;
use std::fmt::Display;

/// Serial channel statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialStats {
    pub bytes_sent: u64,
    pub writes: u64,
}

/// Line-oriented text output standing in for a UART.
///
/// Nothing is transmitted anywhere; text goes to the board console. The
/// baud rate is only recorded and reported.
pub struct Serial {
    console: SharedConsole,
    baud_rate: Option<u32>,
    stats: SerialStats,
}

impl Serial {
    pub fn new(console: SharedConsole) -> Self {
        Self {
            console,
            baud_rate: None,
            stats: SerialStats::default(),
        }
    }

    pub fn begin(&mut self, baud_rate: u32) {
        self.baud_rate = Some(baud_rate);
        tracing::info!("Serial started at {} baud", baud_rate);
        self.emit(&format!(
            "Initializing serial communication at {} baud rate.\n",
            baud_rate
        ));
    }

    pub fn print<T: Display>(&mut self, value: T) {
        self.emit(&value.to_string());
    }

    pub fn println<T: Display>(&mut self, value: T) {
        self.emit(&format!("{}\n", value));
    }

    /// Baud rate passed to the last `begin`, if any.
    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    pub fn stats(&self) -> &SerialStats {
        &self.stats
    }

    fn emit(&mut self, text: &str) {
        self.stats.bytes_sent += text.len() as u64;
        self.stats.writes += 1;
        tracing::trace!("Serial TX: {:?}", text);
        self.console.write_out(text);
    }
}

impl std::fmt::Debug for Serial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serial")
            .field("baud_rate", &self.baud_rate)
            .field("stats", &self.stats)
            .finish()
    }
}
