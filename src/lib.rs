// pinemu-rs: host-side emulator for microcontroller pin I/O

pub mod board;
pub mod config;
pub mod hardware;
pub mod scheduler;
pub mod sketch;

pub use board::{Board, BoardError};
pub use hardware::{PinMode, PinRegistry, PinState, WriteOutcome};
pub use hardware::{INPUT, INPUT_PULLUP, OUTPUT};
pub use scheduler::{delay, delay_microseconds};
pub use sketch::{RunSummary, Sketch, SketchRunner, StopHandle};
