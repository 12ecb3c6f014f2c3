// src/sketch/mod.rs - Firmware-style sketches and the loop that drives them
pub mod blink;
pub mod ranging;

pub use blink::Blink;
pub use ranging::Ranging;

use crate::board::{Board, BoardError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A firmware program: one-time setup, then a body run repeatedly.
pub trait Sketch: Send {
    fn name(&self) -> &str;

    /// Register pins and start peripherals. The runner applies the pin
    /// configuration right after this returns.
    fn setup(&mut self, board: &mut Board);

    fn run_once(&mut self, board: &mut Board);
}

/// Shared flag asking a running sketch to stop after its current iteration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: u64,
}

/// Drives a sketch: setup, configuration, then the loop body until the
/// stop flag is raised or the iteration limit is reached.
#[derive(Debug, Clone, Default)]
pub struct SketchRunner {
    max_iterations: Option<u64>,
    stop: StopHandle,
}

impl SketchRunner {
    pub fn new(max_iterations: Option<u64>) -> Self {
        Self {
            max_iterations,
            stop: StopHandle::new(),
        }
    }

    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn run(&self, sketch: &mut dyn Sketch, board: &mut Board) -> Result<RunSummary, BoardError> {
        tracing::info!("Starting sketch '{}'", sketch.name());
        sketch.setup(board);
        board.configure()?;

        let mut iterations = 0u64;
        loop {
            if self.stop.is_stopped() {
                tracing::info!("Stop requested after {} iteration(s)", iterations);
                break;
            }
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }
            sketch.run_once(board);
            iterations += 1;
        }

        tracing::info!("Sketch '{}' finished after {} iteration(s)", sketch.name(), iterations);
        Ok(RunSummary { iterations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{CaptureConsole, PinMode, PinState};
    use crate::scheduler::ManualClock;

    struct Counter {
        runs: u64,
        stop_after: Option<(u64, StopHandle)>,
    }

    impl Sketch for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn setup(&mut self, board: &mut Board) {
            board.pin_mode(3, PinMode::Output);
        }

        fn run_once(&mut self, board: &mut Board) {
            self.runs += 1;
            board.digital_write(3, PinState::from(self.runs % 2 == 1));
            if let Some((n, stop)) = &self.stop_after {
                if self.runs >= *n {
                    stop.request_stop();
                }
            }
        }
    }

    fn board() -> (Board, CaptureConsole) {
        let capture = CaptureConsole::new();
        (Board::new(capture.shared(), Box::new(ManualClock::new())), capture)
    }

    #[test]
    fn test_runner_respects_iteration_limit() {
        let (mut board, capture) = board();
        let mut sketch = Counter { runs: 0, stop_after: None };
        let summary = SketchRunner::new(Some(3)).run(&mut sketch, &mut board).unwrap();
        assert_eq!(summary.iterations, 3);
        assert_eq!(sketch.runs, 3);
        assert_eq!(
            capture.stdout_lines(),
            vec!["Configuring pin 3 as output", "pin ON on 3", "pin OFF on 3", "pin ON on 3"]
        );
    }

    #[test]
    fn test_runner_stops_on_flag() {
        let (mut board, _) = board();
        let runner = SketchRunner::new(None);
        let mut sketch = Counter { runs: 0, stop_after: Some((5, runner.stop_handle())) };
        let summary = runner.run(&mut sketch, &mut board).unwrap();
        assert_eq!(summary.iterations, 5);
    }

    #[test]
    fn test_runner_zero_iterations_still_configures() {
        let (mut board, capture) = board();
        let mut sketch = Counter { runs: 0, stop_after: None };
        let summary = SketchRunner::new(Some(0)).run(&mut sketch, &mut board).unwrap();
        assert_eq!(summary.iterations, 0);
        assert_eq!(capture.stdout_lines(), vec!["Configuring pin 3 as output"]);
    }

    #[test]
    fn test_runner_aborts_on_invalid_mode() {
        let (mut board, capture) = board();
        board.pin_mode(9, 42);
        let mut sketch = Counter { runs: 0, stop_after: None };
        let result = SketchRunner::new(Some(10)).run(&mut sketch, &mut board);
        assert!(result.is_err());
        assert_eq!(sketch.runs, 0);
        assert_eq!(capture.stderr_lines(), vec!["Invalid pin mode!"]);
    }

    #[test]
    fn test_stop_handle_clones_share_flag() {
        let stop = StopHandle::new();
        let other = stop.clone();
        assert!(!other.is_stopped());
        stop.request_stop();
        assert!(other.is_stopped());
    }
}
