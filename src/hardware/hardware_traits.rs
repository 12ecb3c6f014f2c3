// Trait-based output sinks shared by the pin registry and the serial channel

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for the emulator's human-readable text.
///
/// Status lines go to `write_out`, warnings and fatal messages to
/// `write_err`. Text is passed through verbatim; callers add their own
/// newlines.
pub trait Console: Send + Sync {
    fn write_out(&self, text: &str);
    fn write_err(&self, text: &str);
}

pub type SharedConsole = Arc<dyn Console>;

/// Writes to the process stdout/stderr streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn shared() -> SharedConsole {
        Arc::new(StdConsole)
    }
}

impl Console for StdConsole {
    fn write_out(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn write_err(&self, text: &str) {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(text.as_bytes());
        let _ = err.flush();
    }
}

#[derive(Debug, Default)]
struct Captured {
    out: String,
    err: String,
}

/// In-memory console that records both streams.
///
/// Clones share the same buffers, so one handle can be given to a board
/// while another is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct CaptureConsole {
    inner: Arc<Mutex<Captured>>,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> SharedConsole {
        Arc::new(self.clone())
    }

    pub fn stdout(&self) -> String {
        self.inner.lock().map(|c| c.out.clone()).unwrap_or_default()
    }

    pub fn stderr(&self) -> String {
        self.inner.lock().map(|c| c.err.clone()).unwrap_or_default()
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.stderr().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut captured) = self.inner.lock() {
            captured.out.clear();
            captured.err.clear();
        }
    }
}

impl Console for CaptureConsole {
    fn write_out(&self, text: &str) {
        if let Ok(mut captured) = self.inner.lock() {
            captured.out.push_str(text);
        }
    }

    fn write_err(&self, text: &str) {
        if let Ok(mut captured) = self.inner.lock() {
            captured.err.push_str(text);
        }
    }
}
