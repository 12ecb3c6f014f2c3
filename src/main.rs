// src/main.rs - Run a sketch against the emulated board
use clap::{Parser, ValueEnum};
use pinemu_rs::board::{Board, BoardError};
use pinemu_rs::config::{self, Config, SketchKind};
use pinemu_rs::sketch::{SketchRunner, StopHandle};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SketchArg {
    Blink,
    Ranging,
}

impl From<SketchArg> for SketchKind {
    fn from(arg: SketchArg) -> Self {
        match arg {
            SketchArg::Blink => SketchKind::Blink,
            SketchArg::Ranging => SketchKind::Ranging,
        }
    }
}

/// Host-side microcontroller pin emulator
#[derive(Parser, Debug)]
#[command(name = "pinemu", about = "Run firmware-style sketches against an emulated pin interface.")]
struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sketch to run (overrides the config file)
    #[arg(short, long, value_enum)]
    sketch: Option<SketchArg>,

    /// Stop after this many loop iterations instead of running until Ctrl-C
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the board's status lines
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting pinemu-rs");

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(&path)?
        }
        None => Config::default(),
    };
    if let Some(kind) = cli.sketch {
        config.sketch.kind = kind.into();
    }
    if cli.iterations.is_some() {
        config.sketch.iterations = cli.iterations;
    }

    let mut sketch = config.sketch.build(config.serial.baud)?;
    let mut board = Board::standard().with_strict_writes(config.registry.strict_writes);
    for pin in &config.pins {
        board.pin_mode(pin.id, pin.mode_code()?);
    }

    let stop = StopHandle::new();
    let runner = SketchRunner::new(config.sketch.iterations).with_stop_handle(stop.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping sketch");
            stop.request_stop();
        }
    });

    let result = tokio::task::spawn_blocking(move || runner.run(sketch.as_mut(), &mut board)).await?;

    match result {
        Ok(summary) => {
            tracing::info!("Ran {} iteration(s)", summary.iterations);
            Ok(())
        }
        Err(BoardError::Configuration(e)) => {
            tracing::error!("Fatal configuration error: {}", e);
            std::process::exit(1);
        }
    }
}
