//! Rotating table entry point.
//!
//! Usage: `rotating-table [config.toml]`. Without a file the stock table is
//! driven one full turn: `/dev/gpiochip0`, lines 27, 22, 23, 24, 4096
//! half-steps at 2 ms. Log level comes from `ROTATING_TABLE_LOG`.
//!
//! Ctrl-C stops the run at the next stop (capture) or step (drive); the
//! lines are released either way.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info, warn, LevelFilter, Log, Metadata, Record};
use rotating_table::{
    drive_until, load_config, run_plan, Direction, GpiodProvider, LineBundle, StdDelay,
    StepIndex, TableConfig,
};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Set from the SIGINT handler.
static STOP: AtomicBool = AtomicBool::new(false);

fn init_logging() {
    let level = std::env::var("ROTATING_TABLE_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => TableConfig::default(),
    };

    if let Err(e) = ctrlc::set_handler(|| STOP.store(true, Ordering::SeqCst)) {
        warn!("Ctrl-C handler not installed: {}", e);
    }

    let provider = GpiodProvider::new();
    let bundle = match LineBundle::acquire(&provider, &config.lines) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut delay = StdDelay;
    let result = match config.capture {
        Some(ref capture) => run_plan(
            &bundle,
            &capture.plan(),
            StepIndex::new(config.drive.start_index),
            &mut delay,
            &STOP,
            |event| {
                info!(
                    "stop {}/{} at index {} ({}%)",
                    event.stop + 1,
                    event.total,
                    event.index.value(),
                    event.progress_percent()
                )
            },
        )
        .map(|outcome| {
            if outcome.cancelled {
                warn!(
                    "capture cancelled after {} stops at index {}",
                    outcome.stops_completed,
                    outcome.index.value()
                );
            }
        }),
        None => drive_until(
            &bundle,
            StepIndex::new(config.drive.start_index),
            config.drive.steps,
            Direction::Forward,
            &mut delay,
            config.drive.step_interval.as_duration(),
            &STOP,
        )
        .map(|outcome| {
            if outcome.cancelled {
                warn!(
                    "drive cancelled after {} of {} steps",
                    outcome.steps_done, config.drive.steps
                );
            }
        }),
    };

    // A failed or interrupted run still leaves the lines owned; hand them back
    if let Err(e) = result {
        error!("{}", e);
    }
    bundle.release();

    ExitCode::SUCCESS
}
