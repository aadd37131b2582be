use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{
        format::{Format, Writer},
        time::FormatTime,
    },
    EnvFilter,
};

static SHUTDOWN_IN_PROGRESS: AtomicBool = AtomicBool::new(false);

/// "DD Month - HH:MM:SS.micros" while serving, "HH:MM:SS" once shutdown starts.
struct GasFeeTimer;

impl FormatTime for GasFeeTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        if SHUTDOWN_IN_PROGRESS.load(Ordering::Relaxed) {
            write!(writer, "{}", now.format("%H:%M:%S"))
        } else {
            write!(writer, "{} - {}", now.format("%d %B"), now.format("%H:%M:%S%.6f"))
        }
    }
}

/// Sets up the global logger with the specified log level.
///
/// Each event is written to stdout as a single line. `RUST_LOG` directives
/// are honoured on top of `log_level`. If a global subscriber is already
/// installed this does nothing.
pub fn setup_logger(log_level: LevelFilter) {
    let filter = EnvFilter::from_default_env().add_directive(log_level.into());

    let format = Format::default().with_timer(GasFeeTimer).with_level(true).with_target(false);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .event_format(format)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn setup_info_logger() {
    setup_logger(LevelFilter::INFO);
}

/// Switches log timestamps to the short shutdown format.
pub fn mark_shutdown_started() {
    SHUTDOWN_IN_PROGRESS.store(true, Ordering::Relaxed);
}
