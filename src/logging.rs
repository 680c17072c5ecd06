//! Tracing setup for the CLI
//!
//! Everything goes to `<log_dir>/<log_file>`; stdout gets a plain copy when
//! `log_to_stdout` is set. `RUST_LOG` replaces the configured filter.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Dependencies stay at `warn`; the crate logs at the configured level.
fn default_directive(log_level: &str) -> String {
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), log_level.trim())
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

fn build_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)))
}

/// Install the global subscriber. Keep the returned guard alive until exit,
/// otherwise buffered file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let appender = RollingFileAppender::new(
        rotation(&config.rotation),
        &config.log_dir,
        &config.log_file,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Exactly one of the two file layers is installed
    let json_layer = config.use_json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer.clone())
            .with_ansi(false)
    });
    let text_layer = (!config.use_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(writer)
            .with_ansi(false)
    });
    let stdout_layer = config
        .log_to_stdout
        .then(|| fmt::layer().with_target(false).with_ansi(true));

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(json_layer)
        .with(text_layer)
        .with(stdout_layer)
        .init();

    guard
}
