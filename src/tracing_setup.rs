use std::fs;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::paths;

/// Initializes the tracing subscriber with layered output:
/// 1. Stderr: formatted based on `log_json` and `verbose`. Stdout is kept
///    for the user-facing banners.
/// 2. File: full JSON debug logs to `~/.autocoder/logs/run-<id>.log`.
///
/// Returns a WorkerGuard that must be held by main() to ensure file logs are flushed.
pub fn init(
    verbose: bool,
    log_json: bool,
    run_id: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let registry = tracing_subscriber::registry();
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_env_filter(verbose));

    let log_dir = paths::log_dir();
    let (file_layer, guard) = if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log dir {log_dir:?}: {e}");
        (None, None)
    } else {
        // One file per run, so no rotation.
        let file_appender = tracing_appender::rolling::never(&log_dir, format!("run-{run_id}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_filter(Targets::new().with_default(tracing::Level::DEBUG));

        (Some(layer), Some(guard))
    };

    let console_layer: Box<dyn Layer<Registry> + Send + Sync> = if log_json {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
    } else if verbose {
        Box::new(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .with_level(true)
                .with_filter(console_filter),
        )
    };

    registry.with(console_layer).with(file_layer).init();

    guard
}

fn default_env_filter(verbose: bool) -> EnvFilter {
    let spec = if verbose {
        "autocoder=info,rig_core=warn,warn"
    } else {
        "autocoder=warn,rig_core=warn,warn"
    };
    EnvFilter::new(spec)
}
