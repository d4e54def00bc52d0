use std::path::Path;

use tracing_subscriber::EnvFilter;

pub mod commands;

/// Exit status when nothing trips the configured threshold.
pub const EXIT_OK: u8 = 0;
/// Exit status when at least one finding trips the configured threshold.
pub const EXIT_FINDINGS: u8 = 1;
/// Exit status for malformed or unreadable input. No findings are printed.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Derive a display label for a snapshot from its file name.
///
/// `snapshots/api-29.json` becomes `api-29`. If the path has no file stem,
/// fallback to `unnamed-surface`.
pub fn infer_surface_label(path: &Path) -> String {
    path.file_stem().and_then(|os_str| os_str.to_str()).unwrap_or("unnamed-surface").to_string()
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set and no `-v` was given; otherwise verbosity maps to
/// warn/info/debug/trace. Stdout is left alone so JSON reports stay parseable.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    // A subscriber may already be installed (e.g. by tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
