use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming a log file; logs go to stderr without it.
pub const LOG_FILE_ENV: &str = "TASKLINE_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG`, falling back to the configured level.
/// Set `TASKLINE_LOG` to a file path to write logs there instead of stderr.
///
/// Log files are created with unique names to prevent conflicts when
/// multiple instances run simultaneously: `{path}.{timestamp}.{pid}`
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let Some(log_path) = std::env::var(LOG_FILE_ENV).ok() else {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339());
        // Already initialised (e.g. embedded in another binary): keep theirs.
        let _ = subscriber.try_init();
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

/// Run `f` under a stderr subscriber filtered by `RUST_LOG` (or the default
/// level) only. Used while the config, and with it the configured level, is
/// still being loaded.
pub fn with_startup_logging<R>(f: impl FnOnce() -> R) -> R {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LoggingConfig::default().level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
