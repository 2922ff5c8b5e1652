// Logging setup
//
// The TUI owns the terminal, so stray log writes to stdout would garble the
// alternate screen. Log output therefore goes to rolling files under the
// configured directory when file logging is enabled, and nowhere otherwise.
//
// Precedence for the filter: RUST_LOG env var > config file level > "info".

use crate::config::Config;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. The returned guard must be kept alive
/// for the duration of the program so buffered log lines flush on exit.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let default_filter = format!("stall={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    if !config.logging.file_enabled {
        // Filter only, no sink: tracing macros stay cheap no-ops.
        tracing_subscriber::registry().with(filter).init();
        return Ok(None);
    }

    std::fs::create_dir_all(&config.logging.file_dir).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.logging.file_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::daily(&config.logging.file_dir, "stall.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}
