// 📝 Logging bootstrap for the binary
// The library only emits through the `log` facade; the binary decides where it goes.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Environment variable holding the log spec (e.g. "debug", "loyalty_ledger=debug")
pub const LOG_ENV_VAR: &str = "LOYALTY_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Start logging to stderr. Keep the returned handle alive for the process lifetime.
pub fn init_logging() -> Result<LoggerHandle> {
    let spec = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

    Logger::try_with_str(&spec)
        .with_context(|| format!("Invalid log spec `{}`", spec))?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()
        .context("Failed to start logger")
}
