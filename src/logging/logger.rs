// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and configuration

use crate::error::NetworkingError;
use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count; `quiet` wins over verbosity
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging system
///
/// `RUST_LOG`, when set, overrides the level derived from the flags. Output
/// goes to stderr so stdout stays free for command output.
pub fn init_logger(verbosity: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| NetworkingError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run `f` inside a named operation span
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}

/// Async variant of [`with_operation_span`]
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(3, false), "trace");
        assert_eq!(level_for(9, false), "trace");
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        assert_eq!(level_for(0, true), "error");
        assert_eq!(level_for(3, true), "error");
    }

    #[test]
    fn test_init_logger_twice() {
        // A subscriber can only be installed once per process
        let first = init_logger(1, false);
        let second = init_logger(1, false);
        assert!(first.is_ok() || second.is_err());
        assert!(second.is_err());
    }

    #[test]
    fn test_with_operation_span() {
        // Arrange
        let mut executed = false;

        // Act
        let result = with_operation_span("render", || {
            executed = true;
            "rendered"
        });

        // Assert
        assert!(executed);
        assert_eq!(result, "rendered");
    }

    #[tokio::test]
    async fn test_with_async_operation_span() {
        let result = with_async_operation_span("load", || async { 2 + 2 }).await;
        assert_eq!(result, 4);
    }
}
