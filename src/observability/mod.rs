//! Logging initialization.
//!
//! Structured logging via `tracing`, configured from the environment.
//! `RUST_LOG` controls the filter; `INFLUMATCH_LOG_FORMAT=json` switches to
//! JSON output for log shippers.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parses a format string (case-insensitive), defaulting to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Reads the format from `INFLUMATCH_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("INFLUMATCH_LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the global tracing subscriber.
///
/// Idempotent: subsequent calls are no-ops, so tests and embedders can call
/// it freely. `verbose` lowers the default filter to `debug` when `RUST_LOG`
/// is unset.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let default_filter = if verbose {
            "influmatch=debug,tower_http=debug"
        } else {
            "influmatch=info"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        match LogFormat::from_env() {
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_target(true)
                    .init();
            },
            LogFormat::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(false)
                    .init();
            },
        }
    });
}
