//! Structured logging setup.
//!
//! The library crates only emit `tracing` events:
//!
//! - `trace`: sequence growth, shared-path region blocks
//! - `debug`: rollbacks and explicit resets
//! - `warn`: automatic reset of a resettable region on exhaustion
//! - `error`: fatal exhaustion, right before the panic
//!
//! Applications that have no subscriber of their own can call [`init`] once
//! at startup to get console output.

use std::io;

use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Crates whose events the default filter enables.
const TARGETS: [&str; 5] = [
    "regionkit",
    "regionkit_core",
    "regionkit_arena",
    "regionkit_seq",
    "regionkit_view",
];

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to every regionkit crate unless `RUST_LOG` is set.
    pub level: Level,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json_format: bool,
    /// Log span enter/close events.
    pub show_spans: bool,
    /// Include the emitting thread's id.
    pub thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            show_spans: false,
            thread_ids: cfg!(debug_assertions),
        }
    }
}

impl LogConfig {
    /// Build a config from `REGIONKIT_LOG_LEVEL`, `REGIONKIT_LOG_JSON` and
    /// `REGIONKIT_LOG_SPANS`, falling back to [`Default`].
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // REGIONKIT_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level) = std::env::var("REGIONKIT_LOG_LEVEL") {
            config.level = parse_level(&level).unwrap_or(Level::INFO);
        }
        config.json_format = std::env::var("REGIONKIT_LOG_JSON").is_ok();
        config.show_spans = std::env::var("REGIONKIT_LOG_SPANS").is_ok();

        config
    }

    /// Errors only.
    pub fn quiet() -> Self {
        Self {
            level: Level::ERROR,
            json_format: false,
            show_spans: false,
            thread_ids: false,
        }
    }

    /// Everything, including per-growth trace events.
    pub fn verbose() -> Self {
        Self {
            level: Level::TRACE,
            json_format: false,
            show_spans: true,
            thread_ids: true,
        }
    }

    /// Filter directives for this config, e.g. `regionkit=info,regionkit_arena=info,...`.
    pub fn directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install a global subscriber configured from the environment.
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Install a global subscriber for `config`.
///
/// Only the first call in a process has any effect. If another global
/// subscriber is already installed, that one is kept.
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directives()));

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let json = config.json_format.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(span_events.clone())
                .with_target(true)
                .with_thread_ids(config.thread_ids)
        });
        let pretty = (!config.json_format).then(|| {
            fmt::layer()
                .with_writer(io::stderr)
                .with_span_events(span_events)
                .with_target(true)
                .with_thread_ids(config.thread_ids)
        });

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json)
            .with(pretty)
            .try_init();
    });
}

/// Whether [`init`] or [`init_with_config`] has run.
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info_console() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
        assert!(!config.show_spans);
    }

    #[test]
    fn directives_cover_every_crate() {
        let directives = LogConfig::verbose().directives();
        assert!(directives.starts_with("regionkit=trace,"));
        assert!(directives.contains("regionkit_arena=trace"));
        assert!(directives.contains("regionkit_seq=trace"));
        assert_eq!(directives.split(',').count(), TARGETS.len());
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn init_is_idempotent() {
        init_with_config(LogConfig::quiet());
        assert!(is_initialized());
        init_with_config(LogConfig::verbose());
        assert!(is_initialized());
    }
}
