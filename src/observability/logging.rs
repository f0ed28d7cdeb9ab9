//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honor the configured level, with `RUST_LOG` taking precedence
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - A bad configured level is a validation error; logging itself falls back to `info`

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

const FALLBACK_LEVEL: &str = "info";

/// Filter for a configured level: a bare level applies to this crate and the HTTP layer,
/// anything with `=` or `,` is taken as a full directive list.
pub fn filter_for_level(level: &str) -> Result<EnvFilter, ParseError> {
    if level.contains('=') || level.contains(',') {
        EnvFilter::try_new(level)
    } else {
        EnvFilter::try_new(format!("path_readiness={level},tower_http={level}"))
    }
}

/// Build the filter: `RUST_LOG` if set, else the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        filter_for_level(&config.log_level)
            .or_else(|_| filter_for_level(FALLBACK_LEVEL))
            .unwrap_or_default()
    })
}

/// Install the global subscriber. Errors if one is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels_parse() {
        for level in ["trace", "debug", "info", "warn", "error", "off"] {
            assert!(filter_for_level(level).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn test_directive_list_parses() {
        assert!(filter_for_level("path_readiness=trace,tower_http=warn").is_ok());
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(filter_for_level("verbose").is_err());
        assert!(filter_for_level("path_readiness=loud").is_err());
    }
}
