//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Resolve the check mode name into a probe
//! - Validate value ranges (durations > 0, bind address parses, log level parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: SidecarConfig → Result<Settings, Vec<ValidationError>>
//! - Runs before any listener is bound or task spawned

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::SidecarConfig;
use crate::health::probe::{CheckMode, Probe, UnknownCheckMode};
use crate::observability::logging;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("check path must not be empty")]
    EmptyCheckPath,

    #[error(transparent)]
    UnknownCheckMode(#[from] UnknownCheckMode),

    #[error("{field} must be a positive number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("invalid bind address `{address}`: {reason}")]
    InvalidBindAddress { address: String, reason: String },

    #[error("invalid log level `{level}`: {reason}")]
    InvalidLogLevel { level: String, reason: String },
}

/// Validated, resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub probe: Probe,
    pub check_interval: Duration,
    pub staleness_threshold: Duration,
    pub bind_address: SocketAddr,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
}

/// Validate `config` and resolve it into [`Settings`].
pub fn validate_config(config: &SidecarConfig) -> Result<Settings, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.check.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyCheckPath);
    }

    let mode = config
        .check
        .mode
        .parse::<CheckMode>()
        .map_err(|e| errors.push(e.into()))
        .ok();

    let mut seconds = |field: &'static str, value: f64| {
        // Sub-nanosecond values round to zero, which timers reject.
        match Duration::try_from_secs_f64(value) {
            Ok(duration) if value.is_finite() && !duration.is_zero() => Some(duration),
            _ => {
                errors.push(ValidationError::InvalidDuration { field, value });
                None
            }
        }
    };
    let check_interval = seconds("check.interval_secs", config.check.interval_secs);
    let staleness_threshold = seconds("check.timeout_secs", config.check.timeout_secs);
    let request_timeout = seconds("listener.request_timeout_secs", config.listener.request_timeout_secs);
    let shutdown_grace = seconds("listener.shutdown_grace_secs", config.listener.shutdown_grace_secs);

    let bind_address = config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            errors.push(ValidationError::InvalidBindAddress {
                address: config.listener.bind_address.clone(),
                reason: e.to_string(),
            })
        })
        .ok();

    if let Err(e) = logging::filter_for_level(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
    }

    match (
        mode,
        check_interval,
        staleness_threshold,
        bind_address,
        request_timeout,
        shutdown_grace,
    ) {
        (
            Some(mode),
            Some(check_interval),
            Some(staleness_threshold),
            Some(bind_address),
            Some(request_timeout),
            Some(shutdown_grace),
        ) if errors.is_empty() => Ok(Settings {
            probe: Probe::new(mode, config.check.path.clone()),
            check_interval,
            staleness_threshold,
            bind_address,
            request_timeout,
            shutdown_grace,
        }),
        _ => Err(errors),
    }
}
