//! Command-line and environment overrides.
//!
//! Every flag can also be given through the environment variable named
//! after it (`--check-path` / `CHECK_PATH`). Values given here win over
//! the config file, which wins over built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::schema::{LogFormat, SidecarConfig};

#[derive(Debug, Default, Parser)]
#[command(name = "path-readiness")]
#[command(version, about = "Readiness endpoint backed by periodic filesystem probes", long_about = None)]
pub struct Cli {
    /// Optional TOML config file.
    #[arg(long, env = "PATH_READINESS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to check.
    #[arg(long, env = "CHECK_PATH", value_name = "PATH")]
    pub check_path: Option<PathBuf>,

    /// Mode of check (metadata, stat, read).
    #[arg(long, env = "CHECK_MODE", value_name = "MODE")]
    pub check_mode: Option<String>,

    /// Interval between checks (seconds).
    #[arg(long, env = "CHECK_INTERVAL", value_name = "SECONDS")]
    pub check_interval: Option<f64>,

    /// How long a successful check keeps the endpoint ready (seconds).
    #[arg(long, env = "CHECK_TIMEOUT", value_name = "SECONDS")]
    pub check_timeout: Option<f64>,

    /// Address to serve /ready on.
    #[arg(long, env = "LISTEN_ADDRESS", value_name = "ADDR")]
    pub listen: Option<String>,

    /// Log level or filter directive.
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Overlay the values that were set onto `config`.
    pub fn apply(self, config: &mut SidecarConfig) {
        if let Some(path) = self.check_path {
            config.check.path = path;
        }
        if let Some(mode) = self.check_mode {
            config.check.mode = mode;
        }
        if let Some(interval) = self.check_interval {
            config.check.interval_secs = interval;
        }
        if let Some(timeout) = self.check_timeout {
            config.check.timeout_secs = timeout;
        }
        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}
