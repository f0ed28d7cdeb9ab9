//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → flags / environment (cli.rs)
//!     → validation.rs (semantic checks, probe resolution)
//!     → Settings (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults except the check path
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{CheckConfig, ListenerConfig, LogFormat, ObservabilityConfig, SidecarConfig};
pub use validation::{Settings, ValidationError};
