//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! LOGGER_MANAGER_CONFIG (optional TOML file)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → LOGGER_MANAGER_* environment overrides
//!     → validation.rs (semantic checks)
//!     → LoggingConfig (validated, immutable)
//!     → owned by the LoggerManager
//! ```
//!
//! # Design Decisions
//! - Read once at startup; a bad value is an error, never a silent default
//! - All fields have defaults so an empty environment is a valid config
//! - Validation separates syntactic (serde, env parsing) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, load_with, ConfigError};
pub use schema::{ConsoleStream, LoggingConfig, ViewerConfig};
pub use validation::{validate_config, validate_viewer, ValidationError};
