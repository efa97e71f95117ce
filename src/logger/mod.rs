//! Logger handles.
//!
//! # Responsibilities
//! - Hold a logger's name, level and destinations
//! - Own a private `tracing` dispatcher wired to those destinations
//! - Expose leveled logging methods and scoped `tracing` routing
//!
//! # Design Decisions
//! - One `Dispatch` per logger: outputs and thresholds never leak between names
//! - Files are opened eagerly and appended to; no rotation
//! - Console output can be redirected into a [`CaptureBuffer`]

pub mod builder;
pub mod handle;
pub mod sink;

pub use builder::LoggerSpec;
pub use handle::Logger;
pub use sink::{CaptureBuffer, ConsoleSink};
