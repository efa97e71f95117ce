//! Line formatting subsystem.
//!
//! # Data Flow
//! ```text
//! LoggingConfig.format (string)
//!     → template.rs (parse into segments, reject unknown placeholders)
//!     → event.rs (TemplateFormatter renders each tracing Event)
//!     → one line per output (console, file)
//! ```
//!
//! # Design Decisions
//! - Templates are parsed once per logger, never per event
//! - Levels use their own five-step scale; `level.rs` maps it onto `tracing`

pub mod event;
pub mod level;
pub mod template;

pub use event::{is_critical, TemplateFormatter, CRITICAL_FIELD};
pub use level::{Level, ParseLevelError};
pub use template::{LineFormat, Segment, TemplateError};
