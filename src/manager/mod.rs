//! Logger manager subsystem.
//!
//! # Data Flow
//! ```text
//! get_logger(name, options)
//!     → registry.rs (cache hit? return the same Arc<Logger>)
//!     → options.rs (fill unset options from LoggingConfig)
//!     → logger::LoggerSpec::build (open outputs, wire tracing dispatch)
//!     → cached under name for the rest of the process
//! ```
//!
//! # Design Decisions
//! - The cache is a DashMap; construction runs under the entry lock so
//!   racing first requests still build one logger
//! - A failed build leaves the cache untouched
//! - `global.rs` holds one process-wide manager; explicit managers remain
//!   available for tests and embedding

pub mod global;
pub mod options;
pub mod registry;

pub use global::{
    get_api_logger, get_app_logger, get_db_logger, get_logger, get_task_logger, global, init,
};
pub use options::LoggerOptions;
pub use registry::LoggerManager;
