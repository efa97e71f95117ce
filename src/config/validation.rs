//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and env parsing handle syntax)
//! - Check the line template and time pattern before any logger uses them
//! - Validate viewer values (prefix usable as a route, non-zero intervals,
//!   bind address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use chrono::format::{Item, StrftimeItems};

use crate::config::schema::{LoggingConfig, ViewerConfig};
use crate::format::{LineFormat, TemplateError};
use crate::viewer::WS_PATH;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("format: {0}")]
    Format(TemplateError),

    #[error("time_format: invalid strftime pattern `{0}`")]
    TimeFormat(String),

    #[error("log_dir must not be empty")]
    EmptyLogDir,

    #[error("viewer.prefix `{prefix}` {reason}")]
    ViewerPrefix { prefix: String, reason: &'static str },

    #[error("viewer.tail_lines must be greater than 0")]
    ZeroTailLines,

    #[error("viewer.poll_interval_ms must be greater than 0")]
    ZeroPollInterval,

    #[error("viewer.bind_address `{0}` is not a socket address")]
    BindAddress(String),
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = LineFormat::parse(&config.format) {
        errors.push(ValidationError::Format(e));
    }

    if !is_valid_time_format(&config.time_format) {
        errors.push(ValidationError::TimeFormat(config.time_format.clone()));
    }

    if config.log_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogDir);
    }

    if let Err(viewer_errors) = validate_viewer(&config.viewer) {
        errors.extend(viewer_errors);
    }

    if config.viewer.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.viewer.bind_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the viewer settings the router depends on.
///
/// The bind address is not checked here; only the server binary uses it.
pub fn validate_viewer(viewer: &ViewerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_prefix(&viewer.prefix) {
        errors.push(ValidationError::ViewerPrefix {
            prefix: viewer.prefix.clone(),
            reason,
        });
    }

    if viewer.tail_lines == 0 {
        errors.push(ValidationError::ZeroTailLines);
    }

    if viewer.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The prefix is pasted into axum route paths, so route syntax is rejected
/// along with anything that would land on the WebSocket route.
fn check_prefix(prefix: &str) -> Result<(), &'static str> {
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        return Err("must start with `/` and must not end with `/`");
    }
    if prefix.contains("//") {
        return Err("must not contain empty path segments");
    }
    if prefix.contains([':', '*', '{', '}']) {
        return Err("must not contain `:`, `*`, `{` or `}`");
    }
    let routes = [
        prefix.to_string(),
        format!("{prefix}/"),
        format!("{prefix}/logs/logger_names"),
        format!("{prefix}/logs/tail"),
    ];
    if routes.iter().any(|route| route == WS_PATH) {
        return Err("collides with the WebSocket route");
    }
    Ok(())
}

fn is_valid_time_format(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&LoggingConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = LoggingConfig::default();
        config.format = "{time} {lvl}".into();
        config.time_format = "%Y-%Q".into();
        config.log_dir = "".into();
        config.viewer.prefix = "logs/".into();
        config.viewer.tail_lines = 0;
        config.viewer.poll_interval_ms = 0;
        config.viewer.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(matches!(errors[0], ValidationError::Format(TemplateError::UnknownPlaceholder { .. })));
        assert_eq!(errors[1], ValidationError::TimeFormat("%Y-%Q".into()));
        assert_eq!(errors[2], ValidationError::EmptyLogDir);
    }

    fn prefix_errors(prefix: &str) -> Result<(), Vec<ValidationError>> {
        let mut config = LoggingConfig::default();
        config.viewer.prefix = prefix.into();
        validate_config(&config)
    }

    #[test]
    fn test_root_prefix_rejected() {
        assert!(matches!(
            prefix_errors("/").unwrap_err().as_slice(),
            [ValidationError::ViewerPrefix { prefix, .. }] if prefix == "/"
        ));
    }

    #[test]
    fn test_prefix_colliding_with_websocket_route_rejected() {
        let errors = prefix_errors(WS_PATH).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("WebSocket"), "{}", errors[0]);
    }

    #[test]
    fn test_prefix_with_route_syntax_rejected() {
        for prefix in ["/:logs", "/logs/*rest", "/{tab}", "/a}", "/a//b"] {
            assert!(
                matches!(
                    prefix_errors(prefix).unwrap_err().as_slice(),
                    [ValidationError::ViewerPrefix { .. }]
                ),
                "{prefix} accepted"
            );
        }
        assert_eq!(prefix_errors("/admin/logs"), Ok(()));
        assert_eq!(prefix_errors("/ws"), Ok(()));
    }

    #[test]
    fn test_validate_viewer_skips_bind_address() {
        let viewer = ViewerConfig {
            poll_interval_ms: 0,
            bind_address: "nowhere".into(),
            ..ViewerConfig::default()
        };
        assert_eq!(validate_viewer(&viewer), Err(vec![ValidationError::ZeroPollInterval]));
    }
}
