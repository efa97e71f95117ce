//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::LoggingConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::format::Level;

/// Optional TOML file read before environment overrides.
pub const ENV_CONFIG: &str = "LOGGER_MANAGER_CONFIG";
pub const ENV_LEVEL: &str = "LOGGER_MANAGER_LEVEL";
pub const ENV_FORMAT: &str = "LOGGER_MANAGER_FORMAT";
pub const ENV_TIME_FORMAT: &str = "LOGGER_MANAGER_TIME_FORMAT";
pub const ENV_LOG_DIR: &str = "LOGGER_MANAGER_LOG_DIR";
pub const ENV_TO_CONSOLE: &str = "LOGGER_MANAGER_TO_CONSOLE";
pub const ENV_TO_FILE: &str = "LOGGER_MANAGER_TO_FILE";
pub const ENV_CONSOLE_STREAM: &str = "LOGGER_MANAGER_CONSOLE_STREAM";
pub const ENV_ANSI: &str = "LOGGER_MANAGER_ANSI";
pub const ENV_VIEWER_PREFIX: &str = "LOGGER_MANAGER_VIEWER_PREFIX";
pub const ENV_VIEWER_TAIL_LINES: &str = "LOGGER_MANAGER_VIEWER_TAIL_LINES";
pub const ENV_VIEWER_POLL_MS: &str = "LOGGER_MANAGER_VIEWER_POLL_MS";
pub const ENV_BIND: &str = "LOGGER_MANAGER_BIND";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value `{value}` for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let config = read_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<LoggingConfig, ConfigError> {
    load_with(|var| std::env::var(var).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Starts from defaults, or from the TOML file named by
/// `LOGGER_MANAGER_CONFIG`, then applies each variable that is set, then
/// validates the result.
pub fn load_with<F>(lookup: F) -> Result<LoggingConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(ENV_CONFIG) {
        Some(path) => read_file(Path::new(&path))?,
        None => LoggingConfig::default(),
    };

    apply_env(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_file(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_env<F>(config: &mut LoggingConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_LEVEL) {
        config.level = parse_var(ENV_LEVEL, value, |v| v.parse::<Level>().map_err(|e| e.to_string()))?;
    }
    if let Some(value) = lookup(ENV_FORMAT) {
        config.format = value;
    }
    if let Some(value) = lookup(ENV_TIME_FORMAT) {
        config.time_format = value;
    }
    if let Some(value) = lookup(ENV_LOG_DIR) {
        config.log_dir = PathBuf::from(value);
    }
    if let Some(value) = lookup(ENV_TO_CONSOLE) {
        config.to_console = parse_var(ENV_TO_CONSOLE, value, parse_bool)?;
    }
    if let Some(value) = lookup(ENV_TO_FILE) {
        config.to_file = parse_var(ENV_TO_FILE, value, parse_bool)?;
    }
    if let Some(value) = lookup(ENV_CONSOLE_STREAM) {
        config.console_stream = parse_var(ENV_CONSOLE_STREAM, value, |v| v.parse())?;
    }
    if let Some(value) = lookup(ENV_ANSI) {
        config.ansi = parse_var(ENV_ANSI, value, parse_bool)?;
    }
    if let Some(value) = lookup(ENV_VIEWER_PREFIX) {
        config.viewer.prefix = value;
    }
    if let Some(value) = lookup(ENV_VIEWER_TAIL_LINES) {
        config.viewer.tail_lines =
            parse_var(ENV_VIEWER_TAIL_LINES, value, |v| v.trim().parse().map_err(|e| format!("{e}")))?;
    }
    if let Some(value) = lookup(ENV_VIEWER_POLL_MS) {
        config.viewer.poll_interval_ms =
            parse_var(ENV_VIEWER_POLL_MS, value, |v| v.trim().parse().map_err(|e| format!("{e}")))?;
    }
    if let Some(value) = lookup(ENV_BIND) {
        config.viewer.bind_address = value;
    }
    Ok(())
}

fn parse_var<T>(
    var: &'static str,
    value: String,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parse(&value).map_err(|reason| ConfigError::InvalidEnv { var, value, reason })
}

/// Parse a boolean flag. Anything outside the accepted spellings is an error.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err("expected one of 1/true/yes/y/on or 0/false/no/n/off".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = load_with(lookup(&[])).unwrap();
        assert_eq!(config.level, Level::Info);
        assert!(config.to_console);
        assert!(!config.to_file);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_env_overrides() {
        let config = load_with(lookup(&[
            (ENV_LEVEL, "warning"),
            (ENV_TO_CONSOLE, "off"),
            (ENV_TO_FILE, "Yes"),
            (ENV_LOG_DIR, "/var/log/app"),
            (ENV_FORMAT, "{level} {message}"),
            (ENV_CONSOLE_STREAM, "stderr"),
            (ENV_VIEWER_TAIL_LINES, "100"),
        ]))
        .unwrap();

        assert_eq!(config.level, Level::Warning);
        assert!(!config.to_console);
        assert!(config.to_file);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/app"));
        assert_eq!(config.format, "{level} {message}");
        assert_eq!(config.console_stream, crate::config::ConsoleStream::Stderr);
        assert_eq!(config.viewer.tail_lines, 100);
    }

    #[test]
    fn test_invalid_level_is_reported() {
        let err = load_with(lookup(&[(ENV_LEVEL, "LOUD")])).unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value, .. } => {
                assert_eq!(var, ENV_LEVEL);
                assert_eq!(value, "LOUD");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_bool_is_reported() {
        let err = load_with(lookup(&[(ENV_TO_FILE, "sometimes")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TO_FILE));
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_invalid_format_fails_validation() {
        let err = load_with(lookup(&[(ENV_FORMAT, "{when} {message}")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("when"));
    }

    #[test]
    fn test_toml_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(
            &path,
            r#"
level = "DEBUG"
to_file = true
log_dir = "var/logs"

[viewer]
prefix = "/logs"
"#,
        )
        .unwrap();

        let path_str = path.to_string_lossy().into_owned();
        let config = load_with(lookup(&[(ENV_CONFIG, path_str.as_str()), (ENV_LEVEL, "error")])).unwrap();

        assert_eq!(config.level, Level::Error);
        assert!(config.to_file);
        assert_eq!(config.log_dir, PathBuf::from("var/logs"));
        assert_eq!(config.viewer.prefix, "/logs");
        assert_eq!(config.viewer.tail_lines, 30);

        assert_eq!(load_config(&path).unwrap().level, Level::Debug);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_with(lookup(&[(ENV_CONFIG, "/nonexistent/logging.toml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_level_in_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "level = \"chatty\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
