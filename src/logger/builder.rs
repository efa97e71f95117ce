//! Assembly of a logger's `tracing` pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{Dispatch, Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::error::LoggerError;
use crate::format::{is_critical, Level, LineFormat, TemplateFormatter};
use crate::logger::handle::Logger;
use crate::logger::sink::ConsoleSink;

/// Fully resolved settings for one logger.
#[derive(Debug, Clone)]
pub struct LoggerSpec {
    pub name: String,
    pub level: Level,
    pub format: Arc<LineFormat>,
    pub time_format: String,
    pub console: Option<ConsoleSink>,
    pub ansi: bool,
    pub file: Option<PathBuf>,
}

impl LoggerSpec {
    /// Open outputs and build the handle.
    ///
    /// The file, if any, is opened in append mode before this returns, so an
    /// unwritable destination fails here rather than on the first message.
    pub fn build(self) -> Result<Logger, LoggerError> {
        let formatter = TemplateFormatter::new(Some(&self.name), self.format, &self.time_format);

        let file_writer = match &self.file {
            Some(path) => Some(open_append(path)?),
            None => None,
        };

        let to_console = self.console.is_some();
        let console_layer = self.console.map(|sink| {
            tracing_subscriber::fmt::layer()
                .event_format(formatter.clone())
                .with_writer(sink)
                .with_ansi(self.ansi)
        });
        let file_layer = file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .event_format(formatter.clone())
                .with_writer(writer)
                .with_ansi(false)
        });

        let subscriber = tracing_subscriber::registry()
            .with(self.level.to_level_filter())
            .with((self.level == Level::Critical).then_some(CriticalOnly))
            .with(console_layer)
            .with(file_layer);

        Ok(Logger::new(
            self.name,
            self.level,
            self.file,
            to_console,
            Dispatch::new(subscriber),
        ))
    }
}

/// Drops events without `critical = true`.
///
/// `tracing` has no level above `ERROR`, so a `Critical` threshold needs
/// this on top of the `ERROR` level filter.
struct CriticalOnly;

impl<S: Subscriber> Layer<S> for CriticalOnly {
    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        is_critical(event)
    }
}

/// Open `path` for appending, creating its directory first.
fn open_append(path: &Path) -> Result<RollingFileAppender, LoggerError> {
    let (dir, file_name) = match (path.parent(), path.file_name()) {
        (Some(dir), Some(file_name)) => (dir, file_name.to_string_lossy().into_owned()),
        _ => return Err(LoggerError::InvalidFileName(path.display().to_string())),
    };

    std::fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|source| LoggerError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
