//! Rendering of `tracing` events through a [`LineFormat`].

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::format::level::Level;
use crate::format::template::{LineFormat, Segment};

/// Field name that promotes an `ERROR` event to `CRITICAL`.
pub const CRITICAL_FIELD: &str = "critical";

/// `FormatEvent` implementation shared by every output of a logger.
///
/// When `name` is `None` (the process-wide subscriber) the event target is
/// rendered in the `{name}` slot.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    name: Option<Arc<str>>,
    format: Arc<LineFormat>,
    time_format: Arc<str>,
}

impl TemplateFormatter {
    pub fn new(name: Option<&str>, format: Arc<LineFormat>, time_format: &str) -> Self {
        Self {
            name: name.map(Arc::from),
            format,
            time_format: Arc::from(time_format),
        }
    }

    fn write_level(&self, writer: &mut Writer<'_>, level: Level) -> fmt::Result {
        if !writer.has_ansi_escapes() {
            return writer.write_str(level.as_str());
        }
        let color = match level {
            Level::Debug => "\x1b[34m",
            Level::Info => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
            Level::Critical => "\x1b[1;31m",
        };
        write!(writer, "{}{}\x1b[0m", color, level.as_str())
    }
}

impl<S, N> FormatEvent<S, N> for TemplateFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        for segment in self.format.segments() {
            match segment {
                Segment::Literal(text) => writer.write_str(text)?,
                Segment::Time => {
                    let now = chrono::Local::now();
                    write!(writer, "{}", now.format(&self.time_format))?;
                }
                Segment::Name => match &self.name {
                    Some(name) => writer.write_str(name)?,
                    None => writer.write_str(metadata.target())?,
                },
                Segment::Level => {
                    let level = Level::from_tracing(metadata.level(), visitor.critical);
                    self.write_level(&mut writer, level)?;
                }
                Segment::Message => writer.write_str(&visitor.message)?,
                Segment::Target => writer.write_str(metadata.target())?,
                Segment::Fields => writer.write_str(&visitor.fields)?,
                Segment::Thread => {
                    let thread = std::thread::current();
                    match thread.name() {
                        Some(name) => writer.write_str(name)?,
                        None => write!(writer, "{:?}", thread.id())?,
                    }
                }
            }
        }

        writeln!(writer)
    }
}

/// Whether `event` carries `critical = true`.
pub fn is_critical(event: &Event<'_>) -> bool {
    let mut flag = CriticalFlag(false);
    event.record(&mut flag);
    flag.0
}

struct CriticalFlag(bool);

impl Visit for CriticalFlag {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.0 = value;
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

/// Splits an event into its message, the critical flag, and the remaining
/// fields rendered as `key=value` pairs.
#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: String,
    critical: bool,
}

impl FieldCollector {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }
}

impl Visit for FieldCollector {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.critical = value;
        } else {
            self.push_field(field, format_args!("{}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field, format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field, format_args!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::CaptureBuffer;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(template: &str, name: Option<&str>, f: impl FnOnce()) -> String {
        let buffer = CaptureBuffer::new();
        let formatter = TemplateFormatter::new(
            name,
            Arc::new(LineFormat::parse(template).unwrap()),
            "%H:%M:%S",
        );
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(formatter)
                .with_writer(buffer.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_renders_template() {
        let out = capture("{name}|{level}|{message}", Some("db"), || {
            tracing::warn!("pool exhausted");
        });
        assert_eq!(out, "db|WARNING|pool exhausted\n");
    }

    #[test]
    fn test_critical_flag_and_fields() {
        let out = capture("{level} {message} [{fields}]", Some("app"), || {
            tracing::error!(critical = true, attempt = 3, user = "bob", "giving up");
        });
        assert_eq!(out, "CRITICAL giving up [attempt=3 user=bob]\n");
    }

    #[test]
    fn test_is_critical_reads_flag() {
        struct FlagRecorder(Arc<std::sync::Mutex<Vec<bool>>>);
        impl<S: Subscriber> tracing_subscriber::Layer<S> for FlagRecorder {
            fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
                self.0.lock().unwrap().push(is_critical(event));
            }
        }

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(FlagRecorder(seen.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("plain");
            tracing::error!(critical = true, "flagged");
            tracing::error!(critical = false, "unflagged");
        });
        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_unnamed_formatter_uses_target() {
        let out = capture("{name}: {message}", None, || {
            tracing::info!(target: "worker", "started");
        });
        assert_eq!(out, "worker: started\n");
    }

    #[test]
    fn test_time_slot_is_rendered() {
        let out = capture("{time} {message}", Some("app"), || {
            tracing::info!("tick");
        });
        let (time, rest) = out.split_once(' ').unwrap();
        assert_eq!(time.len(), "00:00:00".len());
        assert_eq!(time.matches(':').count(), 2);
        assert_eq!(rest, "tick\n");
    }
}
