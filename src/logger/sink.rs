//! Console destinations.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Where a logger's console output goes.
#[derive(Clone, Debug, Default)]
pub enum ConsoleSink {
    #[default]
    Stdout,
    Stderr,
    /// In-memory buffer, used to inspect output without touching the terminal.
    Capture(CaptureBuffer),
}

impl<'a> MakeWriter<'a> for ConsoleSink {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            ConsoleSink::Stdout => Box::new(io::stdout()),
            ConsoleSink::Stderr => Box::new(io::stderr()),
            ConsoleSink::Capture(buffer) => Box::new(buffer.make_writer()),
        }
    }
}

/// Shared, cloneable byte buffer implementing [`MakeWriter`].
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic while holding the lock leaves plain bytes behind; keep going.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Writer handed out by [`CaptureBuffer`] for a single event.
pub struct CaptureWriter<'a> {
    buffer: &'a CaptureBuffer,
}

impl Write for CaptureWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureBuffer {
    type Writer = CaptureWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter { buffer: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_buffer_collects_writes() {
        let buffer = CaptureBuffer::new();
        let sink = ConsoleSink::Capture(buffer.clone());

        sink.make_writer().write_all(b"first\n").unwrap();
        sink.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(buffer.lines(), vec!["first", "second"]);
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }
}
