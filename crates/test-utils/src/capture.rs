use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use confbox::ConfigLoader;
use tracing::Dispatch;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;

/// Log lines written by a capturing dispatcher.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lines containing `needle`.
    pub fn matching(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect()
    }
}

pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}

/// A dispatcher that records every event (all levels, no colours, no
/// timestamps) into the returned buffer.
///
/// Hand it to `ConfigLoader::with_dispatch`; nothing global is touched.
pub fn capturing_dispatch() -> (Dispatch, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    (Dispatch::new(subscriber), logs)
}

/// A real-filesystem loader whose events land in the returned buffer.
pub fn capturing_loader() -> (ConfigLoader, CapturedLogs) {
    let (dispatch, logs) = capturing_dispatch();
    (ConfigLoader::new().with_dispatch(dispatch), logs)
}
