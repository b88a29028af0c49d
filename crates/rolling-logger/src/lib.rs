//! Rolling Logger
//!
//! Installs a `tracing` subscriber whose output is kept in a fixed-size ring
//! buffer of recent lines and mirrored to the browser console (wasm32) or to
//! stderr (native). The buffer can be read back for a diagnostics panel.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 500;

static GLOBAL: OnceLock<RingBuffer> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Shared circular buffer of formatted log lines
#[derive(Clone, Debug)]
pub struct RingBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
    echo: bool,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
            echo: false,
        }
    }

    /// Also forward every line to the console
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn push(&self, line: &str) {
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        if self.echo {
            echo(line);
        }
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn echo(line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if line.contains("ERROR") {
        web_sys::console::error_1(&value);
    } else if line.contains("WARN") {
        web_sys::console::warn_1(&value);
    } else {
        web_sys::console::log_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(line: &str) {
    eprintln!("{line}");
}

/// Per-event writer; one formatted event may arrive in several writes
pub struct LineWriter {
    buffer: RingBuffer,
    pending: Vec<u8>,
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).into_owned();
            for line in text.lines() {
                self.buffer.push(line);
            }
            self.pending.clear();
        }
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

impl<'a> MakeWriter<'a> for RingBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter { buffer: self.clone(), pending: Vec::new() }
    }
}

/// Build (without installing) the subscriber used by `init_logger`
pub fn subscriber(
    buffer: RingBuffer,
    max_level: Level,
) -> impl tracing::Subscriber + Send + Sync {
    let builder = tracing_subscriber::fmt()
        .with_writer(buffer)
        .with_ansi(false)
        .with_max_level(max_level)
        .with_target(true);

    // SystemTime is unavailable in the browser
    #[cfg(target_arch = "wasm32")]
    let subscriber = builder.without_time().finish();
    #[cfg(not(target_arch = "wasm32"))]
    let subscriber = builder.with_timer(LocalTime).finish();

    subscriber
}

#[cfg(not(target_arch = "wasm32"))]
struct LocalTime;

#[cfg(not(target_arch = "wasm32"))]
impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install the global subscriber for `app_name`. Call once at startup.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), LoggerError> {
    let buffer = RingBuffer::new(DEFAULT_CAPACITY).echoing();
    GLOBAL
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::subscriber::set_global_default(subscriber(buffer, max_level))
        .map_err(|e| LoggerError::Install(e.to_string()))?;
    tracing::info!(app = app_name, "logging started");
    Ok(())
}

/// Recent lines from the global logger (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    GLOBAL.get().map(RingBuffer::lines).unwrap_or_default()
}
