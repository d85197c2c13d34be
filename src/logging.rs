//! `tracing` output routed to the browser console.

use std::io;
use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

static INIT: Once = Once::new();

/// Installs the global subscriber once. Later calls are ignored.
pub fn init(level: &str) {
    let filter = parse_level(level);
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(ConsoleWriter)
            .with_max_level(filter)
            .with_target(false)
            .without_time()
            .finish();
        // Another subscriber may already be set by the host page.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Unknown names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(*meta.level())
    }
}

/// Browser console method an event is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Log,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            _ => ConsoleMethod::Log,
        }
    }
}

/// Buffers one formatted event and emits it on drop.
pub struct ConsoleLine {
    method: ConsoleMethod,
    buf: Vec<u8>,
}

impl ConsoleLine {
    fn new(level: Level) -> Self {
        Self { method: level.into(), buf: Vec::new() }
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            let value = wasm_bindgen::JsValue::from_str(line);
            match self.method {
                ConsoleMethod::Error => web_sys::console::error_1(&value),
                ConsoleMethod::Warn => web_sys::console::warn_1(&value),
                ConsoleMethod::Log => web_sys::console::log_1(&value),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{line}");
    }
}
