//! Route `tracing` events to the browser console

use std::io::{self, Write};

use tracing::{Level, Metadata};
use wasm_bindgen::JsValue;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hands out one [`ConsoleWriter`] per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

/// Buffers a formatted event and flushes it to `console` on drop
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(message) = console_message(&self.buffer) else {
            return;
        };
        let value = JsValue::from_str(&message);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            _ => web_sys::console::debug_1(&value),
        }
    }
}

/// Formatted event text without the trailing newline, `None` when blank
fn console_message(buffer: &[u8]) -> Option<String> {
    let message = String::from_utf8_lossy(buffer);
    let message = message.trim_end();
    (!message.is_empty()).then(|| message.to_string())
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the console subscriber. Safe to call more than once.
pub fn init() {
    // No system clock on wasm32-unknown-unknown, so no timestamps
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleMakeWriter),
        )
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .try_init();
    if let Err(e) = result {
        web_sys::console::warn_1(&format!("Logging already initialized: {}", e).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_message_trims_newline() {
        assert_eq!(
            console_message(b" ERROR faq_core::app: error loading data\n"),
            Some(" ERROR faq_core::app: error loading data".to_string())
        );
        assert_eq!(console_message(b"\n"), None);
    }

    #[test]
    fn test_writer_buffers_event_text() {
        let mut writer = ConsoleMakeWriter.make_writer();
        write!(writer, "error parsing file").unwrap();
        assert_eq!(writer.level, Level::INFO);
        assert_eq!(writer.buffer, b"error parsing file");
        // Nothing to send, so drop stays off the console
        writer.buffer.clear();
    }
}
