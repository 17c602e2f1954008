//! `log` backend writing to the browser console.
//!
//! The core reports alignment adjustments and rejected rectangles through
//! `log::warn!`. Installing this logger routes them to `console.warn` so
//! they show up in the devtools next to the page's own output.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&msg),
            Level::Warn => console::warn_1(&msg),
            Level::Info => console::info_1(&msg),
            Level::Debug | Level::Trace => console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    // set_logger fails if a logger is already installed, which is fine
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Parse a level name, falling back to `Warn` for anything unknown.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    install(parse_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" INFO "), LevelFilter::Info);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Warn);
    }
}
