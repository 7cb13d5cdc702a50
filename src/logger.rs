use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use crate::serial::SERIAL1;

/// Sends `log` records to COM1, one line each.
struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut serial = SERIAL1.lock();
        let _ = writeln!(serial, "[{:<5}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Bring up COM1 and install the serial logger.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    SERIAL1.lock().init();
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
