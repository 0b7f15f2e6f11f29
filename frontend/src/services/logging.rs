use shared::LogLevel;
use std::cell::Cell;

thread_local! {
    static LEVEL: Cell<LogLevel> = Cell::new(LogLevel::Info);
}

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    /// Drop every message below `level`
    pub fn set_level(level: LogLevel) {
        LEVEL.with(|current| current.set(level));
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if level < LEVEL.with(Cell::get) {
            return;
        }

        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}
