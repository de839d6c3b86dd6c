//! Logging utilities for the application
//!
//! Diagnostics go to stderr so listings written to stdout stay clean.

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Normal => "",
            LogLevel::Info => "info: ",
            LogLevel::Debug => "dbg: ",
        }
    }
}

/// Logger bound to a verbosity level
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    verbosity: u8,
}

impl Logger {
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn log(&self, msg: &str, level: LogLevel) {
        log(msg, self.verbosity, level);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }
}

/// Format a message for `level`, or `None` if `verbosity` is too low to show it
#[must_use]
pub fn render(msg: &str, verbosity: u8, level: LogLevel) -> Option<String> {
    (verbosity >= level as u8).then(|| format!("{}{}", level.prefix(), msg))
}

/// Log a message if the verbosity level is at least the specified level
///
/// # Arguments
///
/// * `msg` - The message to log
/// * `verbosity` - The current verbosity level (0 = normal, 1 = info, 2+ = debug)
/// * `level` - The minimum level required for this message to be logged
fn log(msg: &str, verbosity: u8, level: LogLevel) {
    if let Some(line) = render(msg, verbosity, level) {
        eprintln!("{line}");
    }
}

/// Log at debug level (verbose >= 2)
pub fn debug(msg: &str, verbosity: u8) {
    log(msg, verbosity, LogLevel::Debug);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_below_verbosity_are_suppressed() {
        assert_eq!(render("hidden", 0, LogLevel::Info), None);
        assert_eq!(render("hidden", 1, LogLevel::Debug), None);
    }

    #[test]
    fn messages_carry_level_prefix() {
        assert_eq!(render("plain", 0, LogLevel::Normal).as_deref(), Some("plain"));
        assert_eq!(render("hello", 1, LogLevel::Info).as_deref(), Some("info: hello"));
        assert_eq!(render("deep", 3, LogLevel::Debug).as_deref(), Some("dbg: deep"));
    }
}
