#![deny(missing_docs)]
//! Logging for the summarizer crates.
//!
//! The `summarizer_*` macros go through the `log` facade, so library crates
//! never pick a backend. Binaries and tests install one with [`log_config`],
//! which keeps only records from the summarizer crates themselves; the HTTP
//! stack logs a great deal at debug level.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Prefix shared by the module paths of every summarizer crate.
pub const WORKSPACE_TARGET: &str = "summarizer";

/// Logs a trace-level message.
#[macro_export]
macro_rules! summarizer_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message. Submission starts and outcomes use this level.
#[macro_export]
macro_rules! summarizer_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! summarizer_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! summarizer_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! summarizer_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Backend configuration shared by the app and the tests: RFC 3339
/// timestamps, and only records whose target starts with [`WORKSPACE_TARGET`].
pub fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str(WORKSPACE_TARGET)
        .build()
}

/// Installs a terminal logger for tests. No-op when a logger is already set.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        log_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Shortens user-supplied text for inclusion in a log line.
///
/// Keeps at most `max_chars` characters, collapses newlines to spaces and
/// appends the total character count when anything was cut.
pub fn log_preview(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    let head: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if total > max_chars {
        format!("{head}... ({total} chars)")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::{initialize_for_tests, log_preview};

    #[test]
    fn test_logger_enables_info_and_tolerates_reinitialization() {
        initialize_for_tests();
        initialize_for_tests();
        assert!(log::max_level() >= log::LevelFilter::Info);
        summarizer_info!("logger ready for {}", "tests");
    }

    #[test]
    fn short_text_kept_as_is() {
        assert_eq!(log_preview("hello world", 32), "hello world");
    }

    #[test]
    fn long_text_is_cut_and_counted() {
        assert_eq!(log_preview("abcdef", 3), "abc... (6 chars)");
    }

    #[test]
    fn newlines_are_flattened() {
        assert_eq!(log_preview("a\nb\r\nc", 16), "a b  c");
    }

    #[test]
    fn cut_respects_char_boundaries() {
        assert_eq!(log_preview("ééé", 2), "éé... (3 chars)");
    }
}
