//! Support code for the `handview` binary
//!
//! Library events are forwarded to the `log` facade so `RUST_LOG` and
//! `env_logger` decide what reaches the terminal.

use hand_capture::config::{LogLevel as PreferenceLevel, RuntimeConfig};
use hand_capture::logging::{self, LogEvent, LogLevel, Logger, LoggingService};
use std::sync::Arc;

/// Target used for every forwarded record, so `RUST_LOG=hand_capture=debug` works
pub const LOG_TARGET: &str = "hand_capture";

/// Forwards capture events to the `log` crate
#[derive(Debug, Default)]
pub struct LogBridge;

impl LogBridge {
    pub fn level_for(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }

    /// `CODE message [at l:c] key=value ...`
    pub fn render(event: &LogEvent) -> String {
        let mut line = format!("{} {}", event.code, event.message);
        if let Some(location) = event.location {
            line.push_str(&format!(" at {}", location));
        }
        for (key, value) in &event.context {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        log::log!(target: LOG_TARGET, Self::level_for(event.level), "{}", Self::render(event));
    }
}

fn filter_for(level: PreferenceLevel) -> &'static str {
    match level {
        PreferenceLevel::Error => "error",
        PreferenceLevel::Warning => "warn",
        PreferenceLevel::Info => "info",
        PreferenceLevel::Debug => "debug",
    }
}

/// Install logging for the process. Structured output writes JSON lines from
/// the library's own logger; otherwise events go through `env_logger`.
pub fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;

    if config.logging.use_structured_logging {
        return logging::init_global_logging();
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_for(config.logging.min_log_level)),
    )
    .init();

    // The bridge forwards everything; env_logger does the filtering.
    let service = LoggingService::new(Arc::new(LogBridge), LogLevel::Debug);
    logging::init_global_logging_with_service(Arc::new(service))
}

/// Worker count for batch loads when none is given
pub fn default_threads() -> usize {
    num_cpus::get().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_capture::logging::codes;
    use hand_capture::utils::CellLocation;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogBridge::level_for(LogLevel::Error), log::Level::Error);
        assert_eq!(LogBridge::level_for(LogLevel::Warning), log::Level::Warn);
        assert_eq!(LogBridge::level_for(LogLevel::Debug), log::Level::Debug);
    }

    #[test]
    fn test_render() {
        let event = LogEvent::warning_with_code(codes::warnings::ROW_DROPPED, "Row dropped")
            .with_location(CellLocation::row(4))
            .with_context("columns", "1");
        assert_eq!(LogBridge::render(&event), "W023 Row dropped at 5:1 columns=1");
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(filter_for(PreferenceLevel::Warning), "warn");
        assert_eq!(filter_for(PreferenceLevel::Info), "info");
    }

    #[test]
    fn test_default_threads() {
        assert!(default_threads() >= 1);
    }
}
