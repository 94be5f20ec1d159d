//! Global logging for capture loading
//!
//! A single [`LoggingService`] is installed for the process. Events raised while
//! a file context is active are tagged with that file and collected per file so
//! a batch run can end with a cargo-style summary.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod service;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the logger chosen by the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(service::create_configured_service()))
}

/// Install a caller-provided service (the CLI bridge, or a memory logger in tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    let _ = GLOBAL_ERROR_COLLECTOR.set(Arc::new(ErrorCollector::new()));

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

/// Whether debug events would reach the installed logger
pub fn debug_enabled() -> bool {
    try_get_global_logger().is_some_and(|logger| logger.should_log(LogLevel::Debug))
}

// ============================================================================
// FILE CONTEXT
// ============================================================================

pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    let context = FileProcessingContext::new(file_path, file_id);

    if let Some(collector) = try_get_global_error_collector() {
        collector.record_file_context(context.clone());
    }

    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some(context));
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = None);
}

/// Run `f` with events tagged as belonging to `file_path`
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_file_context();
    set_file_context(file_path, file_id);
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Tag an event with the current file, log it, and collect it if it is a
/// warning or error. Used by the logging macros.
pub fn dispatch(mut event: LogEvent) {
    let file_ctx = get_current_file_context();

    if let Some(ctx) = &file_ctx {
        event = event
            .with_context("file", &ctx.file_path.display().to_string())
            .with_context("file_id", &ctx.file_id.to_string());
    }

    let collect = event.is_error() || event.is_warning();

    match (file_ctx, collect) {
        (Some(ctx), true) => {
            if let Some(logger) = try_get_global_logger() {
                logger.log_event(event.clone());
            }
            if let Some(collector) = try_get_global_error_collector() {
                collector.record_event(&ctx.file_path, event);
            }
        }
        _ => {
            if let Some(logger) = try_get_global_logger() {
                logger.log_event(event);
            }
        }
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_error_collector()
        .map(|collector| collector.get_summary())
        .unwrap_or_default()
}

pub fn get_file_errors(file_path: &Path) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_file_errors(file_path))
        .unwrap_or_default()
}

/// Cargo-style report of everything collected so far, if anything was
pub fn cargo_style_summary() -> Option<String> {
    let collector = try_get_global_error_collector()?;
    if collector.total_event_count() == 0 {
        return None;
    }
    Some(collector::format_cargo_style_errors(collector))
}

pub fn print_cargo_style_summary() {
    if !config::use_cargo_style_output() {
        return;
    }
    if let Some(summary) = cargo_style_summary() {
        eprintln!("{}", summary);
    }
}

pub fn clear_error_collection() {
    if let Some(collector) = try_get_global_error_collector() {
        collector.clear();
    }
}

/// Log through the global logger, or stderr when none is installed
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_error(code, message),
        None => eprintln!("[ERROR] {} - {}", code.as_str(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("left.csv");

        set_file_context(file_path.clone(), 1);
        assert_eq!(get_current_file_context().unwrap().file_path, file_path);

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context_restores_previous() {
        let outer = PathBuf::from("outer.csv");
        let inner = PathBuf::from("inner.csv");

        with_file_context(outer.clone(), 0, || {
            let value = with_file_context(inner.clone(), 1, || {
                assert_eq!(get_current_file_context().unwrap().file_path, inner);
                7
            });
            assert_eq!(value, 7);
            assert_eq!(get_current_file_context().unwrap().file_path, outer);
        });

        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_safe_logging_without_logger() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
