// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid TOML in configuration file {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require a .csv extension
    pub require_csv_extension: bool,

    /// Whether a zero-byte file is an error instead of an empty capture
    pub reject_empty_files: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,

    /// Whether to include complexity scores in output
    pub include_complexity_metrics: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_csv_extension: env::var(env_vars::REQUIRE_CSV_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            reject_empty_files: env::var(env_vars::REJECT_EMPTY_FILES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_complexity_metrics: env::var(env_vars::INCLUDE_COMPLEXITY_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Remove a trailing carriage return from every row. Off by default, so
    /// the last field of a CRLF row fails to parse and reads as zero.
    pub strip_carriage_returns: bool,

    /// Trim surrounding whitespace from fields before parsing
    pub trim_fields: bool,

    /// Reject unparsable numeric fields instead of substituting 0.0
    pub strict_numbers: bool,

    /// Log a warning when the header width differs from a full row
    pub warn_on_header_mismatch: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            strip_carriage_returns: env::var(env_vars::PARSER_STRIP_CARRIAGE_RETURNS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            trim_fields: env::var(env_vars::PARSER_TRIM_FIELDS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            strict_numbers: env::var(env_vars::PARSER_STRICT_NUMBERS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            warn_on_header_mismatch: env::var(env_vars::PARSER_WARN_ON_HEADER_MISMATCH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchPreferences {
    /// Descend into subdirectories when discovering captures
    pub recursive: bool,

    /// Stop at the first capture that fails to load
    pub fail_fast: bool,

    /// Print per-file progress lines
    pub progress_reporting: bool,
}

impl Default for BatchPreferences {
    fn default() -> Self {
        Self {
            recursive: env::var(env_vars::BATCH_RECURSIVE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            fail_fast: env::var(env_vars::BATCH_FAIL_FAST)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            progress_reporting: env::var(env_vars::BATCH_PROGRESS_REPORTING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to print the cargo-style summary after a run
    pub enable_cargo_style_output: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var(env_vars::LOGGING_LOG_PERFORMANCE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub parser: ParserPreferences,
    pub batch: BatchPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from a TOML file. Sections and keys left out of the
    /// file fall back to their environment-derived defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_CSV_EXTENSION: &str = "HAND_CAPTURE_REQUIRE_CSV_EXTENSION";
    pub const REJECT_EMPTY_FILES: &str = "HAND_CAPTURE_REJECT_EMPTY_FILES";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "HAND_CAPTURE_ENABLE_PERFORMANCE_LOGGING";
    pub const INCLUDE_COMPLEXITY_METRICS: &str = "HAND_CAPTURE_INCLUDE_COMPLEXITY_METRICS";

    // Parser
    pub const PARSER_STRIP_CARRIAGE_RETURNS: &str = "HAND_CAPTURE_PARSER_STRIP_CR";
    pub const PARSER_TRIM_FIELDS: &str = "HAND_CAPTURE_PARSER_TRIM_FIELDS";
    pub const PARSER_STRICT_NUMBERS: &str = "HAND_CAPTURE_PARSER_STRICT_NUMBERS";
    pub const PARSER_WARN_ON_HEADER_MISMATCH: &str = "HAND_CAPTURE_PARSER_WARN_HEADER";

    // Batch
    pub const BATCH_RECURSIVE: &str = "HAND_CAPTURE_BATCH_RECURSIVE";
    pub const BATCH_FAIL_FAST: &str = "HAND_CAPTURE_BATCH_FAIL_FAST";
    pub const BATCH_PROGRESS_REPORTING: &str = "HAND_CAPTURE_BATCH_PROGRESS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "HAND_CAPTURE_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "HAND_CAPTURE_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "HAND_CAPTURE_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "HAND_CAPTURE_LOGGING_CARGO_STYLE";
}
