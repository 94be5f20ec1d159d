//! Log codes and their classification metadata
//!
//! Every error, warning and success event carries a [`Code`]. The registry below
//! maps each code to its category, severity and the action a user should take.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Code attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata registered for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Reading the capture file from disk
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Turning CSV rows into frames
pub mod parsing {
    use super::Code;

    pub const INVALID_NUMBER: Code = Code::new("E020");
    pub const TOO_MANY_FRAMES: Code = Code::new("E022");
    pub const TOO_MANY_LINES: Code = Code::new("E023");
}

pub mod batch {
    use super::Code;

    pub const DISCOVERY_FAILED: Code = Code::new("E030");
    pub const WORKER_FAILED: Code = Code::new("E031");
    pub const EXPORT_FAILED: Code = Code::new("E032");
}

/// Conditions worth reporting that never stop a load
pub mod warnings {
    use super::Code;

    pub const HEADER_WIDTH_MISMATCH: Code = Code::new("W020");
    pub const INCOMPLETE_FRAME: Code = Code::new("W021");
    pub const FIELD_DEFAULTED: Code = Code::new("W022");
    pub const ROW_DROPPED: Code = Code::new("W023");
    pub const EXTRA_COLUMNS_IGNORED: Code = Code::new("W024");
    pub const BATCH_LIMIT_REACHED: Code = Code::new("W030");
    pub const FAIL_FAST_STOP: Code = Code::new("W031");
}

pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");
    pub const PARSING_COMPLETE: Code = Code::new("I020");
    pub const BATCH_COMPLETE: Code = Code::new("I030");
    pub const EXPORT_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

type Entry = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// code, category, severity, recoverable, requires_halt, description, action
const REGISTRY_ENTRIES: &[Entry] = &[
    (
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the capture that triggered it",
    ),
    (
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failure",
        "Check the runtime configuration and environment variables",
    ),
    (
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the TOML configuration file or remove it to use defaults",
    ),
    (
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Capture file not found at specified path",
        "Check the path or resource name and resource directory",
    ),
    (
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File does not have a .csv extension",
        "Rename the capture with a .csv extension or disable the extension check",
    ),
    (
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds maximum size limit",
        "Split the capture or rebuild with a larger max_file_size",
    ),
    (
        "E008",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Capture file is empty",
        "Re-export the capture from the recording device",
    ),
    (
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Permission denied accessing file",
        "Check file permissions and user access rights",
    ),
    (
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File is not valid UTF-8",
        "Re-export the capture as UTF-8 text",
    ),
    (
        "E011",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "I/O error while reading the capture",
        "Retry the operation and check the storage device",
    ),
    (
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Invalid file path",
        "Provide a path to a regular file",
    ),
    (
        "E020",
        "Parsing",
        Severity::Medium,
        true,
        false,
        "Numeric field could not be parsed",
        "Fix the field or load without strict number checking",
    ),
    (
        "E022",
        "Parsing",
        Severity::High,
        false,
        true,
        "Capture has more frames than allowed",
        "Split the capture or rebuild with a larger max_frames",
    ),
    (
        "E023",
        "Parsing",
        Severity::High,
        false,
        true,
        "Capture has more lines than allowed",
        "Split the capture or rebuild with a larger max_line_count",
    ),
    (
        "E030",
        "Batch",
        Severity::Medium,
        false,
        true,
        "Capture discovery failed",
        "Check that the directory exists and is readable",
    ),
    (
        "E031",
        "Batch",
        Severity::High,
        false,
        true,
        "Batch worker thread failed",
        "Retry with --sequential to isolate the failing capture",
    ),
    (
        "E032",
        "Export",
        Severity::Medium,
        true,
        false,
        "JSON export could not be written",
        "Check the output path and available disk space",
    ),
    (
        "W020",
        "Parsing",
        Severity::Low,
        true,
        false,
        "Header width differs from a full capture row",
        "Verify the exporter writes all 26 joints",
    ),
    (
        "W021",
        "Parsing",
        Severity::Low,
        true,
        false,
        "Frame is missing trailing joints",
        "Verify the capture rows are not truncated",
    ),
    (
        "W022",
        "Parsing",
        Severity::Low,
        true,
        false,
        "Numeric field defaulted to zero",
        "Inspect the capture for non-numeric values",
    ),
    (
        "W023",
        "Parsing",
        Severity::Low,
        true,
        false,
        "Row dropped for having fewer than two columns",
        "No action needed for blank lines",
    ),
    (
        "W024",
        "Parsing",
        Severity::Low,
        true,
        false,
        "Columns past the last joint were ignored",
        "Check the delimiter used by the exporter",
    ),
    (
        "W030",
        "Batch",
        Severity::Low,
        true,
        false,
        "Directory holds more captures than the batch limit",
        "Pass --limit or split the directory",
    ),
    (
        "W031",
        "Batch",
        Severity::Low,
        true,
        false,
        "Batch stopped at the first failed capture",
        "Fix the failing capture or run without --fail-fast",
    ),
    (
        "I001",
        "Success",
        Severity::Low,
        true,
        false,
        "Operation completed successfully",
        "No action needed",
    ),
    (
        "I004",
        "Success",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "No action needed",
    ),
    (
        "I006",
        "Success",
        Severity::Low,
        true,
        false,
        "Capture file read successfully",
        "Continue to parsing",
    ),
    (
        "I007",
        "Success",
        Severity::Low,
        true,
        false,
        "Capture file passed validation",
        "Continue to reading",
    ),
    (
        "I020",
        "Success",
        Severity::Low,
        true,
        false,
        "Capture parsed into frames",
        "No action needed",
    ),
    (
        "I030",
        "Success",
        Severity::Low,
        true,
        false,
        "Batch load completed",
        "No action needed",
    ),
    (
        "I040",
        "Success",
        Severity::Low,
        true,
        false,
        "JSON export written",
        "No action needed",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Whether an error with this code stops the current capture from loading
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
