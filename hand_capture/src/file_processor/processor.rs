//! Capture file reading with compile-time limits and logging

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

pub const CSV_EXTENSION: &str = "csv";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .csv, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::parsing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(path: &Path, error: &io::Error, action: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), error),
            },
        }
    }
}

/// Facts about a capture file gathered before and while reading it
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension, if any
    pub extension: Option<String>,
    /// Filled in once the content has been read
    pub line_count: usize,
    pub is_csv_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// Rough cost estimate: size in KB plus a tenth of the line count
    pub fn complexity_score(&self) -> f64 {
        self.size as f64 / 1024.0 + self.line_count as f64 * 0.1
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Bytes read per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.source.len() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// Reads capture files. Size and line limits are fixed at build time; the
/// fields here are runtime preferences.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_csv_extension: bool,
    pub reject_empty_files: bool,
    pub enable_performance_logging: bool,
    pub include_complexity_metrics: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_csv_extension: false,
            reject_empty_files: false,
            enable_performance_logging: true,
            include_complexity_metrics: false,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_csv_extension: prefs.require_csv_extension,
            reject_empty_files: prefs.reject_empty_files,
            enable_performance_logging: prefs.enable_performance_logging,
            include_complexity_metrics: prefs.include_complexity_metrics,
        }
    }

    pub fn with_csv_extension_required(mut self, required: bool) -> Self {
        self.require_csv_extension = required;
        self
    }

    pub fn with_empty_files_rejected(mut self, rejected: bool) -> Self {
        self.reject_empty_files = rejected;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_complexity_metrics(mut self, enabled: bool) -> Self {
        self.include_complexity_metrics = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    pub fn large_file_threshold() -> u64 {
        LARGE_FILE_THRESHOLD
    }

    /// Validate and read a capture file
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let display = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata)?;

        log_success!(
            codes::success::FILE_VALIDATION_PASSED,
            "Capture file passed validation",
            "file" => display,
            "size_bytes" => metadata.size
        );

        let source = self.read_file(&path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT
            );
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        let metadata = &result.metadata;
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if !self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Capture file read",
                "lines" => metadata.line_count,
                "size_bytes" => metadata.size
            );
            return;
        }

        if self.include_complexity_metrics {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Capture file read with full metrics",
                "lines" => metadata.line_count,
                "size_human" => metadata.human_readable_size(),
                "duration_ms" => duration_ms,
                "bytes_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => metadata.is_large_file(),
                "complexity_score" => format!("{:.2}", metadata.complexity_score())
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Capture file read with performance metrics",
                "lines" => metadata.line_count,
                "size_human" => metadata.human_readable_size(),
                "duration_ms" => duration_ms,
                "bytes_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => metadata.is_large_file()
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let display = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: display };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display.clone(),
            };
            log_error!(error.error_code(), "CSV file not found.", "path" => display);
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display);
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(file_path, &e, "resolve path");
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => display,
                "io_error" => e
            );
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, &e, "read metadata for");
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e
            );
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let is_csv_file = extension.as_deref() == Some(CSV_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_csv_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_csv" => is_csv_file,
            "is_large_file" => file_metadata.is_large_file()
        );

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds maximum size limit",
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable_bytes(MAX_FILE_SIZE)
            );
            return Err(error);
        }

        if metadata.size == 0 {
            if self.reject_empty_files {
                let error = FileProcessorError::EmptyFile {
                    path: metadata.path.display().to_string(),
                };
                log_error!(error.error_code(), "File is empty");
                return Err(error);
            }
            log_debug!("File is empty, loading it as a capture without frames");
        }

        if self.require_csv_extension && !metadata.is_csv_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .csv extension",
                "extension" => metadata.extension.as_deref().unwrap_or("none")
            );
            return Err(error);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, &e, "read");
            log_error!(error.error_code(), "I/O error reading file", "io_error" => e);
            error
        })?;

        String::from_utf8(bytes).map_err(|e| {
            let error = FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                "valid_up_to" => e.utf8_error().valid_up_to()
            );
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a bundled resource name to `<dir>/<name>.csv`
pub fn resolve_resource(resource_dir: &Path, name: &str) -> PathBuf {
    resource_dir.join(format!("{}.{}", name, CSV_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    const SAMPLE: &str = "t_mono,t_wall,chirality\n1.0,2.0,left\n";

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("session.csv");
        fs::write(&file_path, SAMPLE).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.source, SAMPLE);
        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_csv_file);
        assert_eq!(result.metadata.file_name(), "session.csv");
        assert_eq!(result.char_count(), SAMPLE.len());
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file(Path::new("nonexistent.csv"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_path() {
        let result = FileProcessor::new().process_file(Path::new(""));
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_file_reads_as_empty_source() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.csv");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source, "");
        assert_eq!(result.metadata.size, 0);
        assert_eq!(result.metadata.line_count, 0);

        let strict = FileProcessor::new().with_empty_files_rejected(true);
        assert_matches!(
            strict.process_file(&file_path),
            Err(FileProcessorError::EmptyFile { .. })
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("session.txt");
        fs::write(&file_path, SAMPLE).unwrap();

        assert!(FileProcessor::new().process_file(&file_path).is_ok());

        let strict = FileProcessor::new().with_csv_extension_required(true);
        assert_matches!(
            strict.process_file(&file_path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_uppercase_extension_counts_as_csv() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("SESSION.CSV");
        fs::write(&file_path, SAMPLE).unwrap();

        let processor = FileProcessor::new().with_csv_extension_required(true);
        assert!(processor.process_file(&file_path).unwrap().metadata.is_csv_file);
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.csv");
        fs::write(&file_path, [0x74, 0x2c, 0xff, 0xfe, 0x0a]).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("long.csv");
        fs::write(&file_path, "1\n".repeat(MAX_LINE_COUNT + 1)).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::TooManyLines { lines, max_lines })
                if lines == MAX_LINE_COUNT + 1 && max_lines == MAX_LINE_COUNT
        );
    }

    #[test]
    fn test_size_limit() {
        let metadata = FileMetadata {
            path: PathBuf::from("huge.csv"),
            size: MAX_FILE_SIZE + 1,
            extension: Some("csv".to_string()),
            line_count: 0,
            is_csv_file: true,
            modified: None,
        };

        let result = FileProcessor::new().validate_file(&metadata);
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size == MAX_FILE_SIZE + 1 && max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_human_readable_bytes() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(2048), "2.00 KB");
        assert_eq!(human_readable_bytes(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_resolve_resource() {
        let path = resolve_resource(Path::new("/bundle"), "hand_capture");
        assert_eq!(path, PathBuf::from("/bundle/hand_capture.csv"));
    }

    #[test]
    fn test_error_classification() {
        let error = FileProcessorError::FileNotFound {
            path: "left.csv".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert!(error.requires_halt());
        assert!(!error.is_recoverable());
        assert_eq!(error.to_string(), "CSV file not found: left.csv");

        let lines = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(lines.error_code().as_str(), "E023");
        assert_eq!(lines.severity(), "High");
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_csv_extension: true,
            reject_empty_files: true,
            enable_performance_logging: false,
            include_complexity_metrics: true,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_csv_extension);
        assert!(processor.reject_empty_files);
        assert!(!processor.enable_performance_logging);
        assert!(processor.include_complexity_metrics);
    }
}
