//! Reading capture files from disk

mod processor;

use crate::config::runtime::FileProcessorPreferences;
use std::path::Path;

pub use processor::{
    human_readable_bytes, resolve_resource, FileMetadata, FileProcessingResult, FileProcessor,
    FileProcessorError, CSV_EXTENSION,
};

/// Read a capture with default preferences
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("capture.csv");
        fs::write(&file_path, "t_mono,t_wall,chirality\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_csv_extension: true,
            ..Default::default()
        };
        assert!(create_processor_from_preferences(&prefs).require_csv_extension);
    }
}
