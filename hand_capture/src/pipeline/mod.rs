//! Loading a single capture: read the file, then parse it

mod error;
mod result;
mod summary;

pub use error::PipelineError;
pub use result::CaptureResult;
pub use summary::CaptureSummary;

use crate::capture::{CaptureParser, HandFrame};
use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::logging;
use std::path::Path;
use std::time::Instant;

/// Load a capture with default preferences
pub fn load_capture(file_path: &Path) -> Result<CaptureResult, PipelineError> {
    load_capture_with_preferences(file_path, &RuntimeConfig::default())
}

pub fn load_capture_with_preferences(
    file_path: &Path,
    config: &RuntimeConfig,
) -> Result<CaptureResult, PipelineError> {
    load_capture_in_context(file_path, 0, config)
}

/// Load a capture with every event tagged by `file_id`. Batch workers pass
/// their file index here.
pub(crate) fn load_capture_in_context(
    file_path: &Path,
    file_id: usize,
    config: &RuntimeConfig,
) -> Result<CaptureResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        log_info!("Loading capture", "file" => file_path.display());

        let processor = FileProcessor::from_preferences(&config.file_processor);
        let file_result = processor.process_file(file_path)?;

        let mut parser = CaptureParser::from_preferences(&config.parser);
        let frames = parser.parse(&file_result.source)?;

        let result = CaptureResult::new(
            frames,
            file_result.metadata,
            parser.metrics().clone(),
            start_time.elapsed(),
        );

        result.log_success();

        Ok(result)
    })
}

/// Load a capture, logging any failure and falling back to no frames
pub fn load_frames_or_empty(file_path: &Path) -> Vec<HandFrame> {
    match load_capture(file_path) {
        Ok(result) => result.into_frames(),
        Err(e) => {
            log_error!(e.error_code(), "Error loading CSV file",
                "file" => file_path.display(),
                "error" => e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::JointName;
    use crate::file_processor::FileProcessorError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_capture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("left.csv");
        fs::write(
            &path,
            "t_mono,t_wall,chirality\n0.5,10.5,left,1,2,3,0,0,0,1\n0.6,10.6,left\n",
        )
        .unwrap();

        let result = load_capture(&path).unwrap();
        assert_eq!(result.frame_count(), 2);
        assert_eq!(result.parse_metrics.rows_dropped, 1);
        assert_eq!(
            result.frames[0]
                .joint(JointName::ForearmArm)
                .map(|j| j.position.z),
            Some(3.0)
        );
        assert_eq!(result.summary().left_frames, 2);
        assert_eq!(result.file_metadata.extension.as_deref(), Some("csv"));
    }

    #[test]
    fn test_missing_file_is_file_processing_error() {
        let dir = tempdir().unwrap();
        let err = load_capture(&dir.path().join("absent.csv")).unwrap_err();
        assert_matches!(
            err,
            PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_strict_numbers_surface_as_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "header\nabc,1.0,left\n").unwrap();

        let mut config = RuntimeConfig::default();
        config.parser.strict_numbers = true;

        let err = load_capture_with_preferences(&path, &config).unwrap_err();
        assert_matches!(err, PipelineError::Parsing(_));
        assert_eq!(err.error_code(), crate::logging::codes::parsing::INVALID_NUMBER);
    }

    #[test]
    fn test_empty_file_is_a_capture_without_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let result = load_capture(&path).unwrap();
        assert_eq!(result.frame_count(), 0);
        assert!(result.summary().is_empty());
        assert!(load_frames_or_empty(&path).is_empty());
    }

    #[test]
    fn test_load_frames_or_empty_falls_back() {
        let dir = tempdir().unwrap();
        assert!(load_frames_or_empty(&dir.path().join("nope.csv")).is_empty());
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
    }
}
