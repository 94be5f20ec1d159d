use super::summary::CaptureSummary;
use crate::capture::{HandFrame, ParseMetrics};
use crate::file_processor::FileMetadata;
use std::time::Duration;

/// A loaded capture with everything learned while loading it
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub frames: Vec<HandFrame>,
    pub file_metadata: FileMetadata,
    pub parse_metrics: ParseMetrics,
    pub processing_duration: Duration,
}

impl CaptureResult {
    pub fn new(
        frames: Vec<HandFrame>,
        file_metadata: FileMetadata,
        parse_metrics: ParseMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            frames,
            file_metadata,
            parse_metrics,
            processing_duration,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn summary(&self) -> CaptureSummary {
        CaptureSummary::from_frames(&self.frames)
    }

    pub fn into_frames(self) -> Vec<HandFrame> {
        self.frames
    }

    pub fn log_success(&self) {
        let seconds = self.processing_duration.as_secs_f64();
        let frames_per_sec = if seconds > 0.0 {
            self.frames.len() as f64 / seconds
        } else {
            0.0
        };

        log_success!(
            crate::logging::codes::success::FILE_PROCESSING_SUCCESS,
            "Capture loaded",
            "file" => self.file_metadata.path.display(),
            "frames" => self.frames.len(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "frames_per_sec" => format!("{:.0}", frames_per_sec)
        );
    }
}
