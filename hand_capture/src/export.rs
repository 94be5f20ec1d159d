//! JSON export of a loaded capture

use crate::batch::BatchResults;
use crate::capture::HandFrame;
use crate::logging::codes;
use crate::pipeline::{CaptureResult, CaptureSummary};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write export to {path}: {message}")]
    Write { path: String, message: String },
}

impl ExportError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::batch::EXPORT_FAILED
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub export_id: String,
    /// RFC 3339, UTC
    pub generated_at: String,
    pub hostname: String,
    pub source_file: String,
    pub tool_version: String,
}

impl ExportMetadata {
    pub fn new(source_file: &Path) -> Self {
        Self {
            export_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            hostname: hostname::get()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "unknown".to_string()),
            source_file: source_file.display().to_string(),
            tool_version: crate::VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureExport {
    pub metadata: ExportMetadata,
    pub summary: CaptureSummary,
    pub frames: Vec<HandFrame>,
}

impl CaptureExport {
    pub fn new(source_file: &Path, frames: Vec<HandFrame>) -> Self {
        Self {
            metadata: ExportMetadata::new(source_file),
            summary: CaptureSummary::from_frames(&frames),
            frames,
        }
    }

    pub fn from_result(result: &CaptureResult) -> Self {
        Self::new(&result.file_metadata.path, result.frames.clone())
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        write_json(self, path)?;

        log_success!(codes::success::EXPORT_COMPLETE, "Capture exported",
            "path" => path.display(),
            "frames" => self.frames.len(),
            "export_id" => self.metadata.export_id
        );

        Ok(())
    }
}

/// Every capture a directory load produced, written as one JSON array
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct BatchExport {
    pub captures: Vec<CaptureExport>,
}

impl BatchExport {
    pub fn from_results(results: &BatchResults) -> Self {
        Self {
            captures: results
                .successful_files
                .iter()
                .map(|(_, result)| CaptureExport::from_result(result))
                .collect(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.captures.iter().map(|c| c.frames.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        write_json(self, path)?;

        log_success!(codes::success::EXPORT_COMPLETE, "Batch exported",
            "path" => path.display(),
            "captures" => self.captures.len(),
            "frames" => self.frame_count()
        );

        Ok(())
    }
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(ExportError::from)
        .inspect_err(|e| {
            log_error!(e.error_code(), "Export serialization failed", "error" => e);
        })?;

    fs::write(path, json).map_err(|e| {
        let error = ExportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Export could not be written",
            "path" => path.display(),
            "error" => e
        );
        error
    })
}
