//! CSV rows to hand frames
//!
//! Row layout: `t_mono, t_wall, chirality`, then seven columns per joint in
//! [`JointName::ALL`] order. The first row is always treated as a header.

use super::joints::{JointName, COLUMNS_PER_JOINT};
use super::types::{HandFrame, Joint, Quaternion, Vector3};
use super::{FULL_ROW_WIDTH, LEADING_COLUMNS};
use crate::config::compile_time::parsing::MAX_FRAMES;
use crate::config::runtime::ParserPreferences;
use crate::logging::codes;
use crate::utils::CellLocation;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid number '{value}' at line {row}, column {column}")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("Capture has more than {max} frames")]
    TooManyFrames { max: usize },
}

impl ParseError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ParseError::InvalidNumber { .. } => codes::parsing::INVALID_NUMBER,
            ParseError::TooManyFrames { .. } => codes::parsing::TOO_MANY_FRAMES,
        }
    }

    /// 1-based line the error points at, if it points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::InvalidNumber { row, .. } => Some(*row),
            ParseError::TooManyFrames { .. } => None,
        }
    }
}

/// Counters gathered during one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseMetrics {
    /// Data rows after the header, blank trailing line included
    pub rows_seen: usize,
    pub frames_produced: usize,
    /// Rows with fewer than two columns
    pub rows_dropped: usize,
    /// Numeric fields that failed to parse and became 0.0
    pub fields_defaulted: usize,
    /// Frames with fewer than all 26 joints
    pub incomplete_frames: usize,
    /// Rows with columns past the last joint block; the extras are ignored
    pub rows_with_extra_columns: usize,
    /// Column count of the header row, `None` for empty input
    pub header_columns: Option<usize>,
}

impl ParseMetrics {
    pub fn header_matches_full_row(&self) -> bool {
        self.header_columns == Some(FULL_ROW_WIDTH)
    }

    pub fn has_anomalies(&self) -> bool {
        self.fields_defaulted > 0
            || self.incomplete_frames > 0
            || self.rows_with_extra_columns > 0
    }
}

pub struct CaptureParser {
    metrics: ParseMetrics,
    preferences: ParserPreferences,
}

impl CaptureParser {
    pub fn new() -> Self {
        Self::from_preferences(&ParserPreferences::default())
    }

    pub fn from_preferences(preferences: &ParserPreferences) -> Self {
        Self {
            metrics: ParseMetrics::default(),
            preferences: preferences.clone(),
        }
    }

    pub fn metrics(&self) -> &ParseMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &ParserPreferences {
        &self.preferences
    }

    /// Parse a whole capture. Metrics are reset at the start of every call.
    pub fn parse(&mut self, source: &str) -> Result<Vec<HandFrame>, ParseError> {
        self.metrics = ParseMetrics::default();

        let mut rows = source.split('\n').enumerate();

        if let Some((_, header)) = rows.next() {
            self.inspect_header(self.clean_row(header));
        }

        let mut frames = Vec::new();

        for (index, row) in rows {
            self.metrics.rows_seen += 1;
            let mut fields = self.clean_row(row).split(',');
            let columns: Vec<&str> = fields.by_ref().take(FULL_ROW_WIDTH).collect();

            let extra = fields.count();
            if extra > 0 {
                self.metrics.rows_with_extra_columns += 1;
                log_debug!("Columns past the last joint ignored",
                    "line" => index + 1,
                    "extra" => extra
                );
            }

            if columns.len() < 2 {
                self.metrics.rows_dropped += 1;
                if !columns[0].trim().is_empty() {
                    log_warning!(codes::warnings::ROW_DROPPED,
                        "Row dropped for having fewer than two columns",
                        at = CellLocation::row(index)
                    );
                }
                continue;
            }

            if frames.len() >= MAX_FRAMES {
                let error = ParseError::TooManyFrames { max: MAX_FRAMES };
                log_error!(error.error_code(), "Capture has more frames than allowed",
                    at = CellLocation::row(index),
                    "max" => MAX_FRAMES
                );
                return Err(error);
            }

            let frame = self.parse_row(index, &columns)?;
            if !frame.is_complete() {
                self.metrics.incomplete_frames += 1;
                log_debug!("Frame is missing trailing joints",
                    "line" => index + 1,
                    "joints" => frame.joints.len()
                );
            }
            frames.push(frame);
        }

        self.metrics.frames_produced = frames.len();
        self.log_anomalies();

        log_success!(codes::success::PARSING_COMPLETE, "Capture parsed",
            "frames" => self.metrics.frames_produced,
            "rows" => self.metrics.rows_seen,
            "dropped" => self.metrics.rows_dropped
        );

        Ok(frames)
    }

    fn clean_row<'a>(&self, row: &'a str) -> &'a str {
        if self.preferences.strip_carriage_returns {
            row.strip_suffix('\r').unwrap_or(row)
        } else {
            row
        }
    }

    fn clean_field<'a>(&self, field: &'a str) -> &'a str {
        if self.preferences.trim_fields {
            field.trim()
        } else {
            field
        }
    }

    fn inspect_header(&mut self, header: &str) {
        if header.is_empty() {
            return;
        }

        let width = header.split(',').count();
        self.metrics.header_columns = Some(width);

        if width != FULL_ROW_WIDTH && self.preferences.warn_on_header_mismatch {
            log_warning!(codes::warnings::HEADER_WIDTH_MISMATCH,
                "Header width differs from a full capture row",
                at = CellLocation::row(0),
                "columns" => width,
                "expected" => FULL_ROW_WIDTH
            );
        }
    }

    fn parse_row(&mut self, index: usize, columns: &[&str]) -> Result<HandFrame, ParseError> {
        let t_mono = self.parse_number(index, 0, columns[0])?;
        let t_wall = self.parse_number(index, 1, columns[1])?;
        let chirality = columns
            .get(2)
            .map(|c| self.clean_field(c).to_string())
            .unwrap_or_default();

        let mut joints = BTreeMap::new();
        let mut cursor = LEADING_COLUMNS;

        for name in JointName::ALL {
            // A partial block ends the row; every later joint would fail the same check.
            if cursor + COLUMNS_PER_JOINT - 1 >= columns.len() {
                break;
            }

            let mut values = [0.0; COLUMNS_PER_JOINT];
            for (offset, value) in values.iter_mut().enumerate() {
                let column = cursor + offset;
                *value = self.parse_number(index, column, columns[column])?;
            }
            let [px, py, pz, qx, qy, qz, qw] = values;

            joints.insert(
                name,
                Joint {
                    position: Vector3::new(px, py, pz),
                    orientation: Quaternion::new(qx, qy, qz, qw),
                },
            );
            cursor += COLUMNS_PER_JOINT;
        }

        Ok(HandFrame {
            t_mono,
            t_wall,
            chirality,
            joints,
        })
    }

    fn parse_number(&mut self, index: usize, column: usize, raw: &str) -> Result<f64, ParseError> {
        let text = self.clean_field(raw);
        match text.parse::<f64>() {
            Ok(value) => Ok(value),
            Err(_) if self.preferences.strict_numbers => {
                let error = ParseError::InvalidNumber {
                    row: index + 1,
                    column: column + 1,
                    value: text.to_string(),
                };
                log_error!(error.error_code(), "Numeric field could not be parsed",
                    at = CellLocation::from_indices(index, column),
                    "value" => text
                );
                Err(error)
            }
            Err(_) => {
                self.metrics.fields_defaulted += 1;
                Ok(0.0)
            }
        }
    }

    fn log_anomalies(&self) {
        if self.metrics.rows_with_extra_columns > 0 {
            log_warning!(codes::warnings::EXTRA_COLUMNS_IGNORED,
                "Columns past the last joint were ignored",
                "rows" => self.metrics.rows_with_extra_columns,
                "width" => FULL_ROW_WIDTH
            );
        }
        if self.metrics.fields_defaulted > 0 {
            log_warning!(codes::warnings::FIELD_DEFAULTED,
                "Unparsable numeric fields defaulted to zero",
                "fields" => self.metrics.fields_defaulted
            );
        }
        if self.metrics.incomplete_frames > 0 {
            log_warning!(codes::warnings::INCOMPLETE_FRAME,
                "Frames are missing trailing joints",
                "frames" => self.metrics.incomplete_frames,
                "of" => self.metrics.frames_produced
            );
        }
    }
}

impl Default for CaptureParser {
    fn default() -> Self {
        Self::new()
    }
}
