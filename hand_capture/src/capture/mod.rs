//! Hand-tracking capture format
//!
//! A capture is a CSV file with one header row and one row per tracked frame.

pub mod joints;
pub mod parser;
pub mod types;

use crate::config::runtime::ParserPreferences;

pub use joints::{Fingertip, JointName, COLUMNS_PER_JOINT};
pub use parser::{CaptureParser, ParseError, ParseMetrics};
pub use types::{Chirality, HandFrame, Joint, Quaternion, Vector3};

/// `t_mono`, `t_wall` and `chirality`
pub const LEADING_COLUMNS: usize = 3;

/// Width of a row carrying every joint
pub const FULL_ROW_WIDTH: usize = LEADING_COLUMNS + JointName::ALL.len() * COLUMNS_PER_JOINT;

/// Parse capture text with default preferences
pub fn parse_capture(source: &str) -> Result<Vec<HandFrame>, ParseError> {
    CaptureParser::new().parse(source)
}

/// Parse capture text, returning the parse counters alongside the frames
pub fn parse_capture_with_preferences(
    source: &str,
    preferences: &ParserPreferences,
) -> Result<(Vec<HandFrame>, ParseMetrics), ParseError> {
    let mut parser = CaptureParser::from_preferences(preferences);
    let frames = parser.parse(source)?;
    Ok((frames, parser.metrics().clone()))
}
