//! Aggregate statistics over a loaded capture

use crate::capture::{Chirality, HandFrame};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaptureSummary {
    pub frame_count: usize,
    pub left_frames: usize,
    pub right_frames: usize,
    /// Frames whose chirality is neither left nor right
    pub unlabeled_frames: usize,
    #[serde(serialize_with = "crate::utils::float::serialize_option")]
    pub first_timestamp: Option<f64>,
    #[serde(serialize_with = "crate::utils::float::serialize_option")]
    pub last_timestamp: Option<f64>,
    /// Mean `t_mono` step between consecutive frames, `None` below two frames
    #[serde(serialize_with = "crate::utils::float::serialize_option")]
    pub mean_frame_interval: Option<f64>,
    pub complete_frames: usize,
}

impl CaptureSummary {
    pub fn from_frames(frames: &[HandFrame]) -> Self {
        let mut summary = CaptureSummary {
            frame_count: frames.len(),
            first_timestamp: frames.first().map(|f| f.t_mono),
            last_timestamp: frames.last().map(|f| f.t_mono),
            ..Default::default()
        };

        for frame in frames {
            match frame.hand() {
                Some(Chirality::Left) => summary.left_frames += 1,
                Some(Chirality::Right) => summary.right_frames += 1,
                None => summary.unlabeled_frames += 1,
            }
            if frame.is_complete() {
                summary.complete_frames += 1;
            }
        }

        if frames.len() >= 2 {
            summary.mean_frame_interval =
                summary.duration().map(|span| span / (frames.len() - 1) as f64);
        }

        summary
    }

    /// Time between the first and last frame, in capture order
    pub fn duration(&self) -> Option<f64> {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => Some(last - first),
            _ => None,
        }
    }

    pub fn complete_ratio(&self) -> f64 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.complete_frames as f64 / self.frame_count as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }
}
