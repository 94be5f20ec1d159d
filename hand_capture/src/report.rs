//! Plain-text rendering of loaded frames

use crate::capture::HandFrame;
use crate::pipeline::CaptureSummary;

pub const TITLE: &str = "Hand Data Frames";
pub const EMPTY_MESSAGE: &str = "No frames loaded.";

/// Render every frame
pub fn format_frame_list(frames: &[HandFrame]) -> String {
    format_frame_list_limited(frames, None)
}

/// Render at most `limit` frames, noting how many were left out
pub fn format_frame_list_limited(frames: &[HandFrame], limit: Option<usize>) -> String {
    let mut out = format!("{}\n", TITLE);

    if frames.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    let shown = limit.map_or(frames.len(), |limit| limit.min(frames.len()));
    for (index, frame) in frames.iter().take(shown).enumerate() {
        out.push('\n');
        write_frame(&mut out, index, frame);
    }

    if shown < frames.len() {
        out.push_str(&format!("\n... {} more frames\n", frames.len() - shown));
    }

    out
}

fn write_frame(out: &mut String, index: usize, frame: &HandFrame) {
    out.push_str(&format!("Frame {}\n", index));
    out.push_str(&format!("  - Timestamp: {:.2}\n", frame.t_mono));
    out.push_str(&format!("  - Chirality: {}\n", frame.chirality));
    out.push_str("Finger Tip Positions (X, Y, Z):\n");

    for (tip, position) in frame.fingertip_positions() {
        let label = format!("{}:", tip.label());
        out.push_str(&format!("  - {:<7} {}\n", label, position));
    }
}

pub fn format_summary(summary: &CaptureSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Frames:     {}\n", summary.frame_count));
    out.push_str(&format!(
        "Hands:      {} left, {} right, {} unlabeled\n",
        summary.left_frames, summary.right_frames, summary.unlabeled_frames
    ));

    if let (Some(first), Some(last), Some(duration)) = (
        summary.first_timestamp,
        summary.last_timestamp,
        summary.duration(),
    ) {
        out.push_str(&format!(
            "Time span:  {:.3} to {:.3} ({:.3}s)\n",
            first, last, duration
        ));
    }
    if let Some(interval) = summary.mean_frame_interval {
        out.push_str(&format!("Interval:   {:.4}s mean\n", interval));
    }

    out.push_str(&format!(
        "Complete:   {} of {} ({:.1}%)\n",
        summary.complete_frames,
        summary.frame_count,
        summary.complete_ratio() * 100.0
    ));

    out
}
