mod common;

use assert_matches::assert_matches;
use common::{full_row, write_capture};
use hand_capture::capture::{Chirality, Fingertip, JointName, Vector3, FULL_ROW_WIDTH};
use hand_capture::config::RuntimeConfig;
use hand_capture::file_processor::FileProcessorError;
use hand_capture::pipeline::{load_capture, load_capture_with_preferences, load_frames_or_empty};
use hand_capture::report::format_frame_list;
use hand_capture::PipelineError;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_full_rows() {
    let dir = tempdir().unwrap();
    let rows = vec![
        full_row("0.011", "1700000000.011", "left"),
        full_row("0.022", "1700000000.022", "left"),
        full_row("0.033", "1700000000.033", "right"),
    ];
    let path = write_capture(dir.path(), "session.csv", &rows, "\n");

    let result = load_capture(&path).unwrap();
    assert_eq!(result.frame_count(), 3);
    assert_eq!(result.parse_metrics.header_columns, Some(FULL_ROW_WIDTH));
    assert!(result.parse_metrics.header_matches_full_row());
    assert!(!result.parse_metrics.has_anomalies());

    let frame = &result.frames[2];
    assert_eq!(frame.t_mono, 0.033);
    assert_eq!(frame.t_wall, 1700000000.033);
    assert_eq!(frame.hand(), Some(Chirality::Right));
    assert!(frame.is_complete());

    let wrist = frame.joint(JointName::ForearmWrist).unwrap();
    assert_eq!(wrist.position, Vector3::new(1.0, -1.0, 0.5));
    assert_eq!(wrist.orientation.w, 1.0);

    let tips = frame.fingertip_positions();
    assert_eq!(tips.len(), 5);
    assert_eq!(tips[4], (Fingertip::Little, Vector3::new(25.0, -25.0, 0.5)));

    let summary = result.summary();
    assert_eq!(summary.left_frames, 2);
    assert_eq!(summary.right_frames, 1);
    assert_eq!(summary.complete_frames, 3);
}

#[test]
fn crlf_files_match_lf_files_when_stripping() {
    let dir = tempdir().unwrap();
    let rows = vec![full_row("1.0", "2.0", "left"), full_row("1.5", "2.5", "left")];
    let lf = write_capture(dir.path(), "lf.csv", &rows, "\n");
    let crlf = write_capture(dir.path(), "crlf.csv", &rows, "\r\n");

    let mut config = RuntimeConfig::default();
    config.parser.strip_carriage_returns = true;

    let lf_frames = load_capture_with_preferences(&lf, &config).unwrap().frames;
    let crlf_frames = load_capture_with_preferences(&crlf, &config).unwrap().frames;

    assert_eq!(lf_frames, crlf_frames);
    assert_eq!(crlf_frames[0].chirality, "left");
}

#[test]
fn crlf_leaves_last_qw_at_zero_by_default() {
    let dir = tempdir().unwrap();
    let rows = vec![full_row("1.0", "2.0", "left")];
    let path = write_capture(dir.path(), "crlf.csv", &rows, "\r\n");

    let result = load_capture(&path).unwrap();
    let frame = &result.frames[0];
    assert!(frame.is_complete());

    let last = frame.joint(JointName::LittleFingerTip).unwrap();
    assert_eq!(last.position, Vector3::new(25.0, -25.0, 0.5));
    assert_eq!(last.orientation.w, 0.0);
    assert_eq!(frame.joint(JointName::ForearmArm).unwrap().orientation.w, 1.0);
    assert_eq!(result.parse_metrics.fields_defaulted, 1);
}

#[test]
fn empty_file_loads_as_no_frames() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let result = load_capture(&path).unwrap();
    assert_eq!(result.frame_count(), 0);
    assert_eq!(result.parse_metrics.header_columns, None);
    assert!(format_frame_list(&result.frames).contains("No frames loaded."));

    let mut config = RuntimeConfig::default();
    config.file_processor.reject_empty_files = true;
    assert_matches!(
        load_capture_with_preferences(&path, &config),
        Err(PipelineError::FileProcessing(FileProcessorError::EmptyFile { .. }))
    );
}

#[test]
fn columns_past_the_last_joint_are_ignored() {
    let dir = tempdir().unwrap();
    let mut wide = full_row("1.0", "2.0", "right");
    wide.push_str(&",9".repeat(400));
    let rows = vec![wide, full_row("1.1", "2.1", "right")];
    let path = write_capture(dir.path(), "wide.csv", &rows, "\n");

    let result = load_capture(&path).unwrap();
    assert_eq!(result.frame_count(), 2);
    assert_eq!(result.frames[0].joints, result.frames[1].joints);
    assert_eq!(result.parse_metrics.rows_with_extra_columns, 1);
}

#[test]
fn short_rows_keep_leading_joints() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.csv");
    fs::write(
        &path,
        "t_mono,t_wall,chirality\n0.5,1.5,right,1,2,3,0,0,0,1,4,5,6\n0.6,1.6\n\n",
    )
    .unwrap();

    let result = load_capture(&path).unwrap();
    assert_eq!(result.frame_count(), 2);

    let first = &result.frames[0];
    assert_eq!(first.joints.len(), 1);
    assert!(first.joint(JointName::ForearmArm).is_some());

    let second = &result.frames[1];
    assert_eq!(second.chirality, "");
    assert!(second.joints.is_empty());

    assert_eq!(result.parse_metrics.rows_dropped, 2);
    assert_eq!(result.parse_metrics.incomplete_frames, 2);
}

#[test]
fn unparsable_numbers_default_to_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noisy.csv");
    fs::write(&path, "h\nnan?,abc,left,x,1,2,0,0,0,1\n").unwrap();

    let result = load_capture(&path).unwrap();
    let frame = &result.frames[0];
    assert_eq!(frame.t_mono, 0.0);
    assert_eq!(frame.t_wall, 0.0);
    assert_eq!(
        frame.joint(JointName::ForearmArm).unwrap().position,
        Vector3::new(0.0, 1.0, 2.0)
    );
    assert_eq!(result.parse_metrics.fields_defaulted, 3);
}

#[test]
fn strict_mode_rejects_bad_numbers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noisy.csv");
    fs::write(&path, "h\n1.0,2.0,left,x,1,2,0,0,0,1\n").unwrap();

    let mut config = RuntimeConfig::default();
    config.parser.strict_numbers = true;

    let err = load_capture_with_preferences(&path, &config).unwrap_err();
    assert_matches!(err, PipelineError::Parsing(ref e) if e.line() == Some(2));
}

#[test]
fn extension_check_is_opt_in() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capture.txt");
    fs::write(&path, "h\n1.0,2.0,left\n").unwrap();

    assert_eq!(load_capture(&path).unwrap().frame_count(), 1);

    let mut config = RuntimeConfig::default();
    config.file_processor.require_csv_extension = true;
    assert_matches!(
        load_capture_with_preferences(&path, &config),
        Err(PipelineError::FileProcessing(FileProcessorError::InvalidExtension { .. }))
    );
}

#[test]
fn missing_file_falls_back_to_no_frames() {
    let dir = tempdir().unwrap();
    let frames = load_frames_or_empty(&dir.path().join("absent.csv"));
    assert!(frames.is_empty());
    assert!(format_frame_list(&frames).contains("No frames loaded."));
}
