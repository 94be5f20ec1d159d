use hand_capture::capture::{JointName, COLUMNS_PER_JOINT};
use std::fs;
use std::path::{Path, PathBuf};

pub fn header() -> String {
    let mut fields = vec!["t_mono".to_string(), "t_wall".to_string(), "chirality".to_string()];
    for joint in JointName::ALL {
        for suffix in ["px", "py", "pz", "qx", "qy", "qz", "qw"] {
            fields.push(format!("{}_{}", joint, suffix));
        }
    }
    fields.join(",")
}

/// A row with every joint. Joint `j` sits at `(j, -j, 0.5)` with identity rotation.
pub fn full_row(t_mono: &str, t_wall: &str, chirality: &str) -> String {
    let mut fields = vec![t_mono.to_string(), t_wall.to_string(), chirality.to_string()];
    for j in 0..JointName::ALL.len() {
        let block = [
            format!("{}", j),
            format!("-{}", j),
            "0.5".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "1".to_string(),
        ];
        assert_eq!(block.len(), COLUMNS_PER_JOINT);
        fields.extend(block);
    }
    fields.join(",")
}

pub fn write_capture(dir: &Path, name: &str, rows: &[String], line_ending: &str) -> PathBuf {
    let path = dir.join(name);
    let mut text = header();
    for row in rows {
        text.push_str(line_ending);
        text.push_str(row);
    }
    text.push_str(line_ending);
    fs::write(&path, text).unwrap();
    path
}
