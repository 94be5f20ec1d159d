//! Frame data model

use super::joints::{Fingertip, JointName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A location in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    #[serde(with = "crate::utils::float")]
    pub x: f64,
    #[serde(with = "crate::utils::float")]
    pub y: f64,
    #[serde(with = "crate::utils::float")]
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Vector3) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// An orientation, stored as x, y, z, w in CSV order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quaternion {
    #[serde(with = "crate::utils::float")]
    pub x: f64,
    #[serde(with = "crate::utils::float")]
    pub y: f64,
    #[serde(with = "crate::utils::float")]
    pub z: f64,
    #[serde(with = "crate::utils::float")]
    pub w: f64,
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Joint {
    pub position: Vector3,
    pub orientation: Quaternion,
}

/// Which hand a frame was recorded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chirality {
    Left,
    Right,
}

impl Chirality {
    /// Case-insensitive; anything other than left/right is `None`
    pub fn parse(raw: &str) -> Option<Chirality> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Chirality::Left),
            "right" => Some(Chirality::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Chirality::Left => "left",
            Chirality::Right => "right",
        }
    }
}

/// One CSV row: timestamps, the raw chirality text, and the joints that had a
/// complete seven-column block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandFrame {
    /// Monotonic frame time
    #[serde(with = "crate::utils::float")]
    pub t_mono: f64,
    /// Wall-clock time
    #[serde(with = "crate::utils::float")]
    pub t_wall: f64,
    pub chirality: String,
    pub joints: BTreeMap<JointName, Joint>,
}

impl HandFrame {
    pub fn joint(&self, name: JointName) -> Option<&Joint> {
        self.joints.get(&name)
    }

    /// Positions of the fingertips present in this frame, thumb first
    pub fn fingertip_positions(&self) -> Vec<(Fingertip, Vector3)> {
        Fingertip::ALL
            .iter()
            .filter_map(|tip| self.joint(tip.joint()).map(|j| (*tip, j.position)))
            .collect()
    }

    pub fn hand(&self) -> Option<Chirality> {
        Chirality::parse(&self.chirality)
    }

    pub fn is_complete(&self) -> bool {
        self.joints.len() == JointName::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint_at(x: f64, y: f64, z: f64) -> Joint {
        Joint {
            position: Vector3::new(x, y, z),
            orientation: Quaternion::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn test_vector_distance() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(a.distance(&b), 13.0);
        assert_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn test_quaternion_norm() {
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 1.0).norm(), 1.0);
        assert_eq!(Quaternion::new(1.0, 1.0, 1.0, 1.0).norm(), 2.0);
    }

    #[test]
    fn test_vector_display_uses_three_decimals() {
        assert_eq!(
            Vector3::new(0.1, -0.25, 1.0).to_string(),
            "(0.100, -0.250, 1.000)"
        );
    }

    #[test]
    fn test_chirality_parsing() {
        assert_eq!(Chirality::parse("left"), Some(Chirality::Left));
        assert_eq!(Chirality::parse("Right"), Some(Chirality::Right));
        assert_eq!(Chirality::parse("RIGHT"), Some(Chirality::Right));
        assert_eq!(Chirality::parse(""), None);
        assert_eq!(Chirality::parse("both"), None);
    }

    #[test]
    fn test_fingertip_positions_skip_missing_tips() {
        let mut frame = HandFrame {
            chirality: "left".to_string(),
            ..Default::default()
        };
        frame
            .joints
            .insert(JointName::IndexFingerTip, joint_at(1.0, 2.0, 3.0));
        frame.joints.insert(JointName::ThumbTip, joint_at(4.0, 5.0, 6.0));
        frame.joints.insert(JointName::ForearmArm, joint_at(0.0, 0.0, 0.0));

        let tips = frame.fingertip_positions();
        assert_eq!(
            tips,
            vec![
                (Fingertip::Thumb, Vector3::new(4.0, 5.0, 6.0)),
                (Fingertip::Index, Vector3::new(1.0, 2.0, 3.0)),
            ]
        );
        assert_eq!(frame.hand(), Some(Chirality::Left));
        assert!(!frame.is_complete());
    }

    #[test]
    fn test_complete_frame() {
        let frame = HandFrame {
            joints: JointName::ALL
                .iter()
                .map(|name| (*name, Joint::default()))
                .collect(),
            ..Default::default()
        };
        assert!(frame.is_complete());
        assert!(frame.joint(JointName::LittleFingerTip).is_some());
    }

    #[test]
    fn test_frame_serializes_joint_names_as_keys() {
        let mut frame = HandFrame::default();
        frame.joints.insert(JointName::ThumbTip, joint_at(1.0, 0.0, 0.0));

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["joints"]["thumbTip"]["position"]["x"], 1.0);

        let back: HandFrame = serde_json::from_value(json).unwrap();
        assert_eq!(back, frame);
    }
}
