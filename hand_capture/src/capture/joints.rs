//! The tracked hand joints, in CSV column order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns per joint: px, py, pz, qx, qy, qz, qw
pub const COLUMNS_PER_JOINT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JointName {
    ForearmArm,
    ForearmWrist,
    ThumbKnuckle,
    ThumbIntermediateBase,
    ThumbIntermediateTip,
    ThumbTip,
    IndexFingerMetacarpal,
    IndexFingerKnuckle,
    IndexFingerIntermediateBase,
    IndexFingerIntermediateTip,
    IndexFingerTip,
    MiddleFingerMetacarpal,
    MiddleFingerKnuckle,
    MiddleFingerIntermediateBase,
    MiddleFingerIntermediateTip,
    MiddleFingerTip,
    RingFingerMetacarpal,
    RingFingerKnuckle,
    RingFingerIntermediateBase,
    RingFingerIntermediateTip,
    RingFingerTip,
    LittleFingerMetacarpal,
    LittleFingerKnuckle,
    LittleFingerIntermediateBase,
    LittleFingerIntermediateTip,
    LittleFingerTip,
}

impl JointName {
    /// Every joint in the order its seven columns appear in a row
    pub const ALL: [JointName; 26] = [
        JointName::ForearmArm,
        JointName::ForearmWrist,
        JointName::ThumbKnuckle,
        JointName::ThumbIntermediateBase,
        JointName::ThumbIntermediateTip,
        JointName::ThumbTip,
        JointName::IndexFingerMetacarpal,
        JointName::IndexFingerKnuckle,
        JointName::IndexFingerIntermediateBase,
        JointName::IndexFingerIntermediateTip,
        JointName::IndexFingerTip,
        JointName::MiddleFingerMetacarpal,
        JointName::MiddleFingerKnuckle,
        JointName::MiddleFingerIntermediateBase,
        JointName::MiddleFingerIntermediateTip,
        JointName::MiddleFingerTip,
        JointName::RingFingerMetacarpal,
        JointName::RingFingerKnuckle,
        JointName::RingFingerIntermediateBase,
        JointName::RingFingerIntermediateTip,
        JointName::RingFingerTip,
        JointName::LittleFingerMetacarpal,
        JointName::LittleFingerKnuckle,
        JointName::LittleFingerIntermediateBase,
        JointName::LittleFingerIntermediateTip,
        JointName::LittleFingerTip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::ForearmArm => "forearmArm",
            JointName::ForearmWrist => "forearmWrist",
            JointName::ThumbKnuckle => "thumbKnuckle",
            JointName::ThumbIntermediateBase => "thumbIntermediateBase",
            JointName::ThumbIntermediateTip => "thumbIntermediateTip",
            JointName::ThumbTip => "thumbTip",
            JointName::IndexFingerMetacarpal => "indexFingerMetacarpal",
            JointName::IndexFingerKnuckle => "indexFingerKnuckle",
            JointName::IndexFingerIntermediateBase => "indexFingerIntermediateBase",
            JointName::IndexFingerIntermediateTip => "indexFingerIntermediateTip",
            JointName::IndexFingerTip => "indexFingerTip",
            JointName::MiddleFingerMetacarpal => "middleFingerMetacarpal",
            JointName::MiddleFingerKnuckle => "middleFingerKnuckle",
            JointName::MiddleFingerIntermediateBase => "middleFingerIntermediateBase",
            JointName::MiddleFingerIntermediateTip => "middleFingerIntermediateTip",
            JointName::MiddleFingerTip => "middleFingerTip",
            JointName::RingFingerMetacarpal => "ringFingerMetacarpal",
            JointName::RingFingerKnuckle => "ringFingerKnuckle",
            JointName::RingFingerIntermediateBase => "ringFingerIntermediateBase",
            JointName::RingFingerIntermediateTip => "ringFingerIntermediateTip",
            JointName::RingFingerTip => "ringFingerTip",
            JointName::LittleFingerMetacarpal => "littleFingerMetacarpal",
            JointName::LittleFingerKnuckle => "littleFingerKnuckle",
            JointName::LittleFingerIntermediateBase => "littleFingerIntermediateBase",
            JointName::LittleFingerIntermediateTip => "littleFingerIntermediateTip",
            JointName::LittleFingerTip => "littleFingerTip",
        }
    }

    /// Look a joint up by its camelCase name
    pub fn from_name(name: &str) -> Option<JointName> {
        Self::ALL.iter().copied().find(|joint| joint.as_str() == name)
    }

    /// Position of this joint in [`JointName::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Column of this joint's `px` in a row with every joint present
    pub fn first_column(&self) -> usize {
        super::LEADING_COLUMNS + self.index() * COLUMNS_PER_JOINT
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five fingertips shown in the frame listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fingertip {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Fingertip {
    pub const ALL: [Fingertip; 5] = [
        Fingertip::Thumb,
        Fingertip::Index,
        Fingertip::Middle,
        Fingertip::Ring,
        Fingertip::Little,
    ];

    pub fn joint(&self) -> JointName {
        match self {
            Fingertip::Thumb => JointName::ThumbTip,
            Fingertip::Index => JointName::IndexFingerTip,
            Fingertip::Middle => JointName::MiddleFingerTip,
            Fingertip::Ring => JointName::RingFingerTip,
            Fingertip::Little => JointName::LittleFingerTip,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Fingertip::Thumb => "Thumb",
            Fingertip::Index => "Index",
            Fingertip::Middle => "Middle",
            Fingertip::Ring => "Ring",
            Fingertip::Little => "Little",
        }
    }
}
