// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! COCO body keypoint vocabulary.
//!
//! Every AlphaPose record lists its 17 keypoints in the order of [`Keypoint::ALL`],
//! so a keypoint's position in that list is also its row in the per-person arrays.

use std::fmt;
use std::str::FromStr;

/// Number of keypoints in the COCO body layout.
pub const NUM_KEYPOINTS: usize = 17;

/// Values stored per keypoint in a detection record: x, y, confidence.
pub const VALUES_PER_KEYPOINT: usize = 3;

/// COCO body keypoints, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keypoint {
    /// Nose.
    Nose,
    /// Left eye.
    LEye,
    /// Right eye.
    REye,
    /// Left ear.
    LEar,
    /// Right ear.
    REar,
    /// Left shoulder.
    LShoulder,
    /// Right shoulder.
    RShoulder,
    /// Left elbow.
    LElbow,
    /// Right elbow.
    RElbow,
    /// Left wrist.
    LWrist,
    /// Right wrist.
    RWrist,
    /// Left hip.
    LHip,
    /// Right hip.
    RHip,
    /// Left knee.
    LKnee,
    /// Right knee.
    RKnee,
    /// Left ankle.
    LAnkle,
    /// Right ankle.
    RAnkle,
}

/// COCO-Pose skeleton (pairs of keypoint indices forming limbs).
pub const SKELETON: [[usize; 2]; 19] = [
    [15, 13], // left ankle - left knee
    [13, 11], // left knee - left hip
    [16, 14], // right ankle - right knee
    [14, 12], // right knee - right hip
    [11, 12], // hips
    [5, 11],  // left shoulder - left hip
    [6, 12],  // right shoulder - right hip
    [5, 6],   // shoulders
    [5, 7],   // left upper arm
    [6, 8],   // right upper arm
    [7, 9],   // left forearm
    [8, 10],  // right forearm
    [1, 2],   // eyes
    [0, 1],   // nose - left eye
    [0, 2],   // nose - right eye
    [1, 3],   // left eye - left ear
    [2, 4],   // right eye - right ear
    [3, 5],   // left ear - left shoulder
    [4, 6],   // right ear - right shoulder
];

impl Keypoint {
    /// All keypoints in record order.
    pub const ALL: [Self; NUM_KEYPOINTS] = [
        Self::Nose,
        Self::LEye,
        Self::REye,
        Self::LEar,
        Self::REar,
        Self::LShoulder,
        Self::RShoulder,
        Self::LElbow,
        Self::RElbow,
        Self::LWrist,
        Self::RWrist,
        Self::LHip,
        Self::RHip,
        Self::LKnee,
        Self::RKnee,
        Self::LAnkle,
        Self::RAnkle,
    ];

    /// Row of this keypoint in the per-person arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Keypoint at a given row, if the row exists.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_KEYPOINTS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the COCO name of the keypoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::LEye => "LEye",
            Self::REye => "REye",
            Self::LEar => "LEar",
            Self::REar => "REar",
            Self::LShoulder => "LShoulder",
            Self::RShoulder => "RShoulder",
            Self::LElbow => "LElbow",
            Self::RElbow => "RElbow",
            Self::LWrist => "LWrist",
            Self::RWrist => "RWrist",
            Self::LHip => "LHip",
            Self::RHip => "RHip",
            Self::LKnee => "LKnee",
            Self::RKnee => "RKnee",
            Self::LAnkle => "LAnkle",
            Self::RAnkle => "RAnkle",
        }
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Keypoint {
    type Err = KeypointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace(['_', '-', ' '], "");
        let normalized = normalized
            .strip_prefix("left")
            .map(|rest| format!("l{rest}"))
            .or_else(|| normalized.strip_prefix("right").map(|rest| format!("r{rest}")))
            .unwrap_or(normalized);

        Self::ALL
            .into_iter()
            .find(|kp| kp.as_str().to_lowercase() == normalized)
            .ok_or_else(|| KeypointParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown keypoint name.
#[derive(Debug, Clone)]
pub struct KeypointParseError(String);

impl fmt::Display for KeypointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid keypoint '{}', expected a COCO body part name", self.0)
    }
}

impl std::error::Error for KeypointParseError {}
