// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Single detection records and the per-person values derived from them.
//!
//! An AlphaPose results document is a JSON array of [`DetectionRecord`]s, one per
//! person found in one frame. Each person-class record becomes one [`PersonPose`].

use std::sync::LazyLock;

use ndarray::{Array1, Array2, Axis, s};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{PoseError, Result};
use crate::keypoint::{Keypoint, NUM_KEYPOINTS, SKELETON, VALUES_PER_KEYPOINT};

/// Trailing `_<segment>.<ext>` of an image id; the segment is the frame number.
static IMAGE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*_(.*)\..*$").expect("image id pattern is valid"));

/// One detection as written by AlphaPose. Fields not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionRecord {
    /// COCO category of the detection (1 = person). Integral floats such as `1.0`
    /// are accepted.
    #[serde(deserialize_with = "deserialize_category")]
    pub category_id: i64,
    /// Source image name, e.g. `"frame_00042.png"`.
    pub image_id: String,
    /// Flat `[x0, y0, c0, x1, y1, c1, ...]` for the 17 COCO keypoints.
    pub keypoints: Vec<f64>,
    /// `[x, y, w, h]`: top-left corner and size.
    #[serde(rename = "box")]
    pub bbox: Vec<f64>,
    /// Overall detection confidence.
    pub score: f64,
}

/// Read a JSON category as an integer.
///
/// Integers are taken as is and floats only when they have no fractional part, so
/// `1` and `1.0` both give `Some(1)` while `"person"`, `1.5` and `null` give `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn category_as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|c| c.fract() == 0.0 && c.abs() < 9.0e18)
            .map(|c| c as i64)
    })
}

fn deserialize_category<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    category_as_i64(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("category_id must be an integral number, got {value}"))
    })
}

impl DetectionRecord {
    /// Whether this record belongs to the given category.
    #[must_use]
    pub const fn is_category(&self, category_id: i64) -> bool {
        self.category_id == category_id
    }

    /// Frame index encoded in `image_id`.
    ///
    /// # Errors
    ///
    /// See [`frame_index_from_image_id`].
    pub fn frame_index(&self) -> Result<usize> {
        frame_index_from_image_id(&self.image_id)
    }
}

/// Read the frame index out of an image id.
///
/// The index is the text between the last underscore and the last dot, so
/// `"whatever_007.jpg"` yields `7` and `"cam_2_00015.png"` yields `15`.
///
/// # Errors
///
/// Returns [`PoseError::ImageIdError`] if the id has no `_<segment>.<ext>` tail or the
/// segment is not a non-negative integer.
pub fn frame_index_from_image_id(image_id: &str) -> Result<usize> {
    IMAGE_ID_RE
        .captures(image_id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().trim().parse::<usize>().ok())
        .ok_or_else(|| PoseError::ImageIdError(image_id.to_string()))
}

/// Convert an `[x, y, w, h]` box into `[[x1, y1], [x2, y2]]` corner form.
///
/// # Errors
///
/// Returns [`PoseError::ShapeError`] if `bbox` does not hold exactly 4 values.
pub fn xywh_to_corners(bbox: &[f64]) -> Result<Array2<f64>> {
    let mut corners = Array2::from_shape_vec((2, 2), bbox.to_vec()).map_err(|_| {
        PoseError::ShapeError(format!("box must have 4 values, got {}", bbox.len()))
    })?;
    let origin = corners.row(0).to_owned();
    corners.row_mut(1).zip_mut_with(&origin, |size, o| *size += o);
    Ok(corners)
}

/// One person in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPose {
    /// Keypoint locations with shape (17, 2), in (x, y) order.
    pub keypoints: Array2<f64>,
    /// Per-keypoint confidences with shape (17,).
    pub confidences: Array1<f64>,
    /// Overall detection score.
    pub score: f64,
    /// Bounding box with shape (2, 2): row 0 top-left, row 1 bottom-right.
    pub bbox: Array2<f64>,
}

impl PersonPose {
    /// Build a person from a detection record.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeError`] if the record does not carry 51 keypoint
    /// values or 4 box values.
    pub fn from_record(record: &DetectionRecord) -> Result<Self> {
        let kp_conf = Array2::from_shape_vec(
            (NUM_KEYPOINTS, VALUES_PER_KEYPOINT),
            record.keypoints.clone(),
        )
        .map_err(|_| {
            PoseError::ShapeError(format!(
                "keypoints must have {} values, got {}",
                NUM_KEYPOINTS * VALUES_PER_KEYPOINT,
                record.keypoints.len()
            ))
        })?;

        Ok(Self {
            keypoints: kp_conf.slice(s![.., 0..2]).to_owned(),
            confidences: kp_conf.index_axis(Axis(1), 2).to_owned(),
            score: record.score,
            bbox: xywh_to_corners(&record.bbox)?,
        })
    }

    /// Location of a keypoint as `[x, y]`.
    #[must_use]
    pub fn keypoint(&self, kp: Keypoint) -> [f64; 2] {
        let row = self.keypoints.row(kp.index());
        [row[0], row[1]]
    }

    /// Confidence of a keypoint.
    #[must_use]
    pub fn confidence(&self, kp: Keypoint) -> f64 {
        self.confidences[kp.index()]
    }

    /// Box as `[x1, y1, x2, y2]`.
    #[must_use]
    pub fn bbox_xyxy(&self) -> [f64; 4] {
        [
            self.bbox[[0, 0]],
            self.bbox[[0, 1]],
            self.bbox[[1, 0]],
            self.bbox[[1, 1]],
        ]
    }

    /// Box width and height.
    #[must_use]
    pub fn bbox_size(&self) -> (f64, f64) {
        let [x1, y1, x2, y2] = self.bbox_xyxy();
        (x2 - x1, y2 - y1)
    }

    /// Euclidean length of each [`SKELETON`] limb, in skeleton order.
    #[must_use]
    pub fn limb_lengths(&self) -> Vec<f64> {
        SKELETON
            .iter()
            .map(|&[a, b]| {
                let dx = self.keypoints[[a, 0]] - self.keypoints[[b, 0]];
                let dy = self.keypoints[[a, 1]] - self.keypoints[[b, 1]];
                dx.hypot(dy)
            })
            .collect()
    }
}

impl TryFrom<&DetectionRecord> for PersonPose {
    type Error = PoseError;

    fn try_from(record: &DetectionRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(image_id: &str) -> DetectionRecord {
        DetectionRecord {
            category_id: 1,
            image_id: image_id.to_string(),
            keypoints: (0..NUM_KEYPOINTS)
                .flat_map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let v = i as f64;
                    [v, v * 10.0, 0.5]
                })
                .collect(),
            bbox: vec![10.0, 20.0, 5.0, 5.0],
            score: 0.75,
        }
    }

    #[test]
    fn test_frame_index_from_image_id() {
        assert_eq!(frame_index_from_image_id("whatever_007.jpg").unwrap(), 7);
        assert_eq!(frame_index_from_image_id("frame_00042.png").unwrap(), 42);
        assert_eq!(frame_index_from_image_id("cam_2_00015.png").unwrap(), 15);
        assert!(frame_index_from_image_id("dir/a_b_3.tar.gz").is_err());
    }

    #[test]
    fn test_frame_index_malformed() {
        for id in ["frame00042.png", "frame_42", "frame_abc.png", "frame_-1.png", ""] {
            assert!(
                matches!(frame_index_from_image_id(id), Err(PoseError::ImageIdError(_))),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "image_id": "frame_00003.png",
            "category_id": 1,
            "keypoints": [1.0, 2.0, 0.9],
            "score": 2.5,
            "box": [1, 2, 3, 4],
            "idx": [0.0]
        }"#;
        let rec: DetectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.category_id, 1);
        assert_eq!(rec.frame_index().unwrap(), 3);
        assert_eq!(rec.bbox, vec![1.0, 2.0, 3.0, 4.0]);
        assert!((rec.score - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_box_corners() {
        let corners = xywh_to_corners(&[10.0, 20.0, 5.0, 7.5]).unwrap();
        assert_eq!(corners, ndarray::array![[10.0, 20.0], [15.0, 27.5]]);

        assert!(matches!(
            xywh_to_corners(&[1.0, 2.0, 3.0]),
            Err(PoseError::ShapeError(_))
        ));
    }

    #[test]
    fn test_box_corners_large_magnitude_exact() {
        let rec: DetectionRecord = serde_json::from_str(
            r#"{"image_id": "f_0.png", "category_id": 1, "keypoints": [],
                "box": [0.1, 0.2, 100000000.0, 3.0], "score": 0.5}"#,
        )
        .unwrap();
        let corners = xywh_to_corners(&rec.bbox).unwrap();
        assert_eq!(corners[[0, 0]], 0.1);
        assert_eq!(corners[[0, 1]], 0.2);
        assert_eq!(corners[[1, 0]], 0.1 + 100_000_000.0);
        assert_eq!(corners[[1, 1]], 0.2 + 3.0);
        assert!(corners[[1, 0]] > 100_000_000.09);
    }

    #[test]
    fn test_category_as_i64() {
        assert_eq!(category_as_i64(&serde_json::json!(1)), Some(1));
        assert_eq!(category_as_i64(&serde_json::json!(1.0)), Some(1));
        assert_eq!(category_as_i64(&serde_json::json!(-3)), Some(-3));
        assert_eq!(category_as_i64(&serde_json::json!(1.5)), None);
        assert_eq!(category_as_i64(&serde_json::json!("bicycle")), None);
        assert_eq!(category_as_i64(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_deserialize_float_category() {
        let json = r#"{"image_id": "f_0.png", "category_id": 1.0, "keypoints": [], "box": [], "score": 0.5}"#;
        let rec: DetectionRecord = serde_json::from_str(json).unwrap();
        assert!(rec.is_category(1));

        let json = r#"{"image_id": "f_0.png", "category_id": "person", "keypoints": [], "box": [], "score": 0.5}"#;
        assert!(serde_json::from_str::<DetectionRecord>(json).is_err());
    }

    #[test]
    fn test_person_from_record() {
        let person = PersonPose::from_record(&record("x_1.png")).unwrap();
        assert_eq!(person.keypoints.shape(), &[17, 2]);
        assert_eq!(person.confidences.shape(), &[17]);
        assert_eq!(person.keypoint(Keypoint::Nose), [0.0, 0.0]);
        assert_eq!(person.keypoint(Keypoint::LShoulder), [5.0, 50.0]);
        assert_eq!(person.keypoint(Keypoint::RAnkle), [16.0, 160.0]);
        assert!((person.confidence(Keypoint::LHip) - 0.5).abs() < f64::EPSILON);
        assert_eq!(person.bbox_xyxy(), [10.0, 20.0, 15.0, 25.0]);
        assert_eq!(person.bbox_size(), (5.0, 5.0));
    }

    #[test]
    fn test_person_bad_keypoint_count() {
        let mut rec = record("x_1.png");
        rec.keypoints.pop();
        assert!(matches!(
            PersonPose::from_record(&rec),
            Err(PoseError::ShapeError(_))
        ));
    }

    #[test]
    fn test_limb_lengths() {
        let person = PersonPose::from_record(&record("x_1.png")).unwrap();
        let lengths = person.limb_lengths();
        assert_eq!(lengths.len(), SKELETON.len());
        // shoulders are keypoints 5 and 6: (5, 50) and (6, 60)
        let expected = 1.0_f64.hypot(10.0);
        assert!((lengths[7] - expected).abs() < 1e-12);
    }
}
