// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Parsing of a single view's AlphaPose results into per-frame person lists.

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;
use serde_json::Value;

use crate::config::LoaderConfig;
use crate::detection::{DetectionRecord, PersonPose, category_as_i64};
use crate::error::{PoseError, Result};

/// Per-frame person lists for one view.
///
/// All four fields have one entry per frame; entry `f` holds one value per person
/// detected in frame `f`, in the order the detections appear in the document.
/// Frames without detections hold empty lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewPoses {
    /// Keypoint locations, each of shape (17, 2).
    pub keypoints: Vec<Vec<Array2<f64>>>,
    /// Per-keypoint confidences, each of shape (17,).
    pub confidences: Vec<Vec<Array1<f64>>>,
    /// Detection scores.
    pub scores: Vec<Vec<f64>>,
    /// Boxes in corner form, each of shape (2, 2).
    pub boxes: Vec<Vec<Array2<f64>>>,
}

impl ViewPoses {
    /// Create `num_frames` empty frames.
    #[must_use]
    pub fn with_frames(num_frames: usize) -> Self {
        Self {
            keypoints: vec![Vec::new(); num_frames],
            confidences: vec![Vec::new(); num_frames],
            scores: vec![Vec::new(); num_frames],
            boxes: vec![Vec::new(); num_frames],
        }
    }

    /// Number of frames.
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.scores.len()
    }

    /// Number of persons detected in a frame (0 for frames out of range).
    #[must_use]
    pub fn num_persons(&self, frame: usize) -> usize {
        self.scores.get(frame).map_or(0, Vec::len)
    }

    /// Number of person detections over all frames.
    #[must_use]
    pub fn total_detections(&self) -> usize {
        self.scores.iter().map(Vec::len).sum()
    }

    /// Reassemble one person from the four lists.
    #[must_use]
    pub fn person(&self, frame: usize, idx: usize) -> Option<PersonPose> {
        Some(PersonPose {
            keypoints: self.keypoints.get(frame)?.get(idx)?.clone(),
            confidences: self.confidences.get(frame)?.get(idx)?.clone(),
            score: *self.scores.get(frame)?.get(idx)?,
            bbox: self.boxes.get(frame)?.get(idx)?.clone(),
        })
    }

    /// Append a person to a frame.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::FrameOutOfRange`] if `frame` is not below [`Self::num_frames`].
    pub fn push(&mut self, frame: usize, person: PersonPose) -> Result<()> {
        let num_frames = self.num_frames();
        if frame >= num_frames {
            return Err(PoseError::FrameOutOfRange { frame, num_frames });
        }
        self.keypoints[frame].push(person.keypoints);
        self.confidences[frame].push(person.confidences);
        self.scores[frame].push(person.score);
        self.boxes[frame].push(person.bbox);
        Ok(())
    }
}

/// Bucket typed detection records into frames.
///
/// Records whose category is not `config.person_category_id` are skipped.
///
/// # Errors
///
/// Returns an error on the first record with an unreadable `image_id`, a frame
/// index outside `[0, num_frames)`, or malformed keypoints/box.
pub fn parse_alphapose_json(
    records: &[DetectionRecord],
    num_frames: usize,
    config: &LoaderConfig,
) -> Result<ViewPoses> {
    let mut view = ViewPoses::with_frames(num_frames);
    for record in records
        .iter()
        .filter(|r| r.is_category(config.person_category_id))
    {
        view.push(record.frame_index()?, PersonPose::from_record(record)?)?;
    }
    Ok(view)
}

/// Bucket an already-parsed JSON document into frames.
///
/// Only person records are decoded in full, so other categories may omit or
/// reshape the keypoint, box and score fields. Categories compare numerically:
/// `1.0` matches person category 1, while non-numeric categories never match.
///
/// # Errors
///
/// Returns [`PoseError::JsonError`] if the document is not an array, a record has
/// no `category_id`, or a person record misses a required field. Other errors are
/// as in [`parse_alphapose_json`].
pub fn parse_alphapose_value(
    document: &Value,
    num_frames: usize,
    config: &LoaderConfig,
) -> Result<ViewPoses> {
    let entries = document.as_array().ok_or_else(|| {
        PoseError::JsonError("detection document must be a JSON array".to_string())
    })?;

    let mut view = ViewPoses::with_frames(num_frames);
    for (i, entry) in entries.iter().enumerate() {
        let category = entry
            .get("category_id")
            .ok_or_else(|| PoseError::JsonError(format!("record {i} has no 'category_id'")))?;
        if category_as_i64(category) != Some(config.person_category_id) {
            continue;
        }

        let record = DetectionRecord::deserialize(entry)
            .map_err(|e| PoseError::JsonError(format!("record {i}: {e}")))?;
        view.push(record.frame_index()?, PersonPose::from_record(&record)?)?;
    }
    Ok(view)
}

/// Parse a detection document from JSON text.
///
/// # Errors
///
/// Returns [`PoseError::JsonError`] for malformed JSON, otherwise as
/// [`parse_alphapose_value`].
pub fn parse_alphapose_json_str(
    json: &str,
    num_frames: usize,
    config: &LoaderConfig,
) -> Result<ViewPoses> {
    let document: Value = serde_json::from_str(json)?;
    parse_alphapose_value(&document, num_frames, config)
}

/// Read and parse one view's detection document.
///
/// # Errors
///
/// Returns [`PoseError::IoError`] if the file cannot be read, otherwise as
/// [`parse_alphapose_json_str`].
pub fn parse_alphapose_json_file<P: AsRef<Path>>(
    path: P,
    num_frames: usize,
    config: &LoaderConfig,
) -> Result<ViewPoses> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| PoseError::IoError(format!("Failed to read {}: {e}", path.display())))?;
    parse_alphapose_json_str(&content, num_frames, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_json(image_id: &str, category: i64, x: f64, score: f64) -> String {
        let kps: Vec<String> = (0..17).map(|_| format!("{x}, 2.0, 0.9")).collect();
        format!(
            r#"{{"image_id": "{image_id}", "category_id": {category}, "keypoints": [{}], "box": [10, 20, 5, 5], "score": {score}}}"#,
            kps.join(", ")
        )
    }

    #[test]
    fn test_single_record() {
        let json = format!("[{}]", person_json("whatever_007.jpg", 1, 1.0, 0.75));
        let view = parse_alphapose_json_str(&json, 10, &LoaderConfig::default()).unwrap();

        assert_eq!(view.num_frames(), 10);
        for frame in (0..10).filter(|&f| f != 7) {
            assert_eq!(view.num_persons(frame), 0);
            assert!(view.keypoints[frame].is_empty());
            assert!(view.confidences[frame].is_empty());
            assert!(view.boxes[frame].is_empty());
        }

        assert_eq!(view.num_persons(7), 1);
        let kp = &view.keypoints[7][0];
        assert_eq!(kp.shape(), &[17, 2]);
        assert!(kp.rows().into_iter().all(|r| r[0] == 1.0 && r[1] == 2.0));
        let conf = &view.confidences[7][0];
        assert_eq!(conf.shape(), &[17]);
        assert!(conf.iter().all(|&c| (c - 0.9).abs() < f64::EPSILON));
        assert!((view.scores[7][0] - 0.75).abs() < f64::EPSILON);
        assert_eq!(view.boxes[7][0], ndarray::array![[10.0, 20.0], [15.0, 25.0]]);
    }

    #[test]
    fn test_non_person_skipped() {
        let json = format!(
            "[{}, {{\"category_id\": 3, \"image_id\": \"garbage\"}}]",
            person_json("f_1.png", 2, 1.0, 0.5)
        );
        let view = parse_alphapose_json_str(&json, 4, &LoaderConfig::default()).unwrap();
        assert_eq!(view.num_frames(), 4);
        assert_eq!(view.total_detections(), 0);
    }

    #[test]
    fn test_category_compared_numerically() {
        let float_person = person_json("f_3.png", 1, 4.0, 0.6).replace(
            "\"category_id\": 1,",
            "\"category_id\": 1.0,",
        );
        let json = format!(
            "[{}, {{\"category_id\": \"bicycle\", \"image_id\": \"f_1.png\"}}, {}, {{\"category_id\": 1.5}}]",
            person_json("f_0.png", 1, 1.0, 0.5),
            float_person
        );
        let view = parse_alphapose_json_str(&json, 4, &LoaderConfig::default()).unwrap();
        assert_eq!(view.total_detections(), 2);
        assert_eq!(view.scores[0], vec![0.5]);
        assert_eq!(view.scores[3], vec![0.6]);
        assert_eq!(view.num_persons(1), 0);
    }

    #[test]
    fn test_missing_category_is_fatal() {
        let json = format!(
            "[{}, {{\"image_id\": \"f_0.png\"}}]",
            person_json("f_0.png", 1, 1.0, 0.5)
        );
        let err = parse_alphapose_json_str(&json, 1, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PoseError::JsonError(_)));
    }

    #[test]
    fn test_empty_document() {
        let view = parse_alphapose_json_str("[]", 3, &LoaderConfig::default()).unwrap();
        assert_eq!(view, ViewPoses::with_frames(3));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let json = format!(
            "[{}, {}, {}]",
            person_json("f_2.png", 1, 1.0, 0.1),
            person_json("f_0.png", 1, 2.0, 0.2),
            person_json("f_2.png", 1, 3.0, 0.3),
        );
        let view = parse_alphapose_json_str(&json, 3, &LoaderConfig::default()).unwrap();
        assert_eq!(view.num_persons(2), 2);
        assert_eq!(view.scores[2], vec![0.1, 0.3]);
        assert!((view.keypoints[2][0][[0, 0]] - 1.0).abs() < f64::EPSILON);
        assert!((view.keypoints[2][1][[0, 0]] - 3.0).abs() < f64::EPSILON);
        assert_eq!(view.num_persons(0), 1);
        assert_eq!(view.num_persons(1), 0);
    }

    #[test]
    fn test_frame_out_of_range() {
        let json = format!("[{}]", person_json("f_10.png", 1, 1.0, 0.5));
        let err = parse_alphapose_json_str(&json, 10, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PoseError::FrameOutOfRange {
                frame: 10,
                num_frames: 10
            }
        ));
    }

    #[test]
    fn test_malformed_image_id_is_fatal() {
        let json = format!("[{}]", person_json("no-frame-number.png", 1, 1.0, 0.5));
        let err = parse_alphapose_json_str(&json, 10, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PoseError::ImageIdError(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_alphapose_json_str("[{", 1, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PoseError::JsonError(_)));

        let err = parse_alphapose_json_str("{}", 1, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PoseError::JsonError(_)));
    }

    #[test]
    fn test_custom_person_category() {
        let json = format!("[{}]", person_json("f_0.png", 5, 1.0, 0.5));
        let config = LoaderConfig::new().with_person_category(5);
        let view = parse_alphapose_json_str(&json, 1, &config).unwrap();
        assert_eq!(view.total_detections(), 1);
    }

    #[test]
    fn test_typed_records_match_json() {
        let json = format!(
            "[{}, {}]",
            person_json("f_1.png", 1, 4.0, 0.4),
            person_json("f_1.png", 2, 4.0, 0.4),
        );
        let records: Vec<DetectionRecord> = serde_json::from_str(&json).unwrap();
        let typed = parse_alphapose_json(&records, 2, &LoaderConfig::default()).unwrap();
        let untyped = parse_alphapose_json_str(&json, 2, &LoaderConfig::default()).unwrap();
        assert_eq!(typed, untyped);
        assert_eq!(typed.person(1, 0).map(|p| p.bbox_xyxy()), Some([10.0, 20.0, 15.0, 25.0]));
        assert!(typed.person(1, 1).is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_alphapose_json_file("/definitely/not/here.json", 1, &LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, PoseError::IoError(_)));
    }
}
