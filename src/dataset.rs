// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Multi-view pose loading.
//!
//! A capture root holds one `view_<d>_alphapose` directory per camera. Views are
//! discovered, sorted by name, parsed one after another and stacked along a new
//! leading axis, so `data.keypoints[v][f][p]` is person `p` of frame `f` in the
//! `v`-th view by name.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use ndarray::{Array1, Array2};
use regex::Regex;

use crate::config::LoaderConfig;
use crate::error::{PoseError, Result};
use crate::pose::{ViewPoses, parse_alphapose_json_file};

static VIEW_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^view_[0-9]_alphapose").expect("view pattern is valid"));

/// Ragged `[view][frame][person]` nesting.
pub type Ragged3<T> = Vec<Vec<Vec<T>>>;

/// The `(keypoints, confidences, scores, boxes)` tuple returned by [`load_pose_data`].
pub type PoseArrays = (
    Ragged3<Array2<f64>>,
    Ragged3<Array1<f64>>,
    Ragged3<f64>,
    Ragged3<Array2<f64>>,
);

/// Whether a directory name is an AlphaPose view directory.
///
/// Matches names starting with `view_<digit>_alphapose`.
#[must_use]
pub fn is_view_dir_name(name: &str) -> bool {
    VIEW_DIR_RE.is_match(name)
}

/// List the AlphaPose view directories under `root`, sorted by name.
///
/// Files and directories whose name does not match are ignored; a root without
/// any view directory gives an empty list.
///
/// # Errors
///
/// Returns [`PoseError::IoError`] if `root` cannot be read.
pub fn discover_views<P: AsRef<Path>>(root: P) -> Result<Vec<String>> {
    let root = root.as_ref();
    let entries = std::fs::read_dir(root)
        .map_err(|e| PoseError::IoError(format!("Failed to read {}: {e}", root.display())))?;

    let mut views = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if is_view_dir_name(&name) && entry.path().is_dir() {
            views.push(name);
        }
    }

    views.sort();
    Ok(views)
}

/// Pose detections of every view, stacked in view-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseData {
    /// View directory names, in the order of the leading axis.
    pub view_names: Vec<String>,
    /// Keypoint locations, each of shape (17, 2).
    pub keypoints: Ragged3<Array2<f64>>,
    /// Per-keypoint confidences, each of shape (17,).
    pub confidences: Ragged3<Array1<f64>>,
    /// Detection scores.
    pub scores: Ragged3<f64>,
    /// Boxes in corner form, each of shape (2, 2).
    pub boxes: Ragged3<Array2<f64>>,
}

impl PoseData {
    /// Number of views.
    #[must_use]
    pub fn num_views(&self) -> usize {
        self.scores.len()
    }

    /// Number of frames per view (0 when there are no views).
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.scores.first().map_or(0, Vec::len)
    }

    /// Append one view after the existing ones.
    pub fn push_view(&mut self, name: impl Into<String>, view: ViewPoses) {
        self.view_names.push(name.into());
        self.keypoints.push(view.keypoints);
        self.confidences.push(view.confidences);
        self.scores.push(view.scores);
        self.boxes.push(view.boxes);
    }

    /// Copy out a single view.
    #[must_use]
    pub fn view(&self, idx: usize) -> Option<ViewPoses> {
        Some(ViewPoses {
            keypoints: self.keypoints.get(idx)?.clone(),
            confidences: self.confidences.get(idx)?.clone(),
            scores: self.scores.get(idx)?.clone(),
            boxes: self.boxes.get(idx)?.clone(),
        })
    }

    /// Person count for every (view, frame) pair.
    #[must_use]
    pub fn persons_per_frame(&self) -> Array2<usize> {
        Array2::from_shape_fn((self.num_views(), self.num_frames()), |(v, f)| {
            self.scores[v].get(f).map_or(0, Vec::len)
        })
    }

    /// Split into the `(keypoints, confidences, scores, boxes)` tuple.
    #[must_use]
    pub fn into_parts(self) -> PoseArrays {
        (self.keypoints, self.confidences, self.scores, self.boxes)
    }
}

/// Path of a view's detection document.
#[must_use]
pub fn results_path(root: &Path, view_name: &str, config: &LoaderConfig) -> PathBuf {
    root.join(view_name).join(&config.results_file)
}

/// Load every view under `root` with a custom configuration.
///
/// # Errors
///
/// Returns [`PoseError::ConfigError`] for an invalid config, then fails on the first
/// view that cannot be read or parsed.
pub fn load_pose_data_with_config<P: AsRef<Path>>(
    root: P,
    num_frames: usize,
    config: &LoaderConfig,
) -> Result<PoseData> {
    config.validate()?;
    let root = root.as_ref();

    let mut data = PoseData::default();
    for name in discover_views(root)? {
        let view = parse_alphapose_json_file(results_path(root, &name, config), num_frames, config)?;
        data.push_view(name, view);
    }
    Ok(data)
}

/// Load every view under `root`.
///
/// Returns `(keypoints, confidences, scores, boxes)`, each indexed
/// `[view][frame][person]`. Locations are in (x, y) order.
///
/// # Errors
///
/// Fails if `root` cannot be read, a view document is missing or malformed, an
/// `image_id` carries no frame number, or a frame number is `>= num_frames`.
pub fn load_pose_data<P: AsRef<Path>>(root: P, num_frames: usize) -> Result<PoseArrays> {
    load_pose_data_with_config(root, num_frames, &LoaderConfig::default()).map(PoseData::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_dir_names() {
        assert!(is_view_dir_name("view_0_alphapose"));
        assert!(is_view_dir_name("view_9_alphapose"));
        assert!(!is_view_dir_name("view_10_alphapose"));
        assert!(!is_view_dir_name("view_0"));
        assert!(!is_view_dir_name("foo"));
        assert!(!is_view_dir_name("xview_0_alphapose"));
    }

    #[test]
    fn test_discover_views_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["view_2_alphapose", "view_0_alphapose", "foo", "view_1_alphapose"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("view_3_alphapose"), b"not a directory").unwrap();

        let views = discover_views(dir.path()).unwrap();
        assert_eq!(
            views,
            vec!["view_0_alphapose", "view_1_alphapose", "view_2_alphapose"]
        );
    }

    #[test]
    fn test_discover_views_missing_root() {
        let err = discover_views("/definitely/not/a/capture").unwrap_err();
        assert!(matches!(err, PoseError::IoError(_)));
    }

    #[test]
    fn test_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let (kp, confs, scores, boxes) = load_pose_data(dir.path(), 5).unwrap();
        assert!(kp.is_empty() && confs.is_empty() && scores.is_empty() && boxes.is_empty());
    }

    #[test]
    fn test_persons_per_frame() {
        let mut view = ViewPoses::with_frames(3);
        view.scores[1] = vec![0.5, 0.6];
        let mut data = PoseData::default();
        data.push_view("view_0_alphapose", view);
        data.push_view("view_1_alphapose", ViewPoses::with_frames(3));

        let counts = data.persons_per_frame();
        assert_eq!(counts, ndarray::array![[0, 2, 0], [0, 0, 0]]);
        assert_eq!(data.num_views(), 2);
        assert_eq!(data.num_frames(), 3);
        assert_eq!(data.view(1), Some(ViewPoses::with_frames(3)));
        assert!(data.view(2).is_none());
    }
}
