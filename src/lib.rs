// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Multi-View Pose Loader
//!
//! Loads 2D human-pose detections produced by [AlphaPose](https://github.com/MVIG-SJTU/AlphaPose)
//! for a multi-camera capture, together with the raw video frames they were computed on.
//!
//! ## Input Layout
//!
//! ```text
//! <root>/
//! ├── view_0_alphapose/alphapose-results.json
//! ├── view_1_alphapose/alphapose-results.json
//! ├── view_0/frame_00000.png
//! ├── view_0/frame_00001.png
//! └── view_1/frame_00000.png
//! ```
//!
//! Each `alphapose-results.json` is a JSON array of detections:
//!
//! ```json
//! [{"image_id": "frame_00007.png", "category_id": 1,
//!   "keypoints": [x0, y0, c0, ..., x16, y16, c16],
//!   "box": [x, y, w, h], "score": 2.83}]
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use multiview_pose::{load_all_images, load_pose_data};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (keypoints, confidences, scores, boxes) = load_pose_data("capture/", 300)?;
//!
//!     // keypoints[view][frame][person] is a (17, 2) array of (x, y) locations
//!     for (v, view) in keypoints.iter().enumerate() {
//!         let persons: usize = view.iter().map(Vec::len).sum();
//!         println!("view {v}: {persons} detections");
//!     }
//!
//!     // images[[view, frame, y, x, channel]], values in [0, 1]
//!     let images = load_all_images("capture/", keypoints.len(), 300, None)?;
//!     println!("images: {:?}", images.shape());
//!     # let _ = (confidences, scores, boxes);
//!     Ok(())
//! }
//! ```
//!
//! ## Output Shapes
//!
//! | Output | Indexing | Per-person value |
//! |--------|----------|------------------|
//! | keypoints | `[view][frame][person]` | `Array2<f64>` (17, 2) |
//! | confidences | `[view][frame][person]` | `Array1<f64>` (17,) |
//! | scores | `[view][frame][person]` | `f64` |
//! | boxes | `[view][frame][person]` | `Array2<f64>` (2, 2), top-left / bottom-right |
//! | images | `[[view, frame, y, x, c]]` | `Array5<f32>` |
//!
//! The person axis is ragged: a frame holds as many entries as it has person
//! detections, possibly none. Views are ordered by directory name.
//!
//! ## Keypoint Ordering
//!
//! Rows follow the COCO body layout, see [`Keypoint`]:
//! 0 Nose, 1 LEye, 2 REye, 3 LEar, 4 REar, 5 LShoulder, 6 RShoulder, 7 LElbow,
//! 8 RElbow, 9 LWrist, 10 RWrist, 11 LHip, 12 RHip, 13 LKnee, 14 RKnee, 15 LAnkle,
//! 16 RAnkle.
//!
//! ## Custom Configuration
//!
//! ```rust
//! use multiview_pose::LoaderConfig;
//!
//! let config = LoaderConfig::new()
//!     .with_results_file("alphapose-results.json")
//!     .with_frame_digits(5)
//!     .with_image_extension("png");
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dataset`] | View discovery and multi-view [`PoseData`] loading |
//! | [`pose`] | Single-view parsing into [`ViewPoses`] |
//! | [`detection`] | [`DetectionRecord`], [`PersonPose`] and the frame index parser |
//! | [`images`] | Frame image grid loading and the [`Progress`] hook |
//! | [`keypoint`] | COCO [`Keypoint`] names and skeleton |
//! | [`config`] | [`LoaderConfig`] |
//! | [`error`] | Error types ([`PoseError`], [`Result`]) |

// Modules
pub mod config;
pub mod dataset;
pub mod detection;
pub mod error;
pub mod images;
pub mod keypoint;
pub mod pose;
pub mod utils;

// Re-export main types for convenience
pub use config::LoaderConfig;
pub use dataset::{
    PoseArrays, PoseData, Ragged3, discover_views, load_pose_data, load_pose_data_with_config,
};
pub use detection::{DetectionRecord, PersonPose, category_as_i64, frame_index_from_image_id};
pub use error::{PoseError, Result};
pub use images::{
    Progress, ProgressFn, image_path, load_all_images, load_images, load_images_with_config,
};
pub use keypoint::{Keypoint, NUM_KEYPOINTS, SKELETON};
pub use pose::{
    ViewPoses, parse_alphapose_json, parse_alphapose_json_file, parse_alphapose_json_str,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
