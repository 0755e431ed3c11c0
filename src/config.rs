// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Loader configuration.
//!
//! This module defines the [`LoaderConfig`] struct, which controls the file naming
//! conventions and class filtering used when reading AlphaPose results and video frames.

use crate::error::{PoseError, Result};

/// Name of the per-view detection document written by AlphaPose.
pub const DEFAULT_RESULTS_FILE: &str = "alphapose-results.json";

/// COCO category id of the "person" class.
pub const PERSON_CATEGORY_ID: i64 = 1;

/// Configuration for pose and image loading.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use multiview_pose::LoaderConfig;
///
/// let config = LoaderConfig::new()
///     .with_results_file("results.json")
///     .with_frame_digits(6)
///     .with_image_extension("jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Category id a detection must carry to be kept.
    /// Records of any other category are skipped silently.
    pub person_category_id: i64,
    /// File name of the detection document inside each `view_<d>_alphapose` directory.
    pub results_file: String,
    /// Zero padding of the frame number in image file names (`frame_00003.png` for 5).
    pub frame_digits: usize,
    /// Extension of the frame images, without the leading dot.
    pub image_extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            person_category_id: PERSON_CATEGORY_ID,
            results_file: DEFAULT_RESULTS_FILE.to_string(),
            frame_digits: 5,
            image_extension: "png".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category id treated as "person".
    ///
    /// # Arguments
    ///
    /// * `category_id` - The category id detections must carry to be kept.
    #[must_use]
    pub const fn with_person_category(mut self, category_id: i64) -> Self {
        self.person_category_id = category_id;
        self
    }

    /// Set the detection document file name looked up in each view directory.
    #[must_use]
    pub fn with_results_file(mut self, name: impl Into<String>) -> Self {
        self.results_file = name.into();
        self
    }

    /// Set the zero padding width of frame numbers in image file names.
    #[must_use]
    pub const fn with_frame_digits(mut self, digits: usize) -> Self {
        self.frame_digits = digits;
        self
    }

    /// Set the frame image extension (e.g. `"png"`, `"jpg"`).
    #[must_use]
    pub fn with_image_extension(mut self, ext: impl Into<String>) -> Self {
        self.image_extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    /// Check the configuration for values that cannot address any file.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] if the results file name or the image
    /// extension is empty, or if the results file name contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.results_file.is_empty() {
            return Err(PoseError::ConfigError(
                "results file name must not be empty".to_string(),
            ));
        }
        if self.results_file.contains(['/', '\\']) {
            return Err(PoseError::ConfigError(format!(
                "results file name must be a bare file name, got '{}'",
                self.results_file
            )));
        }
        if self.image_extension.is_empty() {
            return Err(PoseError::ConfigError(
                "image extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
