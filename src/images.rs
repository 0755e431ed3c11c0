// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Loading of raw video frames as a `[view][frame][H][W][C]` grid.
//!
//! Frames are stored as `<root>/view_<v>/frame_<fffff>.png` and read view by view,
//! frame by frame, in the order of the index lists given by the caller.

use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage};
use ndarray::Array5;

use crate::config::LoaderConfig;
use crate::error::{PoseError, Result};

/// Receives one tick per image read.
pub trait Progress {
    /// Advance by one.
    fn update(&mut self);
}

impl Progress for indicatif::ProgressBar {
    fn update(&mut self) {
        self.inc(1);
    }
}

/// Adapts a closure into a [`Progress`] reporter.
///
/// # Example
///
/// ```rust
/// use multiview_pose::{Progress, ProgressFn};
///
/// let mut ticks = 0;
/// let mut progress = ProgressFn(|| ticks += 1);
/// progress.update();
/// progress.update();
/// drop(progress);
/// assert_eq!(ticks, 2);
/// ```
pub struct ProgressFn<F: FnMut()>(pub F);

impl<F: FnMut()> Progress for ProgressFn<F> {
    fn update(&mut self) {
        (self.0)();
    }
}

/// Path of the image for a (view, frame) pair.
#[must_use]
pub fn image_path(root: &Path, view_idx: usize, frame_idx: usize, config: &LoaderConfig) -> PathBuf {
    root.join(format!("view_{view_idx}")).join(format!(
        "frame_{frame_idx:0width$}.{ext}",
        width = config.frame_digits,
        ext = config.image_extension
    ))
}

/// Channel layout of a decoded frame, fixed by the first image of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl Layout {
    fn of(color: ColorType) -> Self {
        match color.channel_count() {
            1 => Self::Luma,
            2 => Self::LumaAlpha,
            3 => Self::Rgb,
            _ => Self::Rgba,
        }
    }

    const fn channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Interleaved samples in `[0, 1]`.
    fn samples(self, image: &DynamicImage) -> Vec<f32> {
        match self {
            Self::Luma => image.to_luma32f().into_raw(),
            Self::LumaAlpha => image.to_luma_alpha32f().into_raw(),
            Self::Rgb => image.to_rgb32f().into_raw(),
            Self::Rgba => image.to_rgba32f().into_raw(),
        }
    }
}

/// Decode one frame. A file that cannot be opened or read is an I/O failure.
fn read_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => {
            PoseError::IoError(format!("Failed to read {}: {io}", path.display()))
        }
        other => PoseError::ImageError(format!("Failed to decode {}: {other}", path.display())),
    })
}

/// Load the images for every (view, frame) pair, view-major.
///
/// The result has shape `[views][frames][height][width][channels]` with samples in
/// `[0, 1]`. The channel count follows the first image (1 gray, 2 gray + alpha,
/// 3 RGB, 4 RGBA); later images are converted to the same layout.
///
/// # Errors
///
/// Returns [`PoseError::IoError`] if an image is missing or unreadable,
/// [`PoseError::ImageError`] if it cannot be decoded, and [`PoseError::ShapeError`]
/// if image sizes differ.
pub fn load_images_with_config<P: AsRef<Path>>(
    root: P,
    view_idxs: &[usize],
    frame_idxs: &[usize],
    mut progress: Option<&mut dyn Progress>,
    config: &LoaderConfig,
) -> Result<Array5<f32>> {
    config.validate()?;
    let root = root.as_ref();

    let mut dims: Option<(u32, u32, Layout)> = None;
    let mut data = Vec::new();

    for &view_idx in view_idxs {
        for &frame_idx in frame_idxs {
            if let Some(p) = progress.as_deref_mut() {
                p.update();
            }

            let path = image_path(root, view_idx, frame_idx, config);
            let image = read_image(&path)?;
            let (width, height, layout) =
                *dims.get_or_insert((image.width(), image.height(), Layout::of(image.color())));

            if (image.width(), image.height()) != (width, height) {
                return Err(PoseError::ShapeError(format!(
                    "{} is {}x{}, expected {width}x{height}",
                    path.display(),
                    image.width(),
                    image.height()
                )));
            }

            data.extend(layout.samples(&image));
        }
    }

    let (height, width, channels) = dims.map_or((0, 0, 0), |(w, h, layout)| {
        (h as usize, w as usize, layout.channels())
    });

    Array5::from_shape_vec(
        (view_idxs.len(), frame_idxs.len(), height, width, channels),
        data,
    )
    .map_err(|e| PoseError::ShapeError(e.to_string()))
}

/// Load the images for every (view, frame) pair using the default file layout.
///
/// `progress`, when given, is ticked once per image just before it is read.
///
/// # Errors
///
/// See [`load_images_with_config`].
pub fn load_images<P: AsRef<Path>>(
    root: P,
    view_idxs: &[usize],
    frame_idxs: &[usize],
    progress: Option<&mut dyn Progress>,
) -> Result<Array5<f32>> {
    load_images_with_config(root, view_idxs, frame_idxs, progress, &LoaderConfig::default())
}

/// Load views `0..num_views` and frames `0..num_frames`.
///
/// # Errors
///
/// See [`load_images_with_config`].
pub fn load_all_images<P: AsRef<Path>>(
    root: P,
    num_views: usize,
    num_frames: usize,
    progress: Option<&mut dyn Progress>,
) -> Result<Array5<f32>> {
    let view_idxs: Vec<usize> = (0..num_views).collect();
    let frame_idxs: Vec<usize> = (0..num_frames).collect();
    load_images(root, &view_idxs, &frame_idxs, progress)
}
