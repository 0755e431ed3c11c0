// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::Path;
use std::process;
use std::time::Instant;

use multiview_pose::utils::format_count;
use multiview_pose::{LoaderConfig, image_path, load_images_with_config};

use crate::cli::args::ImagesArgs;
use crate::cli::logging::progress_bar;
use crate::{error, success, verbose};

/// Load the frame image grid and report its shape.
#[allow(clippy::cast_precision_loss)]
pub fn run_images(args: &ImagesArgs) {
    let config = LoaderConfig::new()
        .with_frame_digits(args.frame_digits)
        .with_image_extension(args.ext.clone());

    let view_idxs: Vec<usize> = (0..args.views).collect();
    let frame_idxs: Vec<usize> = (0..args.frames).collect();
    let total = view_idxs.len() * frame_idxs.len();

    verbose!(
        "Reading {} starting at {}",
        format_count(total, "image"),
        image_path(Path::new(&args.root), 0, 0, &config).display()
    );

    let bar = progress_bar(total, "frames");
    let mut ticker = bar.clone();
    let start = Instant::now();

    let images = match load_images_with_config(
        &args.root,
        &view_idxs,
        &frame_idxs,
        Some(&mut ticker),
        &config,
    ) {
        Ok(images) => images,
        Err(e) => {
            bar.abandon();
            error!("Failed to load images: {e}");
            process::exit(1);
        }
    };
    bar.finish_and_clear();

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    let per_image = if total > 0 { elapsed / total as f64 } else { 0.0 };
    success!(
        "Loaded images with shape {:?} in {elapsed:.1}ms ({per_image:.1}ms per image)",
        images.shape()
    );
}
