// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use multiview_pose::utils::{argmax, format_count};
use multiview_pose::{LoaderConfig, PoseData, VERSION, discover_views, load_pose_data_with_config};
use ndarray::Axis;

use crate::cli::args::PosesArgs;
use crate::{error, info, section, success, verbose, warn};

/// One line per view: detection total and busiest frame.
pub fn summarize(data: &PoseData) -> Vec<String> {
    let counts = data.persons_per_frame();
    data.view_names
        .iter()
        .zip(counts.axis_iter(Axis(0)))
        .map(|(name, per_frame)| {
            let total: usize = per_frame.sum();
            let busiest = argmax(per_frame).map_or_else(
                || "no frames".to_string(),
                |(frame, n)| format!("busiest frame {frame} ({})", format_count(n, "person")),
            );
            format!("{name}: {}, {busiest}", format_count(total, "detection"))
        })
        .collect()
}

/// Load and summarize the pose detections of every view.
pub fn run_poses(args: &PosesArgs) {
    let config = LoaderConfig::new()
        .with_results_file(args.results_file.clone())
        .with_person_category(args.person_category);

    info!("multiview-pose {VERSION} 🚀 AlphaPose loader");
    verbose!("root={} frames={} results_file={}", args.root, args.frames, config.results_file);

    match discover_views(&args.root) {
        Ok(views) if views.is_empty() => {
            warn!("No view_<d>_alphapose directories found in {}", args.root);
        }
        Ok(views) => verbose!("Found {}", format_count(views.len(), "view")),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }

    let data = match load_pose_data_with_config(&args.root, args.frames, &config) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to load poses: {e}");
            process::exit(1);
        }
    };

    section!("Detections per view");
    for line in summarize(&data) {
        verbose!("{line}");
    }

    let total: usize = data.persons_per_frame().sum();
    success!(
        "Loaded {} over {} and {}",
        format_count(total, "detection"),
        format_count(data.num_views(), "view"),
        format_count(args.frames, "frame")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiview_pose::ViewPoses;

    #[test]
    fn test_summarize() {
        let mut view = ViewPoses::with_frames(3);
        view.scores[2] = vec![0.9, 0.8];
        view.scores[0] = vec![0.7];

        let mut data = PoseData::default();
        data.push_view("view_0_alphapose", view);
        data.push_view("view_1_alphapose", ViewPoses::with_frames(3));

        let lines = summarize(&data);
        assert_eq!(
            lines,
            vec![
                "view_0_alphapose: 3 detections, busiest frame 2 (2 persons)",
                "view_1_alphapose: 0 detections, busiest frame 0 (0 persons)",
            ]
        );
    }
}
