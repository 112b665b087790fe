// src/main.rs

mod behavior;
mod calibration;
mod config;
mod detections;
mod motion;
mod report;
mod types;
mod zones;

use anyhow::{Context, Result};
use behavior::BehaviorClassifier;
use calibration::CalibrationData;
use detections::{find_detection_files, DetectionReader};
use report::{BehaviorLog, RunStats};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use types::Config;
use zones::ZoneModel;

fn main() -> Result<()> {
    let config = Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("rat_behavior_detection={}", config.logging.level))
        .init();

    info!("🐀 Rat Behavior Detection Starting");
    info!("✓ Configuration loaded");
    info!(
        "Classifier thresholds: walk={:.1} px/frame, default hole radius={:.0} px",
        config.classifier.walk_threshold, config.classifier.default_hole_radius
    );

    let calibration = CalibrationData::load(Path::new(&config.calibration.path))?;
    let zone_model = ZoneModel::new(&calibration, config.classifier.default_hole_radius);
    info!("✓ Zone model ready (hole radius: {:.0} px)", zone_model.hole_radius());

    let detection_files = find_detection_files(&config.input.detections_dir)?;
    if detection_files.is_empty() {
        error!("No detection files found in {}", config.input.detections_dir);
        return Ok(());
    }

    std::fs::create_dir_all(&config.output.output_dir)?;

    let mut totals = RunStats::default();
    let mut files_processed = 0usize;

    for (idx, path) in detection_files.iter().enumerate() {
        info!("========================================");
        info!(
            "Processing recording {}/{}: {}",
            idx + 1,
            detection_files.len(),
            path.display()
        );

        match process_recording(path, &zone_model, &config) {
            Ok(stats) => {
                info!("✓ Recording processed");
                stats.log_summary();
                totals.merge(&stats);
                files_processed += 1;
            }
            Err(e) => {
                error!("Failed to process {}: {:#}", path.display(), e);
            }
        }
    }

    info!("📊 Final Report:");
    info!(
        "  Recordings processed: {}/{}",
        files_processed,
        detection_files.len()
    );
    totals.log_summary();

    Ok(())
}

/// Run one recording's detections through the rules engine.
///
/// Each recording tracks a single subject, so it gets its own classifier
/// and with it a fresh motion history.
fn process_recording(path: &Path, zone_model: &ZoneModel, config: &Config) -> Result<RunStats> {
    let mut reader = DetectionReader::open(path)?;
    let mut classifier = BehaviorClassifier::new(zone_model, config.classifier.walk_threshold);

    let mut log = BehaviorLog::create(&output_path_for(path, &config.output.output_dir)?)?;
    let mut stats = RunStats::default();
    let fps = config.input.fps;

    while let Some(detection) = reader.next_detection()? {
        let (behavior, speed) = classifier.classify(detection.bbox, &detection.label);
        let time_s = detection.frame as f64 / fps;

        log.record(&detection, time_s, behavior, speed)?;
        stats.record(behavior, speed, detection.frame);

        if stats.detections % 500 == 0 {
            debug!(
                "  Frame {}: {} detection(s) classified",
                detection.frame, stats.detections
            );
        }
    }

    log.finish()?;
    Ok(stats)
}

fn output_path_for(input: &Path, output_dir: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Detection file has no usable name")?;
    Ok(PathBuf::from(output_dir).join(format!("{}_behavior.csv", stem)))
}
