// src/report.rs
//
// Output side of the pipeline: the per-frame behavior CSV consumed by the
// downstream analysis notebooks, plus per-recording statistics.

use crate::types::{Behavior, Detection};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV log of every classified detection for one recording.
pub struct BehaviorLog {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl BehaviorLog {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create behavior log: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record([
            "frame",
            "time_s",
            "raw_label",
            "final_behavior",
            "conf",
            "speed",
        ])?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn record(
        &mut self,
        detection: &Detection,
        time_s: f64,
        behavior: Behavior,
        speed: f32,
    ) -> Result<()> {
        self.writer.write_record([
            detection.frame.to_string(),
            format!("{:.3}", time_s),
            detection.label.clone(),
            behavior.as_str().to_string(),
            format!("{:.2}", detection.confidence),
            format!("{:.2}", speed),
        ])?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        info!("Behavior log written to: {}", self.path.display());
        Ok(())
    }
}

/// Aggregate statistics for one processed recording.
#[derive(Debug, Default)]
pub struct RunStats {
    pub detections: u64,
    pub behavior_counts: HashMap<Behavior, u64>,
    pub total_distance: f64,
    pub last_frame: u64,
}

impl RunStats {
    pub fn record(&mut self, behavior: Behavior, speed: f32, frame: u64) {
        self.detections += 1;
        *self.behavior_counts.entry(behavior).or_insert(0) += 1;
        self.total_distance += speed as f64;
        self.last_frame = self.last_frame.max(frame);
    }

    pub fn count(&self, behavior: Behavior) -> u64 {
        self.behavior_counts.get(&behavior).copied().unwrap_or(0)
    }

    pub fn mean_speed(&self) -> f64 {
        if self.detections == 0 {
            0.0
        } else {
            self.total_distance / self.detections as f64
        }
    }

    pub fn merge(&mut self, other: &RunStats) {
        self.detections += other.detections;
        for (behavior, count) in &other.behavior_counts {
            *self.behavior_counts.entry(*behavior).or_insert(0) += count;
        }
        self.total_distance += other.total_distance;
        self.last_frame = self.last_frame.max(other.last_frame);
    }

    pub fn log_summary(&self) {
        info!("  Detections classified: {}", self.detections);
        for behavior in Behavior::ALL {
            let count = self.count(behavior);
            if count > 0 {
                let share = 100.0 * count as f64 / self.detections.max(1) as f64;
                info!("    {:<17} {:>6} ({:.1}%)", behavior.as_str(), count, share);
            }
        }
        info!("  Distance traveled: {:.1} px", self.total_distance);
        info!("  Mean speed: {:.2} px/frame", self.mean_speed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(frame: u64, label: &str) -> Detection {
        Detection {
            frame,
            bbox: [10.0, 10.0, 50.0, 50.0],
            label: label.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_log_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_behavior.csv");

        let mut log = BehaviorLog::create(&path).unwrap();
        log.record(&detection(0, "rat_walking"), 0.0, Behavior::Walking, 0.0)
            .unwrap();
        log.record(&detection(1, "rat_rearing"), 0.033, Behavior::Rearing, 1.5)
            .unwrap();
        log.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "frame,time_s,raw_label,final_behavior,conf,speed"
        );
        assert_eq!(lines.next().unwrap(), "0,0.000,rat_walking,rat_walking,0.90,0.00");
        assert_eq!(lines.next().unwrap(), "1,0.033,rat_rearing,rat_rearing,0.90,1.50");
    }

    #[test]
    fn test_stats_accumulate_and_merge() {
        let mut first = RunStats::default();
        first.record(Behavior::Walking, 10.0, 0);
        first.record(Behavior::Walking, 6.0, 1);
        first.record(Behavior::Immobility, 0.0, 2);

        assert_eq!(first.detections, 3);
        assert_eq!(first.count(Behavior::Walking), 2);
        assert!((first.mean_speed() - 16.0 / 3.0).abs() < 1e-9);

        let mut second = RunStats::default();
        second.record(Behavior::Rearing, 0.0, 7);

        let mut totals = RunStats::default();
        totals.merge(&first);
        totals.merge(&second);
        assert_eq!(totals.detections, 4);
        assert_eq!(totals.count(Behavior::Rearing), 1);
        assert_eq!(totals.last_frame, 7);
    }
}
