// src/calibration.rs
//
// Loads the geometry artifact written by the external calibration tool:
// the inner rectangle separating the wall band from the open center, the
// hole centers, and (optionally) the shared hole detection radius.
//
// Calibration is a one-time manual prerequisite. A missing or malformed
// file is fatal at startup, not a condition to retry.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Inner rectangle limits in pixel coordinates. Points outside this
/// rectangle belong to the wall band.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Limits {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationData {
    pub limits: Limits,
    pub holes: Vec<[f32; 2]>,
    /// Shared detection radius for all holes; the configured default
    /// applies when the calibration tool did not record one.
    pub hole_radius: Option<f32>,
}

/// How many holes the calibration tool nominally collects.
const EXPECTED_HOLES: usize = 4;

impl CalibrationData {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| {
            format!(
                "Calibration file not found: {}. Run the calibration tool first.",
                path.display()
            )
        })?;
        let reader = BufReader::new(file);

        let data: CalibrationData = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed calibration file: {}", path.display()))?;

        data.validate()?;

        info!(
            "Calibration loaded: limits x=[{:.0}, {:.0}] y=[{:.0}, {:.0}], {} hole(s)",
            data.limits.x_min,
            data.limits.x_max,
            data.limits.y_min,
            data.limits.y_max,
            data.holes.len()
        );

        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        let l = &self.limits;
        if l.x_min >= l.x_max || l.y_min >= l.y_max {
            bail!(
                "Invalid calibration limits: x=[{}, {}] y=[{}, {}]",
                l.x_min,
                l.x_max,
                l.y_min,
                l.y_max
            );
        }

        if let Some(radius) = self.hole_radius {
            if radius <= 0.0 {
                bail!("Invalid hole_radius in calibration: {}", radius);
            }
        }

        if self.holes.len() != EXPECTED_HOLES {
            warn!(
                "Calibration has {} hole(s), expected {}. Continuing anyway.",
                self.holes.len(),
                EXPECTED_HOLES
            );
        }

        Ok(())
    }
}
