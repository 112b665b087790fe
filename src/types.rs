// src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub calibration: CalibrationConfig,
    pub classifier: ClassifierConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Pixel displacement per frame above which the subject counts as walking
    pub walk_threshold: f32,
    /// Hole detection radius used when the calibration file carries none
    pub default_hole_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub detections_dir: String,
    pub fps: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// One detection record from the upstream model, one per tracked box per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub frame: u64,
    /// Pixel-space box: [x1, y1, x2, y2] with x1 < x2, y1 < y2
    pub bbox: [f32; 4],
    pub label: String,
    pub confidence: f32,
}

impl Detection {
    pub fn center(&self) -> (f32, f32) {
        (
            (self.bbox[0] + self.bbox[2]) / 2.0,
            (self.bbox[1] + self.bbox[3]) / 2.0,
        )
    }
}

/// Final behavior taxonomy after rule-based correction of the raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Behavior {
    Climbing,
    Walking,
    HeadDipping,
    Rearing,
    Sniffing,
    Immobility,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Climbing => "rat_climbing",
            Self::Walking => "rat_walking",
            Self::HeadDipping => "rat_head_dipping",
            Self::Rearing => "rat_rearing",
            Self::Sniffing => "rat_sniffing",
            Self::Immobility => "rat_immobility",
        }
    }

    pub const ALL: [Behavior; 6] = [
        Self::Climbing,
        Self::Walking,
        Self::HeadDipping,
        Self::Rearing,
        Self::Sniffing,
        Self::Immobility,
    ];
}
