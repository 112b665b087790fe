// src/zones.rs
//
// Spatial zone queries over the calibrated arena geometry.
//
// The arena is split into three zones: HOLE (within the detection radius of
// a hole center), WALL (outside the calibrated inner rectangle), and CENTER
// (everything else). Holes take precedence over the rectangle test, so a
// hole sitting in the wall band still classifies as HOLE.
//
// The wall test uses the raw inner rectangle as a hard edge. An earlier
// revision of the rules shrank the rectangle by a margin to get a wall
// band; that variant was dropped (see DESIGN.md).

use crate::calibration::{CalibrationData, Limits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Hole,
    Wall,
    Center,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hole => "HOLE",
            Self::Wall => "WALL",
            Self::Center => "CENTER",
        }
    }
}

pub struct ZoneModel {
    limits: Limits,
    holes: Vec<[f32; 2]>,
    hole_radius: f32,
}

impl ZoneModel {
    /// `default_hole_radius` applies when the calibration carries none.
    pub fn new(calibration: &CalibrationData, default_hole_radius: f32) -> Self {
        Self {
            limits: calibration.limits,
            holes: calibration.holes.clone(),
            hole_radius: calibration.hole_radius.unwrap_or(default_hole_radius),
        }
    }

    pub fn hole_radius(&self) -> f32 {
        self.hole_radius
    }

    /// Classify a point. Pure: same point, same answer.
    pub fn classify_point(&self, x: f32, y: f32) -> Zone {
        // Holes win, in declaration order
        for hole in &self.holes {
            if distance(x, y, hole[0], hole[1]) < self.hole_radius {
                return Zone::Hole;
            }
        }

        let l = &self.limits;
        if x < l.x_min || x > l.x_max || y < l.y_min || y > l.y_max {
            return Zone::Wall;
        }

        Zone::Center
    }
}

pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationData;

    fn test_model() -> ZoneModel {
        let calibration = CalibrationData {
            limits: Limits {
                x_min: 100.0,
                x_max: 500.0,
                y_min: 100.0,
                y_max: 500.0,
            },
            holes: vec![[50.0, 50.0]],
            hole_radius: Some(20.0),
        };
        ZoneModel::new(&calibration, 30.0)
    }

    #[test]
    fn test_interior_point_is_center() {
        assert_eq!(test_model().classify_point(300.0, 300.0), Zone::Center);
    }

    #[test]
    fn test_point_outside_rectangle_is_wall() {
        let model = test_model();
        assert_eq!(model.classify_point(50.0, 300.0), Zone::Wall);
        assert_eq!(model.classify_point(600.0, 300.0), Zone::Wall);
        assert_eq!(model.classify_point(300.0, 50.0), Zone::Wall);
        assert_eq!(model.classify_point(300.0, 600.0), Zone::Wall);
    }

    #[test]
    fn test_hole_takes_precedence_over_wall() {
        // (50, 50) is outside the rectangle but within the hole radius
        assert_eq!(test_model().classify_point(50.0, 50.0), Zone::Hole);
        assert_eq!(test_model().classify_point(55.0, 55.0), Zone::Hole);
    }

    #[test]
    fn test_point_at_hole_radius_is_not_hole() {
        // Strictly-less-than test: exactly at the radius falls through
        let model = test_model();
        assert_eq!(model.classify_point(70.0, 50.0), Zone::Wall);
        assert_eq!(model.classify_point(69.9, 50.0), Zone::Hole);
    }

    #[test]
    fn test_rectangle_edge_is_center() {
        // Hard-edge policy: the boundary itself is not wall
        let model = test_model();
        assert_eq!(model.classify_point(100.0, 300.0), Zone::Center);
        assert_eq!(model.classify_point(500.0, 500.0), Zone::Center);
    }

    #[test]
    fn test_default_radius_applies_when_calibration_has_none() {
        let calibration = CalibrationData {
            limits: Limits {
                x_min: 100.0,
                x_max: 500.0,
                y_min: 100.0,
                y_max: 500.0,
            },
            holes: vec![[50.0, 50.0]],
            hole_radius: None,
        };
        let model = ZoneModel::new(&calibration, 30.0);
        assert_eq!(model.hole_radius(), 30.0);
        // 25px away: inside the default radius, outside the test_model one
        assert_eq!(model.classify_point(75.0, 50.0), Zone::Hole);
    }
}
