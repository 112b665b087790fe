// src/behavior.rs
//
// Behavior rules engine.
//
// The upstream model confuses visually similar static postures (rearing vs
// climbing vs head-dipping vs sniffing), which are only separable by where
// the animal is and whether it is moving. This engine fuses the raw label
// with zone membership and speed into the final behavior label.
//
// Rule hierarchy, first match wins:
//   1. Climbing posture against the wall beats everything, including motion
//   2. Any real displacement is walking, whatever the raw posture says
//   3. Stationary over a hole with a nose-down posture is head-dipping
//   4. Stationary in the open center: rearing / sniffing / immobility
//   5. Stationary against the wall without a climbing posture is sniffing
//   6. Anything else is immobility
//
// The ordering is the contract. A wall climber shifting its weight must not
// become "walking", and a fast-moving rat must never come out "rearing".

use crate::motion::MotionHistory;
use crate::types::Behavior;
use crate::zones::{Zone, ZoneModel};

/// Bounded history capacity: enough to keep a short trail, speed itself
/// only ever uses the previous entry.
const HISTORY_CAPACITY: usize = 5;

pub struct BehaviorClassifier<'a> {
    zones: &'a ZoneModel,
    history: MotionHistory,
    walk_threshold: f32,
}

impl<'a> BehaviorClassifier<'a> {
    pub fn new(zones: &'a ZoneModel, walk_threshold: f32) -> Self {
        Self {
            zones,
            history: MotionHistory::new(HISTORY_CAPACITY),
            walk_threshold,
        }
    }

    /// Classify one detection. Stateful: every call advances the motion
    /// history, so detections must be fed in frame order.
    pub fn classify(&mut self, bbox: [f32; 4], raw_label: &str) -> (Behavior, f32) {
        let cx = (bbox[0] + bbox[2]) / 2.0;
        let cy = (bbox[1] + bbox[3]) / 2.0;

        let zone = self.zones.classify_point(cx, cy);
        let speed = self.history.advance((cx, cy));
        let is_moving = speed > self.walk_threshold;

        // Rule 1: climbing posture on the wall
        if zone == Zone::Wall && matches!(raw_label, "rat_climbing" | "rat_rearing") {
            return (Behavior::Climbing, speed);
        }

        // Rule 2: movement
        if is_moving {
            return (Behavior::Walking, speed);
        }

        // Rule 3: stationary hole interaction
        if zone == Zone::Hole
            && matches!(raw_label, "rat_head_dipping" | "rat_sniffing" | "rat_horizontal")
        {
            return (Behavior::HeadDipping, speed);
        }

        // Rule 4: stationary in the center. A "head_dipping" call here has
        // no hole under it, so it reads as sniffing the floor.
        if zone == Zone::Center {
            return match raw_label {
                "rat_rearing" | "rat_climbing" => (Behavior::Rearing, speed),
                "rat_head_dipping" => (Behavior::Sniffing, speed),
                _ => (Behavior::Immobility, speed),
            };
        }

        // Rule 5: stationary on the wall, non-climbing posture
        if zone == Zone::Wall {
            return (Behavior::Sniffing, speed);
        }

        // Rule 6: default
        (Behavior::Immobility, speed)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget the motion trail without rebuilding the classifier.
    pub fn reset(&mut self) {
        self.history.reset();
    }
}
