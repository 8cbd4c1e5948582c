//! Per-step report of the scene state

use std::fmt;

use glam::Vec2;
use serde::Serialize;

/// Snapshot taken after a step, for printing or JSON output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Steps taken so far
    pub step: u64,
    /// Simulated seconds elapsed
    pub time: f64,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
    /// Box orientation (radians)
    pub box_angle: f32,
    /// Box corners relative to the box center, in vertex order
    pub box_corners: Vec<Vec2>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:.2}, Ball Position: ({:.2}, {:.2}), Box Corners: [",
            self.time, self.ball_position.x, self.ball_position.y
        )?;
        for (i, corner) in self.box_corners.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({:.2}, {:.2})", corner.x, corner.y)?;
        }
        write!(f, "]")
    }
}
