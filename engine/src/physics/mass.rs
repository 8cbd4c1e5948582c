//! Moment of inertia helpers
//!
//! Inertia is always taken about the body's center of mass, plus the parallel
//! axis term when a shape is offset from it.

use super::types::{Vec2, Vec2Ext};

/// Moment of inertia of a hollow (or solid, `inner_radius = 0`) circle.
///
/// `I = m * (r_inner² + r_outer²) / 2 + m * |offset|²`
pub fn moment_for_circle(mass: f32, inner_radius: f32, outer_radius: f32, offset: Vec2) -> f32 {
    mass * (inner_radius * inner_radius + outer_radius * outer_radius) * 0.5
        + mass * offset.length_squared()
}

/// Moment of inertia of a solid `width` x `height` box centered on the body.
pub fn moment_for_box(mass: f32, width: f32, height: f32) -> f32 {
    mass * (width * width + height * height) / 12.0
}

/// Moment of inertia of a solid polygon with uniform density, about the
/// local origin.
///
/// Returns 0 for fewer than 3 vertices or zero area.
pub fn moment_for_polygon(mass: f32, vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.cross(b).abs();
        numerator += cross * (a.dot(a) + a.dot(b) + b.dot(b));
        denominator += cross;
    }

    if denominator == 0.0 {
        return 0.0;
    }
    mass * numerator / (6.0 * denominator)
}
