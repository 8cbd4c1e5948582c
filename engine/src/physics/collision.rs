//! Collision detection
//!
//! Circle vs convex polygon, for a circle that lives inside the polygon (the
//! ball-in-a-box case). The polygon is treated as a container: the nearest
//! wall is found by the minimum signed distance from the circle center to each
//! edge line, and the circle is in contact when that distance is smaller than
//! its radius.
//!
//! # Signed distance convention
//!
//! Positive means the center is on the interior side of the edge. A center that
//! has escaped the polygon gets a negative distance, which yields a penetration
//! larger than the radius and a normal that pushes it back inside.
//!
//! # Ties
//!
//! When two edges are exactly equally close (a corner), the edge with the lower
//! index wins.

use super::body::RigidBody;
use super::error::PhysicsError;
use super::shape::{ConvexPolygon, Shape, ShapeKind};
use super::types::Vec2;

/// A contact produced for a single step. Never stored across steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Projection of the circle center onto the nearest wall
    pub point: Vec2,
    /// Unit normal from the wall toward the circle center; pushing the circle
    /// along it separates the pair
    pub normal: Vec2,
    /// Overlap depth, always > 0 for a reported contact
    pub penetration: f32,
    /// Index of the wall edge (vertex `edge` to vertex `edge + 1`)
    pub edge: usize,
}

/// Test a circle against the walls of a convex polygon.
///
/// Returns `Ok(None)` when no wall is within `radius` of `center`.
pub fn circle_vs_convex_polygon(
    center: Vec2,
    radius: f32,
    polygon: &ConvexPolygon,
    polygon_body: &RigidBody,
) -> Result<Option<Contact>, PhysicsError> {
    let vertices = polygon.world_vertices(polygon_body);
    let n = vertices.len();

    // (signed distance, outward normal, edge index)
    let mut nearest: Option<(f32, Vec2, usize)> = None;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let outward = polygon.outward_normal(b - a)?;
        let distance = (a - center).dot(outward);

        // Strict comparison keeps the lowest index on ties
        if nearest.is_none_or(|(best, _, _)| distance < best) {
            nearest = Some((distance, outward, i));
        }
    }

    let Some((distance, outward, edge)) = nearest else {
        return Ok(None);
    };

    let penetration = radius - distance;
    if penetration <= 0.0 {
        return Ok(None);
    }

    Ok(Some(Contact {
        point: center + outward * distance,
        normal: -outward,
        penetration,
        edge,
    }))
}

/// Run detection for a circle shape against another shape.
///
/// Only circle vs convex polygon is supported; every other pairing reports no
/// contact.
pub fn detect(
    circle_body: &RigidBody,
    circle_shape: &Shape,
    other_body: &RigidBody,
    other_shape: &Shape,
) -> Result<Option<Contact>, PhysicsError> {
    match (&circle_shape.kind, &other_shape.kind) {
        (ShapeKind::Circle(circle), ShapeKind::ConvexPolygon(polygon)) => circle_vs_convex_polygon(
            circle.world_center(circle_body),
            circle.radius(),
            polygon,
            other_body,
        ),
        _ => Ok(None),
    }
}
