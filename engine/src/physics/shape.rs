//! Collision shapes
//!
//! A [`Shape`] is attached to exactly one body inside a
//! [`Space`](super::space::Space) and holds only local-frame geometry plus its
//! surface [`Material`]. World-space queries take the owning body so the
//! geometry always follows the body's current position and orientation.
//!
//! Only two kinds exist, so the shape is a closed enum ([`ShapeKind`]) rather
//! than a trait object.

use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::error::PhysicsError;
use super::types::{Vec2, Vec2Ext};

/// Tolerance for convexity and area checks at construction.
const GEOMETRY_EPSILON: f32 = 1e-6;

/// Surface properties used by the contact solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Fraction of normal approach speed returned after impact (elasticity)
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.0,
        }
    }
}

impl Material {
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            restitution,
            friction,
        }
    }

    /// Both coefficients must be finite and non-negative.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.restitution.is_finite() || self.restitution < 0.0 {
            return Err(PhysicsError::InvalidConfig("restitution must be non-negative"));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(PhysicsError::InvalidConfig("friction must be non-negative"));
        }
        Ok(())
    }
}

/// A circle, optionally offset from the body's center of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f32,
    offset: Vec2,
}

impl Circle {
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// World-space center for the given owning body.
    pub fn world_center(&self, body: &RigidBody) -> Vec2 {
        body.world_point(self.offset)
    }
}

/// A convex polygon in the body's local frame.
///
/// Vertices keep the order they were given in. Either winding is accepted;
/// the detected winding decides which side of each edge is outside.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
    counter_clockwise: bool,
}

impl ConvexPolygon {
    /// Validate and build a polygon.
    ///
    /// Rejects fewer than 3 vertices, non-finite coordinates, zero-length
    /// edges, zero area, reflex corners and self-intersecting outlines.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        let n = vertices.len();
        if n < 3 {
            return Err(PhysicsError::DegenerateShape("polygon needs at least 3 vertices"));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::DegenerateShape("polygon vertex is not finite"));
        }

        let edge = |i: usize| vertices[(i + 1) % n] - vertices[i];
        if (0..n).any(|i| edge(i).length() < GEOMETRY_EPSILON) {
            return Err(PhysicsError::DegenerateShape("polygon has a zero-length edge"));
        }

        let twice_area: f32 = (0..n).map(|i| vertices[i].cross(vertices[(i + 1) % n])).sum();
        if twice_area.abs() < GEOMETRY_EPSILON {
            return Err(PhysicsError::DegenerateShape("polygon has zero area"));
        }
        let sign = twice_area.signum();

        // Every turn must go the same way, and the turns must add up to one
        // full revolution (a pentagram turns the same way but twice).
        let mut total_turn = 0.0f32;
        for i in 0..n {
            let e0 = edge(i);
            let e1 = edge((i + 1) % n);
            let turn = e0.cross(e1);
            if turn * sign < -GEOMETRY_EPSILON {
                return Err(PhysicsError::DegenerateShape("polygon is not convex"));
            }
            total_turn += turn.atan2(e0.dot(e1));
        }
        if (total_turn.abs() - std::f32::consts::TAU).abs() > 1e-3 {
            return Err(PhysicsError::DegenerateShape("polygon outline intersects itself"));
        }

        Ok(Self {
            vertices,
            counter_clockwise: sign > 0.0,
        })
    }

    /// Local-frame vertices in their original order.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    /// Rotate then translate every vertex by the owning body's transform,
    /// keeping vertex order.
    pub fn world_vertices(&self, body: &RigidBody) -> Vec<Vec2> {
        self.vertices.iter().map(|&v| body.world_point(v)).collect()
    }

    /// Unit normal of `edge` pointing out of this polygon.
    pub fn outward_normal(&self, edge: Vec2) -> Result<Vec2, PhysicsError> {
        let perp = if self.counter_clockwise {
            Vec2::new(edge.y, -edge.x)
        } else {
            Vec2::new(-edge.y, edge.x)
        };
        perp.normalized()
    }
}

/// Geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    ConvexPolygon(ConvexPolygon),
}

/// A collision shape: geometry plus surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub material: Material,
}

impl Shape {
    /// Circle centered on the body.
    pub fn circle(radius: f32) -> Result<Self, PhysicsError> {
        Self::circle_with_offset(radius, Vec2::ZERO)
    }

    pub fn circle_with_offset(radius: f32, offset: Vec2) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::DegenerateShape("circle radius must be positive"));
        }
        if !offset.is_finite() {
            return Err(PhysicsError::DegenerateShape("circle offset is not finite"));
        }
        Ok(Self {
            kind: ShapeKind::Circle(Circle { radius, offset }),
            material: Material::default(),
        })
    }

    /// Convex polygon from local-frame vertices (see [`ConvexPolygon::new`]).
    pub fn convex_polygon(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        Ok(Self {
            kind: ShapeKind::ConvexPolygon(ConvexPolygon::new(vertices)?),
            material: Material::default(),
        })
    }

    /// Axis-aligned `width` x `height` box centered on the body.
    ///
    /// Corner order: (-w/2, -h/2), (w/2, -h/2), (w/2, h/2), (-w/2, h/2).
    pub fn rectangle(width: f32, height: f32) -> Result<Self, PhysicsError> {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::convex_polygon(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match &self.kind {
            ShapeKind::Circle(circle) => Some(circle),
            ShapeKind::ConvexPolygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&ConvexPolygon> {
        match &self.kind {
            ShapeKind::ConvexPolygon(polygon) => Some(polygon),
            ShapeKind::Circle(_) => None,
        }
    }
}
