//! Contact resolution
//!
//! Turns a [`Contact`] between a dynamic circle and an infinite-mass body
//! (static or kinematic) into impulses on the circle:
//!
//! 1. Normal impulse with restitution, skipped entirely when the pair is
//!    already separating.
//! 2. Coulomb friction impulse along the tangent, bounded by `μ·j`.
//! 3. Positional correction along the normal to remove the overlap.
//!
//! Relative velocity is measured at the contact point and includes both
//! bodies' spin, so a turning kinematic wall drags the circle along.

use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::collision::Contact;
use super::error::PhysicsError;
use super::shape::Material;
use super::types::Vec2Ext;

/// Tangential speeds below this produce no friction impulse.
const TANGENT_EPSILON: f32 = 1e-6;

/// How two surfaces' coefficients combine into one value for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineRule {
    Average,
    Min,
    Max,
    Multiply,
    GeometricMean,
}

impl CombineRule {
    #[inline]
    pub fn apply(&self, a: f32, b: f32) -> f32 {
        match self {
            CombineRule::Average => (a + b) * 0.5,
            CombineRule::Min => a.min(b),
            CombineRule::Max => a.max(b),
            CombineRule::Multiply => a * b,
            CombineRule::GeometricMean => (a * b).sqrt(),
        }
    }
}

/// Contact solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Rule for the pair's restitution
    pub restitution_rule: CombineRule,
    /// Rule for the pair's friction coefficient
    pub friction_rule: CombineRule,
    /// Fraction of the penetration removed per contact, in (0, 1]
    pub correction_fraction: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            restitution_rule: CombineRule::Max,
            friction_rule: CombineRule::GeometricMean,
            correction_fraction: 1.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.correction_fraction > 0.0 && self.correction_fraction <= 1.0) {
            return Err(PhysicsError::InvalidConfig(
                "correction fraction must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Restitution and friction for a pair of materials.
    pub fn combine(&self, a: &Material, b: &Material) -> (f32, f32) {
        (
            self.restitution_rule.apply(a.restitution, b.restitution),
            self.friction_rule.apply(a.friction, b.friction),
        )
    }
}

/// Impulses applied while resolving one contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactImpulse {
    /// Magnitude along the contact normal (always >= 0)
    pub normal: f32,
    /// Signed magnitude along the tangent of relative sliding
    pub tangent: f32,
}

/// Resolve `contact` by changing `circle` only; `other` has infinite mass.
///
/// Returns `None` and leaves `circle` untouched when the bodies are already
/// separating along the normal.
pub fn resolve_contact(
    circle: &mut RigidBody,
    circle_material: &Material,
    other: &RigidBody,
    other_material: &Material,
    contact: &Contact,
    config: &SolverConfig,
) -> Option<ContactImpulse> {
    let normal = contact.normal;
    let point = contact.point;
    let offset = point - circle.position;

    let relative = circle.velocity_at(point) - other.velocity_at(point);
    let vn = relative.dot(normal);
    if vn >= 0.0 {
        return None;
    }

    let (restitution, friction) = config.combine(circle_material, other_material);

    // For a centered circle the offset is parallel to the normal and the
    // angular term vanishes, leaving j = -(1 + e) * vn * m.
    let rn = offset.cross(normal);
    let k_normal = circle.inv_mass() + rn * rn * circle.inv_inertia();
    let j = -(1.0 + restitution) * vn / k_normal;
    circle.apply_impulse(normal * j, offset);

    let relative = circle.velocity_at(point) - other.velocity_at(point);
    let sliding = relative - normal * relative.dot(normal);
    let speed = sliding.length();
    let mut jt = 0.0;
    if speed > TANGENT_EPSILON {
        let tangent = sliding / speed;
        let rt = offset.cross(tangent);
        let k_tangent = circle.inv_mass() + rt * rt * circle.inv_inertia();
        jt = (-speed / k_tangent).max(-friction * j);
        circle.apply_impulse(tangent * jt, offset);
    }

    circle.position += normal * (contact.penetration * config.correction_fraction);

    Some(ContactImpulse {
        normal: j,
        tangent: jt,
    })
}
