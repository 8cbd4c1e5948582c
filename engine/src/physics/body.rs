//! Rigid bodies
//!
//! A body carries the transform and velocity state shared by every shape
//! kind. Shapes hold no transform of their own; their world geometry is always
//! derived from the owning body.
//!
//! # Kinematic classes
//!
//! - [`BodyKind::Dynamic`] - finite mass, moved by gravity and impulses
//! - [`BodyKind::Kinematic`] - infinite mass, orientation driven by an
//!   externally set angular rate, position owned by the caller
//! - [`BodyKind::Static`] - infinite mass, never moves, zero surface velocity

use super::error::PhysicsError;
use super::types::{Vec2, Vec2Ext};

/// How a body takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Kinematic,
    Dynamic,
}

/// A rigid body in the plane.
///
/// Mass and inertia are fixed at creation. The kinematic state is public so
/// the caller can drive kinematic bodies and place bodies before stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    /// World position of the center of mass
    pub position: Vec2,
    /// Orientation (radians, counter-clockwise)
    pub angle: f32,
    /// Linear velocity (units/second)
    pub velocity: Vec2,
    /// Angular velocity (radians/second)
    pub angular_velocity: f32,
    kind: BodyKind,
    mass: f32,
    inertia: f32,
    inv_mass: f32,
    inv_inertia: f32,
}

impl RigidBody {
    /// Create a dynamic body.
    ///
    /// Fails with [`PhysicsError::InvalidMass`] unless both `mass` and
    /// `inertia` are finite and strictly positive.
    pub fn new_dynamic(mass: f32, inertia: f32) -> Result<Self, PhysicsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(mass) || !valid(inertia) {
            return Err(PhysicsError::InvalidMass { mass, inertia });
        }
        Ok(Self {
            mass,
            inertia,
            inv_mass: 1.0 / mass,
            inv_inertia: 1.0 / inertia,
            ..Self::immovable(BodyKind::Dynamic)
        })
    }

    /// Create a kinematic body. Set `angular_velocity` to spin it.
    pub fn new_kinematic() -> Self {
        Self::immovable(BodyKind::Kinematic)
    }

    /// Create a static body.
    pub fn new_static() -> Self {
        Self::immovable(BodyKind::Static)
    }

    fn immovable(kind: BodyKind) -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            kind,
            mass: f32::INFINITY,
            inertia: f32::INFINITY,
            inv_mass: 0.0,
            inv_inertia: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Mass (infinite for static and kinematic bodies).
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Moment of inertia (infinite for static and kinematic bodies).
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Dynamic bodies use semi-implicit Euler: velocity picks up gravity first,
    /// then position and orientation advance with the new rates. Kinematic
    /// bodies only turn at their externally set angular rate. Static bodies
    /// never move.
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        match self.kind {
            BodyKind::Dynamic => {
                self.velocity += gravity * dt;
                self.position += self.velocity * dt;
                self.angle += self.angular_velocity * dt;
            }
            BodyKind::Kinematic => {
                self.angle += self.angular_velocity * dt;
            }
            BodyKind::Static => {}
        }
    }

    /// Apply an impulse at `offset` from the center of mass.
    ///
    /// No-op for static and kinematic bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2, offset: Vec2) {
        if self.kind != BodyKind::Dynamic {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += offset.cross(impulse) * self.inv_inertia;
    }

    /// Transform a local-frame point into world space.
    #[inline]
    pub fn world_point(&self, local: Vec2) -> Vec2 {
        self.position + local.rotated(self.angle)
    }

    /// Velocity of the material point currently at `world_point`.
    ///
    /// Static bodies always report zero.
    pub fn velocity_at(&self, world_point: Vec2) -> Vec2 {
        if self.kind == BodyKind::Static {
            return Vec2::ZERO;
        }
        self.velocity + Vec2::cross_scalar(self.angular_velocity, world_point - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: Vec2 = Vec2::new(0.0, 9.81);

    #[test]
    fn test_dynamic_rejects_bad_mass() {
        for (m, i) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, -2.0), (f32::NAN, 1.0)] {
            assert!(
                matches!(RigidBody::new_dynamic(m, i), Err(PhysicsError::InvalidMass { .. })),
                "mass={} inertia={} should be rejected",
                m,
                i
            );
        }
    }

    #[test]
    fn test_dynamic_integrates_semi_implicit() {
        let mut body = RigidBody::new_dynamic(1.0, 1.0).unwrap();
        body.integrate(0.1, GRAVITY);
        // Velocity first, then position with the new velocity
        assert!((body.velocity.y - 0.981).abs() < 1e-6);
        assert!((body.position.y - 0.0981).abs() < 1e-6);
    }

    #[test]
    fn test_dynamic_integrates_angle() {
        let mut body = RigidBody::new_dynamic(1.0, 1.0)
            .unwrap()
            .with_angular_velocity(2.0);
        body.integrate(0.25, Vec2::ZERO);
        assert!((body.angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_kinematic_only_rotates() {
        let mut body = RigidBody::new_kinematic()
            .with_velocity(Vec2::new(5.0, 5.0))
            .with_angular_velocity(2.0);
        body.integrate(0.1, GRAVITY);
        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::new(5.0, 5.0));
        assert!((body.angle - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_static_never_moves() {
        let mut body = RigidBody::new_static()
            .with_position(Vec2::new(1.0, 2.0))
            .with_angular_velocity(3.0);
        body.integrate(1.0, GRAVITY);
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.angle, 0.0);
        assert_eq!(body.velocity_at(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }

    #[test]
    fn test_apply_impulse_linear_and_angular() {
        let mut body = RigidBody::new_dynamic(2.0, 0.5).unwrap();
        body.apply_impulse(Vec2::new(0.0, 4.0), Vec2::new(1.0, 0.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 2.0));
        // (1,0) x (0,4) = 4, / 0.5
        assert!((body.angular_velocity - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_ignored_by_infinite_mass() {
        let mut kinematic = RigidBody::new_kinematic();
        kinematic.apply_impulse(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        assert_eq!(kinematic.velocity, Vec2::ZERO);
        assert_eq!(kinematic.angular_velocity, 0.0);

        let mut fixed = RigidBody::new_static();
        fixed.apply_impulse(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(fixed.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_kinematic_point_velocity_includes_spin() {
        let body = RigidBody::new_kinematic().with_angular_velocity(2.0);
        let v = body.velocity_at(Vec2::new(1.5, 0.0));
        assert!((v - Vec2::new(0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_world_point_rotates_then_translates() {
        let body = RigidBody::new_static()
            .with_position(Vec2::new(10.0, 0.0))
            .with_angle(std::f32::consts::PI);
        let p = body.world_point(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(9.0, 0.0)).length() < 1e-5);
    }
}
