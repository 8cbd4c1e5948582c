//! Simulation space
//!
//! The [`Space`] owns every body and its shape and advances them with
//! [`Space::step`]. Lifecycle: construct, add bodies, step repeatedly, read
//! state back between steps. There is no global state and no body removal.
//!
//! # Step
//!
//! 1. Integrate every dynamic and kinematic body.
//! 2. For each dynamic body, test its shape against every static and kinematic
//!    body's shape and resolve any contact.
//!
//! One pass per call, no sub-stepping. A step works on a copy of the body
//! states and commits only when the whole step succeeds.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::collision::{Contact, detect};
use super::error::PhysicsError;
use super::shape::{Shape, ShapeKind};
use super::solver::{SolverConfig, resolve_contact};
use super::types::Vec2;

/// Identifies a body inside the [`Space`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Insertion index of the body.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// World-wide simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Gravity acceleration (units/s²). +y points down, so the default pulls
    /// toward +y.
    pub gravity: Vec2,
    /// Contact solver settings
    pub solver: SolverConfig,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            solver: SolverConfig::default(),
        }
    }
}

impl SpaceConfig {
    /// Default solver with custom gravity.
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig("gravity must be finite"));
        }
        self.solver.validate()
    }
}

/// What happened during one [`Space::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Contacts found by detection
    pub contacts: usize,
    /// Contacts that produced impulses (the rest were already separating)
    pub resolved: usize,
}

/// Owner of all bodies and shapes.
///
/// Not internally synchronized; `step` takes `&mut self`.
#[derive(Debug, Clone)]
pub struct Space {
    config: SpaceConfig,
    bodies: Vec<RigidBody>,
    shapes: Vec<Shape>,
    step_count: u64,
    time: f64,
}

static_assertions::assert_impl_all!(Space: Send, Sync);
static_assertions::assert_impl_all!(RigidBody: Copy, Send, Sync);
static_assertions::assert_impl_all!(Contact: Copy, Send, Sync);

impl Default for Space {
    fn default() -> Self {
        Self {
            config: SpaceConfig::default(),
            bodies: Vec::new(),
            shapes: Vec::new(),
            step_count: 0,
            time: 0.0,
        }
    }
}

impl Space {
    pub fn new(config: SpaceConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Register a body and the shape it owns.
    ///
    /// Only allowed before the first step.
    pub fn add_body(&mut self, body: RigidBody, shape: Shape) -> Result<BodyHandle, PhysicsError> {
        if self.step_count > 0 {
            return Err(PhysicsError::SimulationStarted);
        }
        shape.material.validate()?;

        if body.is_dynamic() && !matches!(shape.kind, ShapeKind::Circle(_)) {
            warn!("dynamic polygon bodies are integrated but never collide");
        }

        let handle = BodyHandle(self.bodies.len());
        debug!(
            "added {:?} body #{} at ({:.3}, {:.3})",
            body.kind(),
            handle.0,
            body.position.x,
            body.position.y
        );
        self.bodies.push(body);
        self.shapes.push(shape);
        Ok(handle)
    }

    /// Advance the world by `dt` seconds.
    ///
    /// Fails with [`PhysicsError::InvalidTimeStep`] unless `dt` is finite and
    /// positive. On any error the space is left exactly as it was.
    pub fn step(&mut self, dt: f32) -> Result<StepReport, PhysicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        let mut next = self.bodies.clone();
        for body in next.iter_mut() {
            body.integrate(dt, self.config.gravity);
        }

        let mut report = StepReport::default();
        for i in 0..next.len() {
            if !next[i].is_dynamic() {
                continue;
            }
            for j in 0..next.len() {
                if next[j].is_dynamic() {
                    continue;
                }
                let other = next[j];
                let Some(contact) = detect(&next[i], &self.shapes[i], &other, &self.shapes[j])?
                else {
                    continue;
                };
                report.contacts += 1;

                let impulse = resolve_contact(
                    &mut next[i],
                    &self.shapes[i].material,
                    &other,
                    &self.shapes[j].material,
                    &contact,
                    &self.config.solver,
                );
                if let Some(impulse) = impulse {
                    report.resolved += 1;
                    trace!(
                        "step {}: body #{} hit edge {} of body #{} (depth {:.4}, jn {:.4}, jt {:.4})",
                        self.step_count + 1,
                        i,
                        contact.edge,
                        j,
                        contact.penetration,
                        impulse.normal,
                        impulse.tangent
                    );
                }
            }
        }

        self.bodies = next;
        self.step_count += 1;
        self.time += f64::from(dt);
        Ok(report)
    }

    /// Number of successful steps so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.bodies
            .get(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Mutable access for the caller to drive kinematic bodies between steps.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn shape(&self, handle: BodyHandle) -> Result<&Shape, PhysicsError> {
        self.shapes
            .get(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vec2, PhysicsError> {
        Ok(self.body(handle)?.position)
    }

    pub fn angle(&self, handle: BodyHandle) -> Result<f32, PhysicsError> {
        Ok(self.body(handle)?.angle)
    }

    /// Current world vertices of a polygon body, or `None` for a circle.
    pub fn world_vertices(&self, handle: BodyHandle) -> Result<Option<Vec<Vec2>>, PhysicsError> {
        let body = self.body(handle)?;
        let shape = self.shape(handle)?;
        Ok(shape.as_polygon().map(|polygon| polygon.world_vertices(body)))
    }

    /// All bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody, &Shape)> {
        self.bodies
            .iter()
            .zip(self.shapes.iter())
            .enumerate()
            .map(|(i, (body, shape))| (BodyHandle(i), body, shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::mass::moment_for_circle;
    use crate::physics::shape::Material;

    fn ball_at(position: Vec2) -> (RigidBody, Shape) {
        let body = RigidBody::new_dynamic(0.1, moment_for_circle(0.1, 0.0, 0.1, Vec2::ZERO))
            .unwrap()
            .with_position(position);
        let shape = Shape::circle(0.1)
            .unwrap()
            .with_material(Material::new(0.8, 0.3));
        (body, shape)
    }

    fn container() -> Shape {
        Shape::rectangle(3.0, 3.0)
            .unwrap()
            .with_material(Material::new(0.8, 0.3))
    }

    #[test]
    fn test_space_config_default() {
        let config = SpaceConfig::default();
        assert_eq!(config.gravity, Vec2::new(0.0, 9.81));
        assert_eq!(config.solver, SolverConfig::default());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SpaceConfig::with_gravity(Vec2::new(f32::NAN, 0.0));
        assert!(matches!(Space::new(config), Err(PhysicsError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_time_step() {
        let mut space = Space::default();
        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(space.step(dt), Err(PhysicsError::InvalidTimeStep(_))));
        }
        assert_eq!(space.step_count(), 0);
    }

    #[test]
    fn test_cannot_add_after_first_step() {
        let mut space = Space::default();
        let (body, shape) = ball_at(Vec2::ZERO);
        space.add_body(body, shape.clone()).unwrap();
        space.step(0.1).unwrap();
        assert!(matches!(
            space.add_body(body, shape),
            Err(PhysicsError::SimulationStarted)
        ));
    }

    #[test]
    fn test_rejects_negative_material() {
        let mut space = Space::default();
        let (body, shape) = ball_at(Vec2::ZERO);
        let shape = shape.with_material(Material::new(-1.0, 0.0));
        assert!(space.add_body(body, shape).is_err());
        assert!(space.is_empty());
    }

    #[test]
    fn test_unknown_handle() {
        let space = Space::default();
        let handle = BodyHandle(3);
        assert!(matches!(space.body(handle), Err(PhysicsError::UnknownBody(h)) if h == handle));
    }

    #[test]
    fn test_handles_follow_insertion_order() {
        let mut space = Space::default();
        let walls = space.add_body(RigidBody::new_static(), container()).unwrap();
        let (body, shape) = ball_at(Vec2::new(0.0, -1.0));
        let ball = space.add_body(body, shape).unwrap();
        assert_eq!(walls.index(), 0);
        assert_eq!(ball.index(), 1);
        let order: Vec<usize> = space.iter().map(|(h, _, _)| h.index()).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_step_counts_time() {
        let mut space = Space::default();
        let (body, shape) = ball_at(Vec2::new(0.0, -1.0));
        space.add_body(body, shape).unwrap();
        for _ in 0..4 {
            space.step(0.25).unwrap();
        }
        assert_eq!(space.step_count(), 4);
        assert!((space.time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contact_reported_and_resolved() {
        let mut space = Space::default();
        space.add_body(RigidBody::new_static(), container()).unwrap();
        let (body, shape) = ball_at(Vec2::new(0.0, 1.38));
        let ball = space.add_body(body.with_velocity(Vec2::new(0.0, 0.2)), shape).unwrap();

        let report = space.step(0.1).unwrap();
        assert_eq!(report, StepReport { contacts: 1, resolved: 1 });
        assert!(space.body(ball).unwrap().velocity.y < 0.0);
        // Pushed back so the ball just touches the wall
        assert!(space.position(ball).unwrap().y <= 1.4 + 1e-5);
    }

    #[test]
    fn test_world_vertices_only_for_polygons() {
        let mut space = Space::default();
        let walls = space.add_body(RigidBody::new_static(), container()).unwrap();
        let (body, shape) = ball_at(Vec2::ZERO);
        let ball = space.add_body(body, shape).unwrap();
        assert_eq!(space.world_vertices(walls).unwrap().unwrap().len(), 4);
        assert!(space.world_vertices(ball).unwrap().is_none());
    }
}
