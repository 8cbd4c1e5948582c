//! Rotating Box Scenario
//!
//! A ball dropped inside a square box that keeps turning. The box is a
//! kinematic body: its turn rate is set so that it advances by
//! `rotation_per_step` every step, which also lets the resolver see the wall's
//! surface velocity. The caller drives the scene one fixed step at a time and
//! gets a [`Frame`] back after each.

pub mod config;
pub mod frame;

pub use config::{BallConfig, ContainerConfig, ScenarioConfig};
pub use frame::Frame;

use log::debug;

use crate::physics::{
    BodyHandle, PhysicsError, RigidBody, Shape, Space, Vec2, moment_for_circle,
};

/// The scene: a space holding the box and the ball.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: ScenarioConfig,
    space: Space,
    container: BodyHandle,
    ball: BodyHandle,
}

impl Scenario {
    /// Validate the config and build the space.
    pub fn new(config: ScenarioConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        let mut space = Space::new(config.space_config())?;

        let container_body = RigidBody::new_kinematic()
            .with_position(config.container.position)
            .with_angular_velocity(config.container.rotation_per_step / config.time_step);
        let container_shape = Shape::rectangle(config.container.size, config.container.size)?
            .with_material(config.container.material);
        let container = space.add_body(container_body, container_shape)?;

        let inertia = moment_for_circle(config.ball.mass, 0.0, config.ball.radius, Vec2::ZERO);
        let ball_body =
            RigidBody::new_dynamic(config.ball.mass, inertia)?.with_position(config.ball.position);
        let ball_shape = Shape::circle(config.ball.radius)?.with_material(config.ball.material);
        let ball = space.add_body(ball_body, ball_shape)?;

        debug!(
            "scenario ready: {} steps of {}s",
            config.total_steps(),
            config.time_step
        );

        Ok(Self {
            config,
            space,
            container,
            ball,
        })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn ball(&self) -> BodyHandle {
        self.ball
    }

    pub fn container(&self) -> BodyHandle {
        self.container
    }

    /// True once `duration` worth of steps has been taken.
    pub fn is_finished(&self) -> bool {
        self.space.step_count() >= self.config.total_steps()
    }

    /// Advance one fixed step and report the new state.
    pub fn step(&mut self) -> Result<Frame, PhysicsError> {
        self.space.step(self.config.time_step)?;
        self.frame()
    }

    /// Current state without stepping.
    pub fn frame(&self) -> Result<Frame, PhysicsError> {
        let ball = self.space.body(self.ball)?;
        let container = self.space.body(self.container)?;
        let corners = self
            .space
            .world_vertices(self.container)?
            .unwrap_or_default()
            .into_iter()
            .map(|corner| corner - container.position)
            .collect();

        Ok(Frame {
            step: self.space.step_count(),
            time: self.space.time(),
            ball_position: ball.position,
            ball_velocity: ball.velocity,
            box_angle: container.angle,
            box_corners: corners,
        })
    }

    /// Run the remaining steps and collect every frame.
    pub fn run(&mut self) -> Result<Vec<Frame>, PhysicsError> {
        let mut frames = Vec::new();
        while !self.is_finished() {
            frames.push(self.step()?);
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_reference_scene() {
        let scenario = Scenario::new(ScenarioConfig::default()).unwrap();
        let space = scenario.space();
        assert_eq!(space.len(), 2);
        let ball = space.body(scenario.ball()).unwrap();
        assert!(ball.is_dynamic());
        assert!((ball.inertia() - 0.0005).abs() < 1e-8);
        let container = space.body(scenario.container()).unwrap();
        assert!((container.angular_velocity - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_angle_advances_per_step() {
        let mut scenario = Scenario::new(ScenarioConfig::default()).unwrap();
        for _ in 0..4 {
            scenario.step().unwrap();
        }
        let frame = scenario.step().unwrap();
        assert_eq!(frame.step, 5);
        assert!((frame.box_angle - 1.0).abs() < 1e-5);
        assert!((frame.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_run_produces_all_frames() {
        let config = ScenarioConfig {
            duration: 1.0,
            ..ScenarioConfig::default()
        };
        let mut scenario = Scenario::new(config).unwrap();
        let frames = scenario.run().unwrap();
        assert_eq!(frames.len(), 10);
        assert!(scenario.is_finished());
        assert!(scenario.run().unwrap().is_empty());
    }

    #[test]
    fn test_ball_stays_in_box() {
        let mut scenario = Scenario::new(ScenarioConfig::default()).unwrap();
        for frame in scenario.run().unwrap() {
            let corners = &frame.box_corners;
            let n = corners.len();
            // Winding sign, so interior distances come out positive
            let area: f32 = (0..n)
                .map(|i| corners[i].perp_dot(corners[(i + 1) % n]))
                .sum();
            let winding = area.signum();

            let nearest = (0..n)
                .map(|i| {
                    let a = corners[i];
                    let edge = corners[(i + 1) % n] - a;
                    winding * edge.perp_dot(frame.ball_position - a) / edge.length()
                })
                .fold(f32::INFINITY, f32::min);
            assert!(
                nearest > 0.0,
                "ball escaped at step {}: {:?} (distance {})",
                frame.step,
                frame.ball_position,
                nearest
            );
        }
    }
}
