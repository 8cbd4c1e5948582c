//! Scenario Configuration
//!
//! Every constant of the ball-in-a-rotating-box scene in one place.
//! `Default` reproduces the reference scene; a JSON file can override any
//! subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::{Material, PhysicsError, SolverConfig, SpaceConfig};

/// The square container the ball bounces in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Side length of the square (meters)
    pub size: f32,
    /// World-space center of the box
    pub position: Vec2,
    /// Angle added to the box after every step (radians)
    pub rotation_per_step: f32,
    /// Wall surface
    pub material: Material,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            size: 3.0,
            position: Vec2::ZERO,
            rotation_per_step: 0.2,
            material: Material::new(0.8, 0.3),
        }
    }
}

/// The dynamic ball.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Radius (meters)
    pub radius: f32,
    /// Mass (kilograms)
    pub mass: f32,
    /// Starting position
    pub position: Vec2,
    /// Ball surface
    pub material: Material,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.1,
            mass: 0.1,
            position: Vec2::new(0.0, -1.0),
            material: Material::new(0.8, 0.3),
        }
    }
}

/// Central configuration for the whole scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Simulated seconds to run
    pub duration: f32,
    /// Fixed physics step (seconds)
    pub time_step: f32,
    /// Gravity; +y is down
    pub gravity: Vec2,
    /// Contact solver settings
    pub solver: SolverConfig,
    pub container: ContainerConfig,
    pub ball: BallConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            time_step: 0.1,
            gravity: Vec2::new(0.0, 9.81),
            solver: SolverConfig::default(),
            container: ContainerConfig::default(),
            ball: BallConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parse from JSON, filling missing fields with defaults, and validate.
    pub fn from_json_str(json: &str) -> Result<Self, PhysicsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, PhysicsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Physics-world part of the config.
    pub fn space_config(&self) -> SpaceConfig {
        SpaceConfig {
            gravity: self.gravity,
            solver: self.solver,
        }
    }

    /// Number of fixed steps that fit in `duration`.
    pub fn total_steps(&self) -> u64 {
        (self.duration / self.time_step).round() as u64
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.duration) {
            return Err(PhysicsError::InvalidConfig("duration must be positive"));
        }
        if !positive(self.time_step) {
            return Err(PhysicsError::InvalidConfig("time step must be positive"));
        }
        if !positive(self.container.size) {
            return Err(PhysicsError::InvalidConfig("container size must be positive"));
        }
        if !self.container.rotation_per_step.is_finite() {
            return Err(PhysicsError::InvalidConfig("container rotation must be finite"));
        }
        if !positive(self.ball.radius) {
            return Err(PhysicsError::InvalidConfig("ball radius must be positive"));
        }
        if !positive(self.ball.mass) {
            return Err(PhysicsError::InvalidConfig("ball mass must be positive"));
        }
        self.container.material.validate()?;
        self.ball.material.validate()?;
        self.space_config().validate()?;

        // The container starts unrotated, so an axis-aligned check is exact
        let local = (self.ball.position - self.container.position).abs();
        let reach = self.container.size * 0.5 - self.ball.radius;
        if !(local.x < reach && local.y < reach) {
            return Err(PhysicsError::InvalidConfig(
                "ball must start fully inside the container",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_scene() {
        let config = ScenarioConfig::default();
        assert_eq!(config.duration, 10.0);
        assert_eq!(config.time_step, 0.1);
        assert_eq!(config.gravity, Vec2::new(0.0, 9.81));
        assert_eq!(config.container.size, 3.0);
        assert_eq!(config.container.rotation_per_step, 0.2);
        assert_eq!(config.ball.position, Vec2::new(0.0, -1.0));
        assert_eq!(config.ball.material, Material::new(0.8, 0.3));
        assert_eq!(config.total_steps(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{ "time_step": 0.05, "ball": { "mass": 0.5 } }"#;
        let config = ScenarioConfig::from_json_str(json).unwrap();
        assert_eq!(config.time_step, 0.05);
        assert_eq!(config.ball.mass, 0.5);
        // Untouched fields keep their defaults
        assert_eq!(config.ball.radius, 0.1);
        assert_eq!(config.container, ContainerConfig::default());
        assert_eq!(config.total_steps(), 200);
    }

    #[test]
    fn test_solver_rules_from_json() {
        let json = r#"{ "solver": { "restitution_rule": "multiply" } }"#;
        let config = ScenarioConfig::from_json_str(json).unwrap();
        assert_eq!(config.solver.restitution_rule, crate::physics::CombineRule::Multiply);
        assert_eq!(config.solver.correction_fraction, 1.0);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        for json in [
            r#"{ "time_step": 0.0 }"#,
            r#"{ "duration": -1.0 }"#,
            r#"{ "ball": { "mass": 0.0 } }"#,
            r#"{ "ball": { "position": [0.0, 1.45] } }"#,
            r#"{ "container": { "material": { "restitution": -0.5, "friction": 0.3 } } }"#,
        ] {
            assert!(
                matches!(
                    ScenarioConfig::from_json_str(json),
                    Err(PhysicsError::InvalidConfig(_))
                ),
                "should reject {}",
                json
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ScenarioConfig::from_json_str("{ time_step: "),
            Err(PhysicsError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("tumble_box_config_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("scene.json");
        std::fs::write(&path, r#"{ "duration": 2.0 }"#).unwrap();

        let config = ScenarioConfig::load(&path).unwrap();
        assert_eq!(config.duration, 2.0);

        assert!(matches!(
            ScenarioConfig::load(&dir.join("missing.json")),
            Err(PhysicsError::IoError(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
