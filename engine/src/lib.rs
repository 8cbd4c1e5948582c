//! Tumble Box Engine Library
//!
//! A small 2D rigid-body engine that simulates a ball bouncing inside a slowly
//! rotating square box under gravity.
//!
//! # Modules
//!
//! - [`physics`] - Bodies, shapes, collision detection, contact resolution and
//!   the simulation space
//! - [`scenario`] - The ball-in-a-rotating-box scene, its configuration and
//!   per-step reports
//!
//! # Example
//!
//! ```
//! use tumble_box_engine::physics::{
//!     Material, RigidBody, Shape, Space, SpaceConfig, Vec2, moment_for_circle,
//! };
//!
//! let mut space = Space::new(SpaceConfig::default())?;
//!
//! let walls = RigidBody::new_kinematic().with_angular_velocity(2.0);
//! let walls_shape = Shape::rectangle(3.0, 3.0)?.with_material(Material::new(0.8, 0.3));
//! let container = space.add_body(walls, walls_shape)?;
//!
//! let ball = RigidBody::new_dynamic(0.1, moment_for_circle(0.1, 0.0, 0.1, Vec2::ZERO))?
//!     .with_position(Vec2::new(0.0, -1.0));
//! let ball_shape = Shape::circle(0.1)?.with_material(Material::new(0.8, 0.3));
//! let ball = space.add_body(ball, ball_shape)?;
//!
//! for _ in 0..10 {
//!     space.step(0.1)?;
//!     let position = space.position(ball)?;
//!     let corners = space.world_vertices(container)?;
//!     # let _ = (position, corners);
//! }
//! # Ok::<(), tumble_box_engine::physics::PhysicsError>(())
//! ```

pub mod physics;
pub mod scenario;

// Re-export the most used types at crate level for convenience
pub use physics::{BodyHandle, PhysicsError, RigidBody, Shape, Space, SpaceConfig};
pub use scenario::{Frame, Scenario, ScenarioConfig};
