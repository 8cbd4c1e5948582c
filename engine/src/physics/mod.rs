//! Physics module
//!
//! Custom 2D rigid-body physics for a ball bouncing inside a rotating box.
//! Built from scratch on top of glam's `Vec2`, no external physics library.
//!
//! # Unit System
//!
//! SI-style units throughout, with +y pointing down (screen convention):
//!
//! - Distances in meters
//! - Velocities in m/s, angular velocities in rad/s
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - `Vec2` re-exported from glam plus planar helpers
//! - [`error`] - `PhysicsError`
//! - [`body`] - Rigid bodies (static, kinematic, dynamic) and integration
//! - [`shape`] - Circle and convex polygon shapes with surface materials
//! - [`mass`] - Moment of inertia helpers
//! - [`collision`] - Circle vs convex polygon contact detection
//! - [`solver`] - Impulse-based contact resolution with restitution and friction
//! - [`space`] - The simulation space that owns bodies and steps them

pub mod body;
pub mod collision;
pub mod error;
pub mod mass;
pub mod shape;
pub mod solver;
pub mod space;
pub mod types;

// Re-export commonly used types at the physics module level
pub use body::{BodyKind, RigidBody};
pub use collision::{Contact, circle_vs_convex_polygon, detect};
pub use error::PhysicsError;
pub use mass::{moment_for_box, moment_for_circle, moment_for_polygon};
pub use shape::{Circle, ConvexPolygon, Material, Shape, ShapeKind};
pub use solver::{CombineRule, ContactImpulse, SolverConfig, resolve_contact};
pub use space::{BodyHandle, Space, SpaceConfig, StepReport};
pub use types::{Vec2, Vec2Ext};
