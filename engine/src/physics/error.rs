//! Physics error type
//!
//! Every failure is a construction-time or call-time validation failure that
//! is handed straight back to the caller. Nothing inside the engine retries.

use super::space::BodyHandle;

/// Errors produced by the physics core and scenario loading.
#[derive(Debug)]
pub enum PhysicsError {
    /// Normalize of a (near) zero-length vector.
    DegenerateVector,
    /// `step` called with a time step that is not strictly positive.
    InvalidTimeStep(f32),
    /// Dynamic body created with non-positive (or non-finite) mass or inertia.
    InvalidMass { mass: f32, inertia: f32 },
    /// Shape rejected at construction.
    DegenerateShape(&'static str),
    /// Handle was not issued by this space.
    UnknownBody(BodyHandle),
    /// Bodies can only be added before the first step.
    SimulationStarted,
    /// Configuration value out of range.
    InvalidConfig(&'static str),
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::DegenerateVector => write!(f, "cannot normalize a zero-length vector"),
            PhysicsError::InvalidTimeStep(dt) => {
                write!(f, "time step must be positive, got {dt}")
            }
            PhysicsError::InvalidMass { mass, inertia } => {
                write!(
                    f,
                    "dynamic body needs positive mass and inertia (mass={mass}, inertia={inertia})"
                )
            }
            PhysicsError::DegenerateShape(reason) => write!(f, "degenerate shape: {reason}"),
            PhysicsError::UnknownBody(handle) => write!(f, "unknown body handle {}", handle.index()),
            PhysicsError::SimulationStarted => {
                write!(f, "bodies must be added before the first step")
            }
            PhysicsError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            PhysicsError::IoError(e) => write!(f, "IO error: {e}"),
            PhysicsError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for PhysicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhysicsError::IoError(e) => Some(e),
            PhysicsError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PhysicsError {
    fn from(e: std::io::Error) -> Self {
        PhysicsError::IoError(e)
    }
}

impl From<serde_json::Error> for PhysicsError {
    fn from(e: serde_json::Error) -> Self {
        PhysicsError::JsonError(e)
    }
}
