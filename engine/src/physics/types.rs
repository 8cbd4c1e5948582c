//! Physics type re-exports from glam
//!
//! `Vec2` is used directly as the vector/point type. The [`Vec2Ext`] trait adds
//! the handful of planar operations the solver needs that glam does not offer
//! in the required form: rotation by an angle, a normalize that reports
//! degenerate input as an error, and the 2D cross products.

pub use glam::Vec2;

use super::error::PhysicsError;

/// Length below which a vector is treated as zero by [`Vec2Ext::normalized`].
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// Planar helpers on top of [`glam::Vec2`].
///
/// All operations are pure and return new values.
pub trait Vec2Ext: Sized {
    /// Rotate counter-clockwise by `angle` radians (standard 2D rotation matrix).
    fn rotated(self, angle: f32) -> Self;

    /// Unit vector in the same direction.
    ///
    /// Fails with [`PhysicsError::DegenerateVector`] when the length is below
    /// [`NORMALIZE_EPSILON`].
    fn normalized(self) -> Result<Self, PhysicsError>;

    /// Scalar 2D cross product `self.x * other.y - self.y * other.x`.
    fn cross(self, other: Self) -> f32;

    /// Cross product of a scalar (angular rate) with a vector: `w × r`.
    ///
    /// This is `r` rotated by 90° and scaled by `w`, i.e. the linear velocity
    /// of a point at offset `r` on a body spinning at `w`.
    fn cross_scalar(w: f32, r: Self) -> Self;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn normalized(self) -> Result<Self, PhysicsError> {
        let len = self.length();
        if len < NORMALIZE_EPSILON || !len.is_finite() {
            return Err(PhysicsError::DegenerateVector);
        }
        Ok(self / len)
    }

    #[inline]
    fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn cross_scalar(w: f32, r: Self) -> Self {
        Vec2::new(-w * r.y, w * r.x)
    }
}
