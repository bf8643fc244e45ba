// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Minimum accepted hit distance, and the offset used to lift secondary ray
/// origins off the surface they leave.
pub const EPSILON: f32 = 1e-4;

/// Reflect `v` about the unit normal `n`.
///
/// `n` must already be normalized; this is not checked.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Normalize `v`, returning the zero vector when `v` has zero length.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}
