//! Value types shared by the sphray crates.
//!
//! Vectors come straight from glam in double precision; points and colors
//! are the same type under different names.

pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Three-component vector.
pub type Vec3 = DVec3;

/// Position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, nominally 0-1 per channel.
pub type Color = DVec3;

/// Threshold below which a vector component counts as zero.
pub const NEAR_ZERO: f64 = 1e-8;

/// Returns true if every component of `v` is within [`NEAR_ZERO`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO
}

/// Returns `v` scaled to unit length.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}
