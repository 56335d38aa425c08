//! Camera for ray generation.

use sphray_math::{Point3, Ray, Vec3};

/// Default height of the virtual viewport in world units.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 2.0;

/// Default distance from the camera origin to the viewport plane.
pub const DEFAULT_FOCAL_LENGTH: f64 = 1.0;

/// Fixed, axis-aligned pinhole camera looking down the negative z axis.
///
/// The viewport geometry is computed once in the constructor and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at the world origin with the default viewport and focal length.
    pub fn new(aspect_ratio: f64) -> Self {
        Self::with_viewport(Point3::ZERO, aspect_ratio, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_FOCAL_LENGTH)
    }

    /// Camera with explicit viewport geometry.
    ///
    /// The viewport is `aspect_ratio * viewport_height` wide, centred on the
    /// camera's forward axis, `focal_length` in front of `origin`.
    pub fn with_viewport(origin: Point3, aspect_ratio: f64, viewport_height: f64, focal_length: f64) -> Self {
        let viewport_width = aspect_ratio * viewport_height;

        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Ray from the camera through viewport coordinates `(u, v)`.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport, `(1, 1)` the
    /// upper-right.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn lower_left_corner(&self) -> Point3 {
        self.lower_left_corner
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
