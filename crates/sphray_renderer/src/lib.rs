//! sphray renderer - CPU ray tracing of sphere scenes
//!
//! Fires jittered camera rays through every pixel, bounces them off
//! diffuse and metal spheres until they escape to the sky or run out of
//! depth, and writes the averaged, gamma-corrected result to a pixel sink.
//!
//! Single-threaded and deterministic for a given seed: the one random
//! generator is owned by the caller and passed down explicitly.

mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
pub mod scene;
mod sphere;

pub use camera::{Camera, DEFAULT_FOCAL_LENGTH, DEFAULT_VIEWPORT_HEIGHT};
pub use hittable::{HitRecord, Hittable, HittableList, Surface};
pub use material::{reflect, Lambertian, Material, Metal, ScatterResult};
pub use output::{sink_for_path, PixelSink, PngSink, PpmWriter, RenderError, RenderResult};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_to, sample_pixel, sky_gradient,
    write_color, ImageBuffer, RenderConfig, SHADOW_ACNE_EPSILON,
};
pub use scene::{BuiltScene, ConfigError, SceneDescription, DEFAULT_SEED};
pub use sphere::Sphere;

/// Re-export the value types from sphray_math
pub use sphray_math::{Color, Interval, Point3, Ray, Vec3};
