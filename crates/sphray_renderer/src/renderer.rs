//! Core ray tracing renderer.
//!
//! Implements stochastic recursive ray tracing with:
//! - Recursive ray tracing with a bounce depth limit
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use crate::output::{PixelSink, RenderError};
use crate::sampling::gen_f64;
use crate::{Camera, Hittable};
use rand::RngCore;
use sphray_math::{unit_vector, Color, Interval, Ray};
use std::convert::Infallible;
use std::time::Instant;

/// Smallest accepted hit distance, keeps scattered rays from re-hitting
/// the surface they start on.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through the scene, bouncing off surfaces until it
/// escapes to the sky, is absorbed, or runs out of depth.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene.
///
/// White straight up, fading linearly to sky blue at the horizon and
/// staying sky blue below it.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = Interval::new(0.0, 1.0).clamp(unit_direction.y);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    blue * (1.0 - a) + white * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.000, 0.999);
    let to_byte = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Convert an accumulated sample sum to 8-bit RGB.
pub fn write_color(pixel_color: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel.max(1) as f64;
    color_to_rgb(pixel_color * scale)
}

/// Accumulate `samples_per_pixel` jittered samples for pixel `(i, j)`.
///
/// `j` counts rows from the bottom of the image. Returns the sum of the
/// samples, not their average.
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let u_span = config.image_width.saturating_sub(1).max(1) as f64;
    let v_span = config.image_height.saturating_sub(1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (i as f64 + gen_f64(rng)) / u_span;
        let v = (j as f64 + gen_f64(rng)) / v_span;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }
    pixel_color
}

/// Render a single pixel and average its samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    sample_pixel(camera, world, i, j, config, rng) / config.samples_per_pixel.max(1) as f64
}

/// Visit every pixel in scan order: top row first, each row left to right.
///
/// `emit` receives the image-space coordinates (row 0 = top) and the
/// accumulated sample sum.
fn trace_pixels<E>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    mut emit: impl FnMut(u32, u32, Color) -> Result<(), E>,
) -> Result<(), E> {
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    for j in (0..config.image_height).rev() {
        log::debug!("Scanlines remaining: {}", j + 1);
        let y = config.image_height - 1 - j;
        for i in 0..config.image_width {
            let pixel_color = sample_pixel(camera, world, i, j, config, rng);
            emit(i, y, pixel_color)?;
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(())
}

/// Averaged linear colors for a whole image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected 8-bit RGB bytes in scan order.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }

    /// Emit every pixel to `sink` in scan order.
    pub fn write_to(&self, sink: &mut dyn PixelSink) -> Result<(), RenderError> {
        sink.begin(self.width, self.height)?;
        for color in &self.pixels {
            sink.write_pixel(color_to_rgb(*color))?;
        }
        sink.finish()?;
        Ok(())
    }
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig, rng: &mut dyn RngCore) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    let scale = 1.0 / config.samples_per_pixel.max(1) as f64;

    let traced: Result<(), Infallible> = trace_pixels(camera, world, config, rng, |x, y, sum| {
        image.set(x, y, sum * scale);
        Ok(())
    });
    match traced {
        Ok(()) => {}
        Err(never) => match never {},
    }

    image
}

/// Render the scene straight into `sink`, one pixel at a time.
pub fn render_to(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn PixelSink,
) -> Result<(), RenderError> {
    sink.begin(config.image_width, config.image_height)?;
    trace_pixels(camera, world, config, rng, |_, _, sum| {
        sink.write_pixel(write_color(sum, config.samples_per_pixel))
    })?;
    sink.finish()?;
    Ok(())
}
