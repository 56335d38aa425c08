//! Scene descriptions.
//!
//! A [`SceneDescription`] is the plain-data form of a render: image
//! settings, camera lens, a table of named materials and a list of spheres
//! that refer to those materials by name. It is validated once and then
//! built into the runtime types the renderer works with.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sphray_math::{Color, Point3};
use thiserror::Error;

use crate::camera::{DEFAULT_FOCAL_LENGTH, DEFAULT_VIEWPORT_HEIGHT};
use crate::{Camera, HittableList, Lambertian, Material, Metal, RenderConfig, Sphere};

/// Seed used when a scene does not pick one.
pub const DEFAULT_SEED: u64 = 5489;

/// Largest accepted image width or height, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("Image width {width} with aspect ratio {aspect_ratio} leaves no rows")]
    ZeroHeight { width: u32, aspect_ratio: f64 },

    #[error("Image width {width} with aspect ratio {aspect_ratio} exceeds {max} pixels per side", max = MAX_IMAGE_DIMENSION)]
    ImageTooLarge { width: u32, aspect_ratio: f64 },

    #[error("Aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Viewport height and focal length must be finite and positive")]
    InvalidViewport,

    #[error("Sphere {index} has non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("Sphere {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Output image and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub width: u32,
    pub aspect_ratio: f64,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
}

impl ImageSettings {
    /// Image height derived from the width and aspect ratio.
    pub fn height(&self) -> u32 {
        (self.width as f64 / self.aspect_ratio) as u32
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: DEFAULT_SEED,
        }
    }
}

/// Camera lens settings. The camera always looks down -z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub origin: [f64; 3],
    pub viewport_height: f64,
    pub focal_length: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            focal_length: DEFAULT_FOCAL_LENGTH,
        }
    }
}

/// Serialized form of a [`Material`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: [f64; 3] },
    Metal { albedo: [f64; 3], fuzz: f64 },
}

impl MaterialDesc {
    pub fn build(&self) -> Material {
        match self {
            MaterialDesc::Lambertian { albedo } => Lambertian::new(Color::from_array(*albedo)).into(),
            MaterialDesc::Metal { albedo, fuzz } => Metal::new(Color::from_array(*albedo), *fuzz).into(),
        }
    }
}

/// A sphere referring to a named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f64; 3],
    pub radius: f64,
    pub material: String,
}

/// A whole render: settings, materials and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// Everything the renderer needs, built from a validated description.
#[derive(Debug)]
pub struct BuiltScene {
    pub camera: Camera,
    pub world: HittableList,
    pub config: RenderConfig,
    pub seed: u64,
}

impl BuiltScene {
    /// A fresh generator for this scene's seed.
    ///
    /// Rendering with it twice gives identical images.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl SceneDescription {
    /// Parse a scene from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading scene from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let image = &self.image;
        if image.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(image.aspect_ratio.is_finite() && image.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(image.aspect_ratio));
        }
        // Checked on the float so a tiny aspect ratio can't saturate the cast
        let rows = image.width as f64 / image.aspect_ratio;
        if image.width > MAX_IMAGE_DIMENSION || rows > MAX_IMAGE_DIMENSION as f64 {
            return Err(ConfigError::ImageTooLarge {
                width: image.width,
                aspect_ratio: image.aspect_ratio,
            });
        }
        if image.height() == 0 {
            return Err(ConfigError::ZeroHeight {
                width: image.width,
                aspect_ratio: image.aspect_ratio,
            });
        }
        if image.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }

        let camera = &self.camera;
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(camera.viewport_height) || !positive(camera.focal_length) {
            return Err(ConfigError::InvalidViewport);
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !positive(sphere.radius) {
                return Err(ConfigError::NonPositiveRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            if !self.materials.contains_key(&sphere.material) {
                return Err(ConfigError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate and build the camera, world and render settings.
    ///
    /// Each named material is built once and shared by every sphere that
    /// uses it.
    pub fn build(&self) -> ConfigResult<BuiltScene> {
        self.validate()?;

        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(desc.build())))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| ConfigError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;
            world.add(Sphere::new(
                Point3::from_array(sphere.center),
                sphere.radius,
                Arc::clone(material),
            ));
        }
        log::debug!(
            "Built {} spheres sharing {} materials",
            world.len(),
            materials.len()
        );

        let camera = Camera::with_viewport(
            Point3::from_array(self.camera.origin),
            self.image.aspect_ratio,
            self.camera.viewport_height,
            self.camera.focal_length,
        );

        let config = RenderConfig {
            image_width: self.image.width,
            image_height: self.image.height(),
            samples_per_pixel: self.image.samples_per_pixel,
            max_depth: self.image.max_depth,
        };

        Ok(BuiltScene {
            camera,
            world,
            config,
            seed: self.image.seed,
        })
    }
}

impl Default for SceneDescription {
    /// Ground, a diffuse centre sphere and two metal spheres either side.
    fn default() -> Self {
        let materials = BTreeMap::from([
            ("ground".to_string(), MaterialDesc::Lambertian { albedo: [0.8, 0.8, 0.0] }),
            ("center".to_string(), MaterialDesc::Lambertian { albedo: [0.7, 0.3, 0.3] }),
            ("left".to_string(), MaterialDesc::Metal { albedo: [0.8, 0.8, 0.8], fuzz: 0.3 }),
            ("right".to_string(), MaterialDesc::Metal { albedo: [0.8, 0.6, 0.2], fuzz: 1.0 }),
        ]);

        let sphere = |center: [f64; 3], radius: f64, material: &str| SphereDesc {
            center,
            radius,
            material: material.to_string(),
        };

        Self {
            image: ImageSettings::default(),
            camera: CameraSettings::default(),
            materials,
            spheres: vec![
                sphere([0.0, -100.5, -1.0], 100.0, "ground"),
                sphere([0.0, 0.0, -1.0], 0.5, "center"),
                sphere([-1.0, 0.0, -1.0], 0.5, "left"),
                sphere([1.0, 0.0, -1.0], 0.5, "right"),
            ],
        }
    }
}
