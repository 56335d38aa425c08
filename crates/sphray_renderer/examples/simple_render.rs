//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it and saves it to PPM format.

use sphray_renderer::{
    render, Camera, Color, HittableList, Lambertian, Material, Metal, PpmWriter, RenderConfig, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let world = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig {
        image_width: 400,
        image_height: 225,
        samples_per_pixel: 50,
        max_depth: 10,
    };
    let camera = Camera::new(config.image_width as f64 / config.image_height as f64);
    let mut rng = StdRng::seed_from_u64(5489);

    let image = render(&camera, &world, &config, &mut rng);

    let filename = "output.ppm";
    let mut sink = PpmWriter::create(filename)?;
    image.write_to(&mut sink)?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> HittableList {
    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)).into());
    let matte: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)).into());
    let silver: Arc<Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8), 0.05).into());

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, matte));

    // One material shared by both side spheres
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Arc::clone(&silver)));
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, silver));

    log::info!("Created {} objects", world.len());
    world
}
