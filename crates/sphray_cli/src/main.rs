use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sphray_renderer::{render_to, sink_for_path, SceneDescription};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Apply command line overrides on top of the loaded scene.
fn apply_overrides(scene: &mut SceneDescription, args: &Args) {
    if let Some(width) = args.width {
        scene.image.width = width;
    }
    if let Some(samples) = args.samples {
        scene.image.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.image.max_depth = max_depth;
    }
    if let Some(seed) = args.seed {
        scene.image.seed = seed;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No scene given, rendering the built-in demo scene");
            SceneDescription::default()
        }
    };
    apply_overrides(&mut scene, &args);

    if args.dump_scene {
        println!("{}", scene.to_json()?);
        return Ok(());
    }

    let built = scene.build().context("Invalid scene")?;
    info!(
        "Scene: {} objects, seed {}",
        built.world.len(),
        built.seed
    );

    let mut sink = sink_for_path(&args.output)
        .with_context(|| format!("Cannot write to {}", args.output.display()))?;
    let mut rng = built.rng();
    render_to(&built.camera, &built.world, &built.config, &mut rng, sink.as_mut())
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Done.");
    Ok(())
}
