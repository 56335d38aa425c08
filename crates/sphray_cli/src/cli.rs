use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a sphere scene with a stochastic ray tracer.
#[derive(Debug, Parser)]
#[command(name = "sphray", version)]
pub struct Args {
    /// Scene description (JSON). Renders the built-in demo scene when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image: .ppm or .png, or "-" for a PPM on stdout
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the number of samples per pixel
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the scene as JSON instead of rendering it
    #[arg(long)]
    pub dump_scene: bool,

    /// Logging level (RUST_LOG is honoured as well)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
