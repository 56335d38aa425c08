//! Image output sinks.
//!
//! A sink receives one 8-bit RGB triple per pixel, top row first and each
//! row left to right, bracketed by `begin` and `finish`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Destination for rendered pixels.
pub trait PixelSink {
    /// Called once before the first pixel.
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()>;

    /// Called once per pixel in scan order.
    fn write_pixel(&mut self, rgb: [u8; 3]) -> io::Result<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> io::Result<()>;
}

/// Plain-text `P3` pixmap writer.
pub struct PpmWriter<W: Write> {
    writer: W,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PpmWriter<BufWriter<File>> {
    /// Create (or truncate) a PPM file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "255")
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> io::Result<()> {
        writeln!(self.writer, "{} {} {}", rgb[0], rgb[1], rgb[2])
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects pixels and saves them as a PNG on `finish`.
pub struct PngSink {
    path: PathBuf,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 0,
            height: 0,
            bytes: Vec::new(),
        }
    }
}

impl PixelSink for PngSink {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()> {
        self.width = width;
        self.height = height;
        self.bytes = Vec::with_capacity(width as usize * height as usize * 3);
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> io::Result<()> {
        self.bytes.extend_from_slice(&rgb);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let bytes = std::mem::take(&mut self.bytes);
        let image = image::RgbImage::from_raw(self.width, self.height, bytes).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {}x{} pixels", self.width, self.height),
            )
        })?;
        image
            .save_with_format(&self.path, image::ImageFormat::Png)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        log::info!("Saved {}", self.path.display());
        Ok(())
    }
}

/// Pick a sink from the output path's extension.
///
/// `-` writes a PPM to standard output.
pub fn sink_for_path(path: &Path) -> RenderResult<Box<dyn PixelSink>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(PpmWriter::new(BufWriter::new(io::stdout()))));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => Ok(Box::new(PpmWriter::create(path)?)),
        "png" => Ok(Box::new(PngSink::new(path))),
        other => Err(RenderError::UnsupportedFormat(other.to_string())),
    }
}
