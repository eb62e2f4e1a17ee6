//! # Generation Jobs
//!
//! Helpers for the worker side of a generation job: decoding the stored
//! request, rendering it, mixing the result with another raster for hybrid
//! artworks, and encoding it for storage.
//!
//! ## Request Format
//!
//! ```json
//! {
//!   "algorithm": "mandelbrot_set",
//!   "params": { "max_iter": 150, "bg_color": "#000000" },
//!   "image_size": "1024x1024"
//! }
//! ```
//!
//! `image_size` is `WIDTHxHEIGHT`; the width becomes the square size.
//! Missing or malformed sizes fall back to [`DEFAULT_IMAGE_SIZE`].

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ArtError;
use crate::generate::generate;
use crate::params::ParamBag;

/// Square size used when a request carries no usable `image_size`.
pub const DEFAULT_IMAGE_SIZE: u32 = 1024;

/// JPEG quality for stored artworks.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Parse `"WxH"` and return `W`, or [`DEFAULT_IMAGE_SIZE`] if malformed.
pub fn parse_image_size(s: &str) -> u32 {
    let parsed = s
        .split_once('x')
        .and_then(|(w, h)| Some((w.trim().parse::<u32>().ok()?, h.trim().parse::<u32>().ok()?)));
    match parsed {
        Some((width, _)) => width,
        None => {
            warn!(image_size = s, "malformed image size, using {}", DEFAULT_IMAGE_SIZE);
            DEFAULT_IMAGE_SIZE
        }
    }
}

/// A stored algorithmic generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub algorithm: String,
    #[serde(default)]
    pub params: ParamBag,
    #[serde(default)]
    pub image_size: Option<String>,
}

impl GenerationRequest {
    pub fn new(algorithm: impl Into<String>, params: ParamBag) -> Self {
        Self {
            algorithm: algorithm.into(),
            params,
            image_size: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ArtError> {
        serde_json::from_str(json).map_err(|e| ArtError::param(format!("invalid request: {}", e)))
    }

    /// Square output size.
    pub fn size(&self) -> u32 {
        self.image_size
            .as_deref()
            .map(parse_image_size)
            .unwrap_or(DEFAULT_IMAGE_SIZE)
    }

    pub fn render(&self) -> Result<RgbImage, ArtError> {
        debug!(algorithm = %self.algorithm, params = %self.params, "generation request");
        generate(&self.algorithm, self.size(), &self.params)
    }
}

/// Linear mix `base · (1 − alpha) + overlay · alpha`.
///
/// The overlay is resampled (Lanczos3) to the base size when they differ.
pub fn blend(base: &RgbImage, overlay: &RgbImage, alpha: f64) -> Result<RgbImage, ArtError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ArtError::param(format!(
            "blend alpha must be in [0, 1], got {}",
            alpha
        )));
    }
    let (w, h) = base.dimensions();
    let resized;
    let overlay = if overlay.dimensions() != (w, h) {
        resized = imageops::resize(overlay, w, h, FilterType::Lanczos3);
        &resized
    } else {
        overlay
    };

    Ok(RgbImage::from_fn(w, h, |x, y| {
        let a = base.get_pixel(x, y).0;
        let b = overlay.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|i| {
            (a[i] as f64 * (1.0 - alpha) + b[i] as f64 * alpha).round() as u8
        }))
    }))
}

/// Encoded file format for finished artworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Pick by file extension: `.jpg`/`.jpeg` → JPEG, anything else → PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Self::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            _ => Self::Png,
        }
    }
}

/// Encode a raster to bytes.
pub fn encode(image: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, ArtError> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?,
        OutputFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).encode_image(image)?
        }
    }
    Ok(bytes)
}

/// Encode and write a raster to `path`.
pub fn save(image: &RgbImage, path: &Path, format: OutputFormat) -> Result<(), ArtError> {
    let bytes = encode(image, format)?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved");
    Ok(())
}
