//! # Dispatch
//!
//! `generate(pattern_id, size, params)` is the single entry point callers
//! use. It:
//!
//! 1. Resolves `pattern_id` against the catalog ([`ArtError::UnknownPattern`])
//! 2. Pops the universal parameters out of the bag (`bg_color`, `base_color`, `seed`)
//! 3. Applies the rest to the pattern's defaults and validates them
//! 4. Allocates a `size × size` canvas and runs the generator
//!
//! Every call owns its canvas and random source, so calls can run on any
//! number of threads without coordination.

use std::time::Instant;

use image::RgbImage;
use tracing::debug;

use crate::art::{DrawContext, Pattern, PatternId};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::ArtError;
use crate::params::ParamBag;

/// Background when `bg_color` is not supplied.
pub const DEFAULT_BG_COLOR: Color = Color::WHITE;

/// Base color when `base_color` is not supplied.
pub const DEFAULT_BASE_COLOR: Color = Color::RED;

/// Parameters every pattern accepts, removed from the bag before dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universal {
    pub bg_color: Color,
    pub base_color: Color,
    /// Seed for the random source. `None` draws a fresh OS seed.
    pub seed: Option<u64>,
}

impl Default for Universal {
    fn default() -> Self {
        Self {
            bg_color: DEFAULT_BG_COLOR,
            base_color: DEFAULT_BASE_COLOR,
            seed: None,
        }
    }
}

impl Universal {
    /// Remove `bg_color`, `base_color` and `seed` from `params`.
    pub fn extract(params: &mut ParamBag) -> Result<Self, ArtError> {
        let mut universal = Self::default();
        if let Some(v) = params.take("bg_color") {
            universal.bg_color = v.as_color("bg_color")?;
        }
        if let Some(v) = params.take("base_color") {
            universal.base_color = v.as_color("base_color")?;
        }
        if let Some(v) = params.take("seed") {
            let seed = v.as_int("seed")?;
            universal.seed = Some(u64::try_from(seed).map_err(|_| {
                ArtError::param(format!("seed must be non-negative, got {}", seed))
            })?);
        }
        Ok(universal)
    }
}

/// Render `pattern_id` on a fresh `size × size` canvas.
pub fn generate_canvas(pattern_id: &str, size: u32, params: &ParamBag) -> Result<Canvas, ArtError> {
    let id: PatternId = pattern_id.parse()?;

    let mut params = params.clone();
    let universal = Universal::extract(&mut params)?;
    let pattern = Pattern::from_params(id, &params)?;

    render(&pattern, size, &universal)
}

/// Render an already configured pattern.
pub fn render(pattern: &Pattern, size: u32, universal: &Universal) -> Result<Canvas, ArtError> {
    let _span = tracing::debug_span!("generate", pattern = pattern.name(), size).entered();

    let mut canvas = Canvas::new(size, size, universal.bg_color)?;
    let mut ctx = DrawContext::new(universal.base_color, universal.seed);

    debug!(
        params = %pattern.params_description(),
        bg = %universal.bg_color,
        seeded = universal.seed.is_some(),
        "rendering"
    );
    let started = Instant::now();
    pattern.draw(&mut canvas, &mut ctx);
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "rendered");

    Ok(canvas)
}

/// Render `pattern_id` and return the finished raster.
pub fn generate(pattern_id: &str, size: u32, params: &ParamBag) -> Result<RgbImage, ArtError> {
    generate_canvas(pattern_id, size, params).map(Canvas::into_image)
}

/// Alias of [`generate`] under the name task workers call.
pub fn generate_algorithmic_art(
    pattern_type: &str,
    size: u32,
    params: &ParamBag,
) -> Result<RgbImage, ArtError> {
    generate(pattern_type, size, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_defaults() {
        let mut bag = ParamBag::new().with("num_circles", 3);
        let u = Universal::extract(&mut bag).unwrap();
        assert_eq!(u, Universal::default());
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_universal_popped() {
        let mut bag = ParamBag::new()
            .with("bg_color", "#000000")
            .with("base_color", "#00FF00")
            .with("seed", 42)
            .with("max_iter", 10);
        let u = Universal::extract(&mut bag).unwrap();
        assert_eq!(u.bg_color, Color::BLACK);
        assert_eq!(u.base_color, Color::rgb(0, 255, 0));
        assert_eq!(u.seed, Some(42));
        assert_eq!(bag, ParamBag::new().with("max_iter", 10));
    }

    #[test]
    fn test_universal_rejects_bad_values() {
        let mut bag = ParamBag::new().with("bg_color", "#12345");
        assert!(matches!(Universal::extract(&mut bag), Err(ArtError::Parameter(_))));
        let mut bag = ParamBag::new().with("seed", -1);
        assert!(Universal::extract(&mut bag).is_err());
    }

    #[test]
    fn test_base_color_reaches_generator() {
        let params = ParamBag::new()
            .with("num_circles", 1)
            .with("color_scheme", "custom")
            .with("base_color", "#0000FF");
        let img = generate("concentric_circles", 20, &params).unwrap();
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 255]);
    }

    #[test]
    fn test_bg_color_applied() {
        let params = ParamBag::new().with("num_circles", 0).with("bg_color", "#102030");
        let img = generate("concentric_circles", 8, &params).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0x10, 0x20, 0x30]));
    }

    #[test]
    fn test_render_does_not_leak_params() {
        // base_color on a pattern that has no use for it is still accepted
        let params = ParamBag::new().with("base_color", "#00FF00").with("max_iter", 5);
        assert!(generate("mandelbrot_set", 16, &params).is_ok());
    }
}
