//! # Geometric Patterns
//!
//! Nested circles, a spiral of circles, and a hexagon tessellation.
//!
//! ## Concentric Circles
//!
//! `n` filled discs share the canvas center. Disc `k` (1-based, outermost
//! first) has radius `max_r · (n − k + 1) / n` and is colored from the ramp
//! position `t = k / n`, so the innermost disc sits at the bright end:
//!
//! ```text
//! scheme      color(t)
//! rainbow     hsv(t, 0.8, 0.9)
//! monochrome  gray(255·t)
//! custom      base_color · t
//! blue        (0, 255·t, 255)      ← also any unrecognized scheme
//! ```
//!
//! ## Hexagonal Grid
//!
//! Hexagons have a vertex at 0° (flat top and bottom). Columns step by
//! `1.5·size`, rows by `√3·size`, and odd columns shift down half a row.
//! The grid starts one cell before the canvas origin so edges are covered.

use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use super::{
    DrawContext, Generator, ParamSpec, PatternId, check_count, check_length,
    unknown_param,
};
use crate::canvas::{Canvas, Point};
use crate::color::Color;
use crate::error::ArtError;
use crate::params::ParamValue;

/// Color ramp for [`ConcentricCircles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Rainbow,
    Monochrome,
    Custom,
    Blue,
}

impl ColorScheme {
    /// Unrecognized names fall back to the blue gradient.
    pub fn parse(s: &str) -> Self {
        match s {
            "rainbow" => Self::Rainbow,
            "monochrome" => Self::Monochrome,
            "custom" => Self::Custom,
            _ => Self::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Monochrome => "monochrome",
            Self::Custom => "custom",
            Self::Blue => "blue",
        }
    }

    /// Color at ramp position `t` in `(0, 1]`.
    pub fn color(self, t: f64, base: Color) -> Color {
        match self {
            Self::Rainbow => Color::from_hsv(t, 0.8, 0.9),
            Self::Monochrome => Color::gray((255.0 * t) as u8),
            Self::Custom => base.scale(t),
            Self::Blue => Color::rgb(0, (255.0 * t) as u8, 255),
        }
    }
}

/// Nested filled circles.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentricCircles {
    /// Number of circles. Default: 20
    pub num_circles: usize,
    /// Color ramp. Default: Rainbow
    pub color_scheme: ColorScheme,
}

impl Default for ConcentricCircles {
    fn default() -> Self {
        Self {
            num_circles: 20,
            color_scheme: ColorScheme::Rainbow,
        }
    }
}

impl fmt::Display for ConcentricCircles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "circles={} scheme={}",
            self.num_circles,
            self.color_scheme.as_str()
        )
    }
}

impl Generator for ConcentricCircles {
    const ID: PatternId = PatternId::ConcentricCircles;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("num_circles", 5, 50, 20).with_description("Number of nested circles"),
            ParamSpec::choice(
                "color_scheme",
                vec!["rainbow", "monochrome", "custom", "blue"],
                "rainbow",
            )
            .with_description("Color ramp from outermost to innermost"),
            ParamSpec::color("base_color", Color::RED)
                .with_description("Base color for the custom scheme"),
            ParamSpec::color("bg_color", Color::WHITE).with_description("Background color"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "num_circles" => self.num_circles = value.as_count(name)?,
            "color_scheme" => self.color_scheme = ColorScheme::parse(value.as_str(name)?),
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_circles", self.num_circles.to_string()),
            ("color_scheme", self.color_scheme.as_str().to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        check_count(Self::ID, "num_circles", self.num_circles)
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let n = self.num_circles;
        if n == 0 {
            return;
        }
        let cx = (canvas.width() / 2) as i32;
        let cy = (canvas.height() / 2) as i32;
        let max_radius = canvas.width().min(canvas.height()) / 2;

        // Largest first so each smaller disc paints over the previous one.
        for k in 1..=n {
            let radius = (max_radius * (n - k + 1) / n) as i32;
            let t = k as f64 / n as f64;
            let color = self.color_scheme.color(t, ctx.base_color);
            canvas.draw_ellipse((cx - radius, cy - radius, cx + radius, cy + radius), color);
        }
    }
}

/// Circles placed along a widening spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralCircles {
    /// Number of circles. Default: 50
    pub num_circles: usize,
    /// Revolutions around the center. Default: 3
    pub turns: f64,
}

impl Default for SpiralCircles {
    fn default() -> Self {
        Self {
            num_circles: 50,
            turns: 3.0,
        }
    }
}

impl fmt::Display for SpiralCircles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circles={} turns={}", self.num_circles, self.turns)
    }
}

impl Generator for SpiralCircles {
    const ID: PatternId = PatternId::SpiralCircles;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("num_circles", 20, 100, 50).with_description("Circles along the spiral"),
            ParamSpec::int("turns", 1, 10, 3).with_description("Revolutions around the center"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "num_circles" => self.num_circles = value.as_count(name)?,
            "turns" => self.turns = value.as_float(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_circles", self.num_circles.to_string()),
            ("turns", self.turns.to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        check_count(Self::ID, "num_circles", self.num_circles)
    }

    fn draw(&self, canvas: &mut Canvas, _ctx: &mut DrawContext) {
        let n = self.num_circles;
        if n == 0 {
            return;
        }
        let cx = (canvas.width() / 2) as i32;
        let cy = (canvas.height() / 2) as i32;
        let extent = canvas.width().min(canvas.height()) as f64;

        for i in 0..n {
            let t = i as f64 / n as f64;
            let angle = t * self.turns * TAU;
            let radius = 10.0 + (t * extent / 3.0).floor();

            let x = cx + (radius * angle.cos()) as i32;
            let y = cy + (radius * angle.sin()) as i32;
            let r = 5 + (20.0 * t) as i32;

            canvas.draw_ellipse((x - r, y - r, x + r, y + r), Color::from_hsv(t, 0.8, 0.9));
        }
    }
}

/// Hexagon tessellation with a random hue per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonalGrid {
    /// Edge length in pixels. Default: 30
    pub hex_size: usize,
}

impl Default for HexagonalGrid {
    fn default() -> Self {
        Self { hex_size: 30 }
    }
}

impl fmt::Display for HexagonalGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hex_size={}", self.hex_size)
    }
}

/// Vertices of a hexagon centered on `(x, y)`, first vertex at 0°.
fn hexagon_points(x: i32, y: i32, size: usize) -> [Point; 6] {
    let size = size as f64;
    std::array::from_fn(|i| {
        let angle = TAU / 6.0 * i as f64;
        (
            x + (size * angle.cos()) as i32,
            y + (size * angle.sin()) as i32,
        )
    })
}

impl Generator for HexagonalGrid {
    const ID: PatternId = PatternId::HexagonalGrid;

    fn param_specs() -> Vec<ParamSpec> {
        vec![ParamSpec::int("hex_size", 10, 100, 30).with_description("Hexagon edge length")]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "hex_size" => self.hex_size = value.as_count(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![("hex_size", self.hex_size.to_string())]
    }

    fn validate(&self) -> Result<(), ArtError> {
        if self.hex_size == 0 {
            return Err(ArtError::param("hex_size must be at least 1"));
        }
        check_length(Self::ID, "hex_size", self.hex_size as f64)
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let hex_height = (self.hex_size as f64 * 3f64.sqrt()) as i32;
        let col_step = (self.hex_size * 3 / 2) as i32;
        if hex_height == 0 || col_step == 0 {
            return;
        }
        let rows = canvas.height() as i32 / hex_height + 2;
        let cols = canvas.width() as i32 / col_step + 2;

        for row in -1..rows {
            for col in -1..cols {
                let x = col * col_step;
                let mut y = row * hex_height;
                if col.rem_euclid(2) == 1 {
                    y += hex_height / 2;
                }

                let hue: f64 = ctx.rng.random();
                let fill = Color::from_hsv(hue, 0.7, 0.9);
                canvas.draw_polygon(&hexagon_points(x, y, self.hex_size), fill, Some(Color::BLACK));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<G: Generator>(g: &G, size: u32, seed: u64) -> Canvas {
        let mut canvas = Canvas::new(size, size, Color::WHITE).unwrap();
        let mut ctx = DrawContext::new(Color::RED, Some(seed));
        g.draw(&mut canvas, &mut ctx);
        canvas
    }

    #[test]
    fn test_scheme_ramps() {
        assert_eq!(ColorScheme::Monochrome.color(1.0, Color::RED), Color::WHITE);
        assert_eq!(ColorScheme::Monochrome.color(0.2, Color::RED), Color::gray(51));
        assert_eq!(ColorScheme::Custom.color(1.0, Color::rgb(10, 20, 30)), Color::rgb(10, 20, 30));
        assert_eq!(ColorScheme::Blue.color(1.0, Color::RED), Color::rgb(0, 255, 255));
    }

    #[test]
    fn test_unknown_scheme_is_blue() {
        assert_eq!(ColorScheme::parse("plaid"), ColorScheme::Blue);
    }

    #[test]
    fn test_concentric_layering() {
        let g = ConcentricCircles {
            num_circles: 5,
            color_scheme: ColorScheme::Monochrome,
        };
        let c = render(&g, 100, 0);
        assert_eq!(c.pixel(50, 50), Some(Color::WHITE));
        assert_eq!(c.pixel(0, 0), Some(Color::WHITE));
        // Between radius 40 and 50: outermost disc, t = 1/5
        assert_eq!(c.pixel(50, 5), Some(Color::gray(51)));
        // Between radius 10 and 20: fourth disc, t = 4/5
        assert_eq!(c.pixel(50, 35), Some(Color::gray(204)));
    }

    #[test]
    fn test_concentric_custom_uses_base_color() {
        let g = ConcentricCircles {
            num_circles: 2,
            color_scheme: ColorScheme::Custom,
        };
        let c = render(&g, 40, 0);
        assert_eq!(c.pixel(20, 20), Some(Color::RED));
        assert_eq!(c.pixel(20, 2), Some(Color::rgb(127, 0, 0)));
    }

    #[test]
    fn test_concentric_zero_circles() {
        let g = ConcentricCircles {
            num_circles: 0,
            ..Default::default()
        };
        let c = render(&g, 16, 0);
        assert_eq!(c, Canvas::new(16, 16, Color::WHITE).unwrap());
    }

    #[test]
    fn test_spiral_paints_something() {
        let c = render(&SpiralCircles::default(), 128, 0);
        assert_ne!(c, Canvas::new(128, 128, Color::WHITE).unwrap());
    }

    #[test]
    fn test_spiral_first_circle() {
        let g = SpiralCircles {
            num_circles: 1,
            turns: 3.0,
        };
        let c = render(&g, 128, 0);
        // Spiral radius 10 at angle 0, circle radius 5
        assert_eq!(c.pixel(74, 64), Some(Color::from_hsv(0.0, 0.8, 0.9)));
        assert_eq!(c.pixel(64, 64), Some(Color::WHITE));
    }

    #[test]
    fn test_hexagon_points() {
        let pts = hexagon_points(0, 0, 10);
        assert_eq!(pts[0], (10, 0));
        assert_eq!(pts[3], (-10, 0));
        assert_eq!(pts[1], (5, 8));
    }

    #[test]
    fn test_hex_grid_covers_canvas() {
        let c = render(&HexagonalGrid { hex_size: 10 }, 64, 3);
        let mut white = 0;
        for y in 0..64 {
            for x in 0..64 {
                if c.pixel(x, y) == Some(Color::WHITE) {
                    white += 1;
                }
            }
        }
        assert!(white < 64 * 64 / 50, "{} background pixels left", white);
    }

    #[test]
    fn test_hex_grid_seeded() {
        let g = HexagonalGrid::default();
        assert_eq!(render(&g, 96, 11), render(&g, 96, 11));
    }

    #[test]
    fn test_hex_size_zero_rejected() {
        assert!(HexagonalGrid { hex_size: 0 }.validate().is_err());
    }

    #[test]
    fn test_hex_size_limit() {
        let huge = HexagonalGrid { hex_size: 1 << 31 };
        assert!(matches!(huge.validate(), Err(ArtError::Parameter(_))));
        let largest = HexagonalGrid {
            hex_size: crate::art::MAX_LENGTH as usize,
        };
        assert!(largest.validate().is_ok());
        // One cell covers the whole canvas
        assert_ne!(render(&largest, 16, 1), Canvas::new(16, 16, Color::WHITE).unwrap());
    }

    #[test]
    fn test_circle_count_limit() {
        let g = ConcentricCircles {
            num_circles: 10usize.pow(18),
            ..Default::default()
        };
        assert!(matches!(g.validate(), Err(ArtError::Parameter(_))));
        let g = SpiralCircles {
            num_circles: usize::MAX,
            turns: 3.0,
        };
        assert!(g.validate().is_err());
        assert!(ConcentricCircles::default().validate().is_ok());
    }

    #[test]
    fn test_fractional_turns() {
        let mut g = SpiralCircles::default();
        g.set_param("turns", &ParamValue::Float(2.5)).unwrap();
        assert_eq!(g.turns, 2.5);
        assert_ne!(render(&g, 64, 0), Canvas::new(64, 64, Color::WHITE).unwrap());
    }
}
