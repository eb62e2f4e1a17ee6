//! # Generative Patterns
//!
//! Particle and field simulations driven by the per-call random source.
//!
//! ## Random Walk
//!
//! Walkers start at the canvas center. Every step each one moves by a random
//! offset in `[-2, 2]²`, clamped to the canvas, leaving a 2px trail in its own
//! hue `i / n`.
//!
//! ## Voronoi Diagram
//!
//! Brute-force nearest seed per pixel (squared distance, first seed wins
//! ties), then a small black disc on every seed.
//!
//! ## Wave Interference
//!
//! ```text
//! a(p) = Σ sin(|p − sᵢ| / λ · 2π)      over n sources in the middle half
//! hue  = (a + n) / 2n
//! ```
//!
//! A count of zero leaves the background untouched in all three patterns.

use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use super::{DrawContext, Generator, ParamSpec, PatternId, check_count, unknown_param};
use crate::canvas::{Canvas, Point};
use crate::color::Color;
use crate::error::ArtError;
use crate::params::ParamValue;

/// Radius of the seed markers in [`VoronoiDiagram`].
const SEED_MARKER_RADIUS: i32 = 3;

/// Independent random walkers leaving colored trails.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomWalk {
    /// Number of walkers. Default: 5
    pub num_walkers: usize,
    /// Steps per walker. Default: 2000
    pub steps: usize,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            num_walkers: 5,
            steps: 2000,
        }
    }
}

impl fmt::Display for RandomWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "walkers={} steps={}", self.num_walkers, self.steps)
    }
}

impl Generator for RandomWalk {
    const ID: PatternId = PatternId::RandomWalk;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("num_walkers", 1, 10, 5).with_description("Number of walkers"),
            ParamSpec::int("steps", 1000, 5000, 2000).with_description("Steps per walker"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "num_walkers" => self.num_walkers = value.as_count(name)?,
            "steps" => self.steps = value.as_count(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_walkers", self.num_walkers.to_string()),
            ("steps", self.steps.to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        check_count(Self::ID, "num_walkers", self.num_walkers)
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let n = self.num_walkers;
        if n == 0 {
            return;
        }
        let max_x = canvas.width() as i32 - 1;
        let max_y = canvas.height() as i32 - 1;
        let start: Point = ((canvas.width() / 2) as i32, (canvas.height() / 2) as i32);

        let colors: Vec<Color> = (0..n)
            .map(|i| Color::from_hsv(i as f64 / n as f64, 0.7, 0.9))
            .collect();
        let mut walkers = vec![start; n];

        for _ in 0..self.steps {
            for (pos, &color) in walkers.iter_mut().zip(&colors) {
                let dx = ctx.rng.random_range(-2..=2);
                let dy = ctx.rng.random_range(-2..=2);
                let next = clamped_step(*pos, (dx, dy), (max_x, max_y));
                canvas.draw_line(*pos, next, color, 2);
                *pos = next;
            }
        }
    }
}

/// Move `pos` by `delta`, keeping it inside `[0, max.0] × [0, max.1]`.
fn clamped_step(pos: Point, delta: Point, max: Point) -> Point {
    (
        (pos.0 + delta.0).clamp(0, max.0),
        (pos.1 + delta.1).clamp(0, max.1),
    )
}

/// Nearest-seed space partition.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram {
    /// Number of seed points. Default: 20
    pub num_points: usize,
}

impl Default for VoronoiDiagram {
    fn default() -> Self {
        Self { num_points: 20 }
    }
}

impl fmt::Display for VoronoiDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "points={}", self.num_points)
    }
}

impl VoronoiDiagram {
    /// Seed points, uniform over `[0, w] × [0, h]`.
    pub fn seeds<R: Rng>(&self, w: i64, h: i64, rng: &mut R) -> Vec<(i64, i64)> {
        (0..self.num_points)
            .map(|_| (rng.random_range(0..=w), rng.random_range(0..=h)))
            .collect()
    }
}

/// Index of the seed closest to `(x, y)`. `seeds` must be non-empty.
fn nearest_seed(x: i64, y: i64, seeds: &[(i64, i64)]) -> usize {
    let mut best = 0;
    let mut best_dist = i64::MAX;
    for (i, &(sx, sy)) in seeds.iter().enumerate() {
        let d = (x - sx) * (x - sx) + (y - sy) * (y - sy);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

impl Generator for VoronoiDiagram {
    const ID: PatternId = PatternId::VoronoiDiagram;

    fn param_specs() -> Vec<ParamSpec> {
        vec![ParamSpec::int("num_points", 5, 50, 20).with_description("Number of seed points")]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "num_points" => self.num_points = value.as_count(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![("num_points", self.num_points.to_string())]
    }

    fn validate(&self) -> Result<(), ArtError> {
        check_count(Self::ID, "num_points", self.num_points)
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let n = self.num_points;
        if n == 0 {
            return;
        }
        let w = canvas.width() as i64;
        let h = canvas.height() as i64;

        let seeds = self.seeds(w, h, &mut ctx.rng);
        let colors: Vec<Color> = (0..n)
            .map(|i| Color::from_hsv(i as f64 / n as f64, 0.7, 0.9))
            .collect();

        canvas.shade(|x, y| colors[nearest_seed(x as i64, y as i64, &seeds)]);

        let r = SEED_MARKER_RADIUS;
        for &(sx, sy) in &seeds {
            let (sx, sy) = (sx as i32, sy as i32);
            canvas.draw_ellipse((sx - r, sy - r, sx + r, sy + r), Color::BLACK);
        }
    }
}

/// Summed circular waves from random point sources.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveInterference {
    /// Number of wave sources. Default: 4
    pub num_sources: usize,
    /// Wavelength in pixels. Default: 40
    pub wavelength: f64,
}

impl Default for WaveInterference {
    fn default() -> Self {
        Self {
            num_sources: 4,
            wavelength: 40.0,
        }
    }
}

impl fmt::Display for WaveInterference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sources={} wavelength={:.1}",
            self.num_sources, self.wavelength
        )
    }
}

impl WaveInterference {
    /// Source positions, uniform over the middle half of the canvas.
    pub fn sources<R: Rng>(&self, w: i64, h: i64, rng: &mut R) -> Vec<(f64, f64)> {
        (0..self.num_sources)
            .map(|_| {
                let sx = rng.random_range(w / 4..=3 * w / 4);
                let sy = rng.random_range(h / 4..=3 * h / 4);
                (sx as f64, sy as f64)
            })
            .collect()
    }
}

impl Generator for WaveInterference {
    const ID: PatternId = PatternId::WaveInterference;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("num_sources", 2, 8, 4).with_description("Number of wave sources"),
            ParamSpec::int("wavelength", 10, 100, 40).with_description("Wavelength in pixels"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "num_sources" => self.num_sources = value.as_count(name)?,
            "wavelength" => self.wavelength = value.as_float(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_sources", self.num_sources.to_string()),
            ("wavelength", self.wavelength.to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        if self.wavelength <= 0.0 {
            return Err(ArtError::param(format!(
                "wavelength must be positive, got {}",
                self.wavelength
            )));
        }
        check_count(Self::ID, "num_sources", self.num_sources)
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let n = self.num_sources;
        if n == 0 {
            return;
        }
        let w = canvas.width() as i64;
        let h = canvas.height() as i64;

        let sources = self.sources(w, h, &mut ctx.rng);
        let wavelength = self.wavelength;
        let n = n as f64;

        canvas.shade(|x, y| {
            let (px, py) = (x as f64, y as f64);
            let amplitude: f64 = sources
                .iter()
                .map(|&(sx, sy)| {
                    let d = ((px - sx).powi(2) + (py - sy).powi(2)).sqrt();
                    (d / wavelength * TAU).sin()
                })
                .sum();
            Color::from_hsv((amplitude + n) / (2.0 * n), 0.8, 0.9)
        });
    }
}
