//! # Fractal Patterns
//!
//! ## Sierpinski Triangle
//!
//! Chaos game: a point starts anywhere on the canvas and repeatedly jumps
//! halfway toward one of three fixed corners chosen at random. Every landing
//! spot is plotted, hue cycling every 1000 steps.
//!
//! ## Mandelbrot Set
//!
//! ```text
//! c = ((x − 0.7·w) / 0.25·w,  (y − 0.5·h) / 0.25·h)
//! z₀ = 0,  zₙ₊₁ = zₙ² + c   while |z| ≤ 2 and n < max_iter
//! ```
//!
//! Points that never escape are black; the rest take hue `n / max_iter`.
//! Rows are computed in parallel.
//!
//! ## Recursive Tree
//!
//! A trunk grows straight up from 50px above the bottom edge. Each branch
//! splits into two children rotated by `±angle`, 70% as long, until `depth`
//! runs out. Strokes thin toward the tips and shift from brown to green.

use std::fmt;

use rand::Rng;

use super::{DrawContext, Generator, ParamSpec, PatternId, unknown_param};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::ArtError;
use crate::params::ParamValue;

/// Points plotted by the chaos game.
pub const CHAOS_GAME_STEPS: usize = 50_000;

/// Deepest tree accepted; work doubles with every level.
pub const MAX_TREE_DEPTH: usize = 24;

/// Sierpinski triangle via the chaos game.
#[derive(Debug, Clone, PartialEq)]
pub struct SierpinskiTriangle {
    /// Catalog depth setting. The chaos game does not depend on it. Default: 7
    pub depth: i64,
}

impl Default for SierpinskiTriangle {
    fn default() -> Self {
        Self { depth: 7 }
    }
}

impl fmt::Display for SierpinskiTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth={} steps={}", self.depth, CHAOS_GAME_STEPS)
    }
}

impl Generator for SierpinskiTriangle {
    const ID: PatternId = PatternId::SierpinskiTriangle;

    fn param_specs() -> Vec<ParamSpec> {
        vec![ParamSpec::int("depth", 5, 10, 7)]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "depth" => self.depth = value.as_int(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![("depth", self.depth.to_string())]
    }

    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        let w = canvas.width() as i64;
        let h = canvas.height() as i64;
        let corners = [(w / 2, 50), (50, h - 50), (w - 50, h - 50)];

        let mut x = ctx.rng.random_range(0..=w);
        let mut y = ctx.rng.random_range(0..=h);

        for i in 0..CHAOS_GAME_STEPS {
            let (tx, ty) = corners[ctx.rng.random_range(0..corners.len())];
            x = (x + tx).div_euclid(2);
            y = (y + ty).div_euclid(2);

            let hue = (i % 1000) as f64 / 1000.0;
            canvas.set_pixel(x as i32, y as i32, Color::from_hsv(hue, 0.8, 0.9));
        }
    }
}

/// Escape-time Mandelbrot rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotSet {
    /// Iteration limit. Default: 100
    pub max_iter: usize,
}

impl Default for MandelbrotSet {
    fn default() -> Self {
        Self { max_iter: 100 }
    }
}

impl fmt::Display for MandelbrotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "max_iter={}", self.max_iter)
    }
}

/// Iterations before `c` escapes the radius-2 disc, capped at `max_iter`.
#[inline]
pub fn escape_time(cr: f64, ci: f64, max_iter: usize) -> usize {
    let (mut zr, mut zi) = (0.0f64, 0.0f64);
    let mut n = 0;
    while zr * zr + zi * zi <= 4.0 && n < max_iter {
        let t = zr * zr - zi * zi + cr;
        zi = 2.0 * zr * zi + ci;
        zr = t;
        n += 1;
    }
    n
}

impl Generator for MandelbrotSet {
    const ID: PatternId = PatternId::MandelbrotSet;

    fn param_specs() -> Vec<ParamSpec> {
        vec![ParamSpec::int("max_iter", 50, 200, 100).with_description("Iteration limit")]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "max_iter" => self.max_iter = value.as_count(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![("max_iter", self.max_iter.to_string())]
    }

    fn draw(&self, canvas: &mut Canvas, _ctx: &mut DrawContext) {
        let w = canvas.width() as f64;
        let h = canvas.height() as f64;
        let max_iter = self.max_iter;

        canvas.shade(|x, y| {
            let cr = (x as f64 - w * 0.7) / (w * 0.25);
            let ci = (y as f64 - h * 0.5) / (h * 0.25);
            let n = escape_time(cr, ci, max_iter);
            if n == max_iter {
                Color::BLACK
            } else {
                Color::from_hsv(n as f64 / max_iter as f64, 0.8, 0.9)
            }
        });
    }
}

/// Binary branching tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RecursiveTree {
    /// Recursion levels. Default: 10
    pub depth: usize,
    /// Branch spread in degrees. Default: 25
    pub angle: f64,
}

impl Default for RecursiveTree {
    fn default() -> Self {
        Self {
            depth: 10,
            angle: 25.0,
        }
    }
}

impl fmt::Display for RecursiveTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth={} angle={:.1}", self.depth, self.angle)
    }
}

impl RecursiveTree {
    fn branch(&self, canvas: &mut Canvas, x: i32, y: i32, length: f64, heading: f64, depth: usize) {
        if depth == 0 {
            return;
        }
        let rad = heading.to_radians();
        let ex = x + (length * rad.cos()) as i32;
        let ey = y + (length * rad.sin()) as i32;

        let hue = 0.3 - depth as f64 / 30.0;
        let color = Color::from_hsv(hue, 0.7, 0.7);
        let stroke = (depth / 2).max(1) as u32;
        canvas.draw_line((x, y), (ex, ey), color, stroke);

        let next = length * 0.7;
        self.branch(canvas, ex, ey, next, heading - self.angle, depth - 1);
        self.branch(canvas, ex, ey, next, heading + self.angle, depth - 1);
    }
}

impl Generator for RecursiveTree {
    const ID: PatternId = PatternId::RecursiveTree;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("depth", 5, 15, 10).with_description("Recursion levels"),
            ParamSpec::int("angle", 15, 45, 25).with_description("Branch spread in degrees"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "depth" => self.depth = value.as_count(name)?,
            "angle" => self.angle = value.as_float(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("depth", self.depth.to_string()),
            ("angle", self.angle.to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        if self.depth > MAX_TREE_DEPTH {
            return Err(ArtError::param(format!(
                "depth {} exceeds the limit of {}",
                self.depth, MAX_TREE_DEPTH
            )));
        }
        Ok(())
    }

    fn draw(&self, canvas: &mut Canvas, _ctx: &mut DrawContext) {
        let x = (canvas.width() / 2) as i32;
        let y = canvas.height() as i32 - 50;
        let length = (canvas.width().min(canvas.height()) / 5) as f64;
        self.branch(canvas, x, y, length, -90.0, self.depth);
    }
}
