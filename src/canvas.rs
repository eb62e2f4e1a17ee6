//! # Canvas
//!
//! A fixed-size RGB raster and the drawing primitives the pattern generators
//! paint with.
//!
//! ## Coordinates
//!
//! Pixel centers sit on integer coordinates, `(0, 0)` top-left. Every
//! primitive clips against the canvas: writes outside `[0, width) ×
//! [0, height)` are dropped, so generators may hand over geometry that
//! spills past the edges.
//!
//! ## Primitives
//!
//! | Primitive | Rasterization |
//! |-----------|---------------|
//! | [`Canvas::set_pixel`] | single write, dropped when out of bounds |
//! | [`Canvas::draw_line`] | Bresenham for width 1, filled quad with square caps for wider strokes |
//! | [`Canvas::draw_ellipse`] | row spans of an axis-aligned ellipse, bbox inclusive |
//! | [`Canvas::draw_polygon`] | even-odd scanline fill, optional 1px outline |
//! | [`Canvas::shade`] | per-pixel function, row-parallel via rayon |

use image::RgbImage;
use rayon::prelude::*;

use crate::color::Color;
use crate::error::ArtError;

/// Integer pixel coordinate. May lie outside the canvas.
pub type Point = (i32, i32);

/// Inclusive bounding box `(x0, y0, x1, y1)`.
pub type BBox = (i32, i32, i32, i32);

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Owned RGB pixel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    ///
    /// Zero width or height, or either above [`MAX_DIMENSION`], is a
    /// parameter error.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, ArtError> {
        if width == 0 || height == 0 {
            return Err(ArtError::param(format!(
                "canvas size must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ArtError::param(format!(
                "canvas size {}x{} exceeds the {} pixel limit",
                width, height, MAX_DIMENSION
            )));
        }
        let (width, height) = (width as usize, height as usize);
        let len = width
            .checked_mul(height)
            .ok_or_else(|| ArtError::param(format!("canvas size {}x{} overflows", width, height)))?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    /// Read one pixel, `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill `[x0, x1]` on row `y`, clipped.
    fn span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        if x0 > x1 {
            return;
        }
        let row = y as usize * self.width;
        self.pixels[row + x0 as usize..=row + x1 as usize].fill(color);
    }

    /// Stroke a straight segment `width` pixels thick.
    ///
    /// A width of 0 is treated as 1.
    pub fn draw_line(&mut self, p0: Point, p1: Point, color: Color, width: u32) {
        if width <= 1 {
            if let Some((a, b)) = self.clip_segment(p0, p1) {
                self.bresenham(a, b, color);
            }
            return;
        }

        let (x0, y0) = (p0.0 as f64, p0.1 as f64);
        let (x1, y1) = (p1.0 as f64, p1.1 as f64);
        let half = width as f64 / 2.0;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len = (dx * dx + dy * dy).sqrt();

        if len > 0.0 {
            let (nx, ny) = (-dy / len * half, dx / len * half);
            let quad = [
                (x0 + nx, y0 + ny),
                (x1 + nx, y1 + ny),
                (x1 - nx, y1 - ny),
                (x0 - nx, y0 - ny),
            ];
            self.fill_polygon_f(&quad, color);
        }

        // Square caps keep joined segments free of gaps.
        self.square(p0, width, color);
        if p1 != p0 {
            self.square(p1, width, color);
        }
    }

    /// `size`×`size` block centered on `p`.
    fn square(&mut self, (x, y): Point, size: u32, color: Color) {
        let half = size as f64 / 2.0;
        let left = (x as f64 - half).ceil() as i32;
        let top = (y as f64 - half).ceil() as i32;
        for row in top..top + size as i32 {
            self.span(row, left, left + size as i32 - 1, color);
        }
    }

    /// Liang–Barsky clip of a segment to the canvas rectangle.
    fn clip_segment(&self, p0: Point, p1: Point) -> Option<(Point, Point)> {
        let inside = |p: Point| self.index(p.0, p.1).is_some();
        if inside(p0) && inside(p1) {
            return Some((p0, p1));
        }

        let (x0, y0) = (p0.0 as f64, p0.1 as f64);
        let (dx, dy) = (p1.0 as f64 - x0, p1.1 as f64 - y0);
        let (xmax, ymax) = ((self.width - 1) as f64, (self.height - 1) as f64);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [(-dx, x0), (dx, xmax - x0), (-dy, y0), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| ((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }

    fn bresenham(&mut self, (mut x, mut y): Point, (x1, y1): Point, color: Color) {
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill the axis-aligned ellipse inscribed in `bbox` (inclusive corners).
    ///
    /// A box with `x1 < x0` or `y1 < y0` draws nothing.
    pub fn draw_ellipse(&mut self, bbox: BBox, fill: Color) {
        let (x0, y0, x1, y1) = bbox;
        if x1 < x0 || y1 < y0 {
            return;
        }
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        let rx = ((x1 - x0) as f64 / 2.0).max(0.5);
        let ry = ((y1 - y0) as f64 / 2.0).max(0.5);

        let top = y0.max(0);
        let bottom = y1.min(self.height as i32 - 1);
        for y in top..=bottom {
            let ny = (y as f64 - cy) / ry;
            let k = 1.0 - ny * ny;
            if k < 0.0 {
                continue;
            }
            let hw = rx * k.sqrt();
            self.span(y, (cx - hw).ceil() as i32, (cx + hw).floor() as i32, fill);
        }
    }

    /// Fill a simple polygon, then stroke its outline when one is given.
    pub fn draw_polygon(&mut self, points: &[Point], fill: Color, outline: Option<Color>) {
        if points.len() < 2 {
            if let Some(&(x, y)) = points.first() {
                self.set_pixel(x, y, outline.unwrap_or(fill));
            }
            return;
        }

        let verts: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        self.fill_polygon_f(&verts, fill);

        if let Some(stroke) = outline {
            for (i, &p) in points.iter().enumerate() {
                let q = points[(i + 1) % points.len()];
                self.draw_line(p, q, stroke, 1);
            }
        }
    }

    /// Even-odd scanline fill with half-open edges.
    fn fill_polygon_f(&mut self, verts: &[(f64, f64)], color: Color) {
        let (ymin, ymax) = verts
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let top = (ymin.ceil() as i32).max(0);
        let bottom = (ymax.ceil() as i32 - 1).min(self.height as i32 - 1);

        let mut xs: Vec<f64> = Vec::with_capacity(verts.len());
        for y in top..=bottom {
            let yc = y as f64;
            xs.clear();
            for (i, &(ax, ay)) in verts.iter().enumerate() {
                let (bx, by) = verts[(i + 1) % verts.len()];
                if (ay <= yc && yc < by) || (by <= yc && yc < ay) {
                    xs.push(ax + (yc - ay) / (by - ay) * (bx - ax));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                self.span(y, pair[0].ceil() as i32, pair[1].ceil() as i32 - 1, color);
            }
        }
    }

    /// Set every pixel from `f(x, y)`, one rayon task per row.
    pub fn shade<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> Color + Sync,
    {
        let width = self.width;
        self.pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    *px = f(x, y);
                }
            });
    }

    /// Copy the pixels into an [`RgbImage`] for encoding.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            self.pixels[y as usize * self.width + x as usize].into()
        })
    }

    /// Consume the canvas, handing its pixels over as an [`RgbImage`].
    pub fn into_image(self) -> RgbImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        RgbImage::from_raw(self.width as u32, self.height as u32, raw)
            .unwrap_or_else(|| RgbImage::new(0, 0))
    }
}
