//! # Spirograph
//!
//! Hypotrochoid traced by a pen at distance `d` from the center of a wheel
//! of radius `r` rolling inside a ring of radius `R`:
//!
//! ```text
//! x(t) = (R − r)·cos t + d·cos((R − r)/r · t)
//! y(t) = (R − r)·sin t − d·sin((R − r)/r · t)
//! ```
//!
//! `t` advances one degree per point for `rotations × 360` points, centered
//! on the canvas and joined by 2px segments sweeping once through the hue
//! wheel.

use std::fmt;

use super::{DrawContext, Generator, ParamSpec, PatternId, check_length, unknown_param};
use crate::canvas::{Canvas, Point};
use crate::color::Color;
use crate::error::ArtError;
use crate::params::ParamValue;

/// Upper bound on `rotations`; each turn adds 360 points.
pub const MAX_ROTATIONS: usize = 1_000;

/// Hypotrochoid parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Spirograph {
    /// Fixed ring radius `R`. Default: 200
    pub ring_radius: f64,
    /// Rolling wheel radius `r`. Default: 50
    pub wheel_radius: f64,
    /// Pen offset `d` from the wheel center. Default: 80
    pub pen_offset: f64,
    /// Full turns of `t`. Default: 20
    pub rotations: usize,
}

impl Default for Spirograph {
    fn default() -> Self {
        Self {
            ring_radius: 200.0,
            wheel_radius: 50.0,
            pen_offset: 80.0,
            rotations: 20,
        }
    }
}

impl fmt::Display for Spirograph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R={} r={} d={} rotations={}",
            self.ring_radius, self.wheel_radius, self.pen_offset, self.rotations
        )
    }
}

impl Spirograph {
    /// Curve points relative to `(cx, cy)`, one per degree.
    pub fn points(&self, cx: i32, cy: i32) -> Vec<Point> {
        let big = self.ring_radius;
        let small = self.wheel_radius;
        let d = self.pen_offset;
        let k = (big - small) / small;

        (0..self.rotations * 360)
            .map(|i| {
                let t = (i as f64).to_radians();
                let x = (big - small) * t.cos() + d * (k * t).cos();
                let y = (big - small) * t.sin() - d * (k * t).sin();
                (cx + x as i32, cy + y as i32)
            })
            .collect()
    }
}

impl Generator for Spirograph {
    const ID: PatternId = PatternId::Spirograph;

    fn param_specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("R", 100, 400, 200).with_description("Radius of the fixed ring"),
            ParamSpec::int("r", 20, 100, 50).with_description("Radius of the rolling wheel"),
            ParamSpec::int("d", 20, 150, 80).with_description("Pen distance from the wheel center"),
            ParamSpec::int("rotations", 10, 50, 20).with_description("Number of full turns"),
        ]
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        match name {
            "R" => self.ring_radius = value.as_float(name)?,
            "r" => self.wheel_radius = value.as_float(name)?,
            "d" => self.pen_offset = value.as_float(name)?,
            "rotations" => self.rotations = value.as_count(name)?,
            _ => return Err(unknown_param(Self::ID, name)),
        }
        Ok(())
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("R", self.ring_radius.to_string()),
            ("r", self.wheel_radius.to_string()),
            ("d", self.pen_offset.to_string()),
            ("rotations", self.rotations.to_string()),
        ]
    }

    fn validate(&self) -> Result<(), ArtError> {
        if self.wheel_radius == 0.0 {
            return Err(ArtError::param("spirograph wheel radius r must be non-zero"));
        }
        check_length(Self::ID, "R", self.ring_radius)?;
        check_length(Self::ID, "r", self.wheel_radius)?;
        check_length(Self::ID, "d", self.pen_offset)?;
        if self.rotations > MAX_ROTATIONS {
            return Err(ArtError::param(format!(
                "rotations must be at most {}, got {}",
                MAX_ROTATIONS, self.rotations
            )));
        }
        Ok(())
    }

    fn draw(&self, canvas: &mut Canvas, _ctx: &mut DrawContext) {
        let cx = (canvas.width() / 2) as i32;
        let cy = (canvas.height() / 2) as i32;
        let points = self.points(cx, cy);
        let total = points.len() as f64;

        for (i, pair) in points.windows(2).enumerate() {
            let color = Color::from_hsv(i as f64 / total, 0.8, 0.9);
            canvas.draw_line(pair[0], pair[1], color, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count() {
        let g = Spirograph {
            rotations: 3,
            ..Default::default()
        };
        assert_eq!(g.points(0, 0).len(), 1080);
    }

    #[test]
    fn test_first_point() {
        // t = 0: x = (R − r) + d, y = 0
        let g = Spirograph::default();
        assert_eq!(g.points(100, 100)[0], (100 + 150 + 80, 100));
    }

    #[test]
    fn test_zero_wheel_rejected() {
        let g = Spirograph {
            wheel_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(g.validate(), Err(ArtError::Parameter(_))));
    }

    #[test]
    fn test_huge_geometry_rejected() {
        let g = Spirograph {
            pen_offset: 3_000_000_000.0,
            ..Default::default()
        };
        assert!(matches!(g.validate(), Err(ArtError::Parameter(_))));
        let g = Spirograph {
            ring_radius: -2e6,
            ..Default::default()
        };
        assert!(g.validate().is_err());
        let g = Spirograph {
            rotations: MAX_ROTATIONS + 1,
            ..Default::default()
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_largest_geometry_draws() {
        let g = Spirograph {
            ring_radius: 1e6,
            wheel_radius: 1e6,
            pen_offset: -1e6,
            rotations: 1,
        };
        assert!(g.validate().is_ok());
        let mut canvas = Canvas::new(32, 32, Color::WHITE).unwrap();
        g.draw(&mut canvas, &mut DrawContext::new(Color::RED, Some(0)));
    }

    #[test]
    fn test_fractional_radii() {
        let mut g = Spirograph::default();
        g.set_param("R", &ParamValue::Float(150.5)).unwrap();
        g.set_param("d", &ParamValue::Int(40)).unwrap();
        assert_eq!(g.ring_radius, 150.5);
        assert_eq!(g.pen_offset, 40.0);
        // t = 0: x = (R − r) + d = 140.5 → 140
        assert_eq!(g.points(0, 0)[0], (140, 0));
    }

    #[test]
    fn test_zero_rotations_draws_nothing() {
        let g = Spirograph {
            rotations: 0,
            ..Default::default()
        };
        let mut canvas = Canvas::new(32, 32, Color::WHITE).unwrap();
        g.draw(&mut canvas, &mut DrawContext::new(Color::RED, Some(0)));
        assert_eq!(canvas, Canvas::new(32, 32, Color::WHITE).unwrap());
    }

    #[test]
    fn test_draws_on_canvas() {
        let mut canvas = Canvas::new(512, 512, Color::WHITE).unwrap();
        Spirograph::default().draw(&mut canvas, &mut DrawContext::new(Color::RED, Some(0)));
        assert_ne!(canvas, Canvas::new(512, 512, Color::WHITE).unwrap());
        // Closest approach to the center is R - r - d = 70
        assert_eq!(canvas.pixel(256, 256), Some(Color::WHITE));
        assert_ne!(canvas.pixel(256 + 230, 256), Some(Color::WHITE));
    }
}
