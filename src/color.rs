//! # Color
//!
//! 8-bit RGB triples and the conversions the pattern generators rely on.
//!
//! ## HSV → RGB
//!
//! Hue, saturation and value are floats in `[0, 1]`. Hue wraps, so `1.2`
//! and `0.2` are the same color and a negative hue such as `-0.03` lands
//! just below red on the wheel:
//!
//! ```text
//! sector = floor(h * 6)      f = h * 6 - sector
//! p = v(1 - s)   q = v(1 - s·f)   t = v(1 - s(1 - f))
//!
//! sector  0    1    2    3    4    5
//!   r     v    q    p    p    t    v
//!   g     t    v    v    q    p    p
//!   b     p    p    t    v    v    q
//! ```
//!
//! Channels are scaled by 255 and truncated, never rounded.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ArtError;

/// An RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level `v` on all three channels.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// The leading `#` is optional. Anything other than exactly six hex
    /// digits is rejected.
    pub fn from_hex(s: &str) -> Result<Self, ArtError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ArtError::param(format!(
                "invalid hex color '{}': expected #RRGGBB",
                s
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ArtError::param(format!("invalid hex color '{}': {}", s, e)))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert hue/saturation/value to RGB.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Multiply every channel by `intensity`, truncating.
    pub fn scale(self, intensity: f64) -> Self {
        let ch = |c: u8| (c as f64 * intensity).clamp(0.0, 255.0) as u8;
        Self::rgb(ch(self.r), ch(self.g), ch(self.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb(c.to_array())
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(p: image::Rgb<u8>) -> Self {
        Self::rgb(p.0[0], p.0[1], p.0[2])
    }
}

impl FromStr for Color {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// HSV → RGB with each component in `[0, 1]`. Hue wraps modulo 1.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Scale a `[0, 1]` component to a byte, truncating.
#[inline]
fn to_channel(c: f64) -> u8 {
    (c * 255.0).clamp(0.0, 255.0) as u8
}
