//! # Algoart - Procedural Art Generator
//!
//! Algoart renders square RGB images from a catalog of mathematical and
//! stochastic drawing procedures. It provides:
//!
//! - **Pattern catalog**: ten patterns with names, categories and parameter schemas
//! - **Generators**: geometric, fractal, generative and spirograph families
//! - **Canvas**: a small raster with ellipse, polygon and line primitives
//! - **Jobs**: request decoding, hybrid blending and PNG/JPEG encoding
//!
//! ## Quick Start
//!
//! ```no_run
//! use algoart::{ParamBag, generate};
//!
//! let params = ParamBag::new()
//!     .with("max_iter", 150)
//!     .with("bg_color", "#000000");
//!
//! let image = generate("mandelbrot_set", 1024, &params)?;
//! image.save("mandelbrot.png")?;
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`art`] | Pattern ids, parameter structs and generators |
//! | [`catalog`] | Static pattern catalog |
//! | [`canvas`] | Raster drawing primitives |
//! | [`color`] | RGB colors, hex and HSV conversion |
//! | [`params`] | Loosely typed parameter bags |
//! | [`generate`] | Dispatch from pattern id to image |
//! | [`job`] | Generation requests, blending and encoding |
//! | [`error`] | Error types |
//!
//! ## Randomness
//!
//! Stochastic patterns draw from a per-call random source. Pass an integer
//! `seed` parameter to make their output reproducible.

pub mod art;
pub mod canvas;
pub mod catalog;
pub mod color;
pub mod error;
pub mod generate;
pub mod job;
pub mod params;

// Re-exports for convenience
pub use canvas::Canvas;
pub use catalog::{get_pattern_catalog, patterns_by_category};
pub use color::Color;
pub use error::ArtError;
pub use generate::{generate, generate_algorithmic_art};
pub use params::{ParamBag, ParamValue};
