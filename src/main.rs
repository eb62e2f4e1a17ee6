//! # Algoart CLI
//!
//! Command-line interface for procedural art generation.
//!
//! ## Usage
//!
//! ```bash
//! # List available patterns grouped by category
//! algoart list
//!
//! # Dump the full catalog with parameter schemas
//! algoart list --json
//!
//! # Render a pattern with parameter overrides
//! algoart generate mandelbrot_set -p max_iter=150 --bg '#000000' -o mandelbrot.png
//!
//! # Reproducible stochastic pattern
//! algoart generate voronoi_diagram --size 512 --seed 7 -o voronoi.jpg
//!
//! # Render a stored generation request
//! algoart render request.json -o out.png
//!
//! # Blend two renders into a hybrid
//! algoart blend a.png b.png --alpha 0.3 -o hybrid.png
//! ```
//!
//! Set `RUST_LOG` (or pass `-v`) to see rendering traces on stderr.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use algoart::{
    ArtError, ParamBag, ParamValue,
    catalog::{get_pattern_catalog, patterns_by_category},
    generate,
    job::{self, GenerationRequest, OutputFormat},
};
use image::RgbImage;
use tracing_subscriber::EnvFilter;

/// Algoart - Procedural art generator
#[derive(Parser, Debug)]
#[command(name = "algoart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available patterns
    List {
        /// Print the catalog as JSON, including parameter schemas
        #[arg(long)]
        json: bool,
    },

    /// Render a pattern to an image file
    Generate {
        /// Pattern id (see `algoart list`)
        pattern: String,

        /// Output file (.png or .jpg)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Square image size in pixels
        #[arg(long, default_value = "1024")]
        size: u32,

        /// Pattern parameter as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Seed for stochastic patterns
        #[arg(long)]
        seed: Option<u64>,

        /// Background color (#RRGGBB)
        #[arg(long)]
        bg: Option<String>,

        /// Base color for custom color schemes (#RRGGBB)
        #[arg(long)]
        base: Option<String>,

        /// JPEG quality (1-100), used for .jpg output
        #[arg(long)]
        quality: Option<u8>,
    },

    /// Render a JSON generation request
    Render {
        /// Request file: {"algorithm": ..., "params": {...}, "image_size": "WxH"}
        request: PathBuf,

        /// Output file (.png or .jpg)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Blend two images into a hybrid
    Blend {
        /// Base image
        base: PathBuf,

        /// Overlay image, resized to the base when sizes differ
        overlay: PathBuf,

        /// Overlay weight in [0, 1]
        #[arg(long, default_value = "0.5")]
        alpha: f64,

        /// Output file (.png or .jpg)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), ArtError> {
    match command {
        Commands::List { json } => {
            if json {
                let out = serde_json::to_string_pretty(get_pattern_catalog())
                    .map_err(|e| ArtError::Parameter(format!("catalog serialization: {}", e)))?;
                println!("{}", out);
                return Ok(());
            }

            for (category, entries) in patterns_by_category() {
                println!("{}:", category.as_str());
                for entry in entries {
                    println!("  {:<22} {}", entry.id.as_str(), entry.description);
                }
            }
            Ok(())
        }

        Commands::Generate {
            pattern,
            output,
            size,
            params,
            seed,
            bg,
            base,
            quality,
        } => {
            let mut bag = ParamBag::new();
            for pair in &params {
                bag.insert_pair(pair)?;
            }
            if let Some(seed) = seed {
                let seed = i64::try_from(seed)
                    .map_err(|_| ArtError::Parameter(format!("seed out of range: {}", seed)))?;
                bag.insert("seed", ParamValue::Int(seed));
            }
            if let Some(bg) = bg {
                bag.insert("bg_color", bg);
            }
            if let Some(base) = base {
                bag.insert("base_color", base);
            }

            println!("Generating {} pattern ({}x{})...", pattern, size, size);
            let image = generate(&pattern, size, &bag)?;
            write_image(&image, &output, quality)
        }

        Commands::Render { request, output } => {
            let json = std::fs::read_to_string(&request)?;
            let request = GenerationRequest::from_json(&json)?;
            let size = request.size();

            println!("Generating {} pattern ({}x{})...", request.algorithm, size, size);
            let image = request.render()?;
            write_image(&image, &output, None)
        }

        Commands::Blend {
            base,
            overlay,
            alpha,
            output,
        } => {
            let base = image::open(&base)?.to_rgb8();
            let overlay = image::open(&overlay)?.to_rgb8();
            let image = job::blend(&base, &overlay, alpha)?;
            write_image(&image, &output, None)
        }
    }
}

fn write_image(image: &RgbImage, path: &Path, quality: Option<u8>) -> Result<(), ArtError> {
    let format = match (OutputFormat::from_path(path), quality) {
        (OutputFormat::Jpeg { .. }, Some(quality)) => OutputFormat::Jpeg { quality },
        (format, _) => format,
    };
    job::save(image, path, format)?;
    println!("Saved to {}", path.display());
    Ok(())
}
