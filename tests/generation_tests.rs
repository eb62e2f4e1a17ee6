//! # Generation Tests
//!
//! End-to-end checks through the public API: every catalog entry renders,
//! fixed patterns are deterministic, seeded patterns are reproducible, and
//! invalid requests are rejected with the right error.
//!
//! Sizes are kept small; the Mandelbrot and chaos-game patterns dominate
//! runtime at full resolution.

use algoart::art::{PATTERNS, PatternId};
use algoart::job::GenerationRequest;
use algoart::{ArtError, Color, ParamBag, generate, generate_algorithmic_art, get_pattern_catalog};
use image::RgbImage;
use pretty_assertions::assert_eq;

const SIZE: u32 = 64;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Catalog defaults for a pattern, as a UI would submit them.
fn default_params(id: &str) -> ParamBag {
    let entry = get_pattern_catalog().get(id).unwrap();
    entry
        .params
        .iter()
        .map(|spec| (spec.name, spec.default_value()))
        .collect()
}

fn seeded(seed: i64) -> ParamBag {
    ParamBag::new().with("seed", seed)
}

fn all_pixels(img: &RgbImage, rgb: [u8; 3]) -> bool {
    img.pixels().all(|p| p.0 == rgb)
}

// ============================================================================
// CATALOG
// ============================================================================

#[test]
fn test_every_catalog_entry_renders_with_defaults() {
    let catalog = get_pattern_catalog();
    assert_eq!(catalog.len(), PATTERNS.len());

    for entry in catalog.entries() {
        let id = entry.id.as_str();
        let params = default_params(id).with("seed", 1);
        let img = generate(id, SIZE, &params)
            .unwrap_or_else(|e| panic!("{} failed with defaults: {}", id, e));
        assert_eq!(img.dimensions(), (SIZE, SIZE), "{}", id);
    }
}

#[test]
fn test_output_is_square_at_any_size() {
    for id in PATTERNS {
        for size in [1, 17, 48] {
            let img = generate(id, size, &seeded(3)).unwrap();
            assert_eq!(img.dimensions(), (size, size), "{} at {}", id, size);
        }
    }
}

#[test]
fn test_alias_matches_generate() {
    let params = ParamBag::new().with("max_iter", 30);
    assert_eq!(
        generate("mandelbrot_set", 32, &params).unwrap(),
        generate_algorithmic_art("mandelbrot_set", 32, &params).unwrap()
    );
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn test_fixed_patterns_are_deterministic() {
    for id in PatternId::ALL.into_iter().filter(|id| !id.is_stochastic()) {
        let a = generate(id.as_str(), SIZE, &ParamBag::new()).unwrap();
        let b = generate(id.as_str(), SIZE, &ParamBag::new()).unwrap();
        assert!(a == b, "{} is not deterministic", id);
    }
}

#[test]
fn test_seeded_patterns_are_reproducible() {
    for id in PatternId::ALL.into_iter().filter(|id| id.is_stochastic()) {
        let a = generate(id.as_str(), SIZE, &seeded(1234)).unwrap();
        let b = generate(id.as_str(), SIZE, &seeded(1234)).unwrap();
        assert!(a == b, "{} differs under the same seed", id);
    }
}

#[test]
fn test_seeds_change_random_output() {
    let a = generate("voronoi_diagram", SIZE, &seeded(1)).unwrap();
    let b = generate("voronoi_diagram", SIZE, &seeded(2)).unwrap();
    assert!(a != b);
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn test_mandelbrot_has_inside_and_escaping_points() {
    let img = generate("mandelbrot_set", 64, &ParamBag::new().with("max_iter", 20)).unwrap();
    assert!(img.pixels().any(|p| p.0 == [0, 0, 0]));
    assert!(img.pixels().any(|p| p.0 != [0, 0, 0]));
}

#[test]
fn test_concentric_monochrome_center_and_corner() {
    let params = ParamBag::new()
        .with("num_circles", 5)
        .with("color_scheme", "monochrome");
    let img = generate("concentric_circles", 100, &params).unwrap();
    assert_eq!(img.get_pixel(50, 50).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(0, 0).0, Color::WHITE.to_array());
}

#[test]
fn test_concentric_ring_is_gray() {
    // Outermost disc (t = 1/5) shows between the second disc and the edge
    let params = ParamBag::new()
        .with("num_circles", 5)
        .with("color_scheme", "monochrome");
    let img = generate("concentric_circles", 100, &params).unwrap();
    assert_eq!(img.get_pixel(50, 5).0, [51, 51, 51]);
}

#[test]
fn test_zero_circles_leave_background() {
    let params = ParamBag::new().with("num_circles", 0).with("bg_color", "#336699");
    let img = generate("concentric_circles", 32, &params).unwrap();
    assert!(all_pixels(&img, [0x33, 0x66, 0x99]));
}

#[test]
fn test_zero_counts_are_noops() {
    for (id, name) in [
        ("random_walk", "num_walkers"),
        ("voronoi_diagram", "num_points"),
        ("wave_interference", "num_sources"),
        ("spirograph", "rotations"),
    ] {
        let params = ParamBag::new().with(name, 0).with("bg_color", "#000000");
        let img = generate(id, 24, &params).unwrap();
        assert!(all_pixels(&img, [0, 0, 0]), "{} painted with {}=0", id, name);
    }
}

// ============================================================================
// REJECTIONS
// ============================================================================

#[test]
fn test_unknown_pattern_rejected() {
    let err = generate("does_not_exist", SIZE, &ParamBag::new()).unwrap_err();
    match err {
        ArtError::UnknownPattern { id, available } => {
            assert_eq!(id, "does_not_exist");
            assert_eq!(available, PATTERNS.to_vec());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_spirograph_zero_wheel_rejected() {
    let err = generate("spirograph", SIZE, &ParamBag::new().with("r", 0)).unwrap_err();
    assert!(matches!(err, ArtError::Parameter(_)));
}

#[test]
fn test_zero_size_rejected() {
    let err = generate("spiral_circles", 0, &ParamBag::new()).unwrap_err();
    assert!(matches!(err, ArtError::Parameter(_)));
}

#[test]
fn test_oversized_canvas_rejected() {
    let params = ParamBag::new().with("num_circles", 0);
    let err = generate("concentric_circles", u32::MAX, &params).unwrap_err();
    assert!(matches!(err, ArtError::Parameter(_)));

    let req = GenerationRequest::from_json(
        r#"{"algorithm": "concentric_circles", "params": {"num_circles": 0}, "image_size": "4294967295x1"}"#,
    )
    .unwrap();
    assert_eq!(req.size(), u32::MAX);
    assert!(matches!(req.render(), Err(ArtError::Parameter(_))));
}

#[test]
fn test_huge_geometry_rejected() {
    for (id, name, value) in [
        ("spirograph", "d", 3_000_000_000_i64),
        ("spirograph", "R", -5_000_000),
        ("hexagonal_grid", "hex_size", 1 << 31),
        ("concentric_circles", "num_circles", 10_i64.pow(18)),
        ("voronoi_diagram", "num_points", 1 << 40),
    ] {
        let params = ParamBag::new().with(name, value);
        assert!(
            matches!(generate(id, 16, &params), Err(ArtError::Parameter(_))),
            "{} {}={} accepted",
            id,
            name,
            value
        );
    }
}

#[test]
fn test_fractional_geometry_accepted() {
    let params = ParamBag::new().with("R", 150.5).with("d", 60.25);
    assert!(generate("spirograph", 32, &params).is_ok());
    let params = ParamBag::new().with("turns", 2.5);
    assert!(generate("spiral_circles", 32, &params).is_ok());
}

#[test]
fn test_bad_hex_rejected() {
    for bad in ["#12345", "#GGGGGG", "red", "#1234567"] {
        let params = ParamBag::new().with("bg_color", bad);
        assert!(
            matches!(generate("spiral_circles", 8, &params), Err(ArtError::Parameter(_))),
            "{} accepted",
            bad
        );
    }
}

#[test]
fn test_misspelled_param_rejected() {
    let params = ParamBag::new().with("num_circle", 5);
    let err = generate("concentric_circles", 8, &params).unwrap_err();
    assert!(err.to_string().contains("num_circle"));
}

#[test]
fn test_wrong_type_rejected() {
    let params = ParamBag::new().with("max_iter", "lots");
    assert!(matches!(
        generate("mandelbrot_set", 8, &params),
        Err(ArtError::Parameter(_))
    ));
}

// ============================================================================
// COLORS
// ============================================================================

#[test]
fn test_hex_round_trip() {
    for hex in ["#000000", "#FFFFFF", "#FF0000", "#1A2B3C"] {
        assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
    }
    assert_eq!(Color::from_hex("#1a2b3c").unwrap().to_hex(), "#1A2B3C");
}

// ============================================================================
// REQUESTS
// ============================================================================

#[test]
fn test_json_request_renders() {
    let req = GenerationRequest::from_json(
        r##"{
            "algorithm": "concentric_circles",
            "params": {"num_circles": 5, "color_scheme": "monochrome", "bg_color": "#000000"},
            "image_size": "100x100"
        }"##,
    )
    .unwrap();
    let img = req.render().unwrap();
    assert_eq!(img.dimensions(), (100, 100));
    assert_eq!(img.get_pixel(50, 50).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn test_json_request_matches_direct_call() {
    let req = GenerationRequest::from_json(
        r#"{"algorithm": "spirograph", "params": {"R": 120, "r": 30, "d": 40, "rotations": 2}, "image_size": "64x64"}"#,
    )
    .unwrap();
    let params = ParamBag::new()
        .with("R", 120)
        .with("r", 30)
        .with("d", 40)
        .with("rotations", 2);
    assert_eq!(req.render().unwrap(), generate("spirograph", 64, &params).unwrap());
}
