//! # Art Generation
//!
//! Procedural pattern generators. Each pattern is a parameter struct
//! implementing [`Generator`]; the closed set of patterns is the
//! [`Pattern`] enum, keyed by [`PatternId`].
//!
//! | Family | Module | Patterns |
//! |--------|--------|----------|
//! | Geometric | [`geometric`] | concentric_circles, spiral_circles, hexagonal_grid |
//! | Fractal | [`fractal`] | sierpinski_triangle, mandelbrot_set, recursive_tree |
//! | Generative | [`generative`] | random_walk, voronoi_diagram, wave_interference |
//! | Spirograph | [`spirograph`] | spirograph |
//!
//! ## Adding a New Pattern
//!
//! 1. Add a parameter struct implementing [`Generator`] to its family module
//! 2. Add a [`PatternId`] variant and list it in [`PatternId::ALL`]
//! 3. Add a [`Pattern`] variant and extend `dispatch!`
//! 4. Add a catalog row in [`crate::catalog`]

pub mod fractal;
pub mod generative;
pub mod geometric;
pub mod spirograph;

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::ArtError;
use crate::params::{ParamBag, ParamValue};

/// Pattern identifiers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternId {
    ConcentricCircles,
    SpiralCircles,
    HexagonalGrid,
    SierpinskiTriangle,
    MandelbrotSet,
    RecursiveTree,
    RandomWalk,
    VoronoiDiagram,
    WaveInterference,
    Spirograph,
}

impl PatternId {
    pub const ALL: [PatternId; 10] = [
        Self::ConcentricCircles,
        Self::SpiralCircles,
        Self::HexagonalGrid,
        Self::SierpinskiTriangle,
        Self::MandelbrotSet,
        Self::RecursiveTree,
        Self::RandomWalk,
        Self::VoronoiDiagram,
        Self::WaveInterference,
        Self::Spirograph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConcentricCircles => "concentric_circles",
            Self::SpiralCircles => "spiral_circles",
            Self::HexagonalGrid => "hexagonal_grid",
            Self::SierpinskiTriangle => "sierpinski_triangle",
            Self::MandelbrotSet => "mandelbrot_set",
            Self::RecursiveTree => "recursive_tree",
            Self::RandomWalk => "random_walk",
            Self::VoronoiDiagram => "voronoi_diagram",
            Self::WaveInterference => "wave_interference",
            Self::Spirograph => "spirograph",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::ConcentricCircles | Self::SpiralCircles | Self::HexagonalGrid => {
                Category::Geometric
            }
            Self::SierpinskiTriangle | Self::MandelbrotSet | Self::RecursiveTree => {
                Category::Fractal
            }
            Self::RandomWalk | Self::VoronoiDiagram | Self::WaveInterference => {
                Category::Generative
            }
            Self::Spirograph => Category::Spirograph,
        }
    }

    /// Whether output depends on the random source.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            Self::HexagonalGrid
                | Self::SierpinskiTriangle
                | Self::RandomWalk
                | Self::VoronoiDiagram
                | Self::WaveInterference
        )
    }
}

impl FromStr for PatternId {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ArtError::UnknownPattern {
                id: s.to_string(),
                available: PATTERNS.to_vec(),
            })
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All available pattern ids, in display order.
pub const PATTERNS: &[&str] = &[
    "concentric_circles",
    "spiral_circles",
    "hexagonal_grid",
    "sierpinski_triangle",
    "mandelbrot_set",
    "recursive_tree",
    "random_walk",
    "voronoi_diagram",
    "wave_interference",
    "spirograph",
];

/// Pattern family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Geometric,
    Fractal,
    Generative,
    Spirograph,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geometric => "geometric",
            Self::Fractal => "fractal",
            Self::Generative => "generative",
            Self::Spirograph => "spirograph",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema entry for one pattern parameter, for validation and UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Parameter type with its bounds and default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    Int {
        min: i64,
        max: i64,
        default: i64,
    },
    Choice {
        options: Vec<&'static str>,
        default: &'static str,
    },
    Color {
        default: Color,
    },
}

impl ParamSpec {
    pub fn int(name: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Int { min, max, default },
            description: None,
        }
    }

    pub fn choice(name: &'static str, options: Vec<&'static str>, default: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Choice { options, default },
            description: None,
        }
    }

    pub fn color(name: &'static str, default: Color) -> Self {
        Self {
            name,
            kind: ParamKind::Color { default },
            description: None,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// The default as a parameter value.
    pub fn default_value(&self) -> ParamValue {
        match &self.kind {
            ParamKind::Int { default, .. } => ParamValue::Int(*default),
            ParamKind::Choice { default, .. } => ParamValue::Text(default.to_string()),
            ParamKind::Color { default } => ParamValue::Text(default.to_hex()),
        }
    }
}

/// Per-call state handed to a generator: the universal base color and the
/// random source.
pub struct DrawContext {
    pub base_color: Color,
    pub rng: StdRng,
}

impl DrawContext {
    /// Seeded when `seed` is given, otherwise freshly seeded from the OS.
    pub fn new(base_color: Color, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { base_color, rng }
    }
}

/// A pattern's parameters plus the algorithm that paints them.
pub trait Generator: Default + fmt::Display {
    const ID: PatternId;

    /// Parameter schema, defaults matching [`Default`].
    fn param_specs() -> Vec<ParamSpec>;

    /// Set one named parameter.
    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError>;

    /// Current parameter values as `(name, value)` pairs.
    fn list_params(&self) -> Vec<(&'static str, String)>;

    /// Reject parameter combinations that cannot be drawn.
    fn validate(&self) -> Result<(), ArtError> {
        Ok(())
    }

    /// Paint onto `canvas`.
    fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext);
}

/// Error for a parameter name the pattern does not take.
pub(crate) fn unknown_param(id: PatternId, name: &str) -> ArtError {
    ArtError::param(format!("unknown param '{}' for {}", name, id))
}

/// Largest accepted magnitude for a length parameter, in pixels.
pub const MAX_LENGTH: f64 = 1_000_000.0;

/// Largest accepted value for a count parameter.
pub const MAX_COUNT: usize = 100_000;

/// Reject lengths whose coordinates would not fit the raster's integer space.
pub(crate) fn check_length(id: PatternId, name: &str, value: f64) -> Result<(), ArtError> {
    if value.abs() > MAX_LENGTH {
        return Err(ArtError::param(format!(
            "{} for {} must be within ±{}, got {}",
            name, id, MAX_LENGTH, value
        )));
    }
    Ok(())
}

/// Reject counts above [`MAX_COUNT`].
pub(crate) fn check_count(id: PatternId, name: &str, value: usize) -> Result<(), ArtError> {
    if value > MAX_COUNT {
        return Err(ArtError::param(format!(
            "{} for {} must be at most {}, got {}",
            name, id, MAX_COUNT, value
        )));
    }
    Ok(())
}

/// A fully configured pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    ConcentricCircles(geometric::ConcentricCircles),
    SpiralCircles(geometric::SpiralCircles),
    HexagonalGrid(geometric::HexagonalGrid),
    SierpinskiTriangle(fractal::SierpinskiTriangle),
    MandelbrotSet(fractal::MandelbrotSet),
    RecursiveTree(fractal::RecursiveTree),
    RandomWalk(generative::RandomWalk),
    VoronoiDiagram(generative::VoronoiDiagram),
    WaveInterference(generative::WaveInterference),
    Spirograph(spirograph::Spirograph),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Pattern::ConcentricCircles($p) => $body,
            Pattern::SpiralCircles($p) => $body,
            Pattern::HexagonalGrid($p) => $body,
            Pattern::SierpinskiTriangle($p) => $body,
            Pattern::MandelbrotSet($p) => $body,
            Pattern::RecursiveTree($p) => $body,
            Pattern::RandomWalk($p) => $body,
            Pattern::VoronoiDiagram($p) => $body,
            Pattern::WaveInterference($p) => $body,
            Pattern::Spirograph($p) => $body,
        }
    };
}

impl Pattern {
    /// The pattern with all-default parameters.
    pub fn golden(id: PatternId) -> Self {
        match id {
            PatternId::ConcentricCircles => Self::ConcentricCircles(Default::default()),
            PatternId::SpiralCircles => Self::SpiralCircles(Default::default()),
            PatternId::HexagonalGrid => Self::HexagonalGrid(Default::default()),
            PatternId::SierpinskiTriangle => Self::SierpinskiTriangle(Default::default()),
            PatternId::MandelbrotSet => Self::MandelbrotSet(Default::default()),
            PatternId::RecursiveTree => Self::RecursiveTree(Default::default()),
            PatternId::RandomWalk => Self::RandomWalk(Default::default()),
            PatternId::VoronoiDiagram => Self::VoronoiDiagram(Default::default()),
            PatternId::WaveInterference => Self::WaveInterference(Default::default()),
            PatternId::Spirograph => Self::Spirograph(Default::default()),
        }
    }

    /// Defaults overridden by every entry in `params`, then validated.
    pub fn from_params(id: PatternId, params: &ParamBag) -> Result<Self, ArtError> {
        let mut pattern = Self::golden(id);
        for (name, value) in params.iter() {
            pattern.set_param(name, value)?;
        }
        pattern.validate()?;
        Ok(pattern)
    }

    /// Schema for a pattern id.
    pub fn param_specs(id: PatternId) -> Vec<ParamSpec> {
        match id {
            PatternId::ConcentricCircles => geometric::ConcentricCircles::param_specs(),
            PatternId::SpiralCircles => geometric::SpiralCircles::param_specs(),
            PatternId::HexagonalGrid => geometric::HexagonalGrid::param_specs(),
            PatternId::SierpinskiTriangle => fractal::SierpinskiTriangle::param_specs(),
            PatternId::MandelbrotSet => fractal::MandelbrotSet::param_specs(),
            PatternId::RecursiveTree => fractal::RecursiveTree::param_specs(),
            PatternId::RandomWalk => generative::RandomWalk::param_specs(),
            PatternId::VoronoiDiagram => generative::VoronoiDiagram::param_specs(),
            PatternId::WaveInterference => generative::WaveInterference::param_specs(),
            PatternId::Spirograph => spirograph::Spirograph::param_specs(),
        }
    }

    pub fn id(&self) -> PatternId {
        fn id_of<G: Generator>(_: &G) -> PatternId {
            G::ID
        }
        dispatch!(self, p => id_of(p))
    }

    pub fn name(&self) -> &'static str {
        self.id().as_str()
    }

    pub fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<(), ArtError> {
        dispatch!(self, p => p.set_param(name, value))
    }

    pub fn list_params(&self) -> Vec<(&'static str, String)> {
        dispatch!(self, p => p.list_params())
    }

    pub fn params_description(&self) -> String {
        dispatch!(self, p => p.to_string())
    }

    pub fn validate(&self) -> Result<(), ArtError> {
        dispatch!(self, p => p.validate())
    }

    pub fn draw(&self, canvas: &mut Canvas, ctx: &mut DrawContext) {
        dispatch!(self, p => p.draw(canvas, ctx))
    }
}

/// Get a pattern with default parameters by id.
pub fn by_name(name: &str) -> Option<Pattern> {
    name.parse().ok().map(Pattern::golden)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_list_matches_ids() {
        let ids: Vec<&str> = PatternId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, PATTERNS);
    }

    #[test]
    fn test_by_name() {
        assert!(by_name("mandelbrot_set").is_some());
        assert!(by_name("spirograph").is_some());
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn test_from_str_unknown_lists_ids() {
        match "not_a_real_pattern".parse::<PatternId>() {
            Err(ArtError::UnknownPattern { id, available }) => {
                assert_eq!(id, "not_a_real_pattern");
                assert_eq!(available.len(), 10);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_golden_id_roundtrip() {
        for id in PatternId::ALL {
            assert_eq!(Pattern::golden(id).id(), id);
        }
    }

    #[test]
    fn test_specs_match_defaults() {
        for id in PatternId::ALL {
            let pattern = Pattern::golden(id);
            let listed = pattern.list_params();
            for spec in Pattern::param_specs(id) {
                if let Some((_, value)) = listed.iter().find(|(name, _)| *name == spec.name) {
                    assert_eq!(
                        *value,
                        spec.default_value().to_string(),
                        "{}.{} default drifted",
                        id,
                        spec.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_unknown_param_rejected() {
        let mut pattern = Pattern::golden(PatternId::MandelbrotSet);
        let err = pattern.set_param("max_iterz", &ParamValue::Int(5)).unwrap_err();
        assert!(err.to_string().contains("max_iterz"));
    }

    #[test]
    fn test_stochastic_patterns() {
        let random: Vec<&str> = PatternId::ALL
            .into_iter()
            .filter(|id| id.is_stochastic())
            .map(PatternId::as_str)
            .collect();
        assert_eq!(
            random,
            vec![
                "hexagonal_grid",
                "sierpinski_triangle",
                "random_walk",
                "voronoi_diagram",
                "wave_interference"
            ]
        );
    }

    #[test]
    fn test_limits() {
        let id = PatternId::Spirograph;
        assert!(check_length(id, "d", -MAX_LENGTH).is_ok());
        assert!(matches!(
            check_length(id, "d", 3e9),
            Err(ArtError::Parameter(_))
        ));
        assert!(check_count(id, "n", MAX_COUNT).is_ok());
        assert!(check_count(id, "n", MAX_COUNT + 1).is_err());
    }

    #[test]
    fn test_seeded_context_repeats() {
        use rand::Rng;
        let mut a = DrawContext::new(Color::RED, Some(9));
        let mut b = DrawContext::new(Color::RED, Some(9));
        let xs: Vec<u32> = (0..8).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
