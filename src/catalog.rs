//! # Pattern Catalog
//!
//! Static registry of every pattern with its display metadata and parameter
//! schema. Built once on first access and never mutated.
//!
//! The schema is informational: it feeds UIs and validation hints, but the
//! dispatcher does not clamp values to `min`/`max`.
//!
//! ## JSON Shape
//!
//! ```text
//! {
//!   "mandelbrot_set": {
//!     "name": "Mandelbrot Set",
//!     "description": "Famous fractal visualization",
//!     "category": "fractal",
//!     "params": { "max_iter": { "type": "int", "min": 50, "max": 200, "default": 100 } }
//!   },
//!   ...
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::art::{Category, ParamSpec, Pattern, PatternId};

/// Catalog row for one pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(skip)]
    pub id: PatternId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    #[serde(serialize_with = "serialize_specs")]
    pub params: Vec<ParamSpec>,
}

fn serialize_specs<S: Serializer>(specs: &[ParamSpec], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(specs.len()))?;
    for spec in specs {
        map.serialize_entry(spec.name, spec)?;
    }
    map.end()
}

impl CatalogEntry {
    fn new(id: PatternId, name: &'static str, description: &'static str) -> Self {
        Self {
            id,
            name,
            description,
            category: id.category(),
            params: Pattern::param_specs(id),
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// All catalog entries, in display order.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    fn build() -> Self {
        use PatternId::*;
        let entries = vec![
            CatalogEntry::new(
                ConcentricCircles,
                "Concentric Circles",
                "Mathematical nested circles with customizable gradient colors",
            ),
            CatalogEntry::new(
                SpiralCircles,
                "Spiral Circles",
                "Logarithmic spiral of colored circles",
            ),
            CatalogEntry::new(
                HexagonalGrid,
                "Hexagonal Grid",
                "Tessellation of colored hexagons",
            ),
            CatalogEntry::new(
                SierpinskiTriangle,
                "Sierpinski Triangle",
                "Classic chaos game fractal",
            ),
            CatalogEntry::new(MandelbrotSet, "Mandelbrot Set", "Famous fractal visualization"),
            CatalogEntry::new(RecursiveTree, "Recursive Tree", "Branching tree fractal"),
            CatalogEntry::new(
                RandomWalk,
                "Random Walk",
                "Multiple particles wandering randomly",
            ),
            CatalogEntry::new(VoronoiDiagram, "Voronoi Diagram", "Space partitioning pattern"),
            CatalogEntry::new(
                WaveInterference,
                "Wave Interference",
                "Multiple wave sources creating patterns",
            ),
            CatalogEntry::new(Spirograph, "Spirograph", "Mathematical drawing toy simulation"),
        ];
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by category, each group in catalog order.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&CatalogEntry>> {
        let mut groups: BTreeMap<Category, Vec<&CatalogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category).or_default().push(entry);
        }
        groups
    }
}

/// Serializes as an ordered map `id → entry`.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.id.as_str(), entry)?;
        }
        map.end()
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// The process-wide pattern catalog.
pub fn get_pattern_catalog() -> &'static Catalog {
    &CATALOG
}

/// Catalog entries grouped by category.
pub fn patterns_by_category() -> BTreeMap<Category, Vec<&'static CatalogEntry>> {
    CATALOG.by_category()
}
