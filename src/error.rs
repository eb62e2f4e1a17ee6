//! # Error Types
//!
//! This module defines error types used throughout the algoart library.

use thiserror::Error;

/// Main error type for algoart operations
#[derive(Debug, Error)]
pub enum ArtError {
    /// Pattern id not present in the catalog
    #[error("Unknown pattern type: {id}. Available: {}", available.join(", "))]
    UnknownPattern {
        id: String,
        available: Vec<&'static str>,
    },

    /// Structurally invalid parameter (size, color, degenerate geometry)
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArtError {
    pub(crate) fn param(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }
}

impl From<image::ImageError> for ArtError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_pattern_lists_ids() {
        let err = ArtError::UnknownPattern {
            id: "nope".to_string(),
            available: vec!["spirograph", "mandelbrot_set"],
        };
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("spirograph, mandelbrot_set"));
    }
}
