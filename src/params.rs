//! # Parameter Bag
//!
//! Callers hand pattern parameters over as a loose keyword bag: a JSON
//! object stored with a generation job, or `key=value` pairs from the CLI.
//! [`ParamBag`] holds that bag; each pattern's `set_param` turns individual
//! [`ParamValue`]s into typed fields through the accessors below, so type
//! errors surface once, at the dispatch boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ArtError;

/// A single untyped parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Integer value. Whole floats such as `20.0` are accepted.
    pub fn as_int(&self, name: &str) -> Result<i64, ArtError> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(*v as i64),
            other => Err(type_error(name, "an integer", other)),
        }
    }

    /// Non-negative integer, for counts and sizes.
    pub fn as_count(&self, name: &str) -> Result<usize, ArtError> {
        let v = self.as_int(name)?;
        usize::try_from(v).map_err(|_| type_error(name, "a non-negative integer", self))
    }

    pub fn as_float(&self, name: &str) -> Result<f64, ArtError> {
        match self {
            Self::Int(v) => Ok(*v as f64),
            Self::Float(v) if v.is_finite() => Ok(*v),
            other => Err(type_error(name, "a number", other)),
        }
    }

    pub fn as_str(&self, name: &str) -> Result<&str, ArtError> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(type_error(name, "a string", other)),
        }
    }

    pub fn as_color(&self, name: &str) -> Result<Color, ArtError> {
        Color::from_hex(self.as_str(name)?)
    }
}

fn type_error(name: &str, expected: &str, got: &ParamValue) -> ArtError {
    ArtError::param(format!("{}: expected {}, got '{}'", name, expected, got))
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parses the way a CLI value reads: integer, then float, then text.
impl FromStr for ParamValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Int(v));
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Self::Float(v)),
            _ => Ok(Self::Text(s.to_string())),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Keyword parameters for one generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBag(BTreeMap<String, ParamValue>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Remove and return a parameter.
    pub fn take(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    /// Insert a `key=value` pair as typed on a command line.
    pub fn insert_pair(&mut self, pair: &str) -> Result<(), ArtError> {
        let (key, value) = pair
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| ArtError::param(format!("expected key=value, got '{}'", pair)))?;
        let Ok(value) = value.trim().parse::<ParamValue>();
        self.insert(key.trim(), value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

impl fmt::Display for ParamBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}
