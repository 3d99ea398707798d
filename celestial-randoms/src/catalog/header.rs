//! Catalog header: an ordered set of keyword cards with scalar values.
//!
//! Keywords are stored upper-case and are unique within a header. Setting a
//! keyword that already exists replaces its value in place, so the original
//! card order survives round trips through [`crate::io`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword holding the surface density of a random catalog (points per deg²).
pub const DENSITY_KEY: &str = "DENSITY";

/// Scalar value of a header card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl HeaderValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Bool(true) => write!(f, "T"),
            HeaderValue::Bool(false) => write!(f, "F"),
            HeaderValue::Int(v) => write!(f, "{}", v),
            HeaderValue::Float(v) => write!(f, "{}", v),
            HeaderValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for HeaderValue {
    fn from(v: i64) -> Self {
        HeaderValue::Int(v)
    }
}

impl From<f64> for HeaderValue {
    fn from(v: f64) -> Self {
        HeaderValue::Float(v)
    }
}

impl From<bool> for HeaderValue {
    fn from(v: bool) -> Self {
        HeaderValue::Bool(v)
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        HeaderValue::Text(v.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(v: String) -> Self {
        HeaderValue::Text(v)
    }
}

/// A single `KEY = value` card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCard {
    pub key: String,
    pub value: HeaderValue,
}

/// Outcome of dividing the density card among several catalogs.
#[derive(Debug, Clone, PartialEq)]
pub enum DensityScaling {
    /// The card was numeric and has been floor-divided.
    Scaled { from: HeaderValue, to: HeaderValue },
    /// No `DENSITY` card; header left untouched.
    Missing,
    /// The card exists but is not numeric; header left untouched.
    NotNumeric(HeaderValue),
}

/// Ordered, keyword-unique catalog header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HeaderCard>", into = "Vec<HeaderCard>")]
pub struct Header {
    cards: Vec<HeaderCard>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Looks up a keyword, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        let key = normalize_key(key);
        self.cards.iter().find(|c| c.key == key).map(|c| &c.value)
    }

    /// Sets a keyword. Existing cards keep their position.
    pub fn set(&mut self, key: &str, value: impl Into<HeaderValue>) {
        let key = normalize_key(key);
        let value = value.into();
        match self.cards.iter_mut().find(|c| c.key == key) {
            Some(card) => card.value = value,
            None => self.cards.push(HeaderCard { key, value }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderCard> {
        self.cards.iter()
    }

    pub fn density(&self) -> Option<&HeaderValue> {
        self.get(DENSITY_KEY)
    }

    /// Floor-divides the `DENSITY` card by `divisor`.
    ///
    /// Integer densities use Euclidean division and stay integers; float
    /// densities are divided and floored. Any other card type, or a missing
    /// card, leaves the header unchanged and is reported back to the caller.
    pub fn divide_density(&mut self, divisor: u64) -> DensityScaling {
        let Some(current) = self.density().cloned() else {
            return DensityScaling::Missing;
        };
        let scaled = match current {
            HeaderValue::Int(d) => HeaderValue::Int(d.div_euclid(divisor as i64)),
            HeaderValue::Float(d) => HeaderValue::Float((d / divisor as f64).floor()),
            other => return DensityScaling::NotNumeric(other),
        };
        self.set(DENSITY_KEY, scaled.clone());
        DensityScaling::Scaled {
            from: current,
            to: scaled,
        }
    }
}

impl From<Vec<HeaderCard>> for Header {
    fn from(cards: Vec<HeaderCard>) -> Self {
        let mut header = Header::new();
        for card in cards {
            header.set(&card.key, card.value);
        }
        header
    }
}

impl From<Header> for Vec<HeaderCard> {
    fn from(header: Header) -> Self {
        header.cards
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<8} = {}", card.key, card.value)?;
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}
