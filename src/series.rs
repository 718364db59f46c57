//! Emotion score vectors, category labels and chart input files.

use clap::ValueEnum;
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::sanitize_value;

/// The six basic emotion categories, in axis order.
pub const SIX_EMOTIONS: [&str; 6] = ["happy", "sadness", "anger", "surprise", "fear", "disgust"];

/// The six basic emotions plus `neutral`.
pub const SEVEN_EMOTIONS: [&str; 7] = [
    "happy", "sadness", "anger", "surprise", "fear", "disgust", "neutral",
];

/// Ordered per-category scores.
///
/// Deserializes leniently: numbers and numeric strings are kept, anything
/// else becomes `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmotionVector(pub Vec<f64>);

impl EmotionVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for EmotionVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for EmotionVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

struct LenientScore(f64);

struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = LenientScore;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an emotion score")
    }

    fn visit_f64<E>(self, v: f64) -> Result<LenientScore, E> {
        Ok(LenientScore(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<LenientScore, E> {
        Ok(LenientScore(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<LenientScore, E> {
        Ok(LenientScore(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<LenientScore, E> {
        Ok(LenientScore(v.trim().parse().unwrap_or(0.0)))
    }

    fn visit_bool<E>(self, _: bool) -> Result<LenientScore, E> {
        Ok(LenientScore(0.0))
    }

    fn visit_unit<E>(self) -> Result<LenientScore, E> {
        Ok(LenientScore(0.0))
    }

    fn visit_none<E>(self) -> Result<LenientScore, E> {
        Ok(LenientScore(0.0))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LenientScore, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LenientScore(0.0))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LenientScore, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LenientScore(0.0))
    }
}

impl<'de> Deserialize<'de> for LenientScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScoreVisitor)
    }
}

impl<'de> Deserialize<'de> for EmotionVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let scores = Vec::<LenientScore>::deserialize(deserializer)?;
        Ok(Self(scores.into_iter().map(|s| s.0).collect()))
    }
}

/// A named score vector, e.g. one diary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub name: String,
    pub values: EmotionVector,
}

impl Series {
    pub fn new(name: impl Into<String>, values: impl Into<EmotionVector>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        self.values.as_ref()
    }
}

/// How several day vectors collapse into one month vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Sum,
    Mean,
}

impl Aggregate {
    /// Combine vectors element-wise, up to the longest one.
    ///
    /// Positions a vector does not reach contribute nothing; for `Mean` they
    /// are not counted either. Values are sanitized before combining.
    pub fn apply<V: AsRef<[f64]>>(&self, vectors: &[V]) -> Vec<f64> {
        let width = vectors.iter().map(|v| v.as_ref().len()).max().unwrap_or(0);
        let mut sums = vec![0.0; width];
        let mut counts = vec![0usize; width];

        for vector in vectors {
            for (i, &v) in vector.as_ref().iter().enumerate() {
                sums[i] += sanitize_value(v);
                counts[i] += 1;
            }
        }

        match self {
            Aggregate::Sum => sums,
            Aggregate::Mean => sums
                .into_iter()
                .zip(counts)
                .map(|(sum, count)| sum / count.max(1) as f64)
                .collect(),
        }
    }
}

/// Chart data as read from a TOML input file.
///
/// ```toml
/// labels = ["happy", "sadness", "anger", "surprise", "fear", "disgust"]
/// aggregate = "mean"
///
/// [[series]]
/// name = "2024-05-01"
/// values = [0.8, 0.1, 0, 0, 0, 0.2]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
    #[serde(default)]
    pub series: Vec<Series>,
}

impl ChartInput {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::InputParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Labels from the file, or the six basic emotions.
    pub fn labels(&self) -> Vec<String> {
        self.labels
            .clone()
            .unwrap_or_else(|| SIX_EMOTIONS.iter().map(|s| s.to_string()).collect())
    }

    /// Series to plot, collapsed into one when an aggregate is set.
    pub fn resolved_series(&self, aggregate: Option<Aggregate>) -> Vec<Series> {
        match aggregate.or(self.aggregate) {
            Some(mode) if !self.series.is_empty() => {
                vec![Series::new("aggregate", mode.apply(&self.series))]
            }
            _ => self.series.clone(),
        }
    }
}

/// Parse a comma separated list of scores, coercing bad entries to zero.
pub fn parse_values(s: &str) -> EmotionVector {
    if s.trim().is_empty() {
        return EmotionVector::default();
    }
    EmotionVector(
        s.split(',')
            .map(|part| part.trim().parse().unwrap_or(0.0))
            .collect(),
    )
}

/// Parse a comma separated list of labels.
pub fn parse_labels(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
