//! Cosine-similarity ranking of cities against a user vector

use citymatch_core::{CityMatrix, Error, FeatureVector, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of cities the questionnaire shows by default
pub const DEFAULT_TOP_N: usize = 3;

/// Ranking options for a questionnaire query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Maximum number of cities returned, at least 1
    pub top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl RecommendConfig {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Rejects `top_n == 0`
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::invalid_argument("top_n must be at least 1"));
        }
        Ok(())
    }
}

/// A city id with its cosine similarity to the user vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCity {
    /// City id, not necessarily unique in the matrix
    pub city: String,
    /// Index of the matrix row the score was computed from
    #[serde(skip)]
    pub row: usize,
    /// Cosine similarity in `[-1, 1]`
    pub score: f64,
}

/// Top cities, best first, with parallel similarity scores
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    /// City ids, best first
    pub cities: Vec<String>,
    /// Similarity of `cities[i]`
    pub scores: Vec<f64>,
    /// Matrix row behind `cities[i]`; tells duplicate ids apart
    #[serde(skip)]
    pub rows: Vec<usize>,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// `(city, score)` pairs, best first
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.cities
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// `(row, city, score)` triples, best first
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, &str, f64)> {
        self.rows.iter().copied().zip(self.iter()).map(|(row, (city, score))| (row, city, score))
    }
}

impl FromIterator<RankedCity> for Recommendations {
    fn from_iter<I: IntoIterator<Item = RankedCity>>(iter: I) -> Self {
        let mut recs = Self::default();
        for ranked in iter {
            recs.cities.push(ranked.city);
            recs.scores.push(ranked.score);
            recs.rows.push(ranked.row);
        }
        recs
    }
}

// Non-finite scores sort below every real similarity.
fn sort_key(score: f64) -> OrderedFloat<f64> {
    if score.is_finite() {
        OrderedFloat(score)
    } else {
        OrderedFloat(f64::NEG_INFINITY)
    }
}

/// Every city in the matrix, sorted by descending cosine similarity
///
/// Both sides are L2-normalized with the usual epsilon before the dot product.
/// Ties keep matrix row order; rows with a non-finite score come last.
pub fn rank_cities(user: &FeatureVector, matrix: &CityMatrix) -> Vec<RankedCity> {
    let user_unit = user.l2_normalized();

    let mut ranked: Vec<RankedCity> = matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(row, (city, v))| RankedCity {
            city: city.clone(),
            row,
            score: v.l2_normalized().dot(&user_unit),
        })
        .collect();

    ranked.sort_by(|a, b| sort_key(b.score).cmp(&sort_key(a.score)));
    ranked
}

/// The `top_n` cities most similar to `user`
///
/// Returns every city when fewer than `top_n` exist. `top_n == 0` is rejected
/// before any scoring.
pub fn recommend_cities(user: &FeatureVector, matrix: &CityMatrix, top_n: usize) -> Result<Recommendations> {
    RecommendConfig::new(top_n).validate()?;

    let mut ranked = rank_cities(user, matrix);
    ranked.truncate(top_n);

    debug!(candidates = matrix.len(), returned = ranked.len(), "Cities ranked");
    Ok(ranked.into_iter().collect())
}
