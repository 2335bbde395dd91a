//! Explainability for recommendations
//!
//! Breaks each cosine score into per-dimension contributions
//! `user_unit[d] * city_unit[d]`; the contributions of a city sum to its score.

use crate::rank::Recommendations;
use citymatch_core::{CityMatrix, Dimension, FeatureVector};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;

/// A recommended city with its per-dimension score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedCity {
    /// City id
    pub city: String,
    /// Cosine similarity to the user vector
    pub score: f64,
    /// Contribution of each dimension; the values sum to `score`
    pub explain: BTreeMap<Dimension, f64>,
}

/// Per-dimension terms of the cosine similarity between `user` and `city`
pub fn contributions(user: &FeatureVector, city: &FeatureVector) -> BTreeMap<Dimension, f64> {
    let user_unit = user.l2_normalized();
    let city_unit = city.l2_normalized();
    Dimension::ALL
        .iter()
        .map(|&d| (d, user_unit[d] * city_unit[d]))
        .collect()
}

impl ExplainedCity {
    /// Breakdown of `score` for a city whose scaled vector is `vector`
    pub fn new(city: impl Into<String>, score: f64, user: &FeatureVector, vector: &FeatureVector) -> Self {
        Self {
            city: city.into(),
            score,
            explain: contributions(user, vector),
        }
    }

    /// Explain matrix row `row`; `None` when the row does not exist
    pub fn from_row(row: usize, score: f64, user: &FeatureVector, matrix: &CityMatrix) -> Option<Self> {
        let (city, vector) = matrix.rows().get(row)?;
        Some(Self::new(city.as_str(), score, user, vector))
    }

    /// Dimension with the largest contribution
    pub fn top_dimension(&self) -> Option<Dimension> {
        self.explain
            .iter()
            .max_by_key(|(_, c)| OrderedFloat(**c))
            .map(|(&d, _)| d)
    }

    /// Explain every recommendation from the row it was scored on
    pub fn from_recommendations(
        recs: &Recommendations,
        user: &FeatureVector,
        matrix: &CityMatrix,
    ) -> Vec<Self> {
        recs.iter_rows()
            .filter_map(|(row, _, score)| Self::from_row(row, score, user, matrix))
            .collect()
    }
}

/// Summary statistics for one recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct RecommendStats {
    /// Number of cities considered
    pub candidates_count: usize,
    /// Number of cities returned
    pub results_count: usize,
    /// Mean similarity of the returned cities
    pub avg_score: f64,
    /// Similarity of the first result
    pub best_score: f64,
    /// Dimension that contributed most to the best result
    pub top_contributing_dimension: Option<Dimension>,
}

impl RecommendStats {
    /// `results` must be sorted best first
    pub fn compute(results: &[ExplainedCity], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_dimension: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.score,
            top_contributing_dimension: best.top_dimension(),
        }
    }
}

/// Serializable answer to a questionnaire query
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    /// Explained cities, best first
    pub result: Vec<ExplainedCity>,
    /// Query statistics
    pub stats: RecommendStats,
}

impl RecommendResponse {
    /// Explain `recs` and summarize them against the whole matrix
    pub fn build(recs: &Recommendations, user: &FeatureVector, matrix: &CityMatrix) -> Self {
        let result = ExplainedCity::from_recommendations(recs, user, matrix);
        let stats = RecommendStats::compute(&result, matrix.len());
        Self { result, stats }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
