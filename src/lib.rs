//! # CityMatch
//!
//! A city recommendation engine.
//!
//! CityMatch turns raw city statistics and user answers into comparable
//! numeric vectors and ranks cities by fit, in one of two modes:
//!
//! - **Preference matching**: keep cities within rent, cost-of-living and
//!   salary bounds (optionally speaking a given language), then order them by
//!   percentile ranks of GDP, salary and unemployment
//! - **Lifestyle matching**: map five questionnaire answers to an 11-dimension
//!   feature vector and rank min-max scaled city vectors by cosine similarity
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! citymatch --data cities.json match --max-rent 1000 --max-cost 1500 --min-salary 2000
//! citymatch --data cities.json lifestyle --weekend nature --home spacious_quiet \
//!     --social community --rhythm early_mornings --adventure 3 --explain
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use citymatch::prelude::*;
//!
//! let records = vec![
//!     CityRecord::new("Porto", "Portugal")
//!         .with(NumericField::Rent, 700.0)
//!         .with(NumericField::CostOfLiving, 650.0)
//!         .with(NumericField::Salary, 1400.0)
//!         .with(NumericField::GdpPerCapita, 24000.0)
//!         .with(NumericField::UnemploymentRate, 6.5)
//!         .with_languages("Portuguese"),
//! ];
//!
//! let thresholds = PreferenceThresholds::new(900.0, 1000.0, 1200.0);
//! let outcome = find_matching(&records, &LanguagePreference::Any, &thresholds).unwrap();
//! assert_eq!(outcome.best().unwrap().city, "Porto");
//! ```
//!
//! ## Crate Structure
//!
//! - `citymatch-core` - City records, feature vectors, the city matrix and constraint filtering
//! - `citymatch-similarity` - Percentile scoring, vectorizing, normalization, ranking and the city cache

pub mod cli;

// Re-export core types
pub use citymatch_core::{
    available_languages, CityMatrix, CityRecord, Dimension, Error, FeatureVector,
    LanguagePreference, NumericField, PreferenceThresholds, Result, SkippedRecord,
};

// Re-export the engine
pub use citymatch_similarity::{
    build_city_matrix, build_user_vector, find_matching, recommend_cities, CityCache,
    ExplainedCity, Home, MatchOutcome, QuestionnaireAnswers, RecommendConfig, RecommendResponse,
    Recommendations, Rhythm, Social, Weekend,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        available_languages, build_city_matrix, build_user_vector, find_matching,
        recommend_cities, CityCache, CityMatrix, CityRecord, Dimension, Error, FeatureVector,
        Home, LanguagePreference, MatchOutcome, NumericField, PreferenceThresholds,
        QuestionnaireAnswers, RecommendConfig, Recommendations, Result, Rhythm, Social, Weekend,
    };
}
