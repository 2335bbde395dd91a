//! # CityMatch Similarity
//!
//! Scoring and similarity engine for city recommendations.
//!
//! Two query modes share the city table:
//!
//! - **Preference matching**: hard constraints on rent, cost of living, salary
//!   and language, then a percentile score over GDP, salary and unemployment
//! - **Lifestyle matching**: questionnaire answers become a feature vector that
//!   is ranked against min-max scaled city vectors by cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use citymatch_core::{CityRecord, NumericField};
//! use citymatch_similarity::{
//!     build_city_matrix, build_user_vector, recommend_cities,
//!     QuestionnaireAnswers, Weekend, Home, Social, Rhythm,
//! };
//!
//! let city = |name: &str, green: f64| {
//!     CityRecord::new(name, "Somewhere")
//!         .with_languages("English")
//!         .with(NumericField::Rent, 900.0)
//!         .with(NumericField::CostOfLiving, 700.0)
//!         .with(NumericField::Salary, 2500.0)
//!         .with(NumericField::GdpPerCapita, 35000.0)
//!         .with(NumericField::UnemploymentRate, 6.0)
//!         .with(NumericField::PopulationDensity, 3000.0)
//!         .with(NumericField::GreenSpaceIndex, green)
//!         .with(NumericField::HeatStressDays, 5.0)
//!         .with(NumericField::YouthDependencyRatio, 21.0)
//!         .with(NumericField::HealthCareIndex, 70.0)
//!         .with(NumericField::LifeExpectancy, 81.0)
//!         .with(NumericField::AirQualityIndex, 30.0)
//!         .with(NumericField::Co2Emissions, 6.0)
//! };
//!
//! let matrix = build_city_matrix(&[city("Grey", 0.1), city("Leafy", 0.9)]);
//! let answers = QuestionnaireAnswers::new(
//!     Weekend::Nature, Home::SpaciousQuiet, Social::Community, Rhythm::EarlyMornings, 2,
//! );
//! let user = build_user_vector(&answers).unwrap();
//! let recs = recommend_cities(&user, &matrix, 1).unwrap();
//! assert_eq!(recs.cities, vec!["Leafy"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Records    │────>│  Embedder   │────>│  Min-max    │
//! │ (city rows) │     │ (row→v)     │     │  (matrix)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │   ┌─────────────┐   ┌─────────────┐    │
//!       │   │Questionnaire│──>│   Ranker    │<───┘
//!       │   │ (answers→v) │   │  (cosine)   │
//!       │   └─────────────┘   └─────────────┘
//!       │                            │
//!       │   ┌─────────────┐   ┌─────────────┐
//!       └──>│  Matching   │   │  Explain    │
//!           │(filter+pct) │   │ (results)   │
//!           └─────────────┘   └─────────────┘
//! ```

pub mod percentile;
pub mod matching;
pub mod questionnaire;
pub mod embedder;
pub mod normalize;
pub mod rank;
pub mod explain;
pub mod cache;

// Re-export main types for convenience
pub use percentile::{percentile_ranks, score_records, ScoredCity};
pub use matching::{find_matching, MatchOutcome};
pub use questionnaire::{
    AnswerOption, Delta, Home, OptionEntry, QuestionnaireAnswers, Rhythm, Social, Weekend,
    MAX_ADVENTURE,
};
pub use embedder::{build_city_matrix, build_user_vector, city_vector, raw_user_vector};
pub use normalize::{l2_normalize, min_max_normalize, min_max_normalize_matrix, MinMaxScaler};
pub use rank::{rank_cities, recommend_cities, RankedCity, RecommendConfig, Recommendations, DEFAULT_TOP_N};
pub use explain::{contributions, ExplainedCity, RecommendResponse, RecommendStats};
pub use cache::CityCache;
