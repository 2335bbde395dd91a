//! # CityMatch Core
//!
//! Core types for the CityMatch recommendation engine.
//!
//! This crate provides the data model and the constraint filter:
//!
//! - [`CityRecord`] - One row of city attributes with optional numeric columns
//! - [`Dimension`] / [`FeatureVector`] - Fixed 11-axis feature vectors
//! - [`CityMatrix`] - Ordered city id to feature vector rows
//! - [`PreferenceFilter`] - Rent, cost, salary and language constraints
//!
//! ## Example
//!
//! ```rust
//! use citymatch_core::{
//!     CityRecord, NumericField, PreferenceThresholds, LanguagePreference,
//!     PreferenceFilter, filter_records,
//! };
//!
//! let records = vec![
//!     CityRecord::new("Valencia", "Spain")
//!         .with(NumericField::Rent, 800.0)
//!         .with(NumericField::CostOfLiving, 900.0)
//!         .with(NumericField::Salary, 1900.0)
//!         .with_languages("Spanish, Valencian"),
//! ];
//!
//! let thresholds = PreferenceThresholds::new(1000.0, 1200.0, 1500.0);
//! let language = LanguagePreference::required("Spanish");
//! let outcome = filter_records(&records, &PreferenceFilter::new(&thresholds, &language));
//! assert_eq!(outcome.kept.len(), 1);
//! ```

pub mod error;
pub mod record;
pub mod vector;
pub mod matrix;
pub mod filter;

pub use error::{Error, Result};
pub use record::{CityRecord, NumericField, SkippedRecord};
pub use vector::{Dimension, FeatureVector, NORM_EPSILON};
pub use matrix::CityMatrix;
pub use filter::{
    available_languages, filter_records, Filter, FilterOutcome, LanguagePreference,
    PreferenceFilter, PreferenceThresholds, ANY_LANGUAGE,
};
