//! Constraint filtering of city records against user thresholds

use crate::record::{CityRecord, NumericField, SkippedRecord};
use crate::{Error, Result};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Sentinel label meaning "no language constraint"
pub const ANY_LANGUAGE: &str = "Any";

pub trait Filter {
    /// `Ok(false)` rejects the record; `Err` means the record cannot be judged.
    fn matches(&self, record: &CityRecord) -> Result<bool>;
}

/// Scalar bounds supplied by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceThresholds {
    /// Upper bound on "Average Rent Price", inclusive
    pub max_rent: f64,
    /// Upper bound on "Average Cost of Living", inclusive
    pub max_cost_of_living: f64,
    /// Lower bound on "Average Monthly Salary", inclusive
    pub min_salary: f64,
    /// Carried for the vector mode; the constraint filter ignores it
    #[serde(default)]
    pub max_unemployment: Option<f64>,
    /// Carried for the vector mode; the constraint filter ignores it
    #[serde(default)]
    pub max_gdp: Option<f64>,
}

impl PreferenceThresholds {
    pub fn new(max_rent: f64, max_cost_of_living: f64, min_salary: f64) -> Self {
        Self {
            max_rent,
            max_cost_of_living,
            min_salary,
            max_unemployment: None,
            max_gdp: None,
        }
    }

    /// Rejects NaN, infinite and negative bounds
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("max_rent", Some(self.max_rent)),
            ("max_cost_of_living", Some(self.max_cost_of_living)),
            ("min_salary", Some(self.min_salary)),
            ("max_unemployment", self.max_unemployment),
            ("max_gdp", self.max_gdp),
        ];
        for (name, value) in bounds {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(Error::invalid_argument(format!("{name} must be finite, got {v}")));
                }
                if v < 0.0 {
                    return Err(Error::invalid_argument(format!("{name} must be non-negative, got {v}")));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LanguagePreference {
    #[default]
    Any,
    Required(String),
}

impl LanguagePreference {
    pub fn required(language: impl Into<String>) -> Self {
        LanguagePreference::Required(language.into())
    }

    pub fn accepts(&self, record: &CityRecord) -> bool {
        match self {
            LanguagePreference::Any => true,
            LanguagePreference::Required(lang) => record.speaks(lang),
        }
    }
}

impl FromStr for LanguagePreference {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ANY_LANGUAGE {
            Ok(LanguagePreference::Any)
        } else {
            Ok(LanguagePreference::Required(s.to_string()))
        }
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguagePreference::Any => f.write_str(ANY_LANGUAGE),
            LanguagePreference::Required(lang) => f.write_str(lang),
        }
    }
}

/// Rent, cost-of-living and salary bounds plus the optional language
pub struct PreferenceFilter<'a> {
    thresholds: &'a PreferenceThresholds,
    language: &'a LanguagePreference,
}

impl<'a> PreferenceFilter<'a> {
    pub fn new(thresholds: &'a PreferenceThresholds, language: &'a LanguagePreference) -> Self {
        Self { thresholds, language }
    }
}

impl Filter for PreferenceFilter<'_> {
    fn matches(&self, record: &CityRecord) -> Result<bool> {
        record.require_name()?;
        let rent = record.require(NumericField::Rent)?;
        let cost = record.require(NumericField::CostOfLiving)?;
        let salary = record.require(NumericField::Salary)?;

        let within_bounds = rent <= self.thresholds.max_rent
            && cost <= self.thresholds.max_cost_of_living
            && salary >= self.thresholds.min_salary;

        Ok(within_bounds && self.language.accepts(record))
    }
}

/// Records kept by a filter, in input order, plus the ones that could not be judged
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    pub kept: Vec<&'a CityRecord>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn filter_records<'a, F: Filter + ?Sized>(records: &'a [CityRecord], filter: &F) -> FilterOutcome<'a> {
    let mut outcome = FilterOutcome::default();

    for record in records {
        match filter.matches(record) {
            Ok(true) => outcome.kept.push(record),
            Ok(false) => {}
            Err(e) => {
                warn!(city = %record.city, error = %e, "Skipping record during filtering");
                outcome.skipped.push(SkippedRecord::from_error(&record.city, &e));
            }
        }
    }

    debug!(
        input = records.len(),
        kept = outcome.kept.len(),
        skipped = outcome.skipped.len(),
        "Constraint filter applied"
    );
    outcome
}

/// Distinct trimmed language entries, in first-seen order
pub fn available_languages(records: &[CityRecord]) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut languages = Vec::new();
    for lang in records.iter().flat_map(|r| r.language_list()) {
        if seen.insert(lang) {
            languages.push(lang.to_string());
        }
    }
    languages
}
