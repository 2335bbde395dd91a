//! Preference matching: constraint filter followed by percentile scoring

use crate::percentile::score_records;
use citymatch_core::{
    filter_records, CityRecord, LanguagePreference, PreferenceFilter, PreferenceThresholds,
    Result, SkippedRecord,
};
use serde::Serialize;
use tracing::debug;

/// Matching cities, best first, plus records that could not be evaluated
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchOutcome<'a> {
    /// Matching cities, best first
    pub cities: Vec<&'a CityRecord>,
    /// Records that could not be filtered or scored
    pub skipped: Vec<SkippedRecord>,
}

impl MatchOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Top-ranked city, if any matched
    pub fn best(&self) -> Option<&CityRecord> {
        self.cities.first().copied()
    }
}

/// Filter `records` by the thresholds and language, then rank survivors by
/// `pct(GDP) + pct(salary) - pct(unemployment)`
///
/// No match is an empty outcome. Invalid thresholds fail before any record is
/// looked at.
pub fn find_matching<'a>(
    records: &'a [CityRecord],
    language: &LanguagePreference,
    thresholds: &PreferenceThresholds,
) -> Result<MatchOutcome<'a>> {
    thresholds.validate()?;

    let filtered = filter_records(records, &PreferenceFilter::new(thresholds, language));
    let mut skipped = filtered.skipped;

    if filtered.kept.is_empty() {
        debug!(language = %language, "No city satisfies the constraints");
        return Ok(MatchOutcome { cities: Vec::new(), skipped });
    }

    let (scored, score_skips) = score_records(&filtered.kept);
    skipped.extend(score_skips);

    Ok(MatchOutcome {
        cities: scored.into_iter().map(|s| s.record).collect(),
        skipped,
    })
}
