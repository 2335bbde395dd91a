//! Percentile scoring of filtered city records
//!
//! Each record gets `pct(GDP) + pct(salary) - pct(unemployment)`, where `pct`
//! is the rank-based percentile within the collection with ties averaged.

use citymatch_core::{CityRecord, NumericField, Result, SkippedRecord};
use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::warn;

/// A record paired with its percentile score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCity<'a> {
    pub record: &'a CityRecord,
    /// `pct(GDP) + pct(salary) - pct(unemployment)`
    pub score: f64,
}

/// Fractional rank of every value in `(0, 1]`, ties receiving their average rank
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| OrderedFloat(values[i]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold 1-based ranks start+1 ..= end
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = avg_rank / n as f64;
        }
        start = end;
    }
    ranks
}

struct ScoreInputs {
    gdp: f64,
    salary: f64,
    unemployment: f64,
}

fn score_inputs(record: &CityRecord) -> Result<ScoreInputs> {
    record.require_name()?;
    Ok(ScoreInputs {
        gdp: record.require(NumericField::GdpPerCapita)?,
        salary: record.require(NumericField::Salary)?,
        unemployment: record.require(NumericField::UnemploymentRate)?,
    })
}

/// Score and sort records, best first
///
/// Records missing GDP, salary or unemployment are left out of the ranking
/// and reported in the second element. The sort is stable.
pub fn score_records<'a>(records: &[&'a CityRecord]) -> (Vec<ScoredCity<'a>>, Vec<SkippedRecord>) {
    let mut usable = Vec::with_capacity(records.len());
    let mut inputs = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for &record in records {
        match score_inputs(record) {
            Ok(i) => {
                usable.push(record);
                inputs.push(i);
            }
            Err(e) => {
                warn!(city = %record.city, error = %e, "Skipping record during scoring");
                skipped.push(SkippedRecord::from_error(&record.city, &e));
            }
        }
    }

    let gdp: Vec<f64> = inputs.iter().map(|i| i.gdp).collect();
    let salary: Vec<f64> = inputs.iter().map(|i| i.salary).collect();
    let unemployment: Vec<f64> = inputs.iter().map(|i| i.unemployment).collect();

    let gdp_pct = percentile_ranks(&gdp);
    let salary_pct = percentile_ranks(&salary);
    let unemployment_pct = percentile_ranks(&unemployment);

    let mut scored: Vec<ScoredCity<'a>> = usable
        .into_iter()
        .enumerate()
        .map(|(i, record)| ScoredCity {
            record,
            score: gdp_pct[i] + salary_pct[i] - unemployment_pct[i],
        })
        .collect();

    scored.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));

    (scored, skipped)
}
