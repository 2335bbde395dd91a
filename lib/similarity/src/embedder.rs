//! Feature vectorizing
//!
//! Turns city records and questionnaire answers into [`FeatureVector`]s over
//! the same eleven dimensions.

use crate::normalize::min_max_normalize_matrix;
use crate::questionnaire::QuestionnaireAnswers;
use citymatch_core::{
    CityMatrix, CityRecord, Dimension, Error, FeatureVector, NumericField, Result, SkippedRecord,
};
use rayon::prelude::*;
use tracing::{debug, warn};

/// GDP per capita above which a city gets the extra international bonus
pub const INTERNATIONAL_GDP_THRESHOLD: f64 = 40000.0;

/// Raw (unscaled) feature vector of one city
///
/// Fails with `InvalidRecord` when any numeric column the features need is
/// missing, `OutOfRange` for a negative population density and
/// `NonFiniteFeature` if a feature overflows. A missing language list only
/// means "no English".
pub fn city_vector(record: &CityRecord) -> Result<FeatureVector> {
    record.require_name()?;
    let rent = record.require(NumericField::Rent)?;
    let cost_of_living = record.require(NumericField::CostOfLiving)?;
    let heat_days = record.require(NumericField::HeatStressDays)?;
    let green_space = record.require(NumericField::GreenSpaceIndex)?;
    let density = record.require_non_negative(NumericField::PopulationDensity)?;
    let youth_ratio = record.require(NumericField::YouthDependencyRatio)?;
    let gdp = record.require(NumericField::GdpPerCapita)?;
    let unemployment = record.require(NumericField::UnemploymentRate)?;
    let health_index = record.require(NumericField::HealthCareIndex)?;
    let life_expectancy = record.require(NumericField::LifeExpectancy)?;
    let air_quality = record.require(NumericField::AirQualityIndex)?;
    let co2 = record.require(NumericField::Co2Emissions)?;

    let mut international = if record.languages.as_deref().unwrap_or("").contains("English") {
        1.0
    } else {
        0.0
    };
    if gdp > INTERNATIONAL_GDP_THRESHOLD {
        international += 0.5;
    }

    let mut v = FeatureVector::zeros();
    v[Dimension::Cost] = -(rent + cost_of_living) / 2.0;
    v[Dimension::Climate] = -heat_days;
    v[Dimension::Green] = green_space;
    v[Dimension::Nightlife] = density.ln_1p() + youth_ratio * 0.5;
    v[Dimension::JobMarket] = gdp - unemployment * 500.0;
    v[Dimension::Safety] = gdp - unemployment * 200.0;
    v[Dimension::International] = international;
    v[Dimension::Walkability] = density.sqrt();
    v[Dimension::Culture] = density.ln_1p() + gdp / 10000.0;
    v[Dimension::Health] = health_index + life_expectancy * 0.5;
    v[Dimension::AirQuality] = air_quality - co2 * 2.0;

    if let Some(dimension) = Dimension::ALL.into_iter().find(|&d| !v[d].is_finite()) {
        return Err(Error::NonFiniteFeature {
            city: record.city.clone(),
            dimension,
        });
    }
    Ok(v)
}

/// Raw questionnaire vector, before normalization
pub fn raw_user_vector(answers: &QuestionnaireAnswers) -> Result<FeatureVector> {
    answers.validate()?;

    let mut v = FeatureVector::zeros();
    for &(dim, delta) in answers.option_deltas() {
        v.add(dim, delta);
    }
    for (dim, delta) in answers.adventure_deltas() {
        v.add(dim, delta);
    }
    Ok(v)
}

/// L2-normalized questionnaire vector
pub fn build_user_vector(answers: &QuestionnaireAnswers) -> Result<FeatureVector> {
    let raw = raw_user_vector(answers)?;
    Ok(raw.l2_normalized())
}

/// Vectorize every record and min-max scale the result across the whole set
///
/// Records that cannot be vectorized are left out and listed in
/// [`CityMatrix::skipped`]. Row order follows `records`.
pub fn build_city_matrix(records: &[CityRecord]) -> CityMatrix {
    let vectors: Vec<Result<FeatureVector>> = records.par_iter().map(city_vector).collect();

    let mut matrix = CityMatrix::new();
    for (record, vector) in records.iter().zip(vectors) {
        match vector {
            Ok(v) => matrix.push(record.city.clone(), v),
            Err(e) => {
                warn!(city = %record.city, error = %e, "Skipping record during vectorizing");
                matrix.record_skip(SkippedRecord::from_error(&record.city, &e));
            }
        }
    }

    min_max_normalize_matrix(&mut matrix);

    debug!(
        input = records.len(),
        rows = matrix.len(),
        skipped = matrix.skipped().len(),
        "City matrix built"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{Home, Rhythm, Social, Weekend};
    use crate::rank::recommend_cities;

    fn full_record(name: &str) -> CityRecord {
        CityRecord::new(name, "Testland")
            .with_languages("German, English")
            .with(NumericField::Rent, 1000.0)
            .with(NumericField::CostOfLiving, 800.0)
            .with(NumericField::Salary, 3000.0)
            .with(NumericField::GdpPerCapita, 45000.0)
            .with(NumericField::UnemploymentRate, 4.0)
            .with(NumericField::PopulationDensity, 99.0)
            .with(NumericField::GreenSpaceIndex, 0.6)
            .with(NumericField::HeatStressDays, 12.0)
            .with(NumericField::YouthDependencyRatio, 20.0)
            .with(NumericField::HealthCareIndex, 70.0)
            .with(NumericField::LifeExpectancy, 82.0)
            .with(NumericField::AirQualityIndex, 40.0)
            .with(NumericField::Co2Emissions, 6.5)
    }

    #[test]
    fn test_city_vector_formulas() {
        let v = city_vector(&full_record("Munich")).unwrap();
        let ln100 = 100f64.ln();

        assert_eq!(v[Dimension::Cost], -900.0);
        assert_eq!(v[Dimension::Climate], -12.0);
        assert_eq!(v[Dimension::Green], 0.6);
        assert!((v[Dimension::Nightlife] - (ln100 + 10.0)).abs() < 1e-12);
        assert_eq!(v[Dimension::JobMarket], 43000.0);
        assert_eq!(v[Dimension::Safety], 44200.0);
        assert_eq!(v[Dimension::International], 1.5);
        assert!((v[Dimension::Walkability] - 99f64.sqrt()).abs() < 1e-12);
        assert!((v[Dimension::Culture] - (ln100 + 4.5)).abs() < 1e-12);
        assert_eq!(v[Dimension::Health], 111.0);
        assert_eq!(v[Dimension::AirQuality], 27.0);
    }

    #[test]
    fn test_international_without_english() {
        let mut record = full_record("Lyon").with_languages("French");
        record.gdp_per_capita = Some(35000.0);
        assert_eq!(city_vector(&record).unwrap()[Dimension::International], 0.0);

        record.languages = None;
        record.gdp_per_capita = Some(50000.0);
        assert_eq!(city_vector(&record).unwrap()[Dimension::International], 0.5);
    }

    #[test]
    fn test_city_vector_missing_field() {
        let mut record = full_record("Broken");
        record.co2_emissions = None;
        let err = city_vector(&record).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { field: "CO2 Emissions (per capita)", .. }));
    }

    #[test]
    fn test_user_vector_nature_lover() {
        let answers = QuestionnaireAnswers::new(
            Weekend::Nature,
            Home::SpaciousQuiet,
            Social::Community,
            Rhythm::EarlyMornings,
            0,
        );
        let raw = raw_user_vector(&answers).unwrap();

        let expected = [
            (Dimension::Cost, 0.0),
            (Dimension::Climate, 0.4),
            (Dimension::Green, 1.2),
            (Dimension::Nightlife, -0.8),
            (Dimension::JobMarket, 0.0),
            (Dimension::Safety, 1.3),
            (Dimension::International, -0.4),
            (Dimension::Walkability, 0.0),
            (Dimension::Culture, 0.3),
            (Dimension::Health, 0.5),
            (Dimension::AirQuality, 1.1),
        ];
        for (dim, value) in expected {
            assert!((raw[dim] - value).abs() < 1e-9, "{dim}: {} != {value}", raw[dim]);
        }

        let user = build_user_vector(&answers).unwrap();
        let norm = raw.norm();
        for dim in Dimension::ALL {
            assert!((user[dim] - raw[dim] / (norm + 1e-6)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_user_vector_is_unit_length() {
        for adventure in 0..=10 {
            let answers = QuestionnaireAnswers::new(
                Weekend::Nightlife,
                Home::Flexible,
                Social::Expat,
                Rhythm::Balanced,
                adventure,
            );
            let user = build_user_vector(&answers).unwrap();
            assert!((user.norm() - 1.0).abs() < 1e-5, "adventure {adventure}");
        }
    }

    #[test]
    fn test_user_vector_rejects_out_of_range_adventure() {
        let answers = QuestionnaireAnswers::new(
            Weekend::Nature,
            Home::Flexible,
            Social::Expat,
            Rhythm::Balanced,
            42,
        );
        assert!(matches!(build_user_vector(&answers), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_build_city_matrix_normalizes_and_skips() {
        let mut cheap = full_record("Cheap");
        cheap.rent = Some(500.0);
        let expensive = full_record("Expensive");
        let mut broken = full_record("Broken");
        broken.life_expectancy = None;

        let matrix = build_city_matrix(&[cheap, broken, expensive]);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.ids().collect::<Vec<_>>(), vec!["Cheap", "Expensive"]);
        assert_eq!(matrix.skipped().len(), 1);
        assert_eq!(matrix.skipped()[0].city, "Broken");

        // lower cost -> higher cost score
        assert_eq!(matrix.get("Cheap").unwrap()[Dimension::Cost], 1.0);
        assert_eq!(matrix.get("Expensive").unwrap()[Dimension::Cost], 0.0);
        // identical columns collapse to zero
        assert_eq!(matrix.get("Cheap").unwrap()[Dimension::Health], 0.0);
    }

    #[test]
    fn test_build_city_matrix_empty() {
        let matrix = build_city_matrix(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.skipped().is_empty());
    }

    #[test]
    fn test_negative_density_is_skipped() {
        let record = full_record("Broken").with(NumericField::PopulationDensity, -5.0);
        let err = city_vector(&record).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { field: "Population Density", .. }));

        let records = [
            full_record("Good").with(NumericField::PopulationDensity, 3000.0),
            full_record("Other").with(NumericField::PopulationDensity, 1000.0),
            full_record("Broken").with(NumericField::PopulationDensity, -5.0),
        ];
        let matrix = build_city_matrix(&records);
        assert_eq!(matrix.ids().collect::<Vec<_>>(), vec!["Good", "Other"]);
        assert_eq!(matrix.skipped()[0].city, "Broken");
        assert!(matrix.skipped()[0].reason.contains("out of range"));

        let answers = QuestionnaireAnswers::new(
            Weekend::Nature,
            Home::SpaciousQuiet,
            Social::Community,
            Rhythm::EarlyMornings,
            0,
        );
        let user = build_user_vector(&answers).unwrap();
        let recs = recommend_cities(&user, &matrix, 3).unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_overflowing_feature_is_skipped() {
        let record = full_record("Huge").with(NumericField::Rent, f64::MAX).with(NumericField::CostOfLiving, f64::MAX);
        let err = city_vector(&record).unwrap_err();
        assert_eq!(
            err,
            Error::NonFiniteFeature {
                city: "Huge".to_string(),
                dimension: Dimension::Cost
            }
        );
    }

    #[test]
    fn test_nameless_record_is_skipped() {
        let records = [full_record(""), full_record("Named")];
        let matrix = build_city_matrix(&records);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.skipped().len(), 1);
    }
}
