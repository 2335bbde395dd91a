//! City records
//!
//! A [`CityRecord`] is one row of the external city table. Numeric columns are
//! optional so that rows with holes or garbage values can still be handed to
//! the engine; each operation decides which columns it requires.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const CITY_HEADER: &str = "City";

/// One row of city attributes. Field names follow the source table headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CityRecord {
    /// Empty when the row has no usable name; such rows are skipped
    #[serde(rename = "City", default, deserialize_with = "lenient_name")]
    pub city: String,

    #[serde(rename = "Country", default)]
    pub country: String,

    /// Comma-separated list, e.g. "German, English"
    #[serde(rename = "Main Spoken Languages", default, deserialize_with = "lenient_text")]
    pub languages: Option<String>,

    #[serde(rename = "Average Rent Price", default, deserialize_with = "lenient_number")]
    pub rent: Option<f64>,

    #[serde(rename = "Average Cost of Living", default, deserialize_with = "lenient_number")]
    pub cost_of_living: Option<f64>,

    #[serde(rename = "Average Monthly Salary", default, deserialize_with = "lenient_number")]
    pub salary: Option<f64>,

    #[serde(rename = "GDP per Capita", default, deserialize_with = "lenient_number")]
    pub gdp_per_capita: Option<f64>,

    #[serde(rename = "Unemployment Rate", default, deserialize_with = "lenient_number")]
    pub unemployment_rate: Option<f64>,

    #[serde(rename = "Population Density", default, deserialize_with = "lenient_number")]
    pub population_density: Option<f64>,

    #[serde(rename = "Green Space Index", default, deserialize_with = "lenient_number")]
    pub green_space_index: Option<f64>,

    #[serde(rename = "Days of Very Strong Heat Stress", default, deserialize_with = "lenient_number")]
    pub heat_stress_days: Option<f64>,

    #[serde(rename = "Youth Dependency Ratio", default, deserialize_with = "lenient_number")]
    pub youth_dependency_ratio: Option<f64>,

    #[serde(rename = "Health Care Index", default, deserialize_with = "lenient_number")]
    pub health_care_index: Option<f64>,

    #[serde(rename = "Life Expectancy (Years)", default, deserialize_with = "lenient_number")]
    pub life_expectancy: Option<f64>,

    #[serde(rename = "Air Quality Index", default, deserialize_with = "lenient_number")]
    pub air_quality_index: Option<f64>,

    #[serde(rename = "CO2 Emissions (per capita)", default, deserialize_with = "lenient_number")]
    pub co2_emissions: Option<f64>,
}

/// Numeric columns of a [`CityRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Rent,
    CostOfLiving,
    Salary,
    GdpPerCapita,
    UnemploymentRate,
    PopulationDensity,
    GreenSpaceIndex,
    HeatStressDays,
    YouthDependencyRatio,
    HealthCareIndex,
    LifeExpectancy,
    AirQualityIndex,
    Co2Emissions,
}

impl NumericField {
    pub const ALL: [NumericField; 13] = [
        NumericField::Rent,
        NumericField::CostOfLiving,
        NumericField::Salary,
        NumericField::GdpPerCapita,
        NumericField::UnemploymentRate,
        NumericField::PopulationDensity,
        NumericField::GreenSpaceIndex,
        NumericField::HeatStressDays,
        NumericField::YouthDependencyRatio,
        NumericField::HealthCareIndex,
        NumericField::LifeExpectancy,
        NumericField::AirQualityIndex,
        NumericField::Co2Emissions,
    ];

    /// Column header in the source table
    pub fn header(self) -> &'static str {
        match self {
            NumericField::Rent => "Average Rent Price",
            NumericField::CostOfLiving => "Average Cost of Living",
            NumericField::Salary => "Average Monthly Salary",
            NumericField::GdpPerCapita => "GDP per Capita",
            NumericField::UnemploymentRate => "Unemployment Rate",
            NumericField::PopulationDensity => "Population Density",
            NumericField::GreenSpaceIndex => "Green Space Index",
            NumericField::HeatStressDays => "Days of Very Strong Heat Stress",
            NumericField::YouthDependencyRatio => "Youth Dependency Ratio",
            NumericField::HealthCareIndex => "Health Care Index",
            NumericField::LifeExpectancy => "Life Expectancy (Years)",
            NumericField::AirQualityIndex => "Air Quality Index",
            NumericField::Co2Emissions => "CO2 Emissions (per capita)",
        }
    }
}

impl CityRecord {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with(mut self, field: NumericField, value: f64) -> Self {
        *self.slot_mut(field) = Some(value);
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = Some(languages.into());
        self
    }

    /// Raw value of a numeric column. Non-finite values count as absent.
    pub fn get(&self, field: NumericField) -> Option<f64> {
        self.slot(field).filter(|v| v.is_finite())
    }

    /// Value of a column that the caller cannot do without
    pub fn require(&self, field: NumericField) -> Result<f64> {
        self.get(field).ok_or_else(|| Error::InvalidRecord {
            city: self.city.clone(),
            field: field.header(),
        })
    }

    /// Value of a column that must also be `>= 0`
    pub fn require_non_negative(&self, field: NumericField) -> Result<f64> {
        let value = self.require(field)?;
        if value < 0.0 {
            return Err(Error::OutOfRange {
                city: self.city.clone(),
                field: field.header(),
                value,
            });
        }
        Ok(value)
    }

    /// Fails for rows whose "City" cell was missing, blank or not text
    pub fn require_name(&self) -> Result<()> {
        if self.city.trim().is_empty() {
            return Err(Error::InvalidRecord {
                city: self.city.clone(),
                field: CITY_HEADER,
            });
        }
        Ok(())
    }

    /// Trimmed entries of the comma-separated language list
    pub fn language_list(&self) -> impl Iterator<Item = &str> {
        self.languages
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Exact, trimmed match against one of the language entries
    pub fn speaks(&self, language: &str) -> bool {
        let wanted = language.trim();
        self.language_list().any(|l| l == wanted)
    }

    fn slot(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Rent => self.rent,
            NumericField::CostOfLiving => self.cost_of_living,
            NumericField::Salary => self.salary,
            NumericField::GdpPerCapita => self.gdp_per_capita,
            NumericField::UnemploymentRate => self.unemployment_rate,
            NumericField::PopulationDensity => self.population_density,
            NumericField::GreenSpaceIndex => self.green_space_index,
            NumericField::HeatStressDays => self.heat_stress_days,
            NumericField::YouthDependencyRatio => self.youth_dependency_ratio,
            NumericField::HealthCareIndex => self.health_care_index,
            NumericField::LifeExpectancy => self.life_expectancy,
            NumericField::AirQualityIndex => self.air_quality_index,
            NumericField::Co2Emissions => self.co2_emissions,
        }
    }

    fn slot_mut(&mut self, field: NumericField) -> &mut Option<f64> {
        match field {
            NumericField::Rent => &mut self.rent,
            NumericField::CostOfLiving => &mut self.cost_of_living,
            NumericField::Salary => &mut self.salary,
            NumericField::GdpPerCapita => &mut self.gdp_per_capita,
            NumericField::UnemploymentRate => &mut self.unemployment_rate,
            NumericField::PopulationDensity => &mut self.population_density,
            NumericField::GreenSpaceIndex => &mut self.green_space_index,
            NumericField::HeatStressDays => &mut self.heat_stress_days,
            NumericField::YouthDependencyRatio => &mut self.youth_dependency_ratio,
            NumericField::HealthCareIndex => &mut self.health_care_index,
            NumericField::LifeExpectancy => &mut self.life_expectancy,
            NumericField::AirQualityIndex => &mut self.air_quality_index,
            NumericField::Co2Emissions => &mut self.co2_emissions,
        }
    }
}

/// A record left out of a result, with the reason
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedRecord {
    pub city: String,
    /// Display text of the error that excluded the record
    pub reason: String,
}

impl SkippedRecord {
    pub fn from_error(city: &str, err: &Error) -> Self {
        Self {
            city: city.to_string(),
            reason: err.to_string(),
        }
    }
}

// Numbers may arrive as JSON numbers or numeric strings; anything else is a hole.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_table_headers() {
        let record: CityRecord = serde_json::from_value(json!({
            "City": "Vienna",
            "Country": "Austria",
            "Main Spoken Languages": "German, English",
            "Average Rent Price": 950,
            "Average Monthly Salary": "2900.5",
            "GDP per Capita": null,
            "Unemployment Rate": "n/a"
        }))
        .unwrap();

        assert_eq!(record.city, "Vienna");
        assert_eq!(record.rent, Some(950.0));
        assert_eq!(record.salary, Some(2900.5));
        assert_eq!(record.gdp_per_capita, None);
        assert_eq!(record.unemployment_rate, None);
        assert_eq!(record.cost_of_living, None);
    }

    #[test]
    fn test_non_string_languages_is_absent() {
        let record: CityRecord = serde_json::from_value(json!({
            "City": "Nowhere",
            "Main Spoken Languages": 42
        }))
        .unwrap();
        assert_eq!(record.languages, None);
        assert!(!record.speaks("English"));
    }

    #[test]
    fn test_require_reports_missing_field() {
        let record = CityRecord::new("Oslo", "Norway").with(NumericField::Rent, 1200.0);
        assert_eq!(record.require(NumericField::Rent).unwrap(), 1200.0);

        let err = record.require(NumericField::Salary).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidRecord {
                city: "Oslo".to_string(),
                field: "Average Monthly Salary"
            }
        );
    }

    #[test]
    fn test_non_finite_counts_as_missing() {
        let record = CityRecord::new("X", "Y").with(NumericField::Rent, f64::NAN);
        assert!(record.get(NumericField::Rent).is_none());
        assert!(record.require(NumericField::Rent).is_err());
    }

    #[test]
    fn test_missing_or_non_text_name_is_blank() {
        let records: Vec<CityRecord> = serde_json::from_value(json!([
            { "Country": "Nowhere", "Average Rent Price": 500 },
            { "City": 17, "Average Rent Price": 600 },
            { "City": "Graz", "Average Rent Price": 700 }
        ]))
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].city, "");
        assert_eq!(records[1].city, "");
        assert!(records[0].require_name().is_err());
        assert!(records[1].require_name().is_err());
        assert!(records[2].require_name().is_ok());
    }

    #[test]
    fn test_require_non_negative() {
        let record = CityRecord::new("Bergen", "Norway")
            .with(NumericField::PopulationDensity, -5.0)
            .with(NumericField::Rent, 0.0);
        assert_eq!(record.require_non_negative(NumericField::Rent).unwrap(), 0.0);

        let err = record.require_non_negative(NumericField::PopulationDensity).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfRange {
                city: "Bergen".to_string(),
                field: "Population Density",
                value: -5.0
            }
        );
    }

    #[test]
    fn test_speaks_exact_trimmed_match() {
        let record = CityRecord::new("Zurich", "Switzerland")
            .with_languages("German,  French , Italian");
        assert!(record.speaks("French"));
        assert!(record.speaks(" Italian "));
        assert!(!record.speaks("Fren"));
        assert!(!record.speaks("english"));
    }

    #[test]
    fn test_with_sets_every_field() {
        let mut record = CityRecord::new("A", "B");
        for (i, field) in NumericField::ALL.iter().enumerate() {
            record = record.with(*field, i as f64);
        }
        for (i, field) in NumericField::ALL.iter().enumerate() {
            assert_eq!(record.get(*field), Some(i as f64));
        }
    }
}
