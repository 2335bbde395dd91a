//! Command-line front end
//!
//! Reads the city table as a JSON array of records and prints query results
//! as JSON.

use anyhow::{Context, Result};
use citymatch_core::{available_languages, CityRecord, LanguagePreference, PreferenceThresholds, ANY_LANGUAGE};
use citymatch_similarity::{
    build_user_vector, find_matching, recommend_cities, CityCache, Home, QuestionnaireAnswers,
    RecommendResponse, Rhythm, Social, Weekend, DEFAULT_TOP_N,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// Recommend cities from hard preferences or a lifestyle questionnaire
#[derive(Parser, Debug)]
#[command(name = "citymatch")]
#[command(about = "Recommend cities from preferences or a lifestyle questionnaire", long_about = None)]
pub struct Args {
    /// Path to the city table (JSON array of records)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter by thresholds and rank by GDP, salary and unemployment percentiles
    Match {
        #[arg(long)]
        max_rent: f64,

        #[arg(long)]
        max_cost: f64,

        #[arg(long, default_value_t = 0.0)]
        min_salary: f64,

        #[arg(long)]
        max_unemployment: Option<f64>,

        #[arg(long)]
        max_gdp: Option<f64>,

        /// Required spoken language, or "Any"
        #[arg(long, default_value = ANY_LANGUAGE)]
        language: LanguagePreference,
    },

    /// Rank cities by similarity to questionnaire answers
    Lifestyle {
        #[arg(long)]
        weekend: Weekend,

        #[arg(long)]
        home: Home,

        #[arg(long)]
        social: Social,

        #[arg(long)]
        rhythm: Rhythm,

        /// 0 = stability, 10 = adventure
        #[arg(long, default_value_t = 5)]
        adventure: u8,

        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Include per-dimension score contributions
        #[arg(long)]
        explain: bool,
    },

    /// List the languages a match query can require
    Languages,
}

pub fn parse_log_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn load_records(path: &Path) -> Result<Vec<CityRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read city table {}", path.display()))?;
    let records: Vec<CityRecord> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse city table {}", path.display()))?;
    Ok(records)
}

/// Run one command against `cache` and render the result as pretty JSON
pub fn execute(command: &Command, cache: &CityCache) -> Result<String> {
    let records = cache.records();

    let output = match command {
        Command::Match {
            max_rent,
            max_cost,
            min_salary,
            max_unemployment,
            max_gdp,
            language,
        } => {
            let thresholds = PreferenceThresholds {
                max_rent: *max_rent,
                max_cost_of_living: *max_cost,
                min_salary: *min_salary,
                max_unemployment: *max_unemployment,
                max_gdp: *max_gdp,
            };
            let outcome = find_matching(&records, language, &thresholds)?;
            info!(matches = outcome.len(), skipped = outcome.skipped.len(), "Match query done");
            serde_json::to_string_pretty(&outcome)?
        }
        Command::Lifestyle {
            weekend,
            home,
            social,
            rhythm,
            adventure,
            top_n,
            explain,
        } => {
            let answers = QuestionnaireAnswers::new(*weekend, *home, *social, *rhythm, *adventure);
            let user = build_user_vector(&answers)?;
            let matrix = cache.matrix();
            let recs = recommend_cities(&user, &matrix, *top_n)?;
            info!(results = recs.len(), "Lifestyle query done");
            if *explain {
                RecommendResponse::build(&recs, &user, &matrix).to_json_pretty()?
            } else {
                serde_json::to_string_pretty(&recs)?
            }
        }
        Command::Languages => {
            let mut languages = vec![ANY_LANGUAGE.to_string()];
            languages.extend(available_languages(&records));
            serde_json::to_string_pretty(&languages)?
        }
    };
    Ok(output)
}
