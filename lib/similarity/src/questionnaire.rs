//! Lifestyle questionnaire
//!
//! Every answer option maps to a sparse list of `(dimension, delta)` pairs in a
//! static table. The user vector is the sum of the chosen options' deltas plus
//! the adventurousness contribution.

use citymatch_core::{Dimension, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Delta = (Dimension, f64);

/// Highest value of the stability vs adventure slider
pub const MAX_ADVENTURE: u8 = 10;

/// One row of an option table
#[derive(Debug, Clone, Copy)]
pub struct OptionEntry<T: 'static> {
    pub option: T,
    /// Label as shown in the questionnaire
    pub label: &'static str,
    /// Short machine key
    pub key: &'static str,
    pub deltas: &'static [Delta],
}

pub trait AnswerOption: Copy + PartialEq + 'static {
    const QUESTION: &'static str;
    const TABLE: &'static [OptionEntry<Self>];

    fn entry(self) -> Option<&'static OptionEntry<Self>> {
        Self::TABLE.iter().find(|e| e.option == self)
    }

    fn deltas(self) -> &'static [Delta] {
        self.entry().map(|e| e.deltas).unwrap_or(&[])
    }

    fn label(self) -> &'static str {
        self.entry().map(|e| e.label).unwrap_or("")
    }

    /// Accepts either the display label or the short key, case-insensitively
    fn parse_option(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::TABLE
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(s) || e.key.eq_ignore_ascii_case(s))
            .map(|e| e.option)
            .ok_or_else(|| Error::UnknownOption {
                question: Self::QUESTION,
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekend {
    Nature,
    CafesMuseums,
    Nightlife,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Home {
    SmallCentral,
    SpaciousQuiet,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Social {
    Professional,
    Community,
    Expat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rhythm {
    EarlyMornings,
    Balanced,
    LateNights,
}

impl AnswerOption for Weekend {
    const QUESTION: &'static str = "weekend";
    const TABLE: &'static [OptionEntry<Self>] = &[
        OptionEntry {
            option: Weekend::Nature,
            label: "Hiking or being in nature",
            key: "nature",
            deltas: &[
                (Dimension::Climate, 0.4),
                (Dimension::Green, 0.8),
                (Dimension::AirQuality, 0.6),
                (Dimension::Nightlife, -0.2),
            ],
        },
        OptionEntry {
            option: Weekend::CafesMuseums,
            label: "Cafés, museums, slow walks",
            key: "cafes_museums",
            deltas: &[(Dimension::Walkability, 0.5), (Dimension::Culture, 0.7)],
        },
        OptionEntry {
            option: Weekend::Nightlife,
            label: "Bars, clubs, and nightlife",
            key: "nightlife",
            deltas: &[
                (Dimension::Nightlife, 0.7),
                (Dimension::International, 0.3),
                (Dimension::Cost, 0.2),
            ],
        },
    ];
}

impl AnswerOption for Home {
    const QUESTION: &'static str = "home";
    const TABLE: &'static [OptionEntry<Self>] = &[
        OptionEntry {
            option: Home::SmallCentral,
            label: "Small but central",
            key: "small_central",
            deltas: &[(Dimension::Walkability, 0.6), (Dimension::Cost, -0.3)],
        },
        OptionEntry {
            option: Home::SpaciousQuiet,
            label: "Spacious and quiet",
            key: "spacious_quiet",
            deltas: &[
                (Dimension::Safety, 0.4),
                (Dimension::Green, 0.4),
                (Dimension::Nightlife, -0.2),
                (Dimension::AirQuality, 0.5),
            ],
        },
        OptionEntry {
            option: Home::Flexible,
            label: "Flexible, I adapt easily",
            key: "flexible",
            deltas: &[],
        },
    ];
}

impl AnswerOption for Social {
    const QUESTION: &'static str = "social";
    const TABLE: &'static [OptionEntry<Self>] = &[
        OptionEntry {
            option: Social::Professional,
            label: "Work and professional networks",
            key: "professional",
            deltas: &[(Dimension::JobMarket, 0.7)],
        },
        OptionEntry {
            option: Social::Community,
            label: "Community events and hobbies",
            key: "community",
            deltas: &[(Dimension::Culture, 0.3), (Dimension::Safety, 0.3)],
        },
        OptionEntry {
            option: Social::Expat,
            label: "Expat or international circles",
            key: "expat",
            deltas: &[(Dimension::International, 0.8)],
        },
    ];
}

impl AnswerOption for Rhythm {
    const QUESTION: &'static str = "rhythm";
    const TABLE: &'static [OptionEntry<Self>] = &[
        OptionEntry {
            option: Rhythm::EarlyMornings,
            label: "Early mornings",
            key: "early_mornings",
            deltas: &[(Dimension::Safety, 0.3), (Dimension::Nightlife, -0.4)],
        },
        OptionEntry {
            option: Rhythm::Balanced,
            label: "Balanced schedule",
            key: "balanced",
            deltas: &[],
        },
        OptionEntry {
            option: Rhythm::LateNights,
            label: "Late nights",
            key: "late_nights",
            deltas: &[(Dimension::Nightlife, 0.6)],
        },
    ];
}

macro_rules! impl_option_traits {
    ($($ty:ty),*) => {
        $(
            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as AnswerOption>::parse_option(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_option_traits!(Weekend, Home, Social, Rhythm);

/// The five questionnaire answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    pub weekend: Weekend,
    pub home: Home,
    pub social: Social,
    pub rhythm: Rhythm,
    /// 0 = stability, 10 = adventure
    pub adventure: u8,
}

impl QuestionnaireAnswers {
    pub fn new(weekend: Weekend, home: Home, social: Social, rhythm: Rhythm, adventure: u8) -> Self {
        Self {
            weekend,
            home,
            social,
            rhythm,
            adventure,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.adventure > MAX_ADVENTURE {
            return Err(Error::invalid_argument(format!(
                "adventure must be within 0..={MAX_ADVENTURE}, got {}",
                self.adventure
            )));
        }
        Ok(())
    }

    /// Deltas of the four categorical answers, in question order
    pub fn option_deltas(&self) -> impl Iterator<Item = &'static Delta> {
        self.weekend
            .deltas()
            .iter()
            .chain(self.home.deltas())
            .chain(self.social.deltas())
            .chain(self.rhythm.deltas())
    }

    /// Contribution of the stability vs adventure slider
    pub fn adventure_deltas(&self) -> [Delta; 3] {
        let value = f64::from(self.adventure);
        let a = (value - 5.0) / 5.0;
        [
            (Dimension::International, a * 0.4),
            (Dimension::Safety, -(a * 0.3)),
            (Dimension::Health, (10.0 - value) * 0.05),
        ]
    }
}
