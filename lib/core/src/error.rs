use crate::vector::Dimension;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid record '{city}': missing or non-numeric field '{field}'")]
    InvalidRecord { city: String, field: &'static str },

    #[error("Invalid record '{city}': field '{field}' out of range ({value})")]
    OutOfRange {
        city: String,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid record '{city}': feature '{dimension}' is not finite")]
    NonFiniteFeature { city: String, dimension: Dimension },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown answer option for {question}: '{value}'")]
    UnknownOption { question: &'static str, value: String },

    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
