//! Error types for the pricing engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn numeric_degeneracy(msg: impl Into<String>) -> Self {
        Self::NumericDegeneracy(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors raised by input validation
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// True for errors raised by a degenerate intermediate result
    pub fn is_numeric_degeneracy(&self) -> bool {
        matches!(self, Self::NumericDegeneracy(_))
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::invalid_parameter("spot must be > 0");
        assert_eq!(err.to_string(), "Invalid parameter: spot must be > 0");
        assert!(err.is_invalid_parameter());
        assert!(!err.is_numeric_degeneracy());

        let err = PricingError::numeric_degeneracy("p = 1.2");
        assert!(err.is_numeric_degeneracy());
    }
}
