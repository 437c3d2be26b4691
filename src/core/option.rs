//! Option and request definitions
//!
//! A pricing request is the five market inputs every model needs. The option
//! kind is passed alongside it so one request can price both legs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{PricingError, PricingResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.phi() * (spot - strike)).max(0.0)
    }

    pub fn both() -> [OptionType; 2] {
        [OptionType::Call, OptionType::Put]
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid_parameter(format!(
                "unknown option type '{}'",
                other
            ))),
        }
    }
}

/// Market inputs for pricing a European option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Current asset price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to maturity in years (T)
    pub time: f64,
    /// Annualized risk-free rate (r), may be negative
    pub rate: f64,
    /// Annualized volatility (σ)
    pub vol: f64,
}

impl PricingRequest {
    pub fn new(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> Self {
        Self {
            spot,
            strike,
            time,
            rate,
            vol,
        }
    }

    /// Check every field against its documented constraint
    pub fn validate(&self) -> PricingResult<()> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("time", self.time)?;
        positive("vol", self.vol)?;
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(format!(
                "rate must be finite, got {}",
                self.rate
            )));
        }
        Ok(())
    }

    /// Copy with a different spot and strike (used by grid sweeps)
    pub fn with_spot_strike(&self, spot: f64, strike: f64) -> Self {
        Self {
            spot,
            strike,
            ..*self
        }
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time).exp()
    }

    /// Lower bound of the call minus the put: S - K e^(-rT)
    pub fn parity_forward(&self) -> f64 {
        self.spot - self.strike * self.discount_factor()
    }
}

impl Default for PricingRequest {
    fn default() -> Self {
        Self::new(100.0, 100.0, 1.0, 0.05, 0.2)
    }
}

fn positive(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(format!(
            "{} must be finite and > 0, got {}",
            name, value
        )))
    }
}

/// Call and put prices from one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionPair {
    pub call: f64,
    pub put: f64,
}

impl OptionPair {
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.phi(), 1.0);
        assert_eq!(OptionType::Put.phi(), -1.0);

        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        // Unbounded spot leaves the put worthless rather than NaN
        assert_eq!(OptionType::Put.intrinsic(f64::INFINITY, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    #[test]
    fn test_validate() {
        assert!(PricingRequest::default().validate().is_ok());
        // Negative rates are allowed
        assert!(PricingRequest::new(100.0, 100.0, 1.0, -0.01, 0.2)
            .validate()
            .is_ok());

        let bad = [
            PricingRequest::new(0.0, 100.0, 1.0, 0.05, 0.2),
            PricingRequest::new(100.0, -1.0, 1.0, 0.05, 0.2),
            PricingRequest::new(100.0, 100.0, 0.0, 0.05, 0.2),
            PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.0),
            PricingRequest::new(100.0, 100.0, 1.0, f64::NAN, 0.2),
            PricingRequest::new(f64::INFINITY, 100.0, 1.0, 0.05, 0.2),
        ];
        for req in bad {
            let err = req.validate().unwrap_err();
            assert!(err.is_invalid_parameter(), "{:?}", req);
        }
    }

    #[test]
    fn test_parity_forward() {
        let req = PricingRequest::new(100.0, 100.0, 1.0, 0.0, 0.2);
        assert!(req.parity_forward().abs() < 1e-12);

        let shifted = req.with_spot_strike(120.0, 80.0);
        assert_eq!(shifted.time, 1.0);
        assert!((shifted.parity_forward() - 40.0).abs() < 1e-12);
    }
}
