//! Pricing Models
//!
//! Implements:
//! - Black-Scholes (closed form)
//! - Monte Carlo (GBM path simulation)
//! - Binomial Tree (Cox-Ross-Rubinstein)
//!
//! Each model is a set of pure functions. `PricingModel` selects one of the
//! three at runtime.

pub mod black_scholes;
pub mod monte_carlo;
pub mod binomial;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{OptionPair, OptionType, PricingError, PricingRequest, PricingResult};

pub use binomial::{BinomialTree, LatticeParams, DEFAULT_TREE_STEPS};
pub use black_scholes::{greeks, norm_cdf, norm_pdf};
pub use monte_carlo::{MonteCarloConfig, MonteCarloEstimate, DEFAULT_PATHS, DEFAULT_STEPS_PER_YEAR};

/// One of the three pricing models with its tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum PricingModel {
    BlackScholes,
    MonteCarlo(MonteCarloConfig),
    BinomialTree(BinomialTree),
}

impl PricingModel {
    pub fn price(&self, req: &PricingRequest, option_type: OptionType) -> PricingResult<f64> {
        match self {
            PricingModel::BlackScholes => black_scholes::price(req, option_type),
            PricingModel::MonteCarlo(config) => monte_carlo::price(req, option_type, config),
            PricingModel::BinomialTree(tree) => tree.price(req, option_type),
        }
    }

    pub fn price_pair(&self, req: &PricingRequest) -> PricingResult<OptionPair> {
        match self {
            PricingModel::BlackScholes => black_scholes::price_pair(req),
            PricingModel::MonteCarlo(config) => monte_carlo::price_pair(req, config),
            PricingModel::BinomialTree(tree) => tree.price_pair(req),
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PricingModel::BlackScholes => "Black-Scholes",
            PricingModel::MonteCarlo(_) => "Monte Carlo",
            PricingModel::BinomialTree(_) => "Binomial Tree",
        }
    }

    /// All three models with default tunables
    pub fn all() -> [PricingModel; 3] {
        [
            PricingModel::BlackScholes,
            PricingModel::MonteCarlo(MonteCarloConfig::default()),
            PricingModel::BinomialTree(BinomialTree::default()),
        ]
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PricingModel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black-scholes" | "blackscholes" | "bs" => Ok(PricingModel::BlackScholes),
            "monte-carlo" | "montecarlo" | "mc" => {
                Ok(PricingModel::MonteCarlo(MonteCarloConfig::default()))
            }
            "binomial" | "binomial-tree" | "tree" => {
                Ok(PricingModel::BinomialTree(BinomialTree::default()))
            }
            other => Err(PricingError::invalid_parameter(format!(
                "unknown model '{}' (expected black-scholes, monte-carlo or binomial)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model() {
        assert_eq!("bs".parse::<PricingModel>().unwrap(), PricingModel::BlackScholes);
        assert_eq!(
            "Monte-Carlo".parse::<PricingModel>().unwrap(),
            PricingModel::MonteCarlo(MonteCarloConfig::default())
        );
        assert_eq!(
            "tree".parse::<PricingModel>().unwrap(),
            PricingModel::BinomialTree(BinomialTree::new(100))
        );
        assert!("heston".parse::<PricingModel>().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_dispatch_agrees_across_models() {
        let req = PricingRequest::default();
        let bs = PricingModel::BlackScholes.price_pair(&req).unwrap();
        let tree = PricingModel::BinomialTree(BinomialTree::new(500))
            .price_pair(&req)
            .unwrap();
        let mc = PricingModel::MonteCarlo(
            MonteCarloConfig::default()
                .with_paths(20_000)
                .with_steps_per_year(12)
                .with_seed(11),
        )
        .price_pair(&req)
        .unwrap();

        assert!((tree.call - bs.call).abs() < 0.02);
        assert!((tree.put - bs.put).abs() < 0.02);
        assert!((mc.call - bs.call).abs() < 0.5);
        assert!((mc.put - bs.put).abs() < 0.3);
    }

    #[test]
    fn test_model_names() {
        let names: Vec<_> = PricingModel::all().iter().map(|m| m.to_string()).collect();
        assert_eq!(names, ["Black-Scholes", "Monte Carlo", "Binomial Tree"]);
    }
}
