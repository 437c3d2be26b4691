//! Engine configuration
//!
//! Model tunables read from the environment (and a `.env` file when present).
//! Front-end flags override these values.
//!
//! | Variable | Default |
//! |---|---|
//! | `PRICER_MC_PATHS` | 10000 |
//! | `PRICER_MC_STEPS_PER_YEAR` | 252 |
//! | `PRICER_MC_SEED` | unset (fresh entropy per run) |
//! | `PRICER_TREE_STEPS` | 100 |
//! | `PRICER_RISK_FREE_RATE` | 0.05 |

use std::str::FromStr;

use crate::core::{PricingError, PricingResult};
use crate::models::{BinomialTree, MonteCarloConfig, DEFAULT_PATHS, DEFAULT_STEPS_PER_YEAR, DEFAULT_TREE_STEPS};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub monte_carlo: MonteCarloConfig,
    pub tree: BinomialTree,
    /// Default risk-free rate for front-ends
    pub risk_free_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            monte_carlo: MonteCarloConfig::default(),
            tree: BinomialTree::default(),
            risk_free_rate: 0.05,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> PricingResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PricingResult<Self> {
        let num_paths = parse_or(&lookup, "PRICER_MC_PATHS", DEFAULT_PATHS)?;
        let steps_per_year = parse_or(&lookup, "PRICER_MC_STEPS_PER_YEAR", DEFAULT_STEPS_PER_YEAR)?;
        let seed = parse_opt::<u64>(&lookup, "PRICER_MC_SEED")?;
        let tree_steps = parse_or(&lookup, "PRICER_TREE_STEPS", DEFAULT_TREE_STEPS)?;
        let risk_free_rate = parse_or(&lookup, "PRICER_RISK_FREE_RATE", 0.05)?;

        let config = Self {
            monte_carlo: MonteCarloConfig::new(num_paths, steps_per_year, seed),
            tree: BinomialTree::new(tree_steps),
            risk_free_rate,
        };
        config.validate()?;

        if seed.is_some() {
            tracing::info!("Monte Carlo seed fixed by PRICER_MC_SEED; runs are reproducible");
        }
        Ok(config)
    }

    pub fn validate(&self) -> PricingResult<()> {
        self.monte_carlo
            .validate()
            .map_err(|e| PricingError::config(e.to_string()))?;
        if self.tree.num_steps < 1 {
            return Err(PricingError::config("PRICER_TREE_STEPS must be >= 1"));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::config("PRICER_RISK_FREE_RATE must be finite"));
        }
        Ok(())
    }
}

fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> PricingResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| PricingError::config(format!("{}: {}", key, e))),
        _ => Ok(None),
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> PricingResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
