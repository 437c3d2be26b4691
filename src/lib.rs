//! # Options Pricer - European Option Pricing Engine
//!
//! Prices European calls and puts under three independent models.
//!
//! ## Overview
//!
//! - **Black-Scholes**: closed-form, O(1)
//! - **Monte Carlo**: GBM path simulation, parallel across paths
//! - **Binomial Tree**: Cox-Ross-Rubinstein lattice, O(n²) time, O(n) memory
//!
//! Every pricer is a pure function of a [`PricingRequest`] and an
//! [`OptionType`]. Invalid inputs fail with `InvalidParameter` before any
//! computation; degenerate intermediates fail with `NumericDegeneracy`.
//!
//! ## Usage
//!
//! ```rust
//! use options_pricer::prelude::*;
//!
//! let req = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.2);
//!
//! let call = bs_price(&req, OptionType::Call).unwrap();
//! assert!((call - 10.45).abs() < 0.01);
//!
//! // Seeded Monte Carlo is reproducible; leave the seed unset in production
//! let mc = MonteCarloConfig::default().with_paths(2_000).with_seed(7);
//! let pair = PricingModel::MonteCarlo(mc).price_pair(&req).unwrap();
//! assert!(pair.call > pair.put);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - American exercise or dividends
//! - Implied volatility solving
//! - Persist computed prices

pub mod config;
pub mod core;
pub mod data;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Greeks, OptionPair, OptionType, PricingError, PricingRequest, PricingResult,
    };

    pub use crate::config::EngineConfig;

    // Spot lookup
    pub use crate::data::{resolve_spot, ResolvedSpot, SpotLookup, SpotQuote, SpotSource, YahooClient};

    // Models
    pub use crate::models::{
        black_scholes::price as bs_price,
        greeks as bs_greeks,
        norm_cdf,
        norm_pdf,
        BinomialTree,
        MonteCarloConfig,
        MonteCarloEstimate,
        PricingModel,
    };

    // Grids
    pub use crate::pricing::{linspace, price_grid, PriceGrid};
}

// Re-export main types at crate root
pub use crate::core::{OptionPair, OptionType, PricingError, PricingRequest, PricingResult};
pub use crate::models::PricingModel;
