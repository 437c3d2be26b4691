//! Monte Carlo Model
//!
//! Simulates geometric Brownian motion under the risk-neutral measure:
//!
//! S(t+Δt) = S(t) · exp((r - σ²/2)·Δt + σ·√Δt·Z),  Z ~ N(0, 1)
//!
//! and prices the option as the discounted mean terminal payoff.
//!
//! ## Randomness
//!
//! The seed is explicit. With `seed: None` (the default, and the setting to
//! use in production) every call draws a fresh base seed, so repeated runs
//! show real sampling error. With `seed: Some(s)` the result is reproducible
//! bit for bit, independent of the number of threads.
//!
//! Paths are split into fixed-size chunks. Each chunk owns a `ChaCha8Rng`
//! seeded from the base seed and the chunk index, chunks run on the rayon
//! pool, and the per-chunk sums are added in chunk order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{OptionPair, OptionType, PricingError, PricingRequest, PricingResult};

/// Default number of simulated paths
pub const DEFAULT_PATHS: usize = 10_000;

/// Default number of time steps per year of maturity (trading days)
pub const DEFAULT_STEPS_PER_YEAR: usize = 252;

/// Paths simulated by one RNG stream
const CHUNK_PATHS: usize = 1024;

/// Odd 64-bit constant (2^64 / golden ratio) used to spread chunk seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Simulation tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of independent paths
    pub num_paths: usize,
    /// Time steps per year; a path has round(T × steps_per_year) steps, at least 1
    pub steps_per_year: usize,
    /// Base seed; `None` draws fresh entropy on every call
    pub seed: Option<u64>,
}

impl MonteCarloConfig {
    pub fn new(num_paths: usize, steps_per_year: usize, seed: Option<u64>) -> Self {
        Self {
            num_paths,
            steps_per_year,
            seed,
        }
    }

    pub fn with_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = num_paths;
        self
    }

    pub fn with_steps_per_year(mut self, steps_per_year: usize) -> Self {
        self.steps_per_year = steps_per_year;
        self
    }

    /// Fix the base seed for reproducible runs (tests, reports)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Copy with the seed pinned, drawing one at random when none is set.
    /// Runs priced from the result share the same paths.
    pub fn resolved_seed(&self) -> Self {
        match self.seed {
            Some(_) => *self,
            None => self.with_seed(rand::random()),
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        if self.num_paths < 1 {
            return Err(PricingError::invalid_parameter("num_paths must be >= 1"));
        }
        if self.steps_per_year < 1 {
            return Err(PricingError::invalid_parameter(
                "steps_per_year must be >= 1",
            ));
        }
        Ok(())
    }

    /// Number of time steps for a given maturity
    pub fn num_steps(&self, time: f64) -> usize {
        let steps = (time * self.steps_per_year as f64).round();
        if steps.is_finite() && steps >= 1.0 {
            steps as usize
        } else {
            1
        }
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATHS, DEFAULT_STEPS_PER_YEAR, None)
    }
}

/// Monte Carlo price with its sampling error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloEstimate {
    /// Discounted mean payoff
    pub price: f64,
    /// Standard error of the price
    pub std_error: f64,
    pub num_paths: usize,
    pub num_steps: usize,
    /// Base seed actually used (drawn at random when none was configured)
    pub seed: u64,
}

impl MonteCarloEstimate {
    /// Symmetric confidence interval at the given z-score (1.96 for 95%)
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (self.price - z * self.std_error, self.price + z * self.std_error)
    }
}

/// Monte Carlo price for a European option
pub fn price(
    req: &PricingRequest,
    option_type: OptionType,
    config: &MonteCarloConfig,
) -> PricingResult<f64> {
    estimate(req, option_type, config).map(|e| e.price)
}

/// Call and put prices driven by the same random numbers
pub fn price_pair(req: &PricingRequest, config: &MonteCarloConfig) -> PricingResult<OptionPair> {
    let seeded = config.resolved_seed();
    Ok(OptionPair::new(
        price(req, OptionType::Call, &seeded)?,
        price(req, OptionType::Put, &seeded)?,
    ))
}

/// Monte Carlo price and standard error for a European option
pub fn estimate(
    req: &PricingRequest,
    option_type: OptionType,
    config: &MonteCarloConfig,
) -> PricingResult<MonteCarloEstimate> {
    req.validate()?;
    config.validate()?;

    let n_paths = config.num_paths;
    let n_steps = config.num_steps(req.time);
    let dt = req.time / n_steps as f64;
    let drift = (req.rate - 0.5 * req.vol * req.vol) * dt;
    let diffusion = req.vol * dt.sqrt();
    let base_seed = config.seed.unwrap_or_else(rand::random);

    tracing::debug!(
        paths = n_paths,
        steps = n_steps,
        seed = base_seed,
        seeded = config.seed.is_some(),
        "monte carlo {}",
        option_type
    );

    let gbm = GbmPaths {
        spot: req.spot,
        strike: req.strike,
        option_type,
        drift,
        diffusion,
        n_steps,
    };
    let n_chunks = n_paths.div_ceil(CHUNK_PATHS);
    let chunks: Vec<(f64, f64)> = (0..n_chunks)
        .into_par_iter()
        .map(|i| {
            let paths = CHUNK_PATHS.min(n_paths - i * CHUNK_PATHS);
            let seed = base_seed.wrapping_add((i as u64).wrapping_mul(SEED_STRIDE));
            gbm.simulate_chunk(paths, seed)
        })
        .collect();

    // Sequential reduction keeps seeded results independent of scheduling
    let (sum, sum_sq) = chunks
        .iter()
        .fold((0.0, 0.0), |(s, sq), &(cs, csq)| (s + cs, sq + csq));

    let n = n_paths as f64;
    let mean = sum / n;
    let variance = if n_paths > 1 {
        ((sum_sq - sum * mean) / (n - 1.0)).max(0.0)
    } else {
        0.0
    };
    let df = req.discount_factor();

    let price = df * mean;
    if !price.is_finite() {
        return Err(PricingError::numeric_degeneracy(format!(
            "monte carlo {} price not finite",
            option_type
        )));
    }

    Ok(MonteCarloEstimate {
        price,
        std_error: df * (variance / n).sqrt(),
        num_paths: n_paths,
        num_steps: n_steps,
        seed: base_seed,
    })
}

/// Per-path constants shared by every chunk
struct GbmPaths {
    spot: f64,
    strike: f64,
    option_type: OptionType,
    drift: f64,
    diffusion: f64,
    n_steps: usize,
}

impl GbmPaths {
    /// Simulate `n_paths` paths on one RNG stream, returning (Σ payoff, Σ payoff²)
    fn simulate_chunk(&self, n_paths: usize, seed: u64) -> (f64, f64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for _ in 0..n_paths {
            // Product of per-step growth factors, accumulated in log space
            let mut log_growth = 0.0;
            for _ in 0..self.n_steps {
                let z: f64 = rng.sample(StandardNormal);
                log_growth += self.drift + self.diffusion * z;
            }
            let terminal = self.spot * log_growth.exp();
            let payoff = self.option_type.intrinsic(terminal, self.strike);
            sum += payoff;
            sum_sq += payoff * payoff;
        }

        (sum, sum_sq)
    }
}
