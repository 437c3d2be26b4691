//! Binomial Tree Model
//!
//! Cox-Ross-Rubinstein lattice for European options:
//!
//! Δt = T/n, u = e^(σ√Δt), d = 1/u
//! p  = (e^(rΔt) - d) / (u - d)
//!
//! Terminal payoffs are rolled back with a single vector of n+1 node values,
//! so memory is O(n) while time stays O(n²). Only the terminal layer depends
//! on the option type; there is no early exercise.

use serde::{Deserialize, Serialize};

use crate::core::{OptionPair, OptionType, PricingError, PricingRequest, PricingResult};

/// Default number of tree steps
pub const DEFAULT_TREE_STEPS: usize = 100;

/// CRR tree tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinomialTree {
    /// Number of time steps in the lattice
    pub num_steps: usize,
}

impl BinomialTree {
    pub fn new(num_steps: usize) -> Self {
        Self { num_steps }
    }

    pub fn price(&self, req: &PricingRequest, option_type: OptionType) -> PricingResult<f64> {
        price(req, option_type, self.num_steps)
    }

    pub fn price_pair(&self, req: &PricingRequest) -> PricingResult<OptionPair> {
        Ok(OptionPair::new(
            self.price(req, OptionType::Call)?,
            self.price(req, OptionType::Put)?,
        ))
    }
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self::new(DEFAULT_TREE_STEPS)
    }
}

/// Per-step lattice parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams {
    pub up: f64,
    pub down: f64,
    /// ln(u) = σ√Δt
    pub log_up: f64,
    /// Risk-neutral up probability
    pub prob_up: f64,
    /// One-step discount factor e^(-rΔt)
    pub discount: f64,
}

impl LatticeParams {
    /// Derive u, d, p and the discount factor, rejecting p outside [0, 1]
    pub fn new(req: &PricingRequest, num_steps: usize) -> PricingResult<Self> {
        req.validate()?;
        if num_steps < 1 {
            return Err(PricingError::invalid_parameter("num_steps must be >= 1"));
        }

        let dt = req.time / num_steps as f64;
        let log_up = req.vol * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let prob_up = ((req.rate * dt).exp() - down) / (up - down);
        let discount = (-req.rate * dt).exp();

        if !prob_up.is_finite() || !(0.0..=1.0).contains(&prob_up) {
            return Err(PricingError::numeric_degeneracy(format!(
                "risk-neutral probability {} outside [0, 1] (σ√Δt too small against rΔt)",
                prob_up
            )));
        }

        Ok(Self {
            up,
            down,
            log_up,
            prob_up,
            discount,
        })
    }
}

/// Binomial tree price for a European option
pub fn price(req: &PricingRequest, option_type: OptionType, num_steps: usize) -> PricingResult<f64> {
    let lattice = LatticeParams::new(req, num_steps)?;
    let LatticeParams {
        up,
        log_up,
        prob_up,
        discount,
        ..
    } = lattice;

    tracing::debug!(steps = num_steps, p = prob_up, u = up, "binomial {}", option_type);

    // Node i at maturity has i down moves: S·u^(n-i)·d^i = S·e^((n-2i)·σ√Δt).
    // Each node is built on its own so an overflowing top node stays local.
    let mut values = Vec::with_capacity(num_steps + 1);
    for i in 0..=num_steps {
        let spot = req.spot * ((num_steps as f64 - 2.0 * i as f64) * log_up).exp();
        let payoff = option_type.intrinsic(spot, req.strike);
        if !payoff.is_finite() {
            return Err(PricingError::numeric_degeneracy(format!(
                "binomial {} payoff not finite at terminal node {} (spot {})",
                option_type, i, spot
            )));
        }
        values.push(payoff);
    }

    let disc_up = discount * prob_up;
    let disc_down = discount * (1.0 - prob_up);
    for step in (0..num_steps).rev() {
        for j in 0..=step {
            values[j] = disc_up * values[j] + disc_down * values[j + 1];
        }
    }

    let root = values[0];
    if !root.is_finite() {
        return Err(PricingError::numeric_degeneracy(format!(
            "binomial {} price not finite",
            option_type
        )));
    }
    Ok(root)
}

/// Call and put prices on the same lattice
pub fn price_pair(req: &PricingRequest, num_steps: usize) -> PricingResult<OptionPair> {
    BinomialTree::new(num_steps).price_pair(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black_scholes;

    fn atm() -> PricingRequest {
        PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.20)
    }

    #[test]
    fn test_lattice_params() {
        let p = LatticeParams::new(&atm(), 100).unwrap();
        assert!((p.up * p.down - 1.0).abs() < 1e-12);
        assert!(p.prob_up > 0.5 && p.prob_up < 0.6);
        assert!(p.discount < 1.0);
    }

    #[test]
    fn test_tree_close_to_bs() {
        let req = atm();
        let bs = black_scholes::price(&req, OptionType::Call).unwrap();
        let tree = price(&req, OptionType::Call, 100).unwrap();
        assert!((tree - bs).abs() < 0.05, "tree {} vs bs {}", tree, bs);
    }

    #[test]
    fn test_single_step() {
        // One step: root = disc·(p·max(Su-K,0) + (1-p)·max(Sd-K,0))
        let req = atm();
        let lattice = LatticeParams::new(&req, 1).unwrap();
        let expected = lattice.discount * lattice.prob_up * (100.0 * lattice.up - 100.0);
        let tree = price(&req, OptionType::Call, 1).unwrap();
        assert!((tree - expected).abs() < 1e-12);
    }

    #[test]
    fn test_put_call_parity_holds_on_lattice() {
        let req = PricingRequest::new(95.0, 105.0, 0.75, 0.03, 0.3);
        let pair = price_pair(&req, 200).unwrap();
        assert!((pair.call - pair.put - req.parity_forward()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = price(&atm(), OptionType::Call, 0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_extreme_vol_terminal_layer() {
        // σ√(T·n) ≈ 790: the top terminal spots overflow f64
        let req = PricingRequest::new(100.0, 100.0, 10.0, 0.05, 5.0);
        let bs_put = black_scholes::price(&req, OptionType::Put).unwrap();

        let put = price(&req, OptionType::Put, 2500).unwrap();
        assert!((put - bs_put).abs() < 0.5, "tree {} vs bs {}", put, bs_put);

        let call = price(&req, OptionType::Call, 2500).unwrap_err();
        assert!(call.is_numeric_degeneracy());

        // Below the overflow range the lattice still prices both legs
        let pair = price_pair(&req, 1000).unwrap();
        assert!((pair.put - bs_put).abs() < 0.5);
        assert!(pair.call.is_finite());
    }

    #[test]
    fn test_arbitrage_inconsistent_lattice_rejected() {
        // e^(rΔt) > u: p > 1
        let req = PricingRequest::new(100.0, 100.0, 1.0, 0.5, 0.01);
        let err = price(&req, OptionType::Call, 10).unwrap_err();
        assert!(err.is_numeric_degeneracy());
    }
}
