//! Black-Scholes Model
//!
//! Closed-form European option pricing:
//!
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 - σ·√T
//! C  = S·Φ(d1) - K·e^(-rT)·Φ(d2)
//! P  = K·e^(-rT)·Φ(-d2) - S·Φ(-d1)
//!
//! Inputs are validated up front, so zero time or zero volatility is an
//! `InvalidParameter` error rather than an intrinsic-value fallback. A
//! non-finite d1/d2 or price is reported as `NumericDegeneracy`.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::{Greeks, OptionPair, OptionType, PricingError, PricingRequest, PricingResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(req: &PricingRequest) -> f64 {
    ((req.spot / req.strike).ln() + (req.rate + 0.5 * req.vol * req.vol) * req.time)
        / (req.vol * req.time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(req: &PricingRequest) -> f64 {
    d1(req) - req.vol * req.time.sqrt()
}

fn checked_d1_d2(req: &PricingRequest) -> PricingResult<(f64, f64)> {
    req.validate()?;

    let d1 = d1(req);
    let d2 = d1 - req.vol * req.time.sqrt();
    if !d1.is_finite() || !d2.is_finite() {
        return Err(PricingError::numeric_degeneracy(format!(
            "d1/d2 not finite (d1={}, d2={})",
            d1, d2
        )));
    }
    Ok((d1, d2))
}

/// Black-Scholes European option price
pub fn price(req: &PricingRequest, option_type: OptionType) -> PricingResult<f64> {
    let (d1, d2) = checked_d1_d2(req)?;
    let df = req.discount_factor();

    let value = match option_type {
        OptionType::Call => req.spot * norm_cdf(d1) - req.strike * df * norm_cdf(d2),
        OptionType::Put => req.strike * df * norm_cdf(-d2) - req.spot * norm_cdf(-d1),
    };

    if !value.is_finite() {
        return Err(PricingError::numeric_degeneracy(format!(
            "{} price not finite",
            option_type
        )));
    }

    // Round-off can leave deep OTM prices a hair below zero
    Ok(value.max(0.0))
}

/// Call and put prices for the same request
pub fn price_pair(req: &PricingRequest) -> PricingResult<OptionPair> {
    Ok(OptionPair::new(
        price(req, OptionType::Call)?,
        price(req, OptionType::Put)?,
    ))
}

/// Black-Scholes Greeks
pub fn greeks(req: &PricingRequest, option_type: OptionType) -> PricingResult<Greeks> {
    let (d1, d2) = checked_d1_d2(req)?;
    let df = req.discount_factor();
    let sqrt_t = req.time.sqrt();
    let pdf_d1 = norm_pdf(d1);

    let delta = match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    };

    // Gamma and vega are the same for call and put
    let gamma = pdf_d1 / (req.spot * req.vol * sqrt_t);
    let vega = req.spot * pdf_d1 * sqrt_t / 100.0;

    let decay = -req.spot * pdf_d1 * req.vol / (2.0 * sqrt_t);
    let theta = match option_type {
        OptionType::Call => decay - req.rate * req.strike * df * norm_cdf(d2),
        OptionType::Put => decay + req.rate * req.strike * df * norm_cdf(-d2),
    };

    let rho = match option_type {
        OptionType::Call => req.strike * req.time * df * norm_cdf(d2) / 100.0,
        OptionType::Put => -req.strike * req.time * df * norm_cdf(-d2) / 100.0,
    };

    Ok(Greeks::new(delta, gamma, theta / 365.0, vega, rho))
}
