//! Price Grid
//!
//! Sweeps the closed-form pricer over a spot × strike grid, keeping time,
//! rate and volatility from a base request. Rows are spots, columns are
//! strikes. Two surfaces are produced: calls and puts.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::core::{PricingError, PricingRequest, PricingResult};
use crate::models::black_scholes;

/// Call and put price surfaces over spot × strike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceGrid {
    /// Request whose time, rate and vol apply to every cell
    pub base: PricingRequest,
    /// Row axis
    pub spots: Vec<f64>,
    /// Column axis
    pub strikes: Vec<f64>,
    /// calls[[i, j]] = call(spots[i], strikes[j])
    pub calls: Array2<f64>,
    /// puts[[i, j]] = put(spots[i], strikes[j])
    pub puts: Array2<f64>,
}

impl PriceGrid {
    pub fn dim(&self) -> (usize, usize) {
        self.calls.dim()
    }

    /// (min, max) over both surfaces, for colour scaling
    pub fn value_range(&self) -> (f64, f64) {
        self.calls
            .iter()
            .chain(self.puts.iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Write the grid as pretty JSON
    pub fn save_json(&self, path: impl AsRef<Path>) -> PricingResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        tracing::info!("Saved {}x{} price grid to {:?}", self.spots.len(), self.strikes.len(), path);
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> PricingResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// `n` evenly spaced points from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Price every (spot, strike) cell with Black-Scholes
pub fn price_grid(base: &PricingRequest, spots: &[f64], strikes: &[f64]) -> PricingResult<PriceGrid> {
    if spots.is_empty() || strikes.is_empty() {
        return Err(PricingError::invalid_parameter(
            "grid axes must be non-empty",
        ));
    }
    base.validate()?;

    let mut calls = Array2::zeros((spots.len(), strikes.len()));
    let mut puts = Array2::zeros((spots.len(), strikes.len()));

    for (i, &spot) in spots.iter().enumerate() {
        for (j, &strike) in strikes.iter().enumerate() {
            let pair = black_scholes::price_pair(&base.with_spot_strike(spot, strike))?;
            calls[[i, j]] = pair.call;
            puts[[i, j]] = pair.put;
        }
    }

    Ok(PriceGrid {
        base: *base,
        spots: spots.to_vec(),
        strikes: strikes.to_vec(),
        calls,
        puts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(80.0, 120.0, 5), vec![80.0, 90.0, 100.0, 110.0, 120.0]);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_grid_shape_and_monotonicity() {
        let base = PricingRequest::default();
        let spots = linspace(80.0, 120.0, 20);
        let strikes = linspace(80.0, 120.0, 20);
        let grid = price_grid(&base, &spots, &strikes).unwrap();

        assert_eq!(grid.dim(), (20, 20));

        // Calls rise with spot, puts fall with spot
        for j in 0..strikes.len() {
            for i in 1..spots.len() {
                assert!(grid.calls[[i, j]] >= grid.calls[[i - 1, j]]);
                assert!(grid.puts[[i, j]] <= grid.puts[[i - 1, j]]);
            }
        }

        let (lo, hi) = grid.value_range();
        assert!(lo >= 0.0 && hi > lo);
    }

    #[test]
    fn test_grid_rejects_bad_axes() {
        let base = PricingRequest::default();
        assert!(price_grid(&base, &[], &[100.0]).unwrap_err().is_invalid_parameter());
        assert!(price_grid(&base, &[100.0], &[0.0, 100.0])
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_grid_json_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.json");

        let grid = price_grid(&PricingRequest::default(), &[90.0, 110.0], &[100.0]).unwrap();
        grid.save_json(&path).unwrap();

        let loaded = PriceGrid::load_json(&path).unwrap();
        assert_eq!(loaded.spots, grid.spots);
        assert_eq!(loaded.calls, grid.calls);
    }
}
