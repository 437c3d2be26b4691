//! Pricing workflows built on the models
//!
//! - Spot × strike price grids for heatmaps

pub mod grid;

pub use grid::*;
