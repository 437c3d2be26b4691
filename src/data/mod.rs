//! Market data
//!
//! Handles:
//! - Yahoo Finance spot lookup with manual fallback

pub mod yahoo;

pub use yahoo::*;
