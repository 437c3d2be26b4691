//! Core data types for the pricing engine
//!
//! Defines fundamental types:
//! - OptionType: call/put tag
//! - PricingRequest: the five market inputs
//! - OptionPair: call and put prices from one model
//! - Greeks: sensitivities
//! - PricingError: error taxonomy

pub mod option;
pub mod greeks;
pub mod error;

pub use option::*;
pub use greeks::*;
pub use error::*;
