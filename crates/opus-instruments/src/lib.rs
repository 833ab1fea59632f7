//! # opus-instruments
//!
//! Option definitions shared by every pricing engine: the call/put type and
//! payoff, exercise and path styles, the pricing request, the Greeks result
//! and the [`PricingEngine`] trait.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod exercise;
pub mod greeks;
pub mod payoff;
pub mod request;

pub use engine::PricingEngine;
pub use exercise::{ExerciseStyle, PathStyle};
pub use greeks::Greeks;
pub use payoff::{OptionType, PlainVanillaPayoff};
pub use request::PricingRequest;
