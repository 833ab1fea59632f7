//! Exercise and path-observation styles.
//!
//! [`ExerciseStyle`] selects *when* a lattice-priced option may be
//! exercised; [`PathStyle`] selects *which* simulated prices a Monte Carlo
//! payoff observes.

use opus_core::Error;
use std::fmt;
use std::str::FromStr;

/// Type of exercise right, used by the lattice engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any node up to expiry.
    American,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(ExerciseStyle::European),
            "american" => Ok(ExerciseStyle::American),
            _ => Err(Error::InvalidArgument(format!(
                "unsupported exercise style: {s}"
            ))),
        }
    }
}

/// Path observation style, used by the Monte Carlo engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStyle {
    /// Payoff on the terminal price only.
    #[default]
    European,
    /// Payoff on the arithmetic average of every observation of the path,
    /// the initial spot included.
    Asian,
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStyle::European => write!(f, "European"),
            PathStyle::Asian => write!(f, "Asian"),
        }
    }
}

impl FromStr for PathStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(PathStyle::European),
            "asian" => Ok(PathStyle::Asian),
            _ => Err(Error::InvalidArgument(format!("unsupported path style: {s}"))),
        }
    }
}
