//! Error types for opus-rs.
//!
//! A single `thiserror`-derived enum covers every failure the pricing
//! engines can report. Precondition failures are raised with the `ensure!`
//! macro defined here.

use thiserror::Error;

/// The top-level error type used throughout opus-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Unsupported enumeration value or an operation the engine does not
    /// define for the requested configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The model is undefined for the given inputs (non-positive spot,
    /// strike, maturity or volatility).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Shorthand `Result` type used throughout opus-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use opus_core::{ensure, errors::Error};
/// fn positive(x: f64) -> opus_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
