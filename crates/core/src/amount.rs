//! Amount - Non-negative monetary value
//!
//! Bill totals and shares are plain double-precision numbers on the wire
//! (the stored `bills.json` keeps them as JSON numbers). The wrapper only
//! guarantees the value is finite and never negative.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use thiserror::Error;

/// Number of decimal places used when an amount is displayed.
pub const DISPLAY_PRECISION: usize = 4;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(f64),

    #[error("Amount must be a finite number: {0}")]
    NotFinite(f64),
}

/// A non-negative, finite monetary amount.
///
/// # Invariant
/// The inner value is always finite and >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use splitbill_core::Amount;
///
/// let amount = Amount::new(30.0).unwrap();
/// assert_eq!(amount.value(), 30.0);
/// assert_eq!(amount.to_string(), "30.0000");
///
/// // Negative amounts are rejected
/// assert!(Amount::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0.0);

    /// Create a new Amount from a float.
    ///
    /// Returns an error if the value is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            Err(AmountError::NotFinite(value))
        } else if value < 0.0 {
            Err(AmountError::NegativeAmount(value))
        } else {
            // -0.0 passes the check above; store it as plain zero
            Ok(Self(value.abs()))
        }
    }

    /// Get the inner value
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Subtraction clamped at zero
    pub fn saturating_sub(&self, other: &Amount) -> Amount {
        Amount((self.0 - other.0).max(0.0))
    }

    /// Split the amount evenly between `parties` parties.
    ///
    /// Returns None when `parties` is zero.
    pub fn split_evenly(&self, parties: usize) -> Option<Amount> {
        if parties == 0 {
            return None;
        }
        Some(Amount(self.0 / parties as f64))
    }

    /// True when both amounts differ by at most `tolerance`
    pub fn approx_eq(&self, other: &Amount, tolerance: f64) -> bool {
        (self.0 - other.0).abs() <= tolerance
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", DISPLAY_PRECISION, self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        // Sum of non-negative finite values; only overflow can break the invariant
        Amount(iter.map(|a| a.0).sum::<f64>().min(f64::MAX))
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
