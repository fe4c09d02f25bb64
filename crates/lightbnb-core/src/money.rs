//! # Money
//!
//! Nightly rates and price filters, in integer cents.
//!
//! ## Integer Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  properties.cost_per_night is stored in cents (INTEGER column)          │
//! │                                                                         │
//! │    $150.00 / night  →  15000                                            │
//! │                                                                         │
//! │  Search filters compare against the same column, so the minimum and    │
//! │  maximum price bounds are also expressed in cents.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lightbnb_core::money::Money;
//!
//! let nightly = Money::from_dollars(150);
//! let stay = nightly.multiply_nights(3);
//! assert_eq!(stay.cents(), 45000);
//! assert_eq!(stay.to_string(), "$450.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in cents.
///
/// Serializes as a bare integer so it matches the `cost_per_night` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// The listing form takes whole dollars; the column holds cents.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Zero is how an unset price filter arrives from a form.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Total cost of a stay at this nightly rate.
    #[inline]
    pub const fn multiply_nights(&self, nights: i64) -> Self {
        Money(self.0 * nights)
    }
}

/// `$D.CC`, for logs.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}
