use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::PizzaError;

/// A non-negative amount of money, kept in whole cents.
///
/// Integer cents keep chain totals exact no matter in which order the
/// surcharges are added. Single prices parsed from dollars are capped at
/// [`Price::MAX_ITEM`]; sums saturate instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Largest price accepted for a single item: $1,000,000.00.
    pub const MAX_ITEM: Price = Price(100_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PizzaError;

    fn try_from(dollars: f64) -> Result<Self, Self::Error> {
        if !dollars.is_finite() || dollars < 0.0 {
            return Err(PizzaError::InvalidPrice(dollars));
        }
        let cents = (dollars * 100.0).round();
        if (dollars * 100.0 - cents).abs() > 1e-6 || cents > Self::MAX_ITEM.0 as f64 {
            return Err(PizzaError::InvalidPrice(dollars));
        }
        Ok(Price(cents as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_dollars()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
