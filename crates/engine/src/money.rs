use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::{EngineError, Quantity, ResultEngine, util::parse_hundredths};

/// Non-negative money amount represented as **integer cents**.
///
/// Use this type for **all** prices and totals in the engine to avoid
/// floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals and negative values):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// assert!("-1".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Sums `amounts`, returning `None` on overflow.
    #[must_use]
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts.into_iter().try_fold(Money::ZERO, Money::checked_add)
    }

    /// Subtraction clamped at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money((self.0 - rhs.0).max(0))
    }

    /// Computes `quantity * price`, rounded half away from zero to whole
    /// cents.
    ///
    /// ```rust
    /// use engine::{Money, Quantity};
    ///
    /// let total = Money::total(Quantity::from_hundredths(250), Money::new(199)).unwrap();
    /// assert_eq!(total.cents(), 498); // 2.5 * 1.99 = 4.975
    /// ```
    pub fn total(quantity: Quantity, price: Money) -> ResultEngine<Money> {
        let raw = i128::from(quantity.hundredths()) * i128::from(price.0);
        let rounded = if raw >= 0 {
            (raw + 50) / 100
        } else {
            (raw - 50) / 100
        };
        i64::try_from(rounded)
            .map(Money)
            .map_err(|_| EngineError::InvalidAmount("total too large".to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s, "price").map(Money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(2000).to_string(), "20.00");
    }

    #[test]
    fn total_rounds_half_up_to_cents() {
        let q = Quantity::from_hundredths(33);
        let p = Money::new(5);
        // 0.33 * 0.05 = 0.0165
        assert_eq!(Money::total(q, p).unwrap(), Money::new(2));
        assert_eq!(
            Money::total(Quantity::from_units(10), Money::new(200)).unwrap(),
            Money::new(2000)
        );
    }

    #[test]
    fn total_reports_overflow() {
        let q = Quantity::from_hundredths(i64::MAX);
        assert!(Money::total(q, Money::new(i64::MAX)).is_err());
    }

    #[test]
    fn sum_and_saturating_sub() {
        let total: Money = [Money::new(150), Money::new(250)].into_iter().sum();
        assert_eq!(total, Money::new(400));
        assert_eq!(Money::new(100).saturating_sub(Money::new(300)), Money::ZERO);
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(
            Money::checked_sum([Money::new(1), Money::new(2)]),
            Some(Money::new(3))
        );
        assert_eq!(Money::checked_sum([Money::new(i64::MAX), Money::new(1)]), None);
    }
}
