use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::{EngineError, util::parse_hundredths};

/// Quantity of an item, stored as integer **hundredths** of a unit.
///
/// Quantities are compared exactly, so the conservation check never
/// depends on floating-point rounding.
///
/// ```rust
/// use engine::Quantity;
///
/// assert_eq!("2.5".parse::<Quantity>().unwrap(), Quantity::from_hundredths(250));
/// assert_eq!(Quantity::from_units(6).to_string(), "6");
/// assert_eq!(Quantity::from_hundredths(205).to_string(), "2.05");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Subtraction clamped at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Quantity) -> Quantity {
        Quantity((self.0 - rhs.0).max(0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let frac = abs % 100;
        match frac {
            0 => write!(f, "{sign}{units}"),
            f10 if f10 % 10 == 0 => write!(f, "{sign}{units}.{}", f10 / 10),
            _ => write!(f, "{sign}{units}.{frac:02}"),
        }
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Self::Output {
        Quantity(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 += rhs.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, Add::add)
    }
}

impl FromStr for Quantity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s, "quantity").map(Quantity)
    }
}
