//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Non-negative amount of money.
///
/// Negative amounts are unrepresentable, which mirrors the `CHECK (… >= 0)`
/// constraints of the storage.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Price(Decimal);

impl Price {
    /// Zero [`Price`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Price`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then(|| Self(amount.normalize()))
    }

    /// Creates a new [`Price`] without checking its sign.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `amount` is not negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(amount: Decimal) -> Self {
        Self(amount.normalize())
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            if let Some(amount) = self.0.to_u128() {
                return write!(f, "{amount}");
            }
        }
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Price;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Price::from_str("123.45").unwrap(),
            Price::new(decimal("123.45")).unwrap(),
        );
        assert_eq!(Price::from_str("0").unwrap(), Price::ZERO);
        assert_eq!(
            Price::from_str("95000.00").unwrap(),
            Price::from_str("95000").unwrap(),
        );

        assert_eq!(Price::from_str("-0.01"), Err("negative amount"));
        assert_eq!(Price::from_str("12,5"), Err("invalid amount"));
        assert_eq!(Price::from_str(""), Err("invalid amount"));
    }

    #[test]
    fn rejects_negative() {
        assert!(Price::new(decimal("-1")).is_none());
        assert_eq!(Price::new(decimal("-0")), Some(Price::ZERO));
        assert!(Price::new(decimal("0")).is_some());
    }

    #[test]
    fn to_string() {
        assert_eq!(Price::from_str("123.45").unwrap().to_string(), "123.45");
        assert_eq!(Price::from_str("123.00").unwrap().to_string(), "123");
        assert_eq!(Price::from_str("123.0").unwrap().to_string(), "123");
        assert_eq!(Price::from_str("123").unwrap().to_string(), "123");
        assert_eq!(Price::ZERO.to_string(), "0");
    }

    #[test]
    fn orders_by_amount() {
        let low = Price::from_str("90000").unwrap();
        let high = Price::from_str("95000.5").unwrap();

        assert!(low < high);
        assert_eq!(low.max(high), high);
    }
}
