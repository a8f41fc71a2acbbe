//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use crate::Price;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Creates a new [`Percent`] out of the provided whole number, clamping it
    /// to `100`.
    #[expect(clippy::cast_lossless, reason = "`u32::from()` is not `const`")]
    #[must_use]
    pub const fn whole(val: u8) -> Self {
        let val = if val > 100 { 100 } else { val };
        Self(Decimal::from_parts(val as u32, 0, 0, false, 0))
    }

    /// Returns this [`Percent`] of the provided [`Price`].
    ///
    /// Being in `0..=100` range, the result never exceeds the provided
    /// [`Price`] and is never negative.
    ///
    /// Huge [`Price`]s are divided first, so the product can't overflow.
    #[must_use]
    pub fn of(self, price: Price) -> Price {
        let price = Decimal::from(price);
        let amount = price.checked_mul(self.0).map_or_else(
            || price / Decimal::ONE_HUNDRED * self.0,
            |product| product / Decimal::ONE_HUNDRED,
        );

        #[expect(
            clippy::allow_attributes,
            reason = "TODO: Remove once clippy is fixed"
        )]
        #[allow(unsafe_code, reason = "product of non-negatives")]
        let share = unsafe { Price::new_unchecked(amount) };
        share
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::Price;

    use super::Percent;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            "90".parse::<Percent>().unwrap(),
            Percent::new(Decimal::from(90)).unwrap(),
        );
        assert!("0".parse::<Percent>().is_ok());
        assert!("100".parse::<Percent>().is_ok());
        assert!("12.5".parse::<Percent>().is_ok());

        assert!("-1".parse::<Percent>().is_err());
        assert!("100.01".parse::<Percent>().is_err());
        assert!("ninety".parse::<Percent>().is_err());
    }

    #[test]
    fn whole() {
        assert_eq!(Percent::whole(90), "90".parse().unwrap());
        assert_eq!(Percent::whole(0), "0".parse().unwrap());
        assert_eq!(Percent::whole(101), "100".parse().unwrap());
    }

    #[test]
    fn of_price() {
        let ninety = "90".parse::<Percent>().unwrap();

        assert_eq!(ninety.of(price("100000")), price("90000"));
        assert_eq!(ninety.of(price("0")), price("0"));
        assert_eq!(ninety.of(price("0.1")), price("0.09"));
        assert_eq!("100".parse::<Percent>().unwrap().of(price("7")), price("7"));
    }

    #[test]
    fn of_huge_price() {
        let ninety = "90".parse::<Percent>().unwrap();

        assert_eq!(
            ninety.of(price("10000000000000000000000000000")),
            price("9000000000000000000000000000"),
        );

        let max = Price::new(Decimal::MAX).unwrap();
        assert!(ninety.of(max) < max);
        assert_eq!(Percent::whole(0).of(max), Price::ZERO);
    }
}
