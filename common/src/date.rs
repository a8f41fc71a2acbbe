//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{format_description::FormatItem, macros::format_description, Month};

/// `YYYY-MM-DD` format of a [`Date`].
const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date in UTC.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current UTC date.
    #[must_use]
    pub fn today() -> Self {
        Self::from_inner(time::OffsetDateTime::now_utc().date())
    }

    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Self::from_inner)
    }

    /// Parses a new [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// If the string is not a valid `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, FORMAT)
            .map(Self::from_inner)
            .map_err(ParseError)
    }

    /// Returns a [`Date`] the provided number of days after this one.
    ///
    /// Saturates at the bounds of the supported range.
    #[must_use]
    pub fn add_days(self, days: i64) -> Self {
        Self::from_inner(self.inner.saturating_add(time::Duration::days(days)))
    }

    /// Returns a [`Date`] the provided number of days before this one.
    ///
    /// Saturates at the bounds of the supported range.
    #[must_use]
    pub fn sub_days(self, days: i64) -> Self {
        Self::from_inner(self.inner.saturating_sub(time::Duration::days(days)))
    }

    /// Returns a [`Date`] the provided number of months after this one.
    ///
    /// The day is clamped to the length of the resulting month, so
    /// `2025-01-31` plus one month is `2025-02-28`.
    #[must_use]
    pub fn add_months(self, months: u8) -> Self {
        let current = u8::from(self.inner.month());
        let month = self.inner.month().nth_next(months % 12);
        let wraps = (current - 1 + months % 12) / 12;
        let year =
            self.inner.year() + i32::from(months / 12) + i32::from(wraps);
        let day = self
            .inner
            .day()
            .min(time::util::days_in_year_month(year, month));

        Self::from_inner(
            time::Date::from_calendar_date(year, month, day)
                .unwrap_or(time::Date::MAX),
        )
    }

    /// Returns the number of days passed from the `earlier` [`Date`] to this
    /// one.
    ///
    /// Negative if `earlier` is actually later.
    #[must_use]
    pub fn days_since<OtherOf: ?Sized>(self, earlier: DateOf<OtherOf>) -> i64 {
        (self.inner - earlier.inner).whole_days()
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf::from_inner(self.inner)
    }

    /// Wraps the provided [`time::Date`].
    fn from_inner(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.inner.year(),
            u8::from(self.inner.month()),
            self.inner.day(),
        )
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(date: time::Date) -> Self {
        Self::from_inner(date)
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self::from_inner)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats() {
        assert_eq!(date("2024-02-29").to_string(), "2024-02-29");
        assert_eq!(
            Date::from_calendar_date(2025, 1, 9).unwrap().to_string(),
            "2025-01-09",
        );

        assert!("2023-02-29".parse::<Date>().is_err());
        assert!("2024-13-01".parse::<Date>().is_err());
        assert!("01/02/2024".parse::<Date>().is_err());
        assert!(Date::from_calendar_date(2024, 0, 1).is_none());
    }

    #[test]
    fn adds_and_subtracts_days() {
        assert_eq!(date("2024-12-28").add_days(7), date("2025-01-04"));
        assert_eq!(date("2025-01-04").sub_days(7), date("2024-12-28"));
        assert_eq!(date("2025-01-04").days_since(date("2024-12-28")), 7);
        assert_eq!(date("2024-12-28").days_since(date("2025-01-04")), -7);
    }

    #[test]
    fn adds_months() {
        assert_eq!(date("2025-01-15").add_months(3), date("2025-04-15"));
        assert_eq!(date("2025-11-30").add_months(3), date("2026-02-28"));
        assert_eq!(date("2023-11-30").add_months(3), date("2024-02-29"));
        assert_eq!(date("2025-05-31").add_months(1), date("2025-06-30"));
        assert_eq!(date("2025-12-01").add_months(12), date("2026-12-01"));
        assert_eq!(date("2025-10-01").add_months(27), date("2028-01-01"));
        assert_eq!(date("2025-03-10").add_months(0), date("2025-03-10"));
    }
}
