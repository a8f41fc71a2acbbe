//! [`Offer`] definitions.

use common::{define_kind, unit, DateOf, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Property, PropertyType};
use crate::domain::{partner, property, property_type};

/// Bid of a partner on a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// ID of the [`Property`] this [`Offer`] is made on.
    ///
    /// Never changes after creation.
    pub property_id: property::Id,

    /// ID of the [`PropertyType`] of the [`Property`], kept in sync with it.
    pub property_type_id: Option<property_type::Id>,

    /// ID of the partner who made this [`Offer`].
    pub partner_id: partner::Id,

    /// Offered [`Price`].
    pub price: Price,

    /// [`Status`] of this [`Offer`], unset until it's decided.
    pub status: Option<Status>,

    /// [`Validity`] of this [`Offer`].
    pub validity: Validity,

    /// [`CreationDate`] of this [`Offer`].
    pub created_on: CreationDate,
}

impl Offer {
    /// Returns the [`DeadlineDate`] of this [`Offer`].
    #[must_use]
    pub fn deadline(&self) -> DeadlineDate {
        self.validity.after(self.created_on)
    }

    /// Moves the [`Offer::deadline()`] to the provided [`DeadlineDate`] by
    /// shifting the [`Offer::created_on`] date, so the [`Validity`] stays the
    /// same.
    pub fn set_deadline(&mut self, deadline: DeadlineDate) {
        self.created_on = deadline.sub_days(self.validity.days()).coerce();
    }

    /// Marks this [`Offer`] as [`Status::Accepted`].
    pub fn accept(&mut self) {
        self.status = Some(Status::Accepted);
    }

    /// Marks this [`Offer`] as [`Status::Refused`].
    pub fn refuse(&mut self) {
        self.status = Some(Status::Refused);
    }

    /// Creates an undecided copy of this [`Offer`] under the provided [`Id`].
    #[must_use]
    pub fn duplicate(&self, id: Id) -> Self {
        Self {
            id,
            status: None,
            ..self.clone()
        }
    }
}

/// ID of an [`Offer`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of days an [`Offer`] stays valid.
#[derive(
    Clone, Copy, Debug, Display, Eq, FromStr, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Validity(u16);

impl Validity {
    /// Default [`Validity`] of a new [`Offer`].
    pub const DEFAULT: Self = Self(7);

    /// Creates a new [`Validity`] of the provided number of `days`.
    #[must_use]
    pub const fn new(days: u16) -> Self {
        Self(days)
    }

    /// Computes the [`Validity`] of an [`Offer`] created on the provided date
    /// and expiring on the provided `deadline`.
    ///
    /// [`None`] is returned if the `deadline` precedes the creation date or is
    /// too far from it.
    #[must_use]
    pub fn between(created_on: CreationDate, deadline: DeadlineDate) -> Option<Self> {
        u16::try_from(deadline.days_since(created_on)).ok().map(Self)
    }

    /// Returns the number of days of this [`Validity`].
    #[must_use]
    pub fn days(self) -> i64 {
        i64::from(self.0)
    }

    /// Returns the [`DeadlineDate`] of an [`Offer`] created on the provided
    /// date.
    #[must_use]
    pub fn after(self, created_on: CreationDate) -> DeadlineDate {
        created_on.add_days(self.days()).coerce()
    }
}

impl Default for Validity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "postgres")]
impl<'a> FromSql<'a> for Validity {
    postgres_types::accepts!(INT4);

    fn from_sql(
        ty: &postgres_types::Type,
        raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(Self(u16::try_from(i32::from_sql(ty, raw)?)?))
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Validity {
    postgres_types::accepts!(INT4);
    postgres_types::to_sql_checked!();

    fn to_sql(
        &self,
        ty: &postgres_types::Type,
        w: &mut postgres_types::private::BytesMut,
    ) -> Result<postgres_types::IsNull, Box<dyn std::error::Error + Sync + Send>>
    {
        i32::from(self.0).to_sql(ty, w)
    }
}

/// Date an [`Offer`] was created on.
pub type CreationDate = DateOf<(Offer, unit::Creation)>;

/// Date an [`Offer`] expires on.
pub type DeadlineDate = DateOf<(Offer, unit::Deadline)>;

define_kind! {
    #[doc = "Decision made on an [`Offer`]."]
    enum Status {
        #[doc = "The [`Offer`] is accepted."]
        Accepted = 1,

        #[doc = "The [`Offer`] is refused."]
        Refused = 2,
    }
}

#[cfg(test)]
mod spec {
    use common::Price;

    use crate::domain::{partner, property};

    use super::{CreationDate, DeadlineDate, Id, Offer, Status, Validity};

    fn date(s: &str) -> CreationDate {
        s.parse().unwrap()
    }

    fn offer(validity: Validity) -> Offer {
        Offer {
            id: Id::new(),
            property_id: property::Id::new(),
            property_type_id: None,
            partner_id: partner::Id::from(uuid::Uuid::nil()),
            price: "95000".parse::<Price>().unwrap(),
            status: None,
            validity,
            created_on: date("2025-03-28"),
        }
    }

    #[test]
    fn computes_deadline() {
        let o = offer(Validity::DEFAULT);

        assert_eq!(o.deadline().to_string(), "2025-04-04");
        assert_eq!(offer(Validity::new(0)).deadline().to_string(), "2025-03-28");
    }

    #[test]
    fn deadline_round_trips_validity() {
        let o = offer(Validity::default());

        assert_eq!(
            Validity::between(o.created_on, o.deadline()),
            Some(Validity::new(7)),
        );
    }

    #[test]
    fn setting_deadline_shifts_creation_date() {
        let mut o = offer(Validity::new(7));

        o.set_deadline("2025-05-10".parse::<DeadlineDate>().unwrap());

        assert_eq!(o.created_on, date("2025-05-03"));
        assert_eq!(o.validity, Validity::new(7));
        assert_eq!(o.deadline().to_string(), "2025-05-10");
    }

    #[test]
    fn validity_between_rejects_past_deadline() {
        let created = date("2025-03-28");

        assert_eq!(
            Validity::between(created, "2025-03-27".parse().unwrap()),
            None,
        );
        assert_eq!(
            Validity::between(created, "2025-04-28".parse().unwrap()),
            Some(Validity::new(31)),
        );
    }

    #[test]
    fn decides() {
        let mut o = offer(Validity::DEFAULT);
        assert_eq!(o.status, None);

        o.accept();
        assert_eq!(o.status, Some(Status::Accepted));

        o.refuse();
        assert_eq!(o.status, Some(Status::Refused));
    }

    #[test]
    fn duplicates_undecided() {
        let mut o = offer(Validity::new(14));
        o.accept();

        let copy = o.duplicate(Id::new());

        assert_ne!(copy.id, o.id);
        assert_eq!(copy.status, None);
        assert_eq!(copy.price, o.price);
        assert_eq!(copy.validity, o.validity);
        assert_eq!(copy.property_id, o.property_id);
    }
}
