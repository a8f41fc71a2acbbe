//! [`Property`] definitions.

mod changes;

use std::collections::BTreeSet;

#[cfg(doc)]
use common::Date;
use common::{define_kind, unit, DateOf, Percent, Price};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Offer, PropertyTag, PropertyType};
use crate::domain::{partner, property_tag, property_type, user};

pub use self::changes::Changes;

/// Real estate listed for sale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// [`Postcode`] this [`Property`] is located at.
    pub postcode: Postcode,

    /// [`Date`] this [`Property`] becomes available from.
    pub date_availability: AvailabilityDate,

    /// [`Price`] the seller expects to get for this [`Property`].
    pub expected_price: Price,

    /// [`Price`] of the accepted [`Offer`], if any.
    ///
    /// Never edited directly, only by accepting an [`Offer`].
    pub selling_price: Price,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Bedrooms,

    /// Living [`Area`] of this [`Property`].
    pub living_area: Area,

    /// Number of facades of this [`Property`].
    pub facades: Facades,

    /// Indicator whether this [`Property`] has a garage.
    pub garage: bool,

    /// Indicator whether this [`Property`] has a garden.
    pub garden: bool,

    /// Garden [`Area`] of this [`Property`].
    pub garden_area: Area,

    /// [`GardenOrientation`] of this [`Property`], if known.
    pub garden_orientation: Option<GardenOrientation>,

    /// Indicator whether this [`Property`] is listed.
    ///
    /// `false` means it's archived (soft-deleted).
    pub active: bool,

    /// Lifecycle [`State`] of this [`Property`].
    pub state: State,

    /// ID of the [`PropertyType`] of this [`Property`], if any.
    pub property_type_id: Option<property_type::Id>,

    /// ID of the salesman responsible for this [`Property`].
    pub seller_id: user::Id,

    /// ID of the partner who bought this [`Property`], if any.
    pub buyer_id: Option<partner::Id>,
}

impl Property {
    /// [`Field`]s the [`Property::total_area()`] is derived from.
    pub const TOTAL_AREA_DEPENDS_ON: &'static [Field] =
        &[Field::LivingArea, Field::GardenArea];

    /// [`Field`]s whose writes require [`Property::check_selling_price()`] to
    /// pass before being committed.
    pub const PRICE_CONSTRAINED: &'static [Field] =
        &[Field::ExpectedPrice, Field::SellingPrice, Field::State];

    /// Returns total [`Area`] of this [`Property`].
    #[must_use]
    pub fn total_area(&self) -> TotalArea {
        TotalArea::from(self.living_area) + TotalArea::from(self.garden_area)
    }

    /// Checks that an accepted [`Offer`] is not too low comparing to the
    /// [`Property::expected_price`].
    ///
    /// # Errors
    ///
    /// If this [`Property`] is in [`State::OfferAccepted`] and its
    /// [`Property::selling_price`] is below `min_ratio` of its
    /// [`Property::expected_price`].
    pub fn check_selling_price(&self, min_ratio: Percent) -> Result<(), PriceError> {
        if self.state == State::OfferAccepted
            && self.selling_price < min_ratio.of(self.expected_price)
        {
            return Err(PriceError {
                selling_price: self.selling_price,
                expected_price: self.expected_price,
                min_ratio,
            });
        }
        Ok(())
    }

    /// Marks this [`Property`] as sold.
    ///
    /// # Errors
    ///
    /// With [`TransitionError::SellCanceled`] if this [`Property`] is
    /// [`State::Canceled`], leaving it untouched.
    pub fn sell(&mut self) -> Result<(), TransitionError> {
        if self.state == State::Canceled {
            return Err(TransitionError::SellCanceled);
        }
        self.state = State::Sold;
        Ok(())
    }

    /// Marks this [`Property`] as canceled.
    ///
    /// # Errors
    ///
    /// With [`TransitionError::CancelSold`] if this [`Property`] is
    /// [`State::Sold`], leaving it untouched.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.state == State::Sold {
            return Err(TransitionError::CancelSold);
        }
        self.state = State::Canceled;
        Ok(())
    }

    /// Moves this [`Property`] into the provided [`State`].
    ///
    /// [`State::Sold`] and [`State::Canceled`] are reached via
    /// [`Property::sell()`] and [`Property::cancel()`] respectively. Once
    /// finalized, a [`Property`] can't leave its [`State`] anymore.
    ///
    /// # Errors
    ///
    /// If the transition is not allowed, leaving this [`Property`] untouched.
    pub fn transit(&mut self, to: State) -> Result<(), TransitionError> {
        match to {
            State::Sold => self.sell(),
            State::Canceled => self.cancel(),
            State::New | State::OfferReceived | State::OfferAccepted => {
                if self.state.is_final() && self.state != to {
                    return Err(TransitionError::Finalized {
                        from: self.state,
                        to,
                    });
                }
                self.state = to;
                Ok(())
            }
        }
    }

    /// Applies the provided [`Changes`] to this [`Property`], returning the
    /// touched [`Field`]s.
    ///
    /// # Errors
    ///
    /// If the [`Changes`] contain a disallowed [`State`] transition. Nothing
    /// is applied in such case.
    pub fn apply(&mut self, changes: Changes) -> Result<Vec<Field>, TransitionError> {
        let Changes {
            name,
            description,
            postcode,
            date_availability,
            expected_price,
            bedrooms,
            living_area,
            facades,
            garage,
            garden,
            garden_area,
            garden_orientation,
            active,
            state,
            property_type_id,
            seller_id,
        } = changes;

        let mut touched = vec![];
        if let Some(state) = state {
            self.transit(state)?;
            touched.push(Field::State);
        }

        set(&mut self.name, name, Field::Name, &mut touched);
        set(&mut self.description, description, Field::Description, &mut touched);
        set(&mut self.postcode, postcode, Field::Postcode, &mut touched);
        set(
            &mut self.date_availability,
            date_availability,
            Field::DateAvailability,
            &mut touched,
        );
        set(
            &mut self.expected_price,
            expected_price,
            Field::ExpectedPrice,
            &mut touched,
        );
        set(&mut self.bedrooms, bedrooms, Field::Bedrooms, &mut touched);
        set(&mut self.living_area, living_area, Field::LivingArea, &mut touched);
        set(&mut self.facades, facades, Field::Facades, &mut touched);
        set(&mut self.garage, garage, Field::Garage, &mut touched);
        set(&mut self.garden, garden, Field::Garden, &mut touched);
        set(&mut self.garden_area, garden_area, Field::GardenArea, &mut touched);
        set(
            &mut self.garden_orientation,
            garden_orientation,
            Field::GardenOrientation,
            &mut touched,
        );
        set(&mut self.active, active, Field::Active, &mut touched);
        set(
            &mut self.property_type_id,
            property_type_id,
            Field::PropertyType,
            &mut touched,
        );
        set(&mut self.seller_id, seller_id, Field::Seller, &mut touched);

        Ok(touched)
    }

    /// Creates a copy of this [`Property`] under the provided [`Id`].
    ///
    /// The copy starts over in [`State::New`], without a buyer and a selling
    /// price, becoming available from the provided [`Date`].
    #[must_use]
    pub fn duplicate(&self, id: Id, date_availability: AvailabilityDate) -> Self {
        Self {
            id,
            date_availability,
            selling_price: Price::ZERO,
            state: State::New,
            buyer_id: None,
            ..self.clone()
        }
    }
}

/// Overwrites the `field` with the provided `value`, if any, recording the
/// `touched` [`Field`].
fn set<T>(field: &mut T, value: Option<T>, name: Field, touched: &mut Vec<Field>) {
    if let Some(value) = value {
        *field = value;
        touched.push(name);
    }
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl Default for Name {
    fn default() -> Self {
        Self("New".to_owned())
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Free-form description of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    ///
    /// Unlike other texts, a [`Description`] may span multiple lines.
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 4096
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Postcode of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Postcode(String);

impl Postcode {
    /// Creates a new [`Postcode`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`Postcode`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Postcode`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        code.trim() == code && !code.is_empty() && code.len() <= 512
    }
}

impl FromStr for Postcode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Postcode`")
    }
}

/// Number of bedrooms in a [`Property`].
pub type Bedrooms = u16;

/// Number of facades of a [`Property`].
pub type Facades = u16;

/// Area of a [`Property`] part in square meters.
pub type Area = u32;

/// Total area of a [`Property`] in square meters.
pub type TotalArea = u64;

/// [`Date`] when a [`Property`] becomes available.
pub type AvailabilityDate = DateOf<(Property, unit::Availability)>;

/// Default number of [`Bedrooms`] in a new [`Property`].
pub const DEFAULT_BEDROOMS: Bedrooms = 2;

/// Garden [`Area`] suggested when a garden is toggled on interactively.
pub const DEFAULT_GARDEN_AREA: Area = 10;

define_kind! {
    #[doc = "Lifecycle state of a [`Property`]."]
    enum State {
        #[doc = "Just listed, no offers yet."]
        New = 1,

        #[doc = "At least one offer has been received."]
        OfferReceived = 2,

        #[doc = "An offer has been accepted."]
        OfferAccepted = 3,

        #[doc = "Sold. Final."]
        Sold = 4,

        #[doc = "Withdrawn from sale. Final."]
        Canceled = 5,
    }
}

impl State {
    /// Indicates whether this [`State`] can't be left anymore.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Sold | Self::Canceled)
    }
}

define_kind! {
    #[doc = "Side of the world a [`Property`] garden faces."]
    enum GardenOrientation {
        #[doc = "North."]
        North = 1,

        #[doc = "South."]
        South = 2,

        #[doc = "East."]
        East = 3,

        #[doc = "West."]
        West = 4,
    }
}

/// Writable field of a [`Property`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Property::name`].
    Name,

    /// [`Property::description`].
    Description,

    /// [`Property::postcode`].
    Postcode,

    /// [`Property::date_availability`].
    DateAvailability,

    /// [`Property::expected_price`].
    ExpectedPrice,

    /// [`Property::selling_price`].
    SellingPrice,

    /// [`Property::bedrooms`].
    Bedrooms,

    /// [`Property::living_area`].
    LivingArea,

    /// [`Property::facades`].
    Facades,

    /// [`Property::garage`].
    Garage,

    /// [`Property::garden`].
    Garden,

    /// [`Property::garden_area`].
    GardenArea,

    /// [`Property::garden_orientation`].
    GardenOrientation,

    /// [`Property::active`].
    Active,

    /// [`Property::state`].
    State,

    /// [`Property::property_type_id`].
    PropertyType,

    /// [`Property::seller_id`].
    Seller,

    /// [`Property::buyer_id`].
    Buyer,
}

/// [`PropertyTag`]s applied to a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tags {
    /// ID of the tagged [`Property`].
    pub property_id: Id,

    /// IDs of the applied [`PropertyTag`]s.
    pub tag_ids: BTreeSet<property_tag::Id>,
}

impl Tags {
    /// Creates new [`Tags`] of the [`Property`] with the provided ID.
    #[must_use]
    pub fn new(
        property_id: Id,
        tag_ids: impl IntoIterator<Item = property_tag::Id>,
    ) -> Self {
        Self {
            property_id,
            tag_ids: tag_ids.into_iter().collect(),
        }
    }
}

/// Error of an invalid [`State`] transition of a [`Property`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum TransitionError {
    /// [`State::Canceled`] [`Property`] was tried to be sold.
    #[display("Canceled properties cannot be sold.")]
    SellCanceled,

    /// [`State::Sold`] [`Property`] was tried to be canceled.
    #[display("Sold properties cannot be canceled.")]
    CancelSold,

    /// Finalized [`Property`] was tried to be moved into another [`State`].
    #[display("`{from}` properties cannot become `{to}`.")]
    Finalized {
        /// [`State`] the [`Property`] is in.
        from: State,

        /// [`State`] the [`Property`] was tried to be moved into.
        to: State,
    },
}

/// Error of a [`Property`] selling price being too low.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display(
    "The selling price must be at least {min_ratio}% of the expected price! \
     You must reduce the expected price if you want to accept this offer."
)]
pub struct PriceError {
    /// [`Property::selling_price`] being checked.
    pub selling_price: Price,

    /// [`Property::expected_price`] being checked against.
    pub expected_price: Price,

    /// Minimal allowed ratio of the selling price to the expected one.
    pub min_ratio: Percent,
}

#[cfg(test)]
mod spec {
    use common::{Percent, Price};

    use crate::domain::{partner, user};

    use super::{
        AvailabilityDate, Changes, Description, Field, GardenOrientation, Id,
        Name, Postcode, PriceError, Property, State, TransitionError,
    };

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn ninety() -> Percent {
        "90".parse().unwrap()
    }

    fn property(state: State) -> Property {
        Property {
            id: Id::new(),
            name: Name::default(),
            description: Description::new("Cosy cottage").unwrap(),
            postcode: Postcode::new("1000").unwrap(),
            date_availability: AvailabilityDate::today(),
            expected_price: price("100000"),
            selling_price: Price::ZERO,
            bedrooms: 2,
            living_area: 120,
            facades: 2,
            garage: false,
            garden: false,
            garden_area: 0,
            garden_orientation: None,
            active: true,
            state,
            property_type_id: None,
            seller_id: user::Id::from(uuid::Uuid::nil()),
            buyer_id: None,
        }
    }

    #[test]
    fn total_area_sums_living_and_garden() {
        let mut p = property(State::New);
        assert_eq!(p.total_area(), 120);

        let touched = p
            .apply(Changes {
                garden_area: Some(30),
                ..Changes::default()
            })
            .unwrap();
        assert!(touched
            .iter()
            .any(|f| Property::TOTAL_AREA_DEPENDS_ON.contains(f)));
        assert_eq!(p.total_area(), 150);

        p.living_area = u32::MAX;
        p.garden_area = u32::MAX;
        assert_eq!(p.total_area(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn sells() {
        for state in [State::New, State::OfferReceived, State::OfferAccepted, State::Sold] {
            let mut p = property(state);
            assert_eq!(p.sell(), Ok(()));
            assert_eq!(p.state, State::Sold);
        }
    }

    #[test]
    fn refuses_to_sell_canceled() {
        let mut p = property(State::Canceled);

        assert_eq!(p.sell(), Err(TransitionError::SellCanceled));
        assert_eq!(p.state, State::Canceled);
    }

    #[test]
    fn cancels() {
        for state in
            [State::New, State::OfferReceived, State::OfferAccepted, State::Canceled]
        {
            let mut p = property(state);
            assert_eq!(p.cancel(), Ok(()));
            assert_eq!(p.state, State::Canceled);
        }
    }

    #[test]
    fn refuses_to_cancel_sold() {
        let mut p = property(State::Sold);

        assert_eq!(p.cancel(), Err(TransitionError::CancelSold));
        assert_eq!(p.state, State::Sold);
    }

    #[test]
    fn transits() {
        let mut p = property(State::New);
        assert_eq!(p.transit(State::OfferReceived), Ok(()));
        assert_eq!(p.transit(State::OfferAccepted), Ok(()));
        assert_eq!(p.transit(State::New), Ok(()));
        assert_eq!(p.transit(State::Sold), Ok(()));
        assert_eq!(p.transit(State::Sold), Ok(()));
        assert_eq!(
            p.transit(State::OfferReceived),
            Err(TransitionError::Finalized {
                from: State::Sold,
                to: State::OfferReceived,
            }),
        );
        assert_eq!(p.transit(State::Canceled), Err(TransitionError::CancelSold));
        assert_eq!(p.state, State::Sold);

        let mut p = property(State::Canceled);
        assert_eq!(p.transit(State::Sold), Err(TransitionError::SellCanceled));
        assert!(p.transit(State::OfferAccepted).is_err());
        assert_eq!(p.state, State::Canceled);
    }

    #[test]
    fn checks_selling_price_only_when_accepted() {
        let mut p = property(State::OfferReceived);
        p.selling_price = price("1");
        assert_eq!(p.check_selling_price(ninety()), Ok(()));

        p.state = State::OfferAccepted;
        assert_eq!(
            p.check_selling_price(ninety()),
            Err(PriceError {
                selling_price: price("1"),
                expected_price: price("100000"),
                min_ratio: ninety(),
            }),
        );
    }

    #[test]
    fn selling_price_boundary_is_inclusive() {
        let mut p = property(State::OfferAccepted);

        p.selling_price = price("89999.99");
        assert!(p.check_selling_price(ninety()).is_err());

        p.selling_price = price("90000");
        assert_eq!(p.check_selling_price(ninety()), Ok(()));

        p.selling_price = price("95000");
        assert_eq!(p.check_selling_price(ninety()), Ok(()));
    }

    #[test]
    fn price_error_message_is_human_readable() {
        let err = PriceError {
            selling_price: price("1"),
            expected_price: price("100"),
            min_ratio: ninety(),
        };

        assert_eq!(
            err.to_string(),
            "The selling price must be at least 90% of the expected price! \
             You must reduce the expected price if you want to accept this \
             offer.",
        );
    }

    #[test]
    fn applies_changes() {
        let mut p = property(State::New);

        let touched = p
            .apply(Changes {
                name: Some(Name::new("Villa").unwrap()),
                expected_price: Some(price("250000")),
                state: Some(State::OfferReceived),
                ..Changes::default()
            })
            .unwrap();

        assert_eq!(p.name.to_string(), "Villa");
        assert_eq!(p.expected_price, price("250000"));
        assert_eq!(p.state, State::OfferReceived);
        assert_eq!(touched.len(), 3);
        assert!(touched.contains(&Field::State));
        assert!(touched.contains(&Field::ExpectedPrice));
        assert!(touched.contains(&Field::Name));
    }

    #[test]
    fn applies_nothing_on_disallowed_transition() {
        let mut p = property(State::Sold);

        let res = p.apply(Changes {
            name: Some(Name::new("Villa").unwrap()),
            state: Some(State::New),
            ..Changes::default()
        });

        assert!(res.is_err());
        assert_eq!(p.name, Name::default());
        assert_eq!(p.state, State::Sold);
    }

    #[test]
    fn toggles_garden_defaults_interactively() {
        let mut p = property(State::New);

        _ = p.apply(Changes::default().toggle_garden(true)).unwrap();
        assert!(p.garden);
        assert_eq!(p.garden_area, 10);
        assert_eq!(p.garden_orientation, Some(GardenOrientation::North));

        _ = p.apply(Changes::default().toggle_garden(false)).unwrap();
        assert!(!p.garden);
        assert_eq!(p.garden_area, 0);
        assert_eq!(p.garden_orientation, None);
    }

    #[test]
    fn programmatic_garden_write_keeps_other_fields() {
        let mut p = property(State::New);
        p.garden_area = 42;

        _ = p
            .apply(Changes {
                garden: Some(true),
                ..Changes::default()
            })
            .unwrap();

        assert!(p.garden);
        assert_eq!(p.garden_area, 42);
        assert_eq!(p.garden_orientation, None);
    }

    #[test]
    fn duplicates_without_sale_details() {
        let mut p = property(State::OfferAccepted);
        p.selling_price = price("95000");
        p.buyer_id = Some(partner::Id::from(uuid::Uuid::nil()));
        let available = AvailabilityDate::today().add_months(3);

        let copy = p.duplicate(Id::new(), available);

        assert_ne!(copy.id, p.id);
        assert_eq!(copy.selling_price, Price::ZERO);
        assert_eq!(copy.buyer_id, None);
        assert_eq!(copy.state, State::New);
        assert_eq!(copy.date_availability, available);
        assert_eq!(copy.expected_price, p.expected_price);
        assert_eq!(copy.name, p.name);
        assert_eq!(copy.seller_id, p.seller_id);
    }

    #[test]
    fn validates_texts() {
        assert_eq!(Name::default().to_string(), "New");
        assert!(Name::new("").is_none());
        assert!(Name::new(" Villa").is_none());
        assert!("Villa".parse::<Name>().is_ok());

        assert!(Description::new("Two floors.\nBig garden.").is_some());
        assert!(Description::new("").is_none());
        assert!(Description::new("x".repeat(4097)).is_none());

        assert!(Postcode::new("75001").is_some());
        assert!(Postcode::new("75001 ").is_none());
    }

    #[test]
    fn parses_kinds() {
        assert_eq!("OFFER_ACCEPTED".parse::<State>().unwrap(), State::OfferAccepted);
        assert_eq!(State::Canceled.to_string(), "CANCELED");
        assert_eq!(State::from_u8(4), Some(State::Sold));
        assert_eq!(State::from_u8(9), None);
        assert_eq!(
            "WEST".parse::<GardenOrientation>().unwrap(),
            GardenOrientation::West,
        );
    }
}
