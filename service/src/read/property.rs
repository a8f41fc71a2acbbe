//! [`Property`]-related read definitions.

use common::Price;
use derive_more::{Deref, Display, From, Into};

use crate::domain::Offer;
#[cfg(doc)]
use crate::domain::Property;

/// Highest [`Price`] offered for a [`Property`].
///
/// Zero if there are no [`Offer`]s yet.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deref,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct BestPrice(Price);

impl BestPrice {
    /// Computes the [`BestPrice`] among the provided [`Offer`]s.
    #[must_use]
    pub fn of<'a>(offers: impl IntoIterator<Item = &'a Offer>) -> Self {
        Self(offers.into_iter().map(|o| o.price).max().unwrap_or_default())
    }
}

impl PartialEq<Price> for BestPrice {
    fn eq(&self, other: &Price) -> bool {
        self.0 == *other
    }
}

pub mod list {
    //! [`Property`] list definitions.

    use smart_default::SmartDefault;

    use crate::domain::{property, property_type};
    #[cfg(doc)]
    use crate::domain::{Property, PropertyType};

    /// Filter of a [`Property`] list.
    ///
    /// [`Property`]s are listed by their [`property::Name`] in descending
    /// order.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
    pub struct Filter {
        /// [`Property::active`] flag to match, if any.
        ///
        /// Archived [`Property`]s are hidden by default.
        #[default(Some(true))]
        pub active: Option<bool>,

        /// [`property::State`] to match, if any.
        pub state: Option<property::State>,

        /// ID of the [`PropertyType`] to match, if any.
        pub property_type_id: Option<property_type::Id>,
    }

    impl Filter {
        /// Checks whether the provided [`Property`] matches this [`Filter`].
        #[must_use]
        pub fn matches(&self, property: &property::Property) -> bool {
            let Self {
                active,
                state,
                property_type_id,
            } = *self;

            active.map_or(true, |a| property.active == a)
                && state.map_or(true, |s| property.state == s)
                && property_type_id
                    .map_or(true, |t| property.property_type_id == Some(t))
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Price;

    use crate::domain::{offer, partner, property, Offer};

    use super::BestPrice;

    fn offer(price: &str) -> Offer {
        Offer {
            id: offer::Id::new(),
            property_id: property::Id::new(),
            property_type_id: None,
            partner_id: partner::Id::from(uuid::Uuid::nil()),
            price: price.parse().unwrap(),
            status: None,
            validity: offer::Validity::DEFAULT,
            created_on: offer::CreationDate::today(),
        }
    }

    #[test]
    fn zero_without_offers() {
        assert_eq!(BestPrice::of(Vec::<&Offer>::new()), Price::ZERO);
    }

    #[test]
    fn max_of_offers() {
        let offers = [offer("90000"), offer("95000.50"), offer("91000")];

        assert_eq!(BestPrice::of(&offers), "95000.5".parse::<Price>().unwrap());
    }
}
