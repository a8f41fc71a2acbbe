//! [`PropertyType`]-related read definitions.

use derive_more::{Display, From, Into};

#[cfg(doc)]
use crate::domain::{Offer, Property, PropertyType};

/// Number of [`Offer`]s made on all the [`Property`]s of a [`PropertyType`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct OfferCount(u64);

impl PartialEq<u64> for OfferCount {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}
