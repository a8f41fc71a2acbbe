//! [`Query`] collection related to a single [`Property`].

use common::operations::By;

use crate::{
    domain::{property, Offer, Property},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries the [`read::property::BestPrice`] of a [`Property`].
pub type BestPrice =
    DatabaseQuery<By<read::property::BestPrice, property::Id>>;

/// Queries all the [`Offer`]s made on a [`Property`], the highest first.
pub type Offers = DatabaseQuery<By<Vec<Offer>, property::Id>>;

/// Queries the [`property::Tags`] of a [`Property`].
pub type Tags = DatabaseQuery<By<property::Tags, property::Id>>;
