//! [`Query`] collection related to a single [`PropertyType`].

use common::operations::By;

use crate::{
    domain::{property_type, PropertyType},
    read,
};
#[cfg(doc)]
use crate::{domain::Offer, Query};

use super::DatabaseQuery;

/// Queries a [`PropertyType`] by its [`property_type::Id`].
pub type ById = DatabaseQuery<By<Option<PropertyType>, property_type::Id>>;

/// Queries a [`PropertyType`] by its [`property_type::Name`].
pub type ByName = DatabaseQuery<By<Option<PropertyType>, property_type::Name>>;

/// Queries the number of [`Offer`]s made within a [`PropertyType`].
pub type OfferCount =
    DatabaseQuery<By<read::property_type::OfferCount, property_type::Id>>;
