//! [`Query`] collection related to a single [`PropertyTag`].

use common::operations::By;

use crate::domain::{property_tag, PropertyTag};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`PropertyTag`] by its [`property_tag::Id`].
pub type ById = DatabaseQuery<By<Option<PropertyTag>, property_tag::Id>>;

/// Queries a [`PropertyTag`] by its [`property_tag::Name`].
pub type ByName = DatabaseQuery<By<Option<PropertyTag>, property_tag::Name>>;
