//! [`Query`] collection related to multiple [`PropertyType`]s.

use common::operations::By;

use crate::domain::PropertyType;
#[cfg(doc)]
use crate::{domain::property_type, Query};

use super::DatabaseQuery;

/// Queries all the [`PropertyType`]s ordered by their
/// [`property_type::Sequence`] and [`property_type::Name`].
pub type List = DatabaseQuery<By<Vec<PropertyType>, ()>>;
