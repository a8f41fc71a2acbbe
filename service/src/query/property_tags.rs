//! [`Query`] collection related to multiple [`PropertyTag`]s.

use common::operations::By;

use crate::domain::PropertyTag;
#[cfg(doc)]
use crate::{domain::property_tag, Query};

use super::DatabaseQuery;

/// Queries all the [`PropertyTag`]s ordered by their [`property_tag::Name`].
pub type List = DatabaseQuery<By<Vec<PropertyTag>, ()>>;
