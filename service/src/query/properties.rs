//! [`Query`] collection related to multiple [`Property`]s.

use common::operations::By;

use crate::{domain::Property, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Property`]s matching the provided
/// [`read::property::list::Filter`].
pub type List = DatabaseQuery<By<Vec<Property>, read::property::list::Filter>>;
