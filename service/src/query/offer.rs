//! [`Query`] collection related to a single [`Offer`].

use common::operations::By;

use crate::domain::{offer, Offer};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Offer`] by its [`offer::Id`].
pub type ById = DatabaseQuery<By<Option<Offer>, offer::Id>>;
