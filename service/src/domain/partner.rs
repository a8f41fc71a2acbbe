//! [`Partner`] references.
//!
//! [`Partner`]s (buyers and bidders) are managed outside of this crate, only
//! their IDs are held.
//!
//! [`Partner`]: Id

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

/// ID of a business partner bidding on or buying a property.
#[derive(
    Clone,
    Copy,
    Debug,
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
