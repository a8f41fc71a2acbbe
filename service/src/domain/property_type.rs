//! [`PropertyType`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Offer, Property};

/// Category of [`Property`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyType {
    /// ID of this [`PropertyType`].
    pub id: Id,

    /// Unique [`Name`] of this [`PropertyType`].
    pub name: Name,

    /// [`Sequence`] this [`PropertyType`] is ordered by.
    pub sequence: Sequence,
}

/// ID of a [`PropertyType`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`PropertyType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Display ordering position of a [`PropertyType`].
pub type Sequence = i32;

/// Default [`Sequence`] of a new [`PropertyType`].
pub const DEFAULT_SEQUENCE: Sequence = 1;

/// Name of the uniqueness constraint on [`PropertyType`] names.
pub const NAME_CONSTRAINT: &str = "property_types_name_unique";

#[cfg(test)]
mod spec {
    use super::Name;

    #[test]
    fn validates_name() {
        assert!(Name::new("House").is_some());
        assert!(Name::new("Apartment block").is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new(" House").is_none());
        assert!(Name::new("House\n").is_none());
        assert!(Name::new("x".repeat(513)).is_none());
    }

    #[test]
    fn orders_names() {
        let a = Name::new("Apartment").unwrap();
        let h = Name::new("House").unwrap();

        assert!(a < h);
    }
}
