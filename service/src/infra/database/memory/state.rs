//! [`State`] of a [`Memory`] database.
//!
//! [`Memory`]: super::Memory

use std::collections::{BTreeSet, HashMap};

use crate::{
    domain::{
        offer, property, property_tag, property_type, Offer, Property,
        PropertyTag, PropertyType,
    },
    read,
};

use super::Error;

/// Foreign key of a [`Property`] to its [`PropertyType`].
const PROPERTY_TYPE_FK: &str = "properties_property_type_id_fkey";

/// Foreign key of an [`Offer`] to its [`Property`].
const OFFER_PROPERTY_FK: &str = "offers_property_id_fkey";

/// Foreign key of an [`Offer`] to its [`PropertyType`].
const OFFER_PROPERTY_TYPE_FK: &str = "offers_property_type_id_fkey";

/// Foreign key of a tagging to its [`Property`].
const TAGGING_PROPERTY_FK: &str = "property_taggings_property_id_fkey";

/// Foreign key of a tagging to its [`PropertyTag`].
const TAGGING_TAG_FK: &str = "property_taggings_property_tag_id_fkey";

/// All the records of a [`Memory`] database.
///
/// [`Memory`]: super::Memory
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Stored [`Property`]s.
    properties: HashMap<property::Id, Property>,

    /// Stored [`Offer`]s.
    offers: HashMap<offer::Id, Offer>,

    /// Stored [`PropertyType`]s.
    property_types: HashMap<property_type::Id, PropertyType>,

    /// Stored [`PropertyTag`]s.
    property_tags: HashMap<property_tag::Id, PropertyTag>,

    /// [`PropertyTag`]s applied to [`Property`]s.
    taggings: BTreeSet<(property::Id, property_tag::Id)>,
}

impl State {
    /// Returns the [`Property`] with the provided ID, if any.
    pub(super) fn property(&self, id: property::Id) -> Option<&Property> {
        self.properties.get(&id)
    }

    /// Returns the [`Property`]s matching the provided
    /// [`read::property::list::Filter`], by their names in descending order.
    pub(super) fn properties(
        &self,
        filter: &read::property::list::Filter,
    ) -> Vec<Property> {
        let mut found = self
            .properties
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| {
            let (a_name, b_name): (&str, &str) = (a.name.as_ref(), b.name.as_ref());
            b_name.cmp(a_name).then(a.id.cmp(&b.id))
        });
        found
    }

    /// Inserts or replaces the provided [`Property`].
    pub(super) fn put_property(&mut self, property: Property) -> Result<(), Error> {
        if let Some(type_id) = property.property_type_id {
            if !self.property_types.contains_key(&type_id) {
                return Err(Error::ForeignKeyViolation(PROPERTY_TYPE_FK));
            }
        }
        drop(self.properties.insert(property.id, property));
        Ok(())
    }

    /// Returns the [`Offer`] with the provided ID, if any.
    pub(super) fn offer(&self, id: offer::Id) -> Option<&Offer> {
        self.offers.get(&id)
    }

    /// Returns all the [`Offer`]s of the [`Property`] with the provided ID,
    /// the highest first.
    pub(super) fn offers_of(&self, property_id: property::Id) -> Vec<Offer> {
        let mut found = self
            .offers
            .values()
            .filter(|o| o.property_id == property_id)
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| b.price.cmp(&a.price).then(a.id.cmp(&b.id)));
        found
    }

    /// Inserts or replaces the provided [`Offer`].
    pub(super) fn put_offer(&mut self, offer: Offer) -> Result<(), Error> {
        if !self.properties.contains_key(&offer.property_id) {
            return Err(Error::ForeignKeyViolation(OFFER_PROPERTY_FK));
        }
        if let Some(type_id) = offer.property_type_id {
            if !self.property_types.contains_key(&type_id) {
                return Err(Error::ForeignKeyViolation(OFFER_PROPERTY_TYPE_FK));
            }
        }
        drop(self.offers.insert(offer.id, offer));
        Ok(())
    }

    /// Returns the [`property::Tags`] of the [`Property`] with the provided
    /// ID.
    pub(super) fn tags_of(&self, property_id: property::Id) -> property::Tags {
        property::Tags::new(
            property_id,
            self.taggings
                .range((property_id, property_tag::Id::default())..)
                .take_while(|(p, _)| *p == property_id)
                .map(|(_, t)| *t),
        )
    }

    /// Replaces the [`property::Tags`] of a [`Property`].
    pub(super) fn put_tags(&mut self, tags: property::Tags) -> Result<(), Error> {
        let property::Tags {
            property_id,
            tag_ids,
        } = tags;

        if !self.properties.contains_key(&property_id) {
            return Err(Error::ForeignKeyViolation(TAGGING_PROPERTY_FK));
        }
        if tag_ids.iter().any(|id| !self.property_tags.contains_key(id)) {
            return Err(Error::ForeignKeyViolation(TAGGING_TAG_FK));
        }

        self.taggings.retain(|(p, _)| *p != property_id);
        self.taggings
            .extend(tag_ids.into_iter().map(|t| (property_id, t)));
        Ok(())
    }

    /// Returns the [`PropertyType`] with the provided ID, if any.
    pub(super) fn property_type(
        &self,
        id: property_type::Id,
    ) -> Option<&PropertyType> {
        self.property_types.get(&id)
    }

    /// Returns the [`PropertyType`] with the provided [`property_type::Name`],
    /// if any.
    pub(super) fn property_type_by_name(
        &self,
        name: &property_type::Name,
    ) -> Option<&PropertyType> {
        self.property_types.values().find(|t| t.name == *name)
    }

    /// Returns all the [`PropertyType`]s ordered by their sequence and names.
    pub(super) fn property_types(&self) -> Vec<PropertyType> {
        let mut all = self.property_types.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| {
            a.sequence
                .cmp(&b.sequence)
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        all
    }

    /// Counts the [`Offer`]s made on all the [`Property`]s of the
    /// [`PropertyType`] with the provided ID.
    pub(super) fn offer_count(
        &self,
        type_id: property_type::Id,
    ) -> read::property_type::OfferCount {
        let count = self
            .offers
            .values()
            .filter(|o| {
                self.properties
                    .get(&o.property_id)
                    .is_some_and(|p| p.property_type_id == Some(type_id))
            })
            .count();
        read::property_type::OfferCount::from(
            u64::try_from(count).unwrap_or(u64::MAX),
        )
    }

    /// Inserts or replaces the provided [`PropertyType`].
    pub(super) fn put_property_type(
        &mut self,
        ty: PropertyType,
    ) -> Result<(), Error> {
        if self
            .property_type_by_name(&ty.name)
            .is_some_and(|t| t.id != ty.id)
        {
            return Err(Error::UniqueViolation(property_type::NAME_CONSTRAINT));
        }
        drop(self.property_types.insert(ty.id, ty));
        Ok(())
    }

    /// Removes the [`PropertyType`] with the provided ID, unsetting it
    /// wherever it's referenced.
    pub(super) fn remove_property_type(&mut self, id: property_type::Id) {
        if self.property_types.remove(&id).is_none() {
            return;
        }
        for p in self.properties.values_mut() {
            if p.property_type_id == Some(id) {
                p.property_type_id = None;
            }
        }
        for o in self.offers.values_mut() {
            if o.property_type_id == Some(id) {
                o.property_type_id = None;
            }
        }
    }

    /// Returns the [`PropertyTag`] with the provided ID, if any.
    pub(super) fn property_tag(
        &self,
        id: property_tag::Id,
    ) -> Option<&PropertyTag> {
        self.property_tags.get(&id)
    }

    /// Returns the [`PropertyTag`] with the provided [`property_tag::Name`],
    /// if any.
    pub(super) fn property_tag_by_name(
        &self,
        name: &property_tag::Name,
    ) -> Option<&PropertyTag> {
        self.property_tags.values().find(|t| t.name == *name)
    }

    /// Returns all the [`PropertyTag`]s ordered by their names.
    pub(super) fn property_tags(&self) -> Vec<PropertyTag> {
        let mut all = self.property_tags.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        all
    }

    /// Inserts or replaces the provided [`PropertyTag`].
    pub(super) fn put_property_tag(&mut self, tag: PropertyTag) -> Result<(), Error> {
        if self
            .property_tag_by_name(&tag.name)
            .is_some_and(|t| t.id != tag.id)
        {
            return Err(Error::UniqueViolation(property_tag::NAME_CONSTRAINT));
        }
        drop(self.property_tags.insert(tag.id, tag));
        Ok(())
    }

    /// Removes the [`PropertyTag`] with the provided ID along with its
    /// taggings.
    pub(super) fn remove_property_tag(&mut self, id: property_tag::Id) {
        if self.property_tags.remove(&id).is_some() {
            self.taggings.retain(|(_, t)| *t != id);
        }
    }
}
