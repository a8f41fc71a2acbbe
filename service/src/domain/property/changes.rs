//! [`Changes`] definitions.

use common::Price;

#[cfg(doc)]
use super::Property;
use super::{
    Area, AvailabilityDate, Bedrooms, Description, Facades, GardenOrientation,
    Name, Postcode, State, DEFAULT_GARDEN_AREA,
};
use crate::domain::{property_type, user};

/// Partial update of a [`Property`].
///
/// [`None`] means "leave as is". [`Property::selling_price`] and
/// [`Property::buyer_id`] are absent, being written only by accepting an
/// offer.
#[derive(Clone, Debug, Default)]
pub struct Changes {
    /// New [`Property::name`].
    pub name: Option<Name>,

    /// New [`Property::description`].
    pub description: Option<Description>,

    /// New [`Property::postcode`].
    pub postcode: Option<Postcode>,

    /// New [`Property::date_availability`].
    pub date_availability: Option<AvailabilityDate>,

    /// New [`Property::expected_price`].
    pub expected_price: Option<Price>,

    /// New [`Property::bedrooms`].
    pub bedrooms: Option<Bedrooms>,

    /// New [`Property::living_area`].
    pub living_area: Option<Area>,

    /// New [`Property::facades`].
    pub facades: Option<Facades>,

    /// New [`Property::garage`].
    pub garage: Option<bool>,

    /// New [`Property::garden`].
    pub garden: Option<bool>,

    /// New [`Property::garden_area`].
    pub garden_area: Option<Area>,

    /// New [`Property::garden_orientation`], where `Some(None)` clears it.
    pub garden_orientation: Option<Option<GardenOrientation>>,

    /// New [`Property::active`].
    pub active: Option<bool>,

    /// New [`Property::state`].
    pub state: Option<State>,

    /// New [`Property::property_type_id`], where `Some(None)` clears it.
    pub property_type_id: Option<Option<property_type::Id>>,

    /// New [`Property::seller_id`].
    pub seller_id: Option<user::Id>,
}

impl Changes {
    /// Toggles the garden the way an interactive editor does, filling in the
    /// suggested garden defaults.
    ///
    /// Turning it on sets a `10` sqm garden facing
    /// [`GardenOrientation::North`], turning it off clears both.
    #[must_use]
    pub fn toggle_garden(mut self, garden: bool) -> Self {
        self.garden = Some(garden);
        if garden {
            self.garden_area = Some(DEFAULT_GARDEN_AREA);
            self.garden_orientation = Some(Some(GardenOrientation::North));
        } else {
            self.garden_area = Some(0);
            self.garden_orientation = Some(None);
        }
        self
    }

    /// Indicates whether these [`Changes`] change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            description,
            postcode,
            date_availability,
            expected_price,
            bedrooms,
            living_area,
            facades,
            garage,
            garden,
            garden_area,
            garden_orientation,
            active,
            state,
            property_type_id,
            seller_id,
        } = self;

        name.is_none()
            && description.is_none()
            && postcode.is_none()
            && date_availability.is_none()
            && expected_price.is_none()
            && bedrooms.is_none()
            && living_area.is_none()
            && facades.is_none()
            && garage.is_none()
            && garden.is_none()
            && garden_area.is_none()
            && garden_orientation.is_none()
            && active.is_none()
            && state.is_none()
            && property_type_id.is_none()
            && seller_id.is_none()
    }
}
