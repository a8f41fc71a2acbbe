//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::property::{
    Area, AvailabilityDate, Bedrooms, Description, Facades, GardenOrientation,
    Name, Postcode,
};
use crate::{
    domain::{
        property, property_tag, property_type, user, Property, PropertyTag,
        PropertyType,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// ID of the [`User`] creating the [`Property`].
    ///
    /// Becomes the seller, unless [`CreateProperty::seller_id`] is specified.
    ///
    /// [`User`]: crate::domain::user
    pub initiator_id: user::Id,

    /// [`Name`] of a new [`Property`].
    ///
    /// [`None`] means the default one.
    pub name: Option<property::Name>,

    /// [`Description`] of a new [`Property`].
    pub description: property::Description,

    /// [`Postcode`] of a new [`Property`].
    pub postcode: property::Postcode,

    /// [`AvailabilityDate`] of a new [`Property`].
    ///
    /// [`None`] means the configured number of months after today.
    pub date_availability: Option<property::AvailabilityDate>,

    /// Price the seller expects for a new [`Property`].
    pub expected_price: Price,

    /// [`Bedrooms`] of a new [`Property`].
    pub bedrooms: Option<property::Bedrooms>,

    /// Living [`Area`] of a new [`Property`].
    pub living_area: property::Area,

    /// [`Facades`] of a new [`Property`].
    pub facades: property::Facades,

    /// Indicator whether a new [`Property`] has a garage.
    pub garage: bool,

    /// Indicator whether a new [`Property`] has a garden.
    pub garden: bool,

    /// Garden [`Area`] of a new [`Property`].
    pub garden_area: property::Area,

    /// [`GardenOrientation`] of a new [`Property`].
    pub garden_orientation: Option<property::GardenOrientation>,

    /// ID of the [`PropertyType`] of a new [`Property`].
    pub property_type_id: Option<property_type::Id>,

    /// ID of the [`User`] selling a new [`Property`].
    ///
    /// [`User`]: crate::domain::user
    pub seller_id: Option<user::Id>,

    /// IDs of the [`PropertyTag`]s to tag a new [`Property`] with.
    pub tag_ids: Vec<property_tag::Id>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyType>, property_type::Id>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PropertyTag>, property_tag::Id>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Update<property::Tags>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            initiator_id,
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
            property_type_id,
            seller_id,
            tag_ids,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(id) = property_type_id {
            tx.execute(Select(By::<Option<PropertyType>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyTypeNotExists(id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }
        for &id in &tag_ids {
            tx.execute(Select(By::<Option<PropertyTag>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyTagNotExists(id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let property = Property {
            id: property::Id::new(),
            name: name.unwrap_or_default(),
            description,
            postcode,
            date_availability: date_availability.unwrap_or_else(|| {
                property::AvailabilityDate::today()
                    .add_months(self.config().availability_delay_months)
            }),
            expected_price,
            selling_price: Price::ZERO,
            bedrooms: bedrooms.unwrap_or(property::DEFAULT_BEDROOMS),
            living_area,
            facades,
            garage,
            garden,
            garden_area,
            garden_orientation,
            active: true,
            state: property::State::New,
            property_type_id,
            seller_id: seller_id.unwrap_or(initiator_id),
            buyer_id: None,
        };

        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(property::Tags::new(property.id, tag_ids)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`Property(id: {})` created", property.id);

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PropertyType`] doesn't exist.
    #[display("`PropertyType(id: {_0})` does not exist")]
    PropertyTypeNotExists(#[error(not(source))] property_type::Id),

    /// [`PropertyTag`] doesn't exist.
    #[display("`PropertyTag(id: {_0})` does not exist")]
    PropertyTagNotExists(#[error(not(source))] property_tag::Id),
}
