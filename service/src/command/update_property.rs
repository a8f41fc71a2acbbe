//! [`Command`] for updating a [`Property`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        property, property_tag, property_type, Offer, Property, PropertyTag,
        PropertyType,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Property`].
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to be updated.
    pub property_id: property::Id,

    /// [`property::Changes`] to apply to the [`Property`].
    pub changes: property::Changes,

    /// IDs of the [`PropertyTag`]s to replace the current ones with.
    ///
    /// [`None`] leaves the current [`PropertyTag`]s untouched.
    pub tag_ids: Option<Vec<property_tag::Id>>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PropertyType>, property_type::Id>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PropertyTag>, property_tag::Id>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Offer>, property::Id>>,
            Ok = Vec<Offer>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Update<Offer>, Err = Traced<database::Error>>
        + Database<Update<property::Tags>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
            changes,
            tag_ids,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if let Some(Some(id)) = changes.property_type_id {
            tx.execute(Select(By::<Option<PropertyType>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyTypeNotExists(id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }
        for &id in tag_ids.iter().flatten() {
            tx.execute(Select(By::<Option<PropertyTag>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyTagNotExists(id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let touched = property
            .apply(changes)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        if touched
            .iter()
            .any(|f| Property::PRICE_CONSTRAINED.contains(f))
        {
            property
                .check_selling_price(self.config().min_selling_ratio)
                .map_err(tracerr::from_and_wrap!(=> E))?;
        }

        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if touched.contains(&property::Field::PropertyType) {
            let offers = tx
                .execute(Select(By::<Vec<Offer>, _>::new(property.id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            for mut offer in offers {
                offer.property_type_id = property.property_type_id;
                tx.execute(Update(offer))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        }

        if let Some(tag_ids) = tag_ids {
            tx.execute(Update(property::Tags::new(property.id, tag_ids)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Property(id: {})` updated: {touched:?}",
            property.id,
        );

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`PropertyType`] doesn't exist.
    #[display("`PropertyType(id: {_0})` does not exist")]
    PropertyTypeNotExists(#[error(not(source))] property_type::Id),

    /// [`PropertyTag`] doesn't exist.
    #[display("`PropertyTag(id: {_0})` does not exist")]
    PropertyTagNotExists(#[error(not(source))] property_tag::Id),

    /// [`property::State`] transition is not allowed.
    #[display("{_0}")]
    #[from]
    Transition(property::TransitionError),

    /// [`Property::selling_price`] is too low.
    #[display("{_0}")]
    #[from]
    Price(property::PriceError),
}
