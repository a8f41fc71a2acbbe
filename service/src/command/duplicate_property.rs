//! [`Command`] for duplicating a [`Property`].

use common::operations::{
    By, Commit, Insert, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Offer, PropertyTag};
use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for duplicating a [`Property`].
///
/// The copy is tagged with the same [`PropertyTag`]s, but receives none of
/// the [`Offer`]s.
#[derive(Clone, Copy, Debug)]
pub struct DuplicateProperty {
    /// ID of the [`Property`] to be duplicated.
    pub property_id: property::Id,
}

impl<Db> Command<DuplicateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<property::Tags, property::Id>>,
            Ok = property::Tags,
            Err = Traced<database::Error>,
        > + Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Update<property::Tags>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DuplicateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DuplicateProperty { property_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let original = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        let tags = tx
            .execute(Select(By::<property::Tags, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let copy = original.duplicate(
            property::Id::new(),
            property::AvailabilityDate::today()
                .add_months(self.config().availability_delay_months),
        );

        tx.execute(Insert(copy.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(property::Tags::new(copy.id, tags.tag_ids)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Property(id: {})` duplicated as `Property(id: {})`",
            original.id,
            copy.id,
        );

        Ok(copy)
    }
}

/// Error of [`DuplicateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
