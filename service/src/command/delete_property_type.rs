//! [`Command`] for deleting a [`PropertyType`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Offer, Property};
use crate::{
    domain::{property_type, PropertyType},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`PropertyType`].
///
/// [`Property`]s and [`Offer`]s of the deleted [`PropertyType`] become
/// untyped.
#[derive(Clone, Copy, Debug)]
pub struct DeletePropertyType {
    /// ID of the [`PropertyType`] to be deleted.
    pub property_type_id: property_type::Id,
}

impl<Db> Command<DeletePropertyType> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyType>, property_type::Id>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<PropertyType, property_type::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePropertyType,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePropertyType { property_type_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let ty = tx
            .execute(Select(By::<Option<PropertyType>, _>::new(
                property_type_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(property_type_id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<PropertyType, _>::new(ty.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`PropertyType(id: {})` `{}` deleted", ty.id, ty.name);

        Ok(())
    }
}

/// Error of [`DeletePropertyType`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PropertyType`] doesn't exist.
    #[display("`PropertyType(id: {_0})` does not exist")]
    NotExists(#[error(not(source))] property_type::Id),
}
