//! [`Command`] for deleting a [`PropertyTag`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Property;
use crate::{
    domain::{property_tag, PropertyTag},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`PropertyTag`], untagging all the
/// [`Property`]s with it.
#[derive(Clone, Copy, Debug)]
pub struct DeletePropertyTag {
    /// ID of the [`PropertyTag`] to be deleted.
    pub property_tag_id: property_tag::Id,
}

impl<Db> Command<DeletePropertyTag> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyTag>, property_tag::Id>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<PropertyTag, property_tag::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePropertyTag,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePropertyTag { property_tag_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<PropertyTag>, _>::new(property_tag_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(property_tag_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        tx.execute(Delete(By::<PropertyTag, _>::new(property_tag_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`DeletePropertyTag`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PropertyTag`] doesn't exist.
    #[display("`PropertyTag(id: {_0})` does not exist")]
    NotExists(#[error(not(source))] property_tag::Id),
}
