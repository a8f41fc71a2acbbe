//! [`Command`] for updating a [`PropertyTag`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property_tag, PropertyTag},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`PropertyTag`].
#[derive(Clone, Debug)]
pub struct UpdatePropertyTag {
    /// ID of the [`PropertyTag`] to be updated.
    pub property_tag_id: property_tag::Id,

    /// New unique [`property_tag::Name`] of the [`PropertyTag`].
    pub name: Option<property_tag::Name>,

    /// New display color of the [`PropertyTag`].
    pub color: Option<property_tag::Color>,
}

impl<Db> Command<UpdatePropertyTag> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyTag>, property_tag::Id>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PropertyTag>, property_tag::Name>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<Update<PropertyTag>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = PropertyTag;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePropertyTag,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePropertyTag {
            property_tag_id,
            name,
            color,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut current = tx
            .execute(Select(By::<Option<PropertyTag>, _>::new(property_tag_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(property_tag_id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            let holder = tx
                .execute(Select(By::<Option<PropertyTag>, _>::new(name.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if holder.is_some_and(|h| h.id != current.id) {
                return Err(tracerr::new!(E::NameOccupied(name)));
            }
            current.name = name;
        }
        if let Some(color) = color {
            current.color = color;
        }

        tx.execute(Update(current.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some(property_tag::NAME_CONSTRAINT))
                {
                    tracerr::new!(E::NameOccupied(current.name.clone()))
                } else {
                    (tracerr::map_from_and_wrap!(=> E))(e)
                }
            })
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(current)
    }
}

/// Error of [`UpdatePropertyTag`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PropertyTag`] doesn't exist.
    #[display("`PropertyTag(id: {_0})` does not exist")]
    NotExists(#[error(not(source))] property_tag::Id),

    /// [`property_tag::Name`] is occupied by another [`PropertyTag`] already.
    #[display("`{_0}` name is occupied")]
    NameOccupied(#[error(not(source))] property_tag::Name),
}
