//! [`Command`] for updating a [`PropertyType`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property_type, PropertyType},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`PropertyType`].
#[derive(Clone, Debug)]
pub struct UpdatePropertyType {
    /// ID of the [`PropertyType`] to be updated.
    pub property_type_id: property_type::Id,

    /// New unique [`property_type::Name`] of the [`PropertyType`].
    pub name: Option<property_type::Name>,

    /// New display ordering of the [`PropertyType`].
    pub sequence: Option<property_type::Sequence>,
}

impl<Db> Command<UpdatePropertyType> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyType>, property_type::Id>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PropertyType>, property_type::Name>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<Update<PropertyType>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = PropertyType;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePropertyType,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePropertyType {
            property_type_id,
            name,
            sequence,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut current = tx
            .execute(Select(By::<Option<PropertyType>, _>::new(property_type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(property_type_id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            let holder = tx
                .execute(Select(By::<Option<PropertyType>, _>::new(name.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if holder.is_some_and(|h| h.id != current.id) {
                return Err(tracerr::new!(E::NameOccupied(name)));
            }
            current.name = name;
        }
        if let Some(sequence) = sequence {
            current.sequence = sequence;
        }

        tx.execute(Update(current.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some(property_type::NAME_CONSTRAINT))
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

/// Error of [`UpdatePropertyType`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PropertyType`] doesn't exist.
    #[display("`PropertyType(id: {_0})` does not exist")]
    NotExists(#[error(not(source))] property_type::Id),

    /// [`property_type::Name`] is occupied by another [`PropertyType`] already.
    #[display("`{_0}` name is occupied")]
    NameOccupied(#[error(not(source))] property_type::Name),
}
