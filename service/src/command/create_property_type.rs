//! [`Command`] for creating a new [`PropertyType`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property_type, PropertyType},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`PropertyType`].
#[derive(Clone, Debug)]
pub struct CreatePropertyType {
    /// Unique [`property_type::Name`] of a new [`PropertyType`].
    pub name: property_type::Name,

    /// Display ordering of a new [`PropertyType`].
    ///
    /// [`None`] means the default one.
    pub sequence: Option<property_type::Sequence>,
}

impl<Db> Command<CreatePropertyType> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyType>, property_type::Name>>,
            Ok = Option<PropertyType>,
            Err = Traced<database::Error>,
        > + Database<Insert<PropertyType>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = PropertyType;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePropertyType,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePropertyType { name, sequence } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<PropertyType>, _>::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let new = PropertyType {
            id: property_type::Id::new(),
            name,
            sequence: sequence.unwrap_or(property_type::DEFAULT_SEQUENCE),
        };

        tx.execute(Insert(new.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some(property_type::NAME_CONSTRAINT))
                {
                    tracerr::new!(E::NameOccupied(new.name.clone()))
                } else {
                    (tracerr::map_from_and_wrap!(=> E))(e)
                }
            })
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`PropertyType(id: {})` `{}` created", new.id, new.name);

        Ok(new)
    }
}

/// Error of [`CreatePropertyType`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`property_type::Name`] is occupied by another [`PropertyType`] already.
    #[display("`{_0}` name is occupied")]
    NameOccupied(#[error(not(source))] property_type::Name),
}
