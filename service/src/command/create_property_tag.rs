//! [`Command`] for creating a new [`PropertyTag`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property_tag, PropertyTag},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`PropertyTag`].
#[derive(Clone, Debug)]
pub struct CreatePropertyTag {
    /// Unique [`property_tag::Name`] of a new [`PropertyTag`].
    pub name: property_tag::Name,

    /// Display color of a new [`PropertyTag`].
    ///
    /// [`None`] means the default one.
    pub color: Option<property_tag::Color>,
}

impl<Db> Command<CreatePropertyTag> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PropertyTag>, property_tag::Name>>,
            Ok = Option<PropertyTag>,
            Err = Traced<database::Error>,
        > + Database<Insert<PropertyTag>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = PropertyTag;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePropertyTag,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePropertyTag { name, color } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<PropertyTag>, _>::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let new = PropertyTag {
            id: property_tag::Id::new(),
            name,
            color: color.unwrap_or(0),
        };

        tx.execute(Insert(new.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some(property_tag::NAME_CONSTRAINT))
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

        log::debug!("`PropertyTag(id: {})` `{}` created", new.id, new.name);

        Ok(new)
    }
}

/// Error of [`CreatePropertyTag`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`property_tag::Name`] is occupied by another [`PropertyTag`] already.
    #[display("`{_0}` name is occupied")]
    NameOccupied(#[error(not(source))] property_tag::Name),
}
