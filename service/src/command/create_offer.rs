//! [`Command`] for creating a new [`Offer`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::offer::Validity;
use crate::{
    domain::{offer, partner, property, Offer, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Offer`].
///
/// The [`Property`] stays in its [`property::State`].
#[derive(Clone, Copy, Debug)]
pub struct CreateOffer {
    /// ID of the [`Property`] a new [`Offer`] is made on.
    pub property_id: property::Id,

    /// ID of the partner making a new [`Offer`].
    pub partner_id: partner::Id,

    /// [`Price`] of a new [`Offer`].
    pub price: Price,

    /// [`Validity`] of a new [`Offer`].
    ///
    /// [`None`] means the configured one.
    pub validity: Option<offer::Validity>,
}

impl<Db> Command<CreateOffer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Offer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOffer {
            property_id,
            partner_id,
            price,
            validity,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Keep `Offer::property_type_id` in sync with a concurrent
        // `Property` update.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let offer = Offer {
            id: offer::Id::new(),
            property_id: property.id,
            property_type_id: property.property_type_id,
            partner_id,
            price,
            status: None,
            validity: validity.unwrap_or(self.config().offer_validity),
            created_on: offer::CreationDate::today(),
        };

        tx.execute(Insert(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Offer(id: {})` of {price} made on `Property(id: {})`",
            offer.id,
            property.id,
        );

        Ok(offer)
    }
}

/// Error of [`CreateOffer`] [`Command`] execution.
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
