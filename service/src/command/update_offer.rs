//! [`Command`] for updating an [`Offer`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::offer::{DeadlineDate, Validity};
use crate::{
    domain::{offer, Offer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Offer`].
///
/// [`UpdateOffer::validity`] is applied before [`UpdateOffer::deadline`], so
/// when both are specified, the [`Offer::created_on`] date is shifted to
/// satisfy both.
#[derive(Clone, Copy, Debug)]
pub struct UpdateOffer {
    /// ID of the [`Offer`] to be updated.
    pub offer_id: offer::Id,

    /// New [`Price`] of the [`Offer`].
    pub price: Option<Price>,

    /// New [`Validity`] of the [`Offer`], moving its deadline.
    pub validity: Option<offer::Validity>,

    /// New [`DeadlineDate`] of the [`Offer`], keeping its [`Validity`].
    pub deadline: Option<offer::DeadlineDate>,
}

impl<Db> Command<UpdateOffer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<Update<Offer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOffer {
            offer_id,
            price,
            validity,
            deadline,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut offer = tx
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;

        if let Some(price) = price {
            offer.price = price;
        }
        if let Some(validity) = validity {
            offer.validity = validity;
        }
        if let Some(deadline) = deadline {
            offer.set_deadline(deadline);
        }

        tx.execute(Update(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(offer)
    }
}

/// Error of [`UpdateOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    OfferNotExists(#[error(not(source))] offer::Id),
}
