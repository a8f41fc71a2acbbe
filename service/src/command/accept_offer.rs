//! [`Command`] for accepting an [`Offer`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{offer, property, Offer, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for accepting an [`Offer`].
///
/// Sells the offered [`Property`] to the partner of the [`Offer`] for its
/// price, refusing all the other [`Offer`]s on that [`Property`]. Nothing is
/// changed if the resulting [`Property::selling_price`] is too low.
#[derive(Clone, Copy, Debug)]
pub struct AcceptOffer {
    /// ID of the [`Offer`] to be accepted.
    pub offer_id: offer::Id,
}

impl<Db> Command<AcceptOffer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Offer>, property::Id>>,
            Ok = Vec<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Offer>, Err = Traced<database::Error>>
        + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AcceptOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AcceptOffer { offer_id } = cmd;

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

        // Avoid concurrent acceptances upon the same `Property`.
        tx.execute(Lock(By::new(offer.property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(offer.property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(offer.property_id))
            .map_err(tracerr::wrap!())?;

        offer.accept();
        property.selling_price = offer.price;
        property
            .transit(property::State::OfferAccepted)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        property
            .check_selling_price(self.config().min_selling_ratio)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let siblings = tx
            .execute(Select(By::<Vec<Offer>, _>::new(property.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        for mut sibling in siblings.into_iter().filter(|o| o.id != offer.id) {
            sibling.refuse();
            tx.execute(Update(sibling))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        property.buyer_id = Some(offer.partner_id);

        tx.execute(Update(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Offer(id: {})` accepted: `Property(id: {})` goes to \
             `Partner(id: {})` for {}",
            offer.id,
            property.id,
            offer.partner_id,
            offer.price,
        );

        Ok(offer)
    }
}

/// Error of [`AcceptOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Property`] of the [`Offer`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Property`] can't accept [`Offer`]s anymore.
    #[display("{_0}")]
    #[from]
    Transition(property::TransitionError),

    /// [`Offer`] price is too low.
    #[display("{_0}")]
    #[from]
    Price(property::PriceError),
}
