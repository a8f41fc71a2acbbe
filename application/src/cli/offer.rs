//! [`Offer`]-related [`Operation`]s.

use clap::Subcommand;
use common::Price;
use service::{
    command,
    domain::{offer, partner, property},
    query, Command as _,
};

#[cfg(doc)]
use service::domain::Offer;

use crate::{define_error, AsError, Error, Service};

use super::print;

/// [`Offer`]-related operation.
#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Makes a new offer on a property.
    Create {
        /// ID of the property to make the offer on.
        #[arg(long)]
        property: property::Id,

        /// ID of the partner making the offer.
        #[arg(long)]
        partner: partner::Id,

        /// Offered price.
        #[arg(long)]
        price: Price,

        /// Number of days the offer stays valid for.
        #[arg(long)]
        validity: Option<offer::Validity>,
    },

    /// Updates an existing offer.
    Update {
        /// ID of the offer to update.
        id: offer::Id,

        /// New offered price.
        #[arg(long)]
        price: Option<Price>,

        /// New number of days the offer stays valid for.
        #[arg(long)]
        validity: Option<offer::Validity>,

        /// New deadline of the offer, as `YYYY-MM-DD`.
        #[arg(long)]
        deadline: Option<offer::DeadlineDate>,
    },

    /// Copies an offer without its status.
    Duplicate {
        /// ID of the offer to copy.
        id: offer::Id,
    },

    /// Accepts an offer, refusing all the other offers on its property.
    Accept {
        /// ID of the offer to accept.
        id: offer::Id,
    },

    /// Refuses an offer.
    Refuse {
        /// ID of the offer to refuse.
        id: offer::Id,
    },

    /// Shows an offer along with its deadline.
    Show {
        /// ID of the offer to show.
        id: offer::Id,
    },
}

impl Operation {
    /// Performs this [`Operation`] with the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the [`Service`] refuses to perform this [`Operation`].
    pub async fn run(self, service: &Service) -> Result<(), Error> {
        match self {
            Self::Create {
                property,
                partner,
                price,
                validity,
            } => service
                .execute(command::CreateOffer {
                    property_id: property,
                    partner_id: partner,
                    price,
                    validity,
                })
                .await
                .map_err(AsError::into_error)
                .map(|o| print(&o)),
            Self::Update {
                id,
                price,
                validity,
                deadline,
            } => service
                .execute(command::UpdateOffer {
                    offer_id: id,
                    price,
                    validity,
                    deadline,
                })
                .await
                .map_err(AsError::into_error)
                .map(|o| print(&o)),
            Self::Duplicate { id } => service
                .execute(command::DuplicateOffer { offer_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|o| print(&o)),
            Self::Accept { id } => service
                .execute(command::AcceptOffer { offer_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|o| print(&o)),
            Self::Refuse { id } => service
                .execute(command::RefuseOffer { offer_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|o| print(&o)),
            Self::Show { id } => {
                define_error! {
                    enum ShowError {
                        #[code = Error::NOT_FOUND]
                        #[message = "`Offer` does not exist"]
                        NotExists,
                    }
                }

                let offer = service
                    .execute(query::offer::ById::by(id))
                    .await
                    .map_err(AsError::into_error)?
                    .ok_or(ShowError::NotExists)?;
                print(&offer);
                print(&offer.deadline());
                Ok(())
            }
        }
    }
}

impl AsError for command::create_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
        }
    }
}

impl AsError for command::update_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
        }
    }
}

impl AsError for command::duplicate_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
        }
    }
}

impl AsError for command::refuse_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
        }
    }
}

impl AsError for command::accept_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) | Self::PropertyNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
            Self::Transition(e) => Some(Error::new(Error::USER_TRANSITION, e)),
            Self::Price(e) => Some(Error::new(Error::VALIDATION, e)),
        }
    }
}
