//! [`Property`]-related [`Operation`]s.

use clap::{Args, Subcommand};
use common::Price;
use service::{
    command,
    domain::{
        property::{
            self, Area, AvailabilityDate, Bedrooms, Changes, Description,
            Facades, GardenOrientation, Name, Postcode, State,
        },
        property_tag, property_type, user,
    },
    query, read, Command as _,
};

#[cfg(doc)]
use service::domain::Property;

use crate::{define_error, AsError, Error, Service};

use super::print;

/// [`Property`]-related operation.
#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Lists a new property for sale.
    Create(Create),

    /// Updates an existing property.
    Update(Update),

    /// Copies a property without its sale details.
    Duplicate {
        /// ID of the property to copy.
        id: property::Id,
    },

    /// Marks a property as sold.
    Sell {
        /// ID of the property to sell.
        id: property::Id,
    },

    /// Marks a property as canceled.
    Cancel {
        /// ID of the property to cancel.
        id: property::Id,
    },

    /// Shows a property with its derived values.
    Show {
        /// ID of the property to show.
        id: property::Id,
    },

    /// Lists properties, by name in descending order.
    List {
        /// Include archived properties.
        #[arg(long)]
        all: bool,

        /// Only properties in this state.
        #[arg(long)]
        state: Option<State>,

        /// Only properties of this type.
        #[arg(long = "type")]
        property_type_id: Option<property_type::Id>,
    },

    /// Lists offers made on a property, the highest first.
    Offers {
        /// ID of the property to list offers of.
        id: property::Id,
    },
}

/// Arguments of [`Operation::Create`].
#[derive(Debug, Args)]
pub struct Create {
    /// ID of the user listing the property.
    #[arg(long)]
    pub initiator: user::Id,

    /// Name of the property.
    #[arg(long)]
    pub name: Option<Name>,

    /// Description of the property.
    #[arg(long)]
    pub description: Description,

    /// Postcode of the property.
    #[arg(long)]
    pub postcode: Postcode,

    /// Date the property becomes available at, as `YYYY-MM-DD`.
    #[arg(long)]
    pub available_from: Option<AvailabilityDate>,

    /// Price the seller expects.
    #[arg(long)]
    pub expected_price: Price,

    /// Number of bedrooms.
    #[arg(long)]
    pub bedrooms: Option<Bedrooms>,

    /// Living area in square meters.
    #[arg(long)]
    pub living_area: Area,

    /// Number of facades.
    #[arg(long, default_value_t = 0)]
    pub facades: Facades,

    /// The property has a garage.
    #[arg(long)]
    pub garage: bool,

    /// The property has a garden.
    #[arg(long)]
    pub garden: bool,

    /// Garden area in square meters.
    #[arg(long, default_value_t = 0)]
    pub garden_area: Area,

    /// Orientation of the garden.
    #[arg(long)]
    pub garden_orientation: Option<GardenOrientation>,

    /// ID of the property type.
    #[arg(long = "type")]
    pub property_type_id: Option<property_type::Id>,

    /// ID of the selling user, if not the initiator.
    #[arg(long)]
    pub seller: Option<user::Id>,

    /// ID of a tag to apply, may be repeated.
    #[arg(long = "tag")]
    pub tag_ids: Vec<property_tag::Id>,
}

/// Arguments of [`Operation::Update`].
#[derive(Debug, Args)]
pub struct Update {
    /// ID of the property to update.
    pub id: property::Id,

    /// New name.
    #[arg(long)]
    pub name: Option<Name>,

    /// New description.
    #[arg(long)]
    pub description: Option<Description>,

    /// New postcode.
    #[arg(long)]
    pub postcode: Option<Postcode>,

    /// New availability date, as `YYYY-MM-DD`.
    #[arg(long)]
    pub available_from: Option<AvailabilityDate>,

    /// New expected price.
    #[arg(long)]
    pub expected_price: Option<Price>,

    /// New number of bedrooms.
    #[arg(long)]
    pub bedrooms: Option<Bedrooms>,

    /// New living area in square meters.
    #[arg(long)]
    pub living_area: Option<Area>,

    /// New number of facades.
    #[arg(long)]
    pub facades: Option<Facades>,

    /// Whether the property has a garage.
    #[arg(long)]
    pub garage: Option<bool>,

    /// Switches the garden on or off, filling in the usual garden area and
    /// orientation.
    #[arg(long)]
    pub toggle_garden: Option<bool>,

    /// Whether the property has a garden, without touching its area and
    /// orientation.
    #[arg(long)]
    pub garden: Option<bool>,

    /// New garden area in square meters.
    #[arg(long)]
    pub garden_area: Option<Area>,

    /// New orientation of the garden.
    #[arg(long, conflicts_with = "no_garden_orientation")]
    pub garden_orientation: Option<GardenOrientation>,

    /// Clears the orientation of the garden.
    #[arg(long)]
    pub no_garden_orientation: bool,

    /// Archives (`false`) or restores (`true`) the property.
    #[arg(long)]
    pub active: Option<bool>,

    /// New state.
    #[arg(long)]
    pub state: Option<State>,

    /// ID of the new property type.
    #[arg(long = "type", conflicts_with = "untyped")]
    pub property_type_id: Option<property_type::Id>,

    /// Clears the property type.
    #[arg(long)]
    pub untyped: bool,

    /// ID of the new selling user.
    #[arg(long)]
    pub seller: Option<user::Id>,

    /// ID of a tag to replace the current ones with, may be repeated.
    #[arg(long = "tag")]
    pub tag_ids: Option<Vec<property_tag::Id>>,
}

impl Update {
    /// Splits these arguments into the [`Changes`] and the replacing tags.
    fn into_changes(self) -> (Changes, Option<Vec<property_tag::Id>>) {
        let Self {
            id: _,
            name,
            description,
            postcode,
            available_from,
            expected_price,
            bedrooms,
            living_area,
            facades,
            garage,
            toggle_garden,
            garden,
            garden_area,
            garden_orientation,
            no_garden_orientation,
            active,
            state,
            property_type_id,
            untyped,
            seller,
            tag_ids,
        } = self;

        let toggled = toggle_garden
            .map_or_else(Changes::default, |on| {
                Changes::default().toggle_garden(on)
            });
        let changes = Changes {
            name,
            description,
            postcode,
            date_availability: available_from,
            expected_price,
            bedrooms,
            living_area,
            facades,
            garage,
            garden: garden.or(toggled.garden),
            garden_area: garden_area.or(toggled.garden_area),
            garden_orientation: if no_garden_orientation {
                Some(None)
            } else {
                garden_orientation.map(Some).or(toggled.garden_orientation)
            },
            active,
            state,
            property_type_id: if untyped {
                Some(None)
            } else {
                property_type_id.map(Some)
            },
            seller_id: seller,
        };
        (changes, tag_ids)
    }
}

impl Operation {
    /// Performs this [`Operation`] with the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the [`Service`] refuses to perform this [`Operation`].
    pub async fn run(self, service: &Service) -> Result<(), Error> {
        match self {
            Self::Create(args) => {
                let Create {
                    initiator,
                    name,
                    description,
                    postcode,
                    available_from,
                    expected_price,
                    bedrooms,
                    living_area,
                    facades,
                    garage,
                    garden,
                    garden_area,
                    garden_orientation,
                    property_type_id,
                    seller,
                    tag_ids,
                } = args;
                service
                    .execute(command::CreateProperty {
                        initiator_id: initiator,
                        name,
                        description,
                        postcode,
                        date_availability: available_from,
                        expected_price,
                        bedrooms,
                        living_area,
                        facades,
                        garage,
                        garden,
                        garden_area,
                        garden_orientation,
                        property_type_id,
                        seller_id: seller,
                        tag_ids,
                    })
                    .await
                    .map_err(AsError::into_error)
                    .map(|p| print(&p))
            }
            Self::Update(args) => {
                let property_id = args.id;
                let (changes, tag_ids) = args.into_changes();
                service
                    .execute(command::UpdateProperty {
                        property_id,
                        changes,
                        tag_ids,
                    })
                    .await
                    .map_err(AsError::into_error)
                    .map(|p| print(&p))
            }
            Self::Duplicate { id } => service
                .execute(command::DuplicateProperty { property_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|p| print(&p)),
            Self::Sell { id } => service
                .execute(command::SellProperty { property_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|p| print(&p)),
            Self::Cancel { id } => service
                .execute(command::CancelProperty { property_id: id })
                .await
                .map_err(AsError::into_error)
                .map(|p| print(&p)),
            Self::Show { id } => show(service, id).await,
            Self::List {
                all,
                state,
                property_type_id,
            } => service
                .execute(query::properties::List::by(
                    read::property::list::Filter {
                        active: (!all).then_some(true),
                        state,
                        property_type_id,
                    },
                ))
                .await
                .map_err(AsError::into_error)
                .map(|list| print(&list)),
            Self::Offers { id } => service
                .execute(query::property::Offers::by(id))
                .await
                .map_err(AsError::into_error)
                .map(|offers| print(&offers)),
        }
    }
}

/// Prints the [`Property`] with the provided ID along with its derived
/// values.
async fn show(service: &Service, id: property::Id) -> Result<(), Error> {
    define_error! {
        enum ShowError {
            #[code = Error::NOT_FOUND]
            #[message = "`Property` does not exist"]
            NotExists,
        }
    }

    let property = service
        .execute(query::property::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or(ShowError::NotExists)?;
    let best_price = service
        .execute(query::property::BestPrice::by(id))
        .await
        .map_err(AsError::into_error)?;
    let tags = service
        .execute(query::property::Tags::by(id))
        .await
        .map_err(AsError::into_error)?;

    print(&property);
    print(&property.total_area());
    print(&*best_price);
    print(&tags.tag_ids);
    Ok(())
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyTypeNotExists(_) | Self::PropertyTagNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_)
            | Self::PropertyTypeNotExists(_)
            | Self::PropertyTagNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
            Self::Transition(e) => Some(Error::new(Error::USER_TRANSITION, e)),
            Self::Price(e) => Some(Error::new(Error::VALIDATION, e)),
        }
    }
}

impl AsError for command::duplicate_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
        }
    }
}

impl AsError for command::sell_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
            Self::Transition(e) => Some(Error::new(Error::USER_TRANSITION, e)),
        }
    }
}

impl AsError for command::cancel_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::new(Error::NOT_FOUND, self))
            }
            Self::Transition(e) => Some(Error::new(Error::USER_TRANSITION, e)),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Percent;
    use service::{
        command::{sell_property, update_property},
        domain::property::{PriceError, TransitionError},
    };

    use crate::{AsError as _, Error};

    #[test]
    fn reports_low_selling_price_as_validation_error() {
        let err = update_property::ExecutionError::Price(PriceError {
            selling_price: "1".parse().unwrap(),
            expected_price: "100000".parse().unwrap(),
            min_ratio: Percent::whole(90),
        })
        .into_error();

        assert_eq!(err.code, Error::VALIDATION);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(
            err.message,
            "The selling price must be at least 90% of the expected price! \
             You must reduce the expected price if you want to accept this \
             offer.",
        );
    }

    #[test]
    fn reports_disallowed_transition_as_user_transition_error() {
        let err = tracerr::new!(sell_property::ExecutionError::Transition(
            TransitionError::SellCanceled,
        ))
        .into_error();

        assert_eq!(err.code, "USER_TRANSITION_ERROR");
        assert_eq!(err.message, "Canceled properties cannot be sold.");
        assert!(err.backtrace.is_some());
    }
}
