//! [`PropertyType`] and [`PropertyTag`] [`Operation`]s.
//!
//! [`Operation`]: super::Operation

use clap::Subcommand;
use service::{
    command,
    domain::{property_tag, property_type},
    query, Command as _,
};

#[cfg(doc)]
use service::domain::{PropertyTag, PropertyType};

use crate::{define_error, AsError, Error, Service};

use super::print;

/// [`PropertyType`]-related operation.
#[derive(Debug, Subcommand)]
pub enum TypeOperation {
    /// Creates a new property type.
    Create {
        /// Unique name of the property type.
        name: property_type::Name,

        /// Ordering weight, lower goes first.
        #[arg(long)]
        sequence: Option<property_type::Sequence>,
    },

    /// Updates an existing property type.
    Update {
        /// ID of the property type to update.
        id: property_type::Id,

        /// New unique name.
        #[arg(long)]
        name: Option<property_type::Name>,

        /// New ordering weight.
        #[arg(long)]
        sequence: Option<property_type::Sequence>,
    },

    /// Deletes a property type, untyping its properties.
    Delete {
        /// ID of the property type to delete.
        id: property_type::Id,
    },

    /// Shows a property type along with its number of offers.
    Show {
        /// ID of the property type to show.
        id: property_type::Id,
    },

    /// Lists all property types, by sequence and name.
    List,
}

impl TypeOperation {
    /// Performs this [`TypeOperation`] with the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the [`Service`] refuses to perform this [`TypeOperation`].
    pub async fn run(self, service: &Service) -> Result<(), Error> {
        match self {
            Self::Create { name, sequence } => service
                .execute(command::CreatePropertyType { name, sequence })
                .await
                .map_err(AsError::into_error)
                .map(|t| print(&t)),
            Self::Update { id, name, sequence } => service
                .execute(command::UpdatePropertyType {
                    property_type_id: id,
                    name,
                    sequence,
                })
                .await
                .map_err(AsError::into_error)
                .map(|t| print(&t)),
            Self::Delete { id } => service
                .execute(command::DeletePropertyType { property_type_id: id })
                .await
                .map_err(AsError::into_error),
            Self::Show { id } => {
                define_error! {
                    enum ShowError {
                        #[code = Error::NOT_FOUND]
                        #[message = "`PropertyType` does not exist"]
                        NotExists,
                    }
                }

                let ty = service
                    .execute(query::property_type::ById::by(id))
                    .await
                    .map_err(AsError::into_error)?
                    .ok_or(ShowError::NotExists)?;
                let offers = service
                    .execute(query::property_type::OfferCount::by(id))
                    .await
                    .map_err(AsError::into_error)?;
                print(&ty);
                print(&offers);
                Ok(())
            }
            Self::List => service
                .execute(query::property_types::List::by(()))
                .await
                .map_err(AsError::into_error)
                .map(|list| print(&list)),
        }
    }
}

/// [`PropertyTag`]-related operation.
#[derive(Debug, Subcommand)]
pub enum TagOperation {
    /// Creates a new property tag.
    Create {
        /// Unique name of the property tag.
        name: property_tag::Name,

        /// Color index of the property tag.
        #[arg(long)]
        color: Option<property_tag::Color>,
    },

    /// Updates an existing property tag.
    Update {
        /// ID of the property tag to update.
        id: property_tag::Id,

        /// New unique name.
        #[arg(long)]
        name: Option<property_tag::Name>,

        /// New color index.
        #[arg(long)]
        color: Option<property_tag::Color>,
    },

    /// Deletes a property tag, removing it from all properties.
    Delete {
        /// ID of the property tag to delete.
        id: property_tag::Id,
    },

    /// Lists all property tags, by name.
    List,
}

impl TagOperation {
    /// Performs this [`TagOperation`] with the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the [`Service`] refuses to perform this [`TagOperation`].
    pub async fn run(self, service: &Service) -> Result<(), Error> {
        match self {
            Self::Create { name, color } => service
                .execute(command::CreatePropertyTag { name, color })
                .await
                .map_err(AsError::into_error)
                .map(|t| print(&t)),
            Self::Update { id, name, color } => service
                .execute(command::UpdatePropertyTag {
                    property_tag_id: id,
                    name,
                    color,
                })
                .await
                .map_err(AsError::into_error)
                .map(|t| print(&t)),
            Self::Delete { id } => service
                .execute(command::DeletePropertyTag { property_tag_id: id })
                .await
                .map_err(AsError::into_error),
            Self::List => service
                .execute(query::property_tags::List::by(()))
                .await
                .map_err(AsError::into_error)
                .map(|list| print(&list)),
        }
    }
}

impl AsError for command::create_property_type::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(Error::new(Error::VALIDATION, self)),
        }
    }
}

impl AsError for command::update_property_type::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
            Self::NameOccupied(_) => Some(Error::new(Error::VALIDATION, self)),
        }
    }
}

impl AsError for command::delete_property_type::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
        }
    }
}

impl AsError for command::create_property_tag::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(Error::new(Error::VALIDATION, self)),
        }
    }
}

impl AsError for command::update_property_tag::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
            Self::NameOccupied(_) => Some(Error::new(Error::VALIDATION, self)),
        }
    }
}

impl AsError for command::delete_property_tag::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(Error::new(Error::NOT_FOUND, self)),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::{create_property_type, delete_property_tag},
        domain::{property_tag, property_type},
    };

    use crate::{AsError as _, Error};

    #[test]
    fn reports_occupied_name_as_validation_error() {
        let err = create_property_type::ExecutionError::NameOccupied(
            property_type::Name::new("Villa").unwrap(),
        )
        .into_error();

        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "`Villa` name is occupied");
    }

    #[test]
    fn reports_missing_tag_as_not_found() {
        let err =
            delete_property_tag::ExecutionError::NotExists(property_tag::Id::new())
                .into_error();

        assert_eq!(err.code, Error::NOT_FOUND);
    }
}
