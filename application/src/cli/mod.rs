//! Command line [`Operation`]s over the [`Service`].

pub mod classification;
pub mod offer;
pub mod property;

use std::fmt;

use clap::Subcommand;

use crate::{Error, Service};

/// Operation to perform.
#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Applies the pending database migrations only.
    Migrate,

    /// Property operations.
    #[command(subcommand)]
    Property(property::Operation),

    /// Offer operations.
    #[command(subcommand)]
    Offer(offer::Operation),

    /// Property type operations.
    #[command(subcommand, name = "type")]
    PropertyType(classification::TypeOperation),

    /// Property tag operations.
    #[command(subcommand, name = "tag")]
    PropertyTag(classification::TagOperation),
}

impl Operation {
    /// Performs this [`Operation`] with the provided [`Service`], printing its
    /// outcome.
    ///
    /// # Errors
    ///
    /// If the [`Service`] refuses to perform this [`Operation`].
    pub async fn run(self, service: &Service) -> Result<(), Error> {
        match self {
            Self::Migrate => Ok(()),
            Self::Property(op) => op.run(service).await,
            Self::Offer(op) => op.run(service).await,
            Self::PropertyType(op) => op.run(service).await,
            Self::PropertyTag(op) => op.run(service).await,
        }
    }
}

/// Prints the provided outcome of an [`Operation`] to the standard output.
fn print(outcome: &impl fmt::Debug) {
    println!("{outcome:#?}");
}
