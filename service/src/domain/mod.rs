//! Domain definitions.

pub mod offer;
pub mod partner;
pub mod property;
pub mod property_tag;
pub mod property_type;
pub mod user;

pub use self::{
    offer::Offer, property::Property, property_tag::PropertyTag,
    property_type::PropertyType,
};
