//! [`Command`] definition.

pub mod accept_offer;
pub mod cancel_property;
pub mod create_offer;
pub mod create_property;
pub mod create_property_tag;
pub mod create_property_type;
pub mod delete_property_tag;
pub mod delete_property_type;
pub mod duplicate_offer;
pub mod duplicate_property;
pub mod refuse_offer;
pub mod sell_property;
pub mod update_offer;
pub mod update_property;
pub mod update_property_tag;
pub mod update_property_type;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    accept_offer::AcceptOffer, cancel_property::CancelProperty,
    create_offer::CreateOffer, create_property::CreateProperty,
    create_property_tag::CreatePropertyTag,
    create_property_type::CreatePropertyType,
    delete_property_tag::DeletePropertyTag,
    delete_property_type::DeletePropertyType,
    duplicate_offer::DuplicateOffer, duplicate_property::DuplicateProperty,
    refuse_offer::RefuseOffer, sell_property::SellProperty,
    update_offer::UpdateOffer, update_property::UpdateProperty,
    update_property_tag::UpdatePropertyTag,
    update_property_type::UpdatePropertyType,
};
