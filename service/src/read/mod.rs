//! Read entities definitions.

pub mod property;
pub mod property_type;
