//! Regenerating `resource` blocks from state
//!
//! [`builder::build_block`] converts one resource's state values into a
//! block body guided by the resource schema; [`generate_document`] does so
//! for every selected resource and collects the labeled blocks into a
//! document.

pub mod builder;
pub mod driver;
pub mod error;
pub mod selection;

pub use driver::generate_document;
pub use error::SalvageError;
pub use selection::Selection;
