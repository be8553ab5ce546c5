//! HCL output model
//!
//! Typed values, block/document structure, and text serialization.

pub mod body;
pub mod value;
pub mod writer;

pub use body::{Block, Document};
pub use value::{to_typed_value, TypeConversionError, TypedValue};
