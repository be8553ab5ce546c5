//! Models of the JSON documents produced by Terraform/OpenTofu
//!
//! `providers schema -json` describes every resource type; `show -json`
//! carries the attribute values of every resource instance in state.

pub mod schema;
pub mod state;

pub use schema::{NestedBlock, SchemaAttribute, SchemaBlock, SchemaCatalog};
pub use state::{ResourceMode, StateDocument, StateResource};
