use crate::hcl::TypeConversionError;
use std::fmt;

/// Errors that abort block generation
#[derive(Debug, Clone, PartialEq)]
pub enum SalvageError {
    /// State carries a name the schema declares neither as attribute nor block
    SchemaMismatch { path: String },

    /// State value has the wrong shape for its position
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Attribute value cannot be expressed as a typed value
    UnconvertibleValue {
        path: String,
        source: TypeConversionError,
    },

    /// No loaded provider declares the resource type
    UnknownResourceType(String),

    /// Error raised while building the block of a specific resource
    InResource {
        address: String,
        source: Box<SalvageError>,
    },
}

impl SalvageError {
    /// Dotted path the error occurred at, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            SalvageError::SchemaMismatch { path }
            | SalvageError::UnexpectedShape { path, .. }
            | SalvageError::UnconvertibleValue { path, .. } => Some(path),
            SalvageError::UnknownResourceType(_) => None,
            SalvageError::InResource { source, .. } => source.path(),
        }
    }
}

impl fmt::Display for SalvageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalvageError::SchemaMismatch { path } => {
                write!(f, "Block schema not found: {}", path)
            }
            SalvageError::UnexpectedShape {
                path,
                expected,
                found,
            } => {
                write!(f, "Unexpected value at {}: expected {}, found {}", path, expected, found)
            }
            SalvageError::UnconvertibleValue { path, source } => {
                write!(f, "Failed to convert value at {}: {}", path, source)
            }
            SalvageError::UnknownResourceType(resource_type) => {
                write!(f, "Resource schema not found: {}", resource_type)
            }
            SalvageError::InResource { address, source } => write!(f, "{}: {}", address, source),
        }
    }
}

impl std::error::Error for SalvageError {}
