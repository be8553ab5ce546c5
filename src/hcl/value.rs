//! Typed values for HCL attribute assignment
//!
//! State documents carry loosely typed JSON. Before a value can be written
//! into a block it is lifted into a [`TypedValue`], which commits every leaf
//! to a concrete type and requires collections to be homogeneous.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Type of a [`TypedValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Bool,
    List(Box<ValueType>),
    Map(Box<ValueType>),
    /// Not yet committed to a type (element type of an empty collection)
    Dynamic,
}

impl ValueType {
    /// Find a type both `self` and `other` can be represented as.
    ///
    /// Integers and floats share the HCL number type, so they unify to
    /// `Float`. `Dynamic` unifies with anything.
    pub fn unify(&self, other: &ValueType) -> Option<ValueType> {
        match (self, other) {
            (ValueType::Dynamic, t) | (t, ValueType::Dynamic) => Some(t.clone()),
            (ValueType::Integer, ValueType::Float) | (ValueType::Float, ValueType::Integer) => {
                Some(ValueType::Float)
            }
            (ValueType::List(a), ValueType::List(b)) => {
                a.unify(b).map(|t| ValueType::List(Box::new(t)))
            }
            (ValueType::Map(a), ValueType::Map(b)) => {
                a.unify(b).map(|t| ValueType::Map(Box::new(t)))
            }
            (a, b) if a == b => Some(a.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::List(element) => write!(f, "list({})", element),
            ValueType::Map(element) => write!(f, "map({})", element),
            ValueType::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Strongly typed value ready to be assigned to an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List {
        element: ValueType,
        items: Vec<TypedValue>,
    },
    Map {
        element: ValueType,
        entries: BTreeMap<String, TypedValue>,
    },
}

impl TypedValue {
    /// Get the type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::String(_) => ValueType::String,
            TypedValue::Integer(_) => ValueType::Integer,
            TypedValue::Float(_) => ValueType::Float,
            TypedValue::Bool(_) => ValueType::Bool,
            TypedValue::List { element, .. } => ValueType::List(Box::new(element.clone())),
            TypedValue::Map { element, .. } => ValueType::Map(Box::new(element.clone())),
        }
    }

    /// Empty list with no committed element type
    pub fn empty_list() -> Self {
        TypedValue::List {
            element: ValueType::Dynamic,
            items: Vec::new(),
        }
    }
}

/// Reasons a state value cannot be expressed as a [`TypedValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum TypeConversionError {
    /// A list element does not share a type with the elements before it
    ListElementMismatch {
        index: usize,
        expected: ValueType,
        found: ValueType,
    },

    /// A map value does not share a type with the other values
    MapValueMismatch {
        key: String,
        expected: ValueType,
        found: ValueType,
    },

    /// A primitive whose type cannot be inferred
    UnsupportedPrimitive(String),

    /// An error raised while converting a nested element
    Nested {
        segment: String,
        source: Box<TypeConversionError>,
    },
}

impl TypeConversionError {
    fn nested(segment: String, source: TypeConversionError) -> Self {
        TypeConversionError::Nested {
            segment,
            source: Box::new(source),
        }
    }

    /// Location of the failure relative to the converted value, e.g. `[2].tags`
    pub fn location(&self) -> String {
        match self {
            TypeConversionError::ListElementMismatch { index, .. } => format!("[{}]", index),
            TypeConversionError::MapValueMismatch { key, .. } => format!(".{}", key),
            TypeConversionError::UnsupportedPrimitive(_) => String::new(),
            TypeConversionError::Nested { segment, source } => {
                format!("{}{}", segment, source.location())
            }
        }
    }

    fn root_cause(&self) -> &TypeConversionError {
        match self {
            TypeConversionError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        let suffix = if location.is_empty() {
            String::new()
        } else {
            format!(" at {}", location)
        };

        match self.root_cause() {
            TypeConversionError::ListElementMismatch {
                expected, found, ..
            } => write!(
                f,
                "cannot convert to list: element of type {} does not match {}{}",
                found, expected, suffix
            ),
            TypeConversionError::MapValueMismatch {
                expected, found, ..
            } => write!(
                f,
                "cannot convert to map: value of type {} does not match {}{}",
                found, expected, suffix
            ),
            TypeConversionError::UnsupportedPrimitive(value) => {
                write!(f, "cannot infer type of primitive {}{}", value, suffix)
            }
            TypeConversionError::Nested { .. } => unreachable!("root cause is never nested"),
        }
    }
}

impl std::error::Error for TypeConversionError {}

/// Convert a decoded state value into a [`TypedValue`]
pub fn to_typed_value(value: &Value) -> Result<TypedValue, TypeConversionError> {
    match value {
        Value::Array(elements) => {
            let mut element = ValueType::Dynamic;
            let mut items = Vec::with_capacity(elements.len());

            for (index, raw) in elements.iter().enumerate() {
                let item = to_typed_value(raw)
                    .map_err(|e| TypeConversionError::nested(format!("[{}]", index), e))?;
                let found = item.value_type();
                element = element.unify(&found).ok_or_else(|| {
                    TypeConversionError::ListElementMismatch {
                        index,
                        expected: element.clone(),
                        found,
                    }
                })?;
                items.push(item);
            }

            Ok(TypedValue::List { element, items })
        }
        Value::Object(fields) => {
            let mut element = ValueType::Dynamic;
            let mut entries = BTreeMap::new();

            for (key, raw) in fields {
                let entry = to_typed_value(raw)
                    .map_err(|e| TypeConversionError::nested(format!(".{}", key), e))?;
                let found = entry.value_type();
                element = element.unify(&found).ok_or_else(|| {
                    TypeConversionError::MapValueMismatch {
                        key: key.clone(),
                        expected: element.clone(),
                        found,
                    }
                })?;
                entries.insert(key.clone(), entry);
            }

            Ok(TypedValue::Map { element, entries })
        }
        Value::String(s) => Ok(TypedValue::String(s.clone())),
        Value::Bool(b) => Ok(TypedValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(TypedValue::Integer(i));
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && in_i64_range(f) => {
                    Ok(TypedValue::Integer(f as i64))
                }
                Some(f) if f.is_finite() => Ok(TypedValue::Float(f)),
                _ => Err(TypeConversionError::UnsupportedPrimitive(n.to_string())),
            }
        }
        Value::Null => Err(TypeConversionError::UnsupportedPrimitive(
            "null".to_string(),
        )),
    }
}

fn in_i64_range(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}
