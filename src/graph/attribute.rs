//! Attribute values and the shared attributed-identity surface
//!
//! Every node and relation carries a string identity and a bag of
//! string-keyed attributes. Values are opaque to the graph: nothing
//! validates them.

use std::collections::HashMap;
use std::fmt;

/// Attribute value type
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
/// - Blob (opaque bytes)
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Blob(Vec<u8>),
}

impl AttributeValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the raw bytes if this is a blob
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "String",
            AttributeValue::Integer(_) => "Integer",
            AttributeValue::Float(_) => "Float",
            AttributeValue::Boolean(_) => "Boolean",
            AttributeValue::Blob(_) => "Blob",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(fl) => write!(f, "{}", fl),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Blob(bytes) => write!(f, "Blob({} bytes)", bytes.len()),
        }
    }
}

// Convenience conversions
impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(bytes: Vec<u8>) -> Self {
        AttributeValue::Blob(bytes)
    }
}

/// Attribute map for storing node and relation attributes
pub type AttributeMap = HashMap<String, AttributeValue>;

/// Common surface of every graph object: an immutable identity plus a
/// mutable attribute bag.
///
/// Implementors only provide the accessors; the attribute operations are
/// shared.
pub trait Attributed {
    /// Identifier type of the implementor
    type Id: fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Fixed per concrete variant
    fn is_directed(&self) -> bool;

    fn attributes(&self) -> &AttributeMap;

    fn attributes_mut(&mut self) -> &mut AttributeMap;

    /// Get an attribute value
    fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes().get(key)
    }

    /// Set an attribute value, returning the one it replaced
    fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue>
    where
        Self: Sized,
    {
        self.attributes_mut().insert(key.into(), value.into())
    }

    /// Remove an attribute
    fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes_mut().remove(key)
    }

    /// Check if attribute exists
    fn has_attribute(&self, key: &str) -> bool {
        self.attributes().contains_key(key)
    }

    /// Get number of attributes
    fn attribute_count(&self) -> usize {
        self.attributes().len()
    }
}
