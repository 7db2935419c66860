//! Heterogeneous attribute values carried by package records.
//!
//! Package files are untyped JSON trees. Rather than passing
//! `serde_json::Value` around, records hold this closed variant with total
//! accessors; callers that need a particular shape use the `expect_*`
//! helpers, which fail with [`AirdepError::ValueShape`].

use std::collections::BTreeMap;
use std::fmt;

use airdep_util::errors::AirdepError;
use serde::{Deserialize, Serialize};

/// A scalar, sequence, or mapping attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// Only for integers above `i64::MAX`; smaller ones land in `Integer`.
    Unsigned(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Human-readable name of this value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) | Value::Unsigned(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the string inside, or fail with a shape error naming `context`.
    pub fn expect_str(&self, context: &str) -> Result<&str, AirdepError> {
        self.as_str().ok_or_else(|| self.shape_error(context, "string"))
    }

    /// Borrow the mapping inside, or fail with a shape error naming `context`.
    pub fn expect_mapping(&self, context: &str) -> Result<&BTreeMap<String, Value>, AirdepError> {
        self.as_mapping()
            .ok_or_else(|| self.shape_error(context, "mapping"))
    }

    /// Consume the value, returning the mapping inside or a shape error.
    pub fn into_mapping(self, context: &str) -> Result<BTreeMap<String, Value>, AirdepError> {
        match self {
            Value::Mapping(map) => Ok(map),
            other => Err(other.shape_error(context, "mapping")),
        }
    }

    fn shape_error(&self, context: &str, expected: &'static str) -> AirdepError {
        AirdepError::ValueShape {
            context: context.to_string(),
            expected,
            found: self.kind(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Mapping(map)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Unsigned(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
