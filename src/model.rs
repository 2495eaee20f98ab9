//! Data cell types.

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// Single cell of a series or data frame.
///
/// Deserialized from plain TOML scalars, so the variant is picked by the
/// scalar's own type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Missing cell.
    Null,
}

impl Value {
    /// Get the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(val) => Some(val as f64),
            Value::Float(val) => Some(val),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(val) => write!(f, "{val}"),
            Value::Int(val) => write!(f, "{val}"),
            Value::Float(val) => write!(f, "{val:?}"),
            Value::Text(val) => write!(f, "{val}"),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Parse a command line literal.
///
/// Booleans and numbers are recognized first; anything else is kept as text.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(val) = s.parse::<bool>() {
            return Ok(Value::Bool(val));
        }
        if let Ok(val) = s.parse::<i64>() {
            return Ok(Value::Int(val));
        }
        if let Ok(val) = s.parse::<f64>() {
            return Ok(Value::Float(val));
        }
        Ok(Value::Text(s.to_string()))
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Int(val.into())
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Int(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Text(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literals() {
        assert_eq!("true".parse::<Value>().unwrap(), Value::Bool(true));
        assert_eq!("-1".parse::<Value>().unwrap(), Value::Int(-1));
        assert_eq!("2.5".parse::<Value>().unwrap(), Value::Float(2.5));
        assert_eq!("Marco".parse::<Value>().unwrap(), Value::from("Marco"));
    }

    #[test]
    fn numeric_view() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::from("3").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Int(2).to_string(), "2");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
