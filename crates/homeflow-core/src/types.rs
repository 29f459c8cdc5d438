/*!
 * Core data types for homeflow.
 *
 * Identifiers for device instances and the loosely typed parameter values
 * that flow between callers, the device factory, and saved records.
 */
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a live device instance
///
/// Identity is assigned at construction and never persisted, so two devices
/// with identical attributes are still distinct entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    /// Create a new ID with a random UUID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create an ID from a string
    pub fn from_string<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_string())
    }

    /// Get the string representation of the ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

/// A scalar parameter value
///
/// Serialized untagged, so a saved record reads as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get an integer value
    ///
    /// A float counts when it is whole and fits in an `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f)
                if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// Try to get a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let a = Id::new();
        let b = Id::new();
        assert!(!a.as_str().is_empty());
        assert_ne!(a, b);

        let id: Id = "fixed".into();
        assert_eq!(id.as_str(), "fixed");
        assert_eq!(format!("{}", id), "fixed");
    }

    #[test]
    fn test_value_as_methods() {
        let v: Value = 42i64.into();
        assert_eq!(v.as_integer(), Some(42));
        assert_eq!(v.as_bool(), None);

        let v = Value::Float(3.0);
        assert_eq!(v.as_integer(), Some(3));

        let v = Value::Float(3.5);
        assert_eq!(v.as_integer(), None);

        let v: Value = true.into();
        assert_eq!(v.as_bool(), Some(true));

        let v: Value = "1080p".into();
        assert_eq!(v.as_str(), Some("1080p"));
        assert_eq!(v.type_name(), "string");
    }

    #[test]
    fn test_value_float_outside_i64_is_not_integer() {
        assert_eq!(Value::Float(9.223372036854775807e18).as_integer(), None);
        assert_eq!(Value::Float(1e300).as_integer(), None);
        assert_eq!(Value::Float(f64::NAN).as_integer(), None);
        assert_eq!(Value::Float(f64::INFINITY).as_integer(), None);
        assert_eq!(Value::Float(-9.223372036854775808e18).as_integer(), Some(i64::MIN));
        assert_eq!(Value::Float(-7.0).as_integer(), Some(-7));
    }

    #[test]
    fn test_value_json_is_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[5, true, "4K", 2.5, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Integer(5),
                Value::Bool(true),
                Value::String("4K".to_string()),
                Value::Float(2.5),
                Value::Null,
            ]
        );
        assert_eq!(serde_json::to_string(&Value::Integer(10)).unwrap(), "10");
    }
}
