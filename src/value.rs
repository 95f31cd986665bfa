//! Values produced by functions

use std::fmt;

/// The current value of a function
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Whole number (coordinates, FPS, memory in MiB)
    Integer(i64),
    /// Fractional number
    Float(f64),
    /// Free-form text (world name, clock, compass direction)
    Text(String),
    /// No value is available right now
    Absent,
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Check whether this value is absent
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Check whether this value is numeric
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Locale-independent display, used for logging
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Absent => write!(f, "<absent>"),
        }
    }
}
