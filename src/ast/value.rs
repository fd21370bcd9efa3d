use std::fmt;

/// A value flowing through evaluation: either a number or an opaque piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Numeric view of the value. Text coerces to `0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(value) => *value,
            Value::Text(_) => 0.0,
        }
    }

    /// Text view of the value. A number coerces to the empty string.
    pub fn as_text(&self) -> &str {
        match self {
            Value::Text(value) => value,
            Value::Number(_) => "",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&Value> for f64 {
    fn from(value: &Value) -> Self {
        value.as_number()
    }
}

impl From<&Value> for String {
    fn from(value: &Value) -> Self {
        value.as_text().to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{:?}", value),
        }
    }
}
