//! Scalar attribute types
//!
//! The data model is deliberately flat: a property is a scalar
//! (boolean/integer/string) or an array of scalars. Anything else is a
//! configuration error at materialization time.

use serde_json::Value;

/// Supported scalar attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Boolean,
    Integer,
    String,
}

impl ScalarType {
    /// Maps a JSON Schema `type` name to a scalar type.
    ///
    /// Returns `None` for anything outside boolean/integer/string,
    /// including `array` and `object`.
    pub fn from_json_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(ScalarType::Boolean),
            "integer" => Some(ScalarType::Integer),
            "string" => Some(ScalarType::String),
            _ => None,
        }
    }

    /// Returns the JSON Schema type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::String => "string",
        }
    }

    /// Lenient typed coercion applied on both read and write.
    ///
    /// Convertible values are converted; inconvertible values become `Null`.
    /// Strict type enforcement is the document validator's job, not the
    /// accessor's.
    pub fn coerce(&self, value: &Value) -> Value {
        match self {
            ScalarType::Boolean => coerce_boolean(value),
            ScalarType::Integer => coerce_integer(value),
            ScalarType::String => coerce_string(value),
        }
    }
}

fn coerce_boolean(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Value::Bool(true),
            "false" | "f" | "0" => Value::Bool(false),
            _ => Value::Null,
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Value::Bool(false),
            Some(_) => Value::Bool(true),
            None => Value::Null,
        },
        _ => Value::Null,
    }
}

fn coerce_integer(value: &Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Value::from(f as i64)
                } else {
                    Value::Null
                }
            } else {
                Value::Null
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Value::from(i),
            Err(_) => Value::Null,
        },
        _ => Value::Null,
    }
}

fn coerce_string(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.clone()),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        _ => Value::Null,
    }
}
