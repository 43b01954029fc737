//! Violation and field-error records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One schema violation as reported by the producing validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Violated keyword, e.g. `"minimum"` or `"required"`.
    pub kind: String,
    /// JSON pointer into the instance document.
    pub pointer: String,
    /// The schema fragment the instance failed against.
    pub schema: Value,
    /// Producer-supplied extras: `missing_keys` for `required`, `value` for
    /// the offending instance value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Violation {
    pub fn new(kind: impl Into<String>, pointer: impl Into<String>, schema: Value) -> Self {
        Self {
            kind: kind.into(),
            pointer: pointer.into(),
            schema,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Reads one key out of `details`, if present.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref()?.get(key)
    }
}

/// One mapped, field-indexed error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// Stable error kinds, one per mapped violation family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", content = "params", rename_all = "snake_case")]
pub enum FieldErrorKind {
    Blank,
    GreaterThanOrEqualTo(Value),
    LessThanOrEqualTo(Value),
    GreaterThan(Value),
    LessThan(Value),
    TooShort(Value),
    TooLong(Value),
    InvalidEmail,
    InvalidUrl,
    InvalidUuid,
    InvalidDate,
    InvalidIp,
    InvalidFormat,
    InvalidType(String),
    EnumInclusionShortList {
        value: Option<Value>,
        allowed: String,
    },
    Inclusion {
        value: Option<Value>,
    },
    NonUniqueItems,
    NotMultipleOf(Value),
    UnexpectedProperties,
    /// Fallback for violation kinds with no dedicated handler.
    Other(String),
}

impl FieldErrorKind {
    /// Returns the stable string code.
    pub fn code(&self) -> &str {
        match self {
            FieldErrorKind::Blank => "blank",
            FieldErrorKind::GreaterThanOrEqualTo(_) => "greater_than_or_equal_to",
            FieldErrorKind::LessThanOrEqualTo(_) => "less_than_or_equal_to",
            FieldErrorKind::GreaterThan(_) => "greater_than",
            FieldErrorKind::LessThan(_) => "less_than",
            FieldErrorKind::TooShort(_) => "too_short",
            FieldErrorKind::TooLong(_) => "too_long",
            FieldErrorKind::InvalidEmail => "invalid_email",
            FieldErrorKind::InvalidUrl => "invalid_url",
            FieldErrorKind::InvalidUuid => "invalid_uuid",
            FieldErrorKind::InvalidDate => "invalid_date",
            FieldErrorKind::InvalidIp => "invalid_ip",
            FieldErrorKind::InvalidFormat => "invalid_format",
            FieldErrorKind::InvalidType(_) => "invalid_type",
            FieldErrorKind::EnumInclusionShortList { .. } => "enum_inclusion_short_list",
            FieldErrorKind::Inclusion { .. } => "inclusion",
            FieldErrorKind::NonUniqueItems => "non_unique_items",
            FieldErrorKind::NotMultipleOf(_) => "not_multiple_of",
            FieldErrorKind::UnexpectedProperties => "unexpected_properties",
            FieldErrorKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Blank => write!(f, "can't be blank"),
            FieldErrorKind::GreaterThanOrEqualTo(bound) => {
                write!(f, "must be greater than or equal to {}", bound)
            }
            FieldErrorKind::LessThanOrEqualTo(bound) => {
                write!(f, "must be less than or equal to {}", bound)
            }
            FieldErrorKind::GreaterThan(bound) => write!(f, "must be greater than {}", bound),
            FieldErrorKind::LessThan(bound) => write!(f, "must be less than {}", bound),
            FieldErrorKind::TooShort(limit) => {
                write!(f, "is too short (minimum is {})", limit)
            }
            FieldErrorKind::TooLong(limit) => {
                write!(f, "is too long (maximum is {})", limit)
            }
            FieldErrorKind::InvalidEmail => write!(f, "is not a valid email address"),
            FieldErrorKind::InvalidUrl => write!(f, "is not a valid URL"),
            FieldErrorKind::InvalidUuid => write!(f, "is not a valid UUID"),
            FieldErrorKind::InvalidDate => write!(f, "is not a valid date"),
            FieldErrorKind::InvalidIp => write!(f, "is not a valid IP address"),
            FieldErrorKind::InvalidFormat => write!(f, "has an invalid format"),
            FieldErrorKind::InvalidType(expected) => {
                write!(f, "must be of type {}", expected)
            }
            FieldErrorKind::EnumInclusionShortList { allowed, .. } => {
                write!(f, "must be one of: {}", allowed)
            }
            FieldErrorKind::Inclusion { .. } => write!(f, "is not included in the list"),
            FieldErrorKind::NonUniqueItems => write!(f, "contains duplicate items"),
            FieldErrorKind::NotMultipleOf(multiple) => {
                write!(f, "must be a multiple of {}", multiple)
            }
            FieldErrorKind::UnexpectedProperties => {
                write!(f, "contains unexpected properties")
            }
            FieldErrorKind::Other(kind) => write!(f, "failed {} validation", kind),
        }
    }
}
