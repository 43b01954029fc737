//! Violation-to-field-error mapping
//!
//! Single-pass transform keyed by violation kind. `map_violation` returns
//! `None` for kinds with no handler (schema composition, dependencies,
//! content keywords, const); `map_violations` degrades those to a generic
//! kind-named error rather than dropping them.

use serde_json::Value;

use super::{FieldError, FieldErrorKind, Violation};

/// Derives the target field from an instance pointer: the last non-empty
/// segment, or `"base"` for root-level violations.
pub fn field_for_pointer(pointer: &str) -> &str {
    pointer
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("base")
}

/// Maps one violation, `None` when its kind has no handler.
pub fn map_violation(violation: &Violation) -> Option<Vec<FieldError>> {
    let field = field_for_pointer(&violation.pointer);

    let errors = match violation.kind.as_str() {
        "required" => {
            // One blank error per missing key; the pointer-derived field
            // itself gets nothing. A producer that omits
            // `details.missing_keys` gets an empty mapping, not the generic
            // fallback: the handler exists, it just has nothing to report.
            missing_keys(violation)
                .iter()
                .map(|key| FieldError::new(key.clone(), FieldErrorKind::Blank))
                .collect()
        }
        "minimum" => vec![FieldError::new(
            field,
            FieldErrorKind::GreaterThanOrEqualTo(bound(violation, "minimum")),
        )],
        "maximum" => vec![FieldError::new(
            field,
            FieldErrorKind::LessThanOrEqualTo(bound(violation, "maximum")),
        )],
        "exclusiveMinimum" => vec![FieldError::new(
            field,
            FieldErrorKind::GreaterThan(bound(violation, "exclusiveMinimum")),
        )],
        "exclusiveMaximum" => vec![FieldError::new(
            field,
            FieldErrorKind::LessThan(bound(violation, "exclusiveMaximum")),
        )],
        "minLength" => vec![FieldError::new(
            field,
            FieldErrorKind::TooShort(bound(violation, "minLength")),
        )],
        "maxLength" => vec![FieldError::new(
            field,
            FieldErrorKind::TooLong(bound(violation, "maxLength")),
        )],
        "minItems" => vec![FieldError::new(
            field,
            FieldErrorKind::TooShort(bound(violation, "minItems")),
        )],
        "maxItems" => vec![FieldError::new(
            field,
            FieldErrorKind::TooLong(bound(violation, "maxItems")),
        )],
        "minProperties" => vec![FieldError::new(
            field,
            FieldErrorKind::TooShort(bound(violation, "minProperties")),
        )],
        "maxProperties" => vec![FieldError::new(
            field,
            FieldErrorKind::TooLong(bound(violation, "maxProperties")),
        )],
        "format" => {
            let format = violation
                .schema
                .get("format")
                .and_then(Value::as_str)
                .unwrap_or("");
            vec![FieldError::new(field, format_kind(format))]
        }
        "pattern" => vec![FieldError::new(field, FieldErrorKind::InvalidFormat)],
        "type" => {
            let expected = violation
                .schema
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            vec![FieldError::new(field, FieldErrorKind::InvalidType(expected))]
        }
        "enum" => vec![FieldError::new(field, enum_kind(violation))],
        "uniqueItems" => vec![FieldError::new(field, FieldErrorKind::NonUniqueItems)],
        "multipleOf" => vec![FieldError::new(
            field,
            FieldErrorKind::NotMultipleOf(bound(violation, "multipleOf")),
        )],
        "additionalProperties" => {
            vec![FieldError::new(field, FieldErrorKind::UnexpectedProperties)]
        }
        _ => return None,
    };

    Some(errors)
}

/// Maps a violation list, falling back to a kind-named generic error for
/// unhandled kinds.
pub fn map_violations(violations: &[Violation]) -> Vec<FieldError> {
    violations
        .iter()
        .flat_map(|violation| {
            map_violation(violation).unwrap_or_else(|| {
                vec![FieldError::new(
                    field_for_pointer(&violation.pointer),
                    FieldErrorKind::Other(violation.kind.clone()),
                )]
            })
        })
        .collect()
}

fn bound(violation: &Violation, key: &str) -> Value {
    violation.schema.get(key).cloned().unwrap_or(Value::Null)
}

fn missing_keys(violation: &Violation) -> Vec<String> {
    violation
        .detail("missing_keys")
        .and_then(Value::as_array)
        .map(|keys| {
            keys.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn format_kind(format: &str) -> FieldErrorKind {
    match format {
        "email" => FieldErrorKind::InvalidEmail,
        "uri" | "url" => FieldErrorKind::InvalidUrl,
        "uuid" => FieldErrorKind::InvalidUuid,
        "date" | "date-time" => FieldErrorKind::InvalidDate,
        "ipv4" | "ipv6" => FieldErrorKind::InvalidIp,
        _ => FieldErrorKind::InvalidFormat,
    }
}

fn enum_kind(violation: &Violation) -> FieldErrorKind {
    let current = violation.detail("value").cloned();
    let allowed = violation
        .schema
        .get("enum")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if allowed.len() <= 5 {
        let joined = allowed
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        FieldErrorKind::EnumInclusionShortList {
            value: current,
            allowed: joined,
        }
    } else {
        FieldErrorKind::Inclusion { value: current }
    }
}
