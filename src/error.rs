//! Configuration-error types for the structured store engine
//!
//! Every error here signals a defect in a schema document, a missing
//! resolver registration, or a caller passing a name that does not exist.
//! None of them is recoverable at runtime: they abort materialization and
//! propagate to the caller unmodified. Validation-domain errors (a value
//! failing its schema) are a separate, non-throwing concept; see
//! [`crate::validation`].

use std::fmt;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Defect in a schema document or resolver registration
    Config,
    /// Caller passed a name that does not exist
    Usage,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Config => write!(f, "CONFIG"),
            Severity::Usage => write!(f, "USAGE"),
        }
    }
}

/// Error codes raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// JSON-encoded schema input exceeds the size cap
    SchemaTooLarge,
    /// JSON-encoded schema input is not parseable
    InvalidSchemaEncoding,
    /// Schema input is parseable but not a JSON object
    UnsupportedSchemaInput,
    /// No registered resolver pattern matches a reference string
    UnresolvedReference,
    /// Property name not declared in the schema's `properties`
    UnknownProperty,
    /// `#/definitions/<name>` points at a definition that does not exist
    UndefinedLocalReference,
    /// Property type is not one of boolean/integer/string
    UnsupportedAttributeType,
    /// Array item type is not one of boolean/integer/string
    UnsupportedArrayItemType,
    /// `external://custom_lookup/<source>` names an unregistered source
    UnknownLookupSource,
    /// Accessor name not materialized on this record
    UnknownAttribute,
    /// Versioned schema name is blank
    BlankSchemaName,
    /// Versioned schema version is not a semantic version
    InvalidSchemaVersion,
    /// Schema document fails its meta-schema
    InvalidSchemaDocument,
    /// `(name, version)` pair already registered in the catalog
    DuplicateSchemaVersion,
    /// `(name, version)` pair not present in the catalog
    UnknownSchemaVersion,
}

impl StoreErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::SchemaTooLarge => "STORE_SCHEMA_TOO_LARGE",
            StoreErrorCode::InvalidSchemaEncoding => "STORE_INVALID_SCHEMA_ENCODING",
            StoreErrorCode::UnsupportedSchemaInput => "STORE_UNSUPPORTED_SCHEMA_INPUT",
            StoreErrorCode::UnresolvedReference => "STORE_UNRESOLVED_REFERENCE",
            StoreErrorCode::UnknownProperty => "STORE_UNKNOWN_PROPERTY",
            StoreErrorCode::UndefinedLocalReference => "STORE_UNDEFINED_LOCAL_REFERENCE",
            StoreErrorCode::UnsupportedAttributeType => "STORE_UNSUPPORTED_ATTRIBUTE_TYPE",
            StoreErrorCode::UnsupportedArrayItemType => "STORE_UNSUPPORTED_ARRAY_ITEM_TYPE",
            StoreErrorCode::UnknownLookupSource => "STORE_UNKNOWN_LOOKUP_SOURCE",
            StoreErrorCode::UnknownAttribute => "STORE_UNKNOWN_ATTRIBUTE",
            StoreErrorCode::BlankSchemaName => "STORE_BLANK_SCHEMA_NAME",
            StoreErrorCode::InvalidSchemaVersion => "STORE_INVALID_SCHEMA_VERSION",
            StoreErrorCode::InvalidSchemaDocument => "STORE_INVALID_SCHEMA_DOCUMENT",
            StoreErrorCode::DuplicateSchemaVersion => "STORE_DUPLICATE_SCHEMA_VERSION",
            StoreErrorCode::UnknownSchemaVersion => "STORE_UNKNOWN_SCHEMA_VERSION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::UnknownProperty
            | StoreErrorCode::UnknownAttribute
            | StoreErrorCode::UnknownSchemaVersion => Severity::Usage,
            _ => Severity::Config,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with full context
#[derive(Debug, Clone)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    /// Property name the error relates to, if any
    property: Option<String>,
    /// Reference string the error relates to, if any
    reference: Option<String>,
}

impl StoreError {
    /// Oversized JSON-encoded schema input
    pub fn schema_too_large(size: usize, limit: usize) -> Self {
        Self {
            code: StoreErrorCode::SchemaTooLarge,
            message: format!(
                "Schema size of {} bytes exceeds maximum limit of {} bytes",
                size, limit
            ),
            property: None,
            reference: None,
        }
    }

    /// Malformed JSON-encoded schema input
    pub fn invalid_schema_encoding(reason: impl fmt::Display) -> Self {
        Self {
            code: StoreErrorCode::InvalidSchemaEncoding,
            message: format!("Invalid JSON schema: {}", reason),
            property: None,
            reference: None,
        }
    }

    /// Schema input that is valid JSON but not an object
    pub fn unsupported_schema_input(found: &str) -> Self {
        Self {
            code: StoreErrorCode::UnsupportedSchemaInput,
            message: format!("Unsupported schema input: expected object, got {}", found),
            property: None,
            reference: None,
        }
    }

    /// No registered resolver pattern matches the reference string
    pub fn unresolved_reference(ref_string: impl Into<String>) -> Self {
        let reference = ref_string.into();
        Self {
            code: StoreErrorCode::UnresolvedReference,
            message: format!("No matching $ref resolver pattern for {:?}", reference),
            property: None,
            reference: Some(reference),
        }
    }

    /// Property name not found in the schema's `properties`
    pub fn unknown_property(property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            code: StoreErrorCode::UnknownProperty,
            message: format!("No property definition for '{}'", property),
            property: Some(property),
            reference: None,
        }
    }

    /// Local definition reference with no matching definition
    pub fn undefined_local_reference(ref_string: impl Into<String>) -> Self {
        let reference = ref_string.into();
        Self {
            code: StoreErrorCode::UndefinedLocalReference,
            message: format!("No definition for {}", reference),
            property: None,
            reference: Some(reference),
        }
    }

    /// Direct property type outside boolean/integer/string
    pub fn unsupported_attribute_type(property: impl Into<String>, found: &str) -> Self {
        let property = property.into();
        Self {
            code: StoreErrorCode::UnsupportedAttributeType,
            message: format!(
                "Unsupported attribute type: {:?} for property '{}'",
                found, property
            ),
            property: Some(property),
            reference: None,
        }
    }

    /// Array item type outside boolean/integer/string
    pub fn unsupported_array_item_type(property: impl Into<String>, found: &str) -> Self {
        let property = property.into();
        Self {
            code: StoreErrorCode::UnsupportedArrayItemType,
            message: format!(
                "Unsupported array item type: {:?} for property '{}'",
                found, property
            ),
            property: Some(property),
            reference: None,
        }
    }

    /// Lookup reference naming a source absent from the resolver context
    pub fn unknown_lookup_source(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            code: StoreErrorCode::UnknownLookupSource,
            message: format!("No lookup source registered under '{}'", source),
            property: None,
            reference: Some(source),
        }
    }

    /// Accessor name not present in the record's attribute set
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: StoreErrorCode::UnknownAttribute,
            message: format!("No materialized attribute named '{}'", name),
            property: Some(name),
            reference: None,
        }
    }

    /// Blank versioned-schema name
    pub fn blank_schema_name() -> Self {
        Self {
            code: StoreErrorCode::BlankSchemaName,
            message: "Versioned schema name cannot be blank".into(),
            property: None,
            reference: None,
        }
    }

    /// Version string that is not a semantic version
    pub fn invalid_schema_version(version: &str, reason: impl fmt::Display) -> Self {
        Self {
            code: StoreErrorCode::InvalidSchemaVersion,
            message: format!("Invalid schema version {:?}: {}", version, reason),
            property: None,
            reference: None,
        }
    }

    /// Schema document rejected by the meta-schema
    pub fn invalid_schema_document(reason: impl fmt::Display) -> Self {
        Self {
            code: StoreErrorCode::InvalidSchemaDocument,
            message: format!("Schema document fails its meta-schema: {}", reason),
            property: None,
            reference: None,
        }
    }

    /// `(name, version)` pair already present in the catalog
    pub fn duplicate_schema_version(name: &str, version: &str) -> Self {
        Self {
            code: StoreErrorCode::DuplicateSchemaVersion,
            message: format!("Schema '{}' version '{}' is already registered", name, version),
            property: None,
            reference: None,
        }
    }

    /// `(name, version)` pair absent from the catalog
    pub fn unknown_schema_version(name: &str, version: &str) -> Self {
        Self {
            code: StoreErrorCode::UnknownSchemaVersion,
            message: format!("Schema '{}' version '{}' not found", name, version),
            property: None,
            reference: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the property name if applicable
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Returns the reference string if applicable
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for StoreError {}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
