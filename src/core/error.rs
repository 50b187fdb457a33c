//! Typed error handling for repository operations
//!
//! Absence is never an error: lookups that find nothing complete with an
//! empty result. Everything else surfaces as a [`RepositoryError`] so that
//! callers can match on the failure category instead of string messages.
//!
//! # Error Categories
//!
//! - [`StorageError`]: the backing store rejected or could not run the operation
//! - [`ValidationError`]: malformed identifier or entity state
//! - [`QueryError`]: invalid sort or paging input
//! - [`ConfigError`]: configuration loading and parsing
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.save(item).await {
//!     Ok(saved) => println!("saved {:?}", saved.id),
//!     Err(RepositoryError::Storage(StorageError::ConstraintViolation { constraint, .. })) => {
//!         println!("duplicate value for {}", constraint);
//!     }
//!     Err(e) => eprintln!("save failed: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Entity or identifier validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Sort and paging errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RepositoryError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::Storage(e) => e.error_code(),
            RepositoryError::Validation(e) => e.error_code(),
            RepositoryError::Query(e) => e.error_code(),
            RepositoryError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether a caller may reasonably retry the operation.
    ///
    /// The repository never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RepositoryError::Storage(
                StorageError::ConnectionError { .. } | StorageError::Timeout { .. }
            )
        )
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached
    #[error("Connection error ({backend}): {message}")]
    ConnectionError { backend: String, message: String },

    /// The operation did not complete in time
    #[error("Operation '{operation}' timed out")]
    Timeout { operation: String },

    /// A write was rejected because it breaks a store constraint
    #[error("Constraint '{constraint}' violated on {entity_type}: {message}")]
    ConstraintViolation {
        entity_type: String,
        constraint: String,
        message: String,
    },

    /// A lock guarding the store was poisoned by a panicking writer
    #[error("Storage lock poisoned during {operation}")]
    LockPoisoned { operation: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::Timeout { .. } => "STORAGE_TIMEOUT",
            StorageError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            StorageError::LockPoisoned { .. } => "STORAGE_LOCK_POISONED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to entity and identifier validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The operation needs an identifier the entity does not carry
    #[error("{entity_type} has no identifier")]
    MissingIdentifier { entity_type: String },

    /// One or more fields failed validation
    #[error("Validation failed: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingIdentifier { .. } => "MISSING_IDENTIFIER",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldValidationError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // field_errors() iterates a HashMap
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for RepositoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RepositoryError::Validation(errors.into())
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors related to sort and paging input
#[derive(Debug, Error)]
pub enum QueryError {
    /// A sort expression could not be parsed
    #[error("Invalid sort expression '{expression}': {message}")]
    InvalidSortExpression { expression: String, message: String },

    /// The entity has no sortable property with this name
    #[error("Unknown property '{property}' for {entity_type}")]
    UnknownProperty {
        entity_type: String,
        property: String,
    },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidSortExpression { .. } => "INVALID_SORT_EXPRESSION",
            QueryError::UnknownProperty { .. } => "UNKNOWN_PROPERTY",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<serde_yaml::Error> for RepositoryError {
    fn from(err: serde_yaml::Error) -> Self {
        RepositoryError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
