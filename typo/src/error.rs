use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `typo` library
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Error categories surfaced by document building and output writing.
///
/// Schema resolution never fails; unrepresentable types degrade to a generic
/// object schema instead of producing one of these.
#[derive(Error)]
pub enum Error {
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading or writing an output file failed
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// A caller supplied an argument the builder cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A document was declared without an HTTP operation
    #[error("Document '{identifier}' must define an HTTP operation (get, post, put, delete, patch)")]
    MissingOperation {
        /// Identifier the document was declared under
        identifier: String,
    },

    /// The mutex guarding a shared registry was poisoned by a panicking holder
    #[error("Schema registry lock poisoned: {0}")]
    RegistryPoisoned(String),

    /// Converting the wire document to JSON or YAML failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(s) => f.debug_tuple("Configuration").field(s).finish(),
            Self::FileOperation(s) => f.debug_tuple("FileOperation").field(s).finish(),
            Self::InvalidArgument(s) => f.debug_tuple("InvalidArgument").field(s).finish(),
            Self::MissingOperation { identifier } => f
                .debug_struct("MissingOperation")
                .field("identifier", identifier)
                .finish(),
            Self::RegistryPoisoned(s) => f.debug_tuple("RegistryPoisoned").field(s).finish(),
            Self::Serialization(s) => f.debug_tuple("Serialization").field(s).finish(),
        }
    }
}

impl Error {
    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" error
    pub fn missing(what: &str) -> Self {
        Self::InvalidArgument(format!("{MSG_MISSING_PREFIX} {what}"))
    }

    /// Create error for IO operations
    pub fn io_failed(
        operation: &str,
        path: &std::path::Path,
        error: impl std::fmt::Display,
    ) -> Self {
        Self::FileOperation(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }

    /// Create error for JSON/YAML encoding failures
    pub fn serialization_failed(format: &str, error: impl std::fmt::Display) -> Self {
        Self::Serialization(format!("{MSG_FAILED_TO_PREFIX} encode {format}: {error}"))
    }
}
