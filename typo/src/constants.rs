// ============================================================================
// SCHEMA CONSTANTS
// ============================================================================

/// Reference prefix for component schemas in the wire document
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Separator joining a generic aggregate's base name with its argument names
pub const GENERIC_NAME_SEPARATOR: &str = "_";

/// Name fragment prefixed to a nullable type argument (`Wrapper_Nullable_User`)
pub const NULLABLE_NAME_PREFIX: &str = "Nullable";

/// Discriminator property carried by every union composition
pub const DISCRIMINATOR_PROPERTY: &str = "type";

/// Base name used when a collection appears as a type argument
pub const COLLECTION_BASE_NAME: &str = "List";

/// Base name used when a map appears as a type argument
pub const MAP_BASE_NAME: &str = "Map";

/// Base name used for a type whose shape could not be determined
pub const UNKNOWN_BASE_NAME: &str = "Object";

/// Maximum nesting depth before resolution degrades to a generic object
///
/// The cycle guard already stops direct and mutual recursion; this bound only
/// matters for aggregates that instantiate themselves with ever-growing type
/// arguments.
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// Nesting depth of the resolver along the current descent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RecursionDepth(usize);

impl RecursionDepth {
    /// Depth of a root descriptor
    pub const ZERO: Self = Self(0);

    /// One level deeper
    pub const fn increment(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether resolution has gone past `MAX_RESOLUTION_DEPTH`
    pub const fn exceeds_limit(self) -> bool {
        self.0 > MAX_RESOLUTION_DEPTH
    }

    /// Raw depth value
    pub const fn value(self) -> usize {
        self.0
    }
}

// ============================================================================
// DOCUMENT CONSTANTS
// ============================================================================

/// OpenAPI version emitted in every generated document
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Content type used for bodies unless a builder overrides it
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Default API title
pub const DEFAULT_TITLE: &str = "API Documentation";

/// Default API version
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Description used for responses declared without one
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "OK";

/// Status code used for response bodies declared without one
pub const DEFAULT_STATUS_CODE: u16 = 200;

// ============================================================================
// OUTPUT CONSTANTS
// ============================================================================

/// File name of the JSON wire document
pub const OPENAPI_JSON_FILE: &str = "openapi.json";

/// File name of the YAML wire document
pub const OPENAPI_YAML_FILE: &str = "openapi.yaml";

/// Extension of generated documentation snippets
pub const SNIPPET_EXTENSION: &str = "adoc";

/// Default directory for wire documents
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-docs";

/// Default directory for documentation snippets
pub const DEFAULT_SNIPPET_DIR: &str = "target/generated-snippets";
