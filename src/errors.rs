use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Every failure the filter engine can report
#[derive(Debug, Error)]
pub enum FilterError {
    // A bracketed path segment that is not `[<digits>]`
    #[error("malformed path `{path}`: bad segment `{segment}` ({reason})")]
    MalformedPath {
        path: String,
        segment: String,
        reason: String,
    },

    // Missing key, index out of range, or stepping into the wrong kind of value
    #[error("path not found: `{path}`")]
    PathNotFound { path: String },

    // Filter kind applied to a value it cannot handle
    #[error("`{kind}` filter on `{path}` cannot be applied to {found}")]
    TypeMismatch {
        kind: &'static str,
        path: String,
        found: &'static str,
    },

    #[error("unsupported filter type `{0}`")]
    UnsupportedFilterKind(String),

    #[error("unsupported filter mode `{0}` (expected `inclusive` or `exclusive`)")]
    UnsupportedMode(String),

    #[error("unsupported error policy `{0}` (expected `abort` or `skip`)")]
    UnsupportedErrorPolicy(String),

    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("`replace` filter on `{field}` has no replacement value")]
    MissingReplacement { field: String },

    // Filter JSON that does not describe one spec or a list of specs
    #[error("invalid filter spec: {0}")]
    InvalidSpec(#[from] serde_json::Error),
}

// Type alias for results that use `FilterError` as the error type
pub type Result<T> = std::result::Result<T, FilterError>;
