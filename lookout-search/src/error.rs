//! Error taxonomy for the search core.
//!
//! Nothing here is retried internally; the core is a pure translation layer
//! and leaves retry policy, if any, to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller supplied a symbol not present in the target enumeration domain.
    #[error("invalid {domain} value: {symbol:?}")]
    InvalidEnumValue {
        domain: &'static str,
        symbol: String,
    },

    /// Remote returned a non-success HTTP status. Carries the remote error
    /// code (or the HTTP status when the body has none) and the raw body.
    #[error("service returned error {code}: {message}")]
    Service { code: String, message: String },

    /// Success status but the response shape violates the expected envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Remote returned a metadata type tag outside the fixed known set.
    /// Signals protocol drift that must be fixed in the registry.
    #[error("unknown result type tag: {0:?}")]
    UnknownModelType(String),

    /// Remote returned a field with no corresponding attribute on the model
    /// the tag selected. Also protocol drift; never silently dropped.
    #[error("unknown attribute {attribute:?} on {model}")]
    UnknownAttribute {
        model: &'static str,
        attribute: String,
    },

    /// Transport-level failure the core does not attempt to interpret.
    #[error(transparent)]
    Transport(#[from] lookout_http::HttpError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
