use thiserror::Error;

/// Result alias for descriptor and extraction operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Canonical error surface.
///
/// Variants identify the misconfigured descriptor by object name, query path
/// or alias. None of them carry secret content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid JSON used with jmesPath in secret: {object_name}")]
    InvalidFormat { object_name: String },
    #[error("invalid JMES path {path}: {reason}")]
    InvalidQuery { path: String, reason: String },
    #[error("JMES path {path} for object alias {alias} does not point to a valid object")]
    QueryNotFound { path: String, alias: String },
    #[error("invalid JMES search result type for path {path}: found {found}, only string is allowed")]
    UnsupportedResultType { path: String, found: &'static str },
    #[error("{field} must not be empty")]
    EmptyComponent { field: &'static str },
    #[error("invalid object type: {value}")]
    InvalidObjectType { value: String },
    #[error("object type {declared} does not match {inferred} inferred from {object_name}")]
    ObjectTypeMismatch {
        object_name: String,
        declared: String,
        inferred: String,
    },
    #[error("pathTranslation must be a single character or False, got: {value}")]
    InvalidTranslate { value: String },
    #[error("invalid file permission: {value}")]
    InvalidFilePermission { value: String },
    #[error("name already in use: {name}")]
    DuplicateName { name: String },
    #[error("invalid descriptor configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for the failures produced while splitting a secret value, as
    /// opposed to descriptor validation.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::InvalidQuery { .. }
                | Self::QueryNotFound { .. }
                | Self::UnsupportedResultType { .. }
        )
    }
}
