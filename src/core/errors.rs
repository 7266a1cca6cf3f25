//! ODK-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, OdkError>;

/// Top-level error type for Outreach Desk.
#[derive(Debug, Error)]
pub enum OdkError {
    #[error("[ODK-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ODK-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[ODK-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ODK-1101] invalid argument: {details}")]
    InvalidArgument { details: String },

    #[error("[ODK-2001] validation failure: field `{field}` {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("[ODK-2002] operation failed in {context}: {details}")]
    OperationFailed {
        context: &'static str,
        details: String,
    },

    #[error("[ODK-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[ODK-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OdkError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ODK-1001",
            Self::MissingConfig { .. } => "ODK-1002",
            Self::ConfigParse { .. } => "ODK-1003",
            Self::InvalidArgument { .. } => "ODK-1101",
            Self::Validation { .. } => "ODK-2001",
            Self::OperationFailed { .. } => "ODK-2002",
            Self::Serialization { .. } => "ODK-2101",
            Self::Io { .. } => "ODK-3002",
        }
    }

    /// Whether retrying might resolve the failure.
    ///
    /// Validation and argument errors never are: the input has to change.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::OperationFailed { .. })
    }

    /// Convenience constructor for a missing required form field.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "is missing".to_string(),
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for OdkError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for OdkError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
