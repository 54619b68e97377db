//! Configuration store error types.

use std::io;
use std::path::PathBuf;

use tachart_types::ParamError;
use thiserror::Error;

/// Errors that can occur while querying or persisting the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Instance, parameter or group does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored value could not be converted
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Whole-document write failed; the in-memory document is unchanged
    #[error("failed to persist store {}: {source}", path.display())]
    Persistence {
        /// Store file that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Store file could not be read
    #[error("failed to read store {}: {source}", path.display())]
    Read {
        /// Store file that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Store document is not valid JSON for the expected layout
    #[error("malformed store document: {0}")]
    Format(#[from] serde_json::Error),

    /// Two groups share an identifier
    #[error("duplicate indicator group {0:?}")]
    DuplicateGroup(String),

    /// Two instances of one group share an id
    #[error("duplicate instance id {id} in group {type_name:?}")]
    DuplicateInstance {
        /// Group identifier.
        type_name: String,
        /// Repeated id.
        id: u32,
    },

    /// Two parameters of one instance share a name
    #[error("duplicate parameter {name:?} in {key}")]
    DuplicateParameter {
        /// Text form of the instance key.
        key: String,
        /// Repeated parameter name.
        name: String,
    },

    /// No id left to allocate in a group
    #[error("instance ids exhausted for group {0:?}")]
    IdsExhausted(String),
}

impl ConfigError {
    /// Creates a `NotFound` error describing what was looked up.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        ConfigError::NotFound(what.into())
    }

    /// Returns true for lookups of missing instances, parameters or groups.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound(_))
    }

    /// Returns true if the document was rejected while loading.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ConfigError::Format(_)
                | ConfigError::DuplicateGroup(_)
                | ConfigError::DuplicateInstance { .. }
                | ConfigError::DuplicateParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::not_found("parameter \"Color\" of SMA_1");
        assert_eq!(err.to_string(), "not found: parameter \"Color\" of SMA_1");
        assert!(err.is_not_found());

        let err = ConfigError::Persistence {
            path: PathBuf::from("config/indicators.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to persist store config/indicators.json: denied"
        );
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_param_error_is_transparent() {
        let err = ConfigError::from(ParamError::unknown_symbol("category", "FOO"));
        assert_eq!(err.to_string(), "unknown category value: \"FOO\"");
    }
}
