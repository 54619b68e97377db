//! Registry error types.

use tachart_config::ConfigError;
use tachart_indicators::ComputeError;
use tachart_types::ParamError;
use thiserror::Error;

/// Errors that can occur while constructing or registering chart indicators.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No routine is registered for the type name
    #[error("unsupported indicator type: {0}")]
    UnsupportedIndicatorType(String),

    /// Configuration store error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Raw value or key conversion error
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    /// Computation capability error
    #[error("compute error: {0}")]
    Compute(#[from] ComputeError),
}

/// Failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Instance, parameter or group missing.
    NotFound,
    /// Unparseable number, boolean or key.
    Parse,
    /// Symbol outside a closed enumeration.
    UnknownEnumValue,
    /// No routine for the type name.
    UnsupportedIndicatorType,
    /// Store could not be read, written or was malformed.
    Persistence,
    /// Computation capability rejected the request.
    Compute,
}

fn param_kind(err: &ParamError) -> ErrorKind {
    match err {
        ParamError::Parse { .. } | ParamError::InvalidKey(_) => ErrorKind::Parse,
        ParamError::UnknownEnumValue { .. } => ErrorKind::UnknownEnumValue,
    }
}

impl ChartError {
    /// Failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::UnsupportedIndicatorType(_) => ErrorKind::UnsupportedIndicatorType,
            ChartError::Config(ConfigError::NotFound(_)) => ErrorKind::NotFound,
            ChartError::Config(ConfigError::Param(err)) | ChartError::Param(err) => {
                param_kind(err)
            }
            ChartError::Config(_) => ErrorKind::Persistence,
            ChartError::Compute(_) => ErrorKind::Compute,
        }
    }
}
