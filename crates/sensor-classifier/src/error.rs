//! Classification input errors

use thiserror::Error;

/// Errors raised while parsing textual classifier inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Flag text other than present/absent or blank
    #[error("Unknown flag value: {0:?}")]
    UnknownFlag(String),

    /// Sensing method label not recognised
    #[error("Unknown sensing method: {0:?}")]
    UnknownMethod(String),
}
