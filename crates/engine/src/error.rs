//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] for malformed input (empty names, non-positive amounts, unknown types).
//! - [`NotFound`] when a rename/delete target is absent.
//! - [`Duplicate`] when a category name collides with an existing one.
//! - [`InUse`] when a category delete is blocked by referencing transactions.
//! - [`Persistence`] when the storage backend fails to read or write.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`NotFound`]: EngineError::NotFound
//!  [`Duplicate`]: EngineError::Duplicate
//!  [`InUse`]: EngineError::InUse
//!  [`Persistence`]: EngineError::Persistence
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid data: {0}")]
    Validation(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("\"{0}\" already present!")]
    Duplicate(String),
    #[error("Category \"{0}\" is in use and cannot be deleted.")]
    InUse(String),
    #[error("Storage failure: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}
