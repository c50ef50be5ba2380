//! Template error types

use thiserror::Error;

/// Errors raised while assembling a resource graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Resource already defined: {0}")]
    DuplicateResource(String),

    #[error("Resource properties must be an object: {0}")]
    InvalidProperties(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
