//! ECS synthesizer error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    #[error("Invalid options: {0}")]
    Spec(#[from] fleetstack_core::SpecError),

    #[error("Template error: {0}")]
    Template(#[from] fleetstack_cloud::TemplateError),
}

pub type Result<T> = std::result::Result<T, EcsError>;
