use thiserror::Error;

/// Semantic errors in a deployment options tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("cluster name must contain an ASCII letter or digit")]
    EmptyClusterName,

    #[error("service #{0} has no ASCII letter or digit in its name")]
    EmptyServiceName(usize),

    #[error("service '{0}' collides with an earlier service name")]
    DuplicateService(String),

    #[error("service '{service}' must declare a port because the cluster is public")]
    MissingPort { service: String },

    #[error("service '{service}' declares port 0")]
    InvalidPort { service: String },

    #[error("existing network '{vpc_id}' must list at least one subnet")]
    MissingSubnets { vpc_id: String },

    #[error("new network must declare at least one subnet block")]
    NoSubnetBlocks,
}

pub type Result<T> = std::result::Result<T, SpecError>;
