//! Cluster options

use super::service::ServiceSpec;
use crate::error::{Result, SpecError};
use crate::naming::pascal_case;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cluster options
///
/// ```json
/// {
///   "clusterName": "api",
///   "executionRoleArn": "arn:aws:iam::123456789012:role/ecsTaskExecution",
///   "public": true,
///   "services": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    pub cluster_name: String,
    /// Role assumed by the container agent to pull images and ship logs
    #[serde(default)]
    pub execution_role_arn: Option<String>,
    /// Whether the load balancer faces the internet
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

impl ClusterSpec {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            ..Default::default()
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn with_execution_role(mut self, arn: impl Into<String>) -> Self {
        self.execution_role_arn = Some(arn.into());
        self
    }

    pub fn with_service(mut self, service: ServiceSpec) -> Self {
        self.services.push(service);
        self
    }

    /// Check the options for combinations that would produce an invalid
    /// resource graph.
    ///
    /// Names are compared after [`pascal_case`] normalization, the form
    /// they take inside resource names: `web` and `Web` collide, as do
    /// `my-api` and `my_api`. A name with no ASCII alphanumerics counts as
    /// empty. A public cluster needs a port on every service to open its
    /// load balancer group.
    pub fn validate(&self) -> Result<()> {
        if pascal_case(&self.cluster_name).is_empty() {
            return Err(SpecError::EmptyClusterName);
        }

        let mut seen = HashSet::new();
        for (index, service) in self.services.iter().enumerate() {
            let normalized = pascal_case(&service.name);
            if normalized.is_empty() {
                return Err(SpecError::EmptyServiceName(index));
            }
            if !seen.insert(normalized) {
                return Err(SpecError::DuplicateService(service.name.clone()));
            }
            match service.port {
                Some(0) => {
                    return Err(SpecError::InvalidPort {
                        service: service.name.clone(),
                    });
                }
                None if self.public => {
                    return Err(SpecError::MissingPort {
                        service: service.name.clone(),
                    });
                }
                _ => {}
            }
        }

        tracing::debug!(
            cluster = %self.cluster_name,
            services = self.services.len(),
            "Validated cluster options"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, port: Option<u16>) -> ServiceSpec {
        let spec = ServiceSpec::new(name, "nginx:1.27");
        match port {
            Some(port) => spec.with_port(port),
            None => spec,
        }
    }

    #[test]
    fn test_validate_ok() {
        let spec = ClusterSpec::new("api")
            .with_public(true)
            .with_service(service("web", Some(8080)))
            .with_service(service("admin", Some(9000)));

        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_cluster_name() {
        let spec = ClusterSpec::new("  ");
        assert_eq!(spec.validate(), Err(SpecError::EmptyClusterName));
    }

    #[test]
    fn test_validate_public_requires_port() {
        let spec = ClusterSpec::new("api")
            .with_public(true)
            .with_service(service("web", Some(8080)))
            .with_service(service("worker", None));

        assert_eq!(
            spec.validate(),
            Err(SpecError::MissingPort {
                service: "worker".to_string()
            })
        );
    }

    #[test]
    fn test_validate_private_allows_portless_service() {
        let spec = ClusterSpec::new("jobs").with_service(service("worker", None));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_service() {
        let spec = ClusterSpec::new("api")
            .with_service(service("web", Some(8080)))
            .with_service(service("web", Some(8081)));

        assert_eq!(
            spec.validate(),
            Err(SpecError::DuplicateService("web".to_string()))
        );
    }

    #[test]
    fn test_validate_names_colliding_after_normalization() {
        for (first, second) in [("web", "Web"), ("my-api", "my_api"), ("api v2", "api-v2")] {
            let spec = ClusterSpec::new("api")
                .with_public(true)
                .with_service(service(first, Some(80)))
                .with_service(service(second, Some(81)));

            assert_eq!(
                spec.validate(),
                Err(SpecError::DuplicateService(second.to_string()))
            );
        }
    }

    #[test]
    fn test_validate_names_without_alphanumerics() {
        let spec = ClusterSpec::new("api")
            .with_service(service("web", Some(8080)))
            .with_service(service("日本", Some(8081)));
        assert_eq!(spec.validate(), Err(SpecError::EmptyServiceName(1)));

        let spec = ClusterSpec::new("--").with_service(service("web", Some(8080)));
        assert_eq!(spec.validate(), Err(SpecError::EmptyClusterName));
    }

    #[test]
    fn test_validate_port_zero() {
        let spec = ClusterSpec::new("api").with_service(service("web", Some(0)));

        assert_eq!(
            spec.validate(),
            Err(SpecError::InvalidPort {
                service: "web".to_string()
            })
        );
    }

    #[test]
    fn test_validate_empty_service_name() {
        let spec = ClusterSpec::new("api")
            .with_service(service("web", Some(8080)))
            .with_service(service("", Some(8081)));

        assert_eq!(spec.validate(), Err(SpecError::EmptyServiceName(1)));
    }
}
