//! Service options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-service options
///
/// ```json
/// {
///   "name": "web",
///   "image": "nginx:1.27",
///   "port": 8080,
///   "cpu": 256,
///   "memory": 512,
///   "desiredCount": 1,
///   "healthCheckPath": "/",
///   "environment": { "KEY": "value" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub name: String,
    pub image: String,
    /// Container port, also used for the listener and target group.
    /// Services without a port are not attached to the load balancer.
    #[serde(default)]
    pub port: Option<u16>,
    /// Fargate CPU units
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    /// Fargate memory (MiB)
    #[serde(default = "default_memory")]
    pub memory: u32,
    #[serde(default = "default_desired_count")]
    pub desired_count: u32,
    #[serde(default = "default_health_check_path")]
    pub health_check_path: String,
    /// Sorted so the rendered container definition is stable
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub task_role_arn: Option<String>,
    /// Terminates TLS on the listener when set
    #[serde(default)]
    pub certificate_arn: Option<String>,
}

fn default_cpu() -> u32 {
    256
}
fn default_memory() -> u32 {
    512
}
fn default_desired_count() -> u32 {
    1
}
fn default_health_check_path() -> String {
    "/".to_string()
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            port: None,
            cpu: default_cpu(),
            memory: default_memory(),
            desired_count: default_desired_count(),
            health_check_path: default_health_check_path(),
            environment: BTreeMap::new(),
            task_role_arn: None,
            certificate_arn: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_certificate(mut self, arn: impl Into<String>) -> Self {
        self.certificate_arn = Some(arn.into());
        self
    }

    /// Listener protocol implied by the certificate setting
    pub fn listener_protocol(&self) -> &'static str {
        if self.certificate_arn.is_some() {
            "HTTPS"
        } else {
            "HTTP"
        }
    }
}
