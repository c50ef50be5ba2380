//! Service synthesizer

use crate::cluster::Cluster;
use crate::error::Result;
use fleetstack_cloud::reference::to_values;
use fleetstack_cloud::{
    NamePostFix, OutputDefinition, Outputs, Reference, ResourceDefinition, ResourceGraph,
    ResourceNamer, ResourceType,
};
use fleetstack_core::{ServiceSpec, Tags};
use serde_json::{Value, json};

/// Per-service half of a cluster
///
/// Implementations receive the owning cluster at generation time instead
/// of holding a reference to it.
pub trait ServiceSynthesizer: Send + Sync {
    /// Logical name of one of the service's resources
    fn name(&self, postfix: NamePostFix) -> String;

    /// Declared container port
    fn port(&self) -> Option<u16>;

    /// The service's own resources
    fn generate(&self, cluster: &Cluster<'_>) -> Result<ResourceGraph>;

    /// The service's stack outputs
    fn outputs(&self, cluster: &Cluster<'_>) -> Outputs;
}

/// What a cluster hands to the factory building each of its services
#[derive(Debug, Clone, Copy)]
pub struct ServiceArgs<'s> {
    pub stage: &'s str,
    pub spec: &'s ServiceSpec,
    pub cluster_namer: &'s ResourceNamer,
    pub tags: Option<&'s Tags>,
}

/// Fargate service behind the cluster's load balancer
pub struct Service {
    spec: ServiceSpec,
    namer: ResourceNamer,
    tags: Option<Tags>,
}

impl Service {
    pub fn new(args: ServiceArgs<'_>) -> Self {
        tracing::debug!(
            service = %args.spec.name,
            stage = %args.stage,
            "Created service synthesizer"
        );
        Self {
            spec: args.spec.clone(),
            namer: args.cluster_namer.child(&args.spec.name),
            tags: args.tags.cloned(),
        }
    }

    pub fn spec(&self) -> &ServiceSpec {
        &self.spec
    }

    fn task_definition(&self, cluster: &Cluster<'_>) -> Result<ResourceDefinition> {
        let environment: Vec<Value> = self
            .spec
            .environment
            .iter()
            .map(|(name, value)| json!({ "Name": name, "Value": value }))
            .collect();

        let mut container = json!({
            "Name": self.spec.name,
            "Image": self.spec.image,
            "Essential": true,
            "Environment": environment
        });
        if let Some(port) = self.spec.port {
            container["PortMappings"] = json!([{ "ContainerPort": port, "Protocol": "tcp" }]);
        }

        let mut properties = json!({
            "Family": self.name(NamePostFix::TaskDefinition),
            "Cpu": self.spec.cpu.to_string(),
            "Memory": self.spec.memory.to_string(),
            "NetworkMode": "awsvpc",
            "RequiresCompatibilities": ["FARGATE"],
            "ContainerDefinitions": [container]
        });
        if let Some(role) = cluster.execution_role_arn() {
            properties["ExecutionRoleArn"] = json!(role);
        }
        if let Some(role) = &self.spec.task_role_arn {
            properties["TaskRoleArn"] = json!(role);
        }

        Ok(ResourceDefinition::new(ResourceType::EcsTaskDefinition, properties)?
            .with_tags(self.tags.as_ref()))
    }

    fn target_group(&self, cluster: &Cluster<'_>, port: u16) -> Result<ResourceDefinition> {
        let properties = json!({
            "HealthCheckIntervalSeconds": 30,
            "HealthCheckPath": self.spec.health_check_path,
            "HealthCheckProtocol": "HTTP",
            "HealthyThresholdCount": 2,
            "UnhealthyThresholdCount": 2,
            "Port": port,
            "Protocol": "HTTP",
            "TargetType": "ip",
            "VpcId": cluster.network().ref_name()
        });

        Ok(ResourceDefinition::new(ResourceType::TargetGroup, properties)?
            .with_tags(self.tags.as_ref()))
    }

    fn listener(&self, cluster: &Cluster<'_>, port: u16) -> Result<ResourceDefinition> {
        let mut properties = json!({
            "LoadBalancerArn": cluster.load_balancer(),
            "Port": port,
            "Protocol": self.spec.listener_protocol(),
            "DefaultActions": [
                {
                    "Type": "forward",
                    "TargetGroupArn": { "Ref": self.name(NamePostFix::TargetGroup) }
                }
            ]
        });
        if let Some(certificate) = &self.spec.certificate_arn {
            properties["Certificates"] = json!([{ "CertificateArn": certificate }]);
        }

        Ok(ResourceDefinition::new(ResourceType::Listener, properties)?)
    }

    fn ecs_service(&self, cluster: &Cluster<'_>) -> Result<ResourceDefinition> {
        let assign_public_ip = if cluster.is_public() {
            "ENABLED"
        } else {
            "DISABLED"
        };

        let mut properties = json!({
            "Cluster": { "Ref": cluster.name(NamePostFix::Cluster) },
            "LaunchType": "FARGATE",
            "DesiredCount": self.spec.desired_count,
            "TaskDefinition": { "Ref": self.name(NamePostFix::TaskDefinition) },
            "NetworkConfiguration": {
                "AwsvpcConfiguration": {
                    "AssignPublicIp": assign_public_ip,
                    "SecurityGroups": to_values(&cluster.container_security_groups()),
                    "Subnets": to_values(&cluster.network().subnets())
                }
            }
        });

        if let Some(port) = self.spec.port {
            properties["LoadBalancers"] = json!([{
                "ContainerName": self.spec.name,
                "ContainerPort": port,
                "TargetGroupArn": { "Ref": self.name(NamePostFix::TargetGroup) }
            }]);
        }

        let resource = ResourceDefinition::new(ResourceType::EcsService, properties)?
            .with_tags(self.tags.as_ref());

        // the target group must be attached to a listener before the service registers
        Ok(match self.spec.port {
            Some(_) => resource.depends_on(self.name(NamePostFix::LoadBalancerListener)),
            None => resource,
        })
    }

    fn endpoint(&self, cluster: &Cluster<'_>, port: u16) -> Value {
        let scheme = self.spec.listener_protocol().to_ascii_lowercase();
        json!({
            "Fn::Join": [
                "",
                [
                    format!("{}://", scheme),
                    Reference::get_att(cluster.name(NamePostFix::LoadBalancer), "DNSName"),
                    format!(":{}", port)
                ]
            ]
        })
    }
}

impl ServiceSynthesizer for Service {
    fn name(&self, postfix: NamePostFix) -> String {
        self.namer.name(postfix)
    }

    fn port(&self) -> Option<u16> {
        self.spec.port
    }

    /// Task definition, then (for services with a port) target group and
    /// listener, then the ECS service itself.
    fn generate(&self, cluster: &Cluster<'_>) -> Result<ResourceGraph> {
        let mut graph = ResourceGraph::new().with(
            self.name(NamePostFix::TaskDefinition),
            self.task_definition(cluster)?,
        )?;

        if let Some(port) = self.spec.port {
            graph.insert(
                self.name(NamePostFix::TargetGroup),
                self.target_group(cluster, port)?,
            )?;
            graph.insert(
                self.name(NamePostFix::LoadBalancerListener),
                self.listener(cluster, port)?,
            )?;
        }

        graph.insert(self.name(NamePostFix::Service), self.ecs_service(cluster)?)?;

        tracing::debug!(
            service = %self.spec.name,
            resources = graph.len(),
            "Synthesized service resources"
        );
        Ok(graph)
    }

    fn outputs(&self, cluster: &Cluster<'_>) -> Outputs {
        match self.spec.port {
            Some(port) => Outputs::new().with(
                self.name(NamePostFix::Endpoint),
                OutputDefinition::new(self.endpoint(cluster, port))
                    .with_description(format!("Endpoint of service {}", self.spec.name)),
            ),
            None => Outputs::new(),
        }
    }
}
