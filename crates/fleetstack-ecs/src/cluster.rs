//! ECS cluster synthesizer

use crate::error::Result;
use crate::network::NetworkContext;
use crate::security;
use crate::service::{Service, ServiceArgs, ServiceSynthesizer};
use fleetstack_cloud::reference::to_values;
use fleetstack_cloud::{
    NamePostFix, Outputs, Reference, ResourceDefinition, ResourceGraph, ResourceNamer,
    ResourceType,
};
use fleetstack_core::{ClusterSpec, Tags};
use serde_json::json;
use tracing::{debug, info};

const CLUSTER_PREFIX: &str = "ECS";

/// Idle timeout of the load balancer
pub const IDLE_TIMEOUT_SECONDS: u32 = 30;

/// Cluster synthesizer
///
/// Owns one service synthesizer per [`ServiceSpec`](fleetstack_core::ServiceSpec),
/// built once at construction in declaration order. The network is
/// borrowed read-only and may be shared with other synthesizers.
pub struct Cluster<'a> {
    stage: String,
    spec: ClusterSpec,
    network: &'a dyn NetworkContext,
    services: Vec<Box<dyn ServiceSynthesizer>>,
    tags: Option<Tags>,
    namer: ResourceNamer,
}

impl<'a> Cluster<'a> {
    /// Build a cluster whose services are [`Service`] synthesizers
    pub fn new(
        stage: &str,
        spec: ClusterSpec,
        network: &'a dyn NetworkContext,
        tags: Option<Tags>,
    ) -> Result<Self> {
        Self::with_services(
            stage,
            spec,
            network,
            tags,
            |args| -> Box<dyn ServiceSynthesizer> { Box::new(Service::new(args)) },
        )
    }

    /// Build a cluster with a custom service synthesizer per spec
    ///
    /// The options are validated before any service is built.
    pub fn with_services<F>(
        stage: &str,
        spec: ClusterSpec,
        network: &'a dyn NetworkContext,
        tags: Option<Tags>,
        mut factory: F,
    ) -> Result<Self>
    where
        F: FnMut(ServiceArgs<'_>) -> Box<dyn ServiceSynthesizer>,
    {
        spec.validate()?;

        let namer = ResourceNamer::new(CLUSTER_PREFIX, stage).child(&spec.cluster_name);
        let services = spec
            .services
            .iter()
            .map(|service| {
                factory(ServiceArgs {
                    stage,
                    spec: service,
                    cluster_namer: &namer,
                    tags: tags.as_ref(),
                })
            })
            .collect();

        debug!(
            cluster = %spec.cluster_name,
            stage = %stage,
            services = spec.services.len(),
            "Created cluster synthesizer"
        );

        Ok(Self {
            stage: stage.to_string(),
            spec,
            network,
            services,
            tags,
            namer,
        })
    }

    pub fn is_public(&self) -> bool {
        self.spec.public
    }

    pub fn network(&self) -> &dyn NetworkContext {
        self.network
    }

    pub fn execution_role_arn(&self) -> Option<&str> {
        self.spec.execution_role_arn.as_deref()
    }

    pub fn cluster_name(&self) -> &str {
        &self.spec.cluster_name
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn tags(&self) -> Option<&Tags> {
        self.tags.as_ref()
    }

    pub fn services(&self) -> &[Box<dyn ServiceSynthesizer>] {
        &self.services
    }

    /// Logical name of one of the cluster's own resources
    pub fn name(&self, postfix: NamePostFix) -> String {
        self.namer.name(postfix)
    }

    /// Reference to the cluster's load balancer
    pub fn load_balancer(&self) -> Reference {
        Reference::to(self.name(NamePostFix::LoadBalancer))
    }

    /// Security groups the service tasks run in
    pub fn container_security_groups(&self) -> Vec<Reference> {
        security::container_security_groups(self)
    }

    /// Outputs of every service, in declaration order
    pub fn outputs(&self) -> Outputs {
        self.services
            .iter()
            .fold(Outputs::new(), |outputs, service| {
                outputs.merge(service.outputs(self))
            })
    }

    /// Synthesize the cluster's resource graph
    ///
    /// The cluster comes first, then its access-control resources, the load
    /// balancer, and finally each service's fragment in declaration order.
    #[tracing::instrument(skip(self), fields(cluster = %self.spec.cluster_name, stage = %self.stage))]
    pub fn generate(&self) -> Result<ResourceGraph> {
        let graph = ResourceGraph::new()
            .with(self.name(NamePostFix::Cluster), self.cluster_resource()?)?
            .merge(security::cluster_security_groups(self)?)?
            .with(
                self.name(NamePostFix::LoadBalancer),
                self.load_balancer_resource()?,
            )?;

        let graph = self
            .services
            .iter()
            .try_fold(graph, |graph, service| -> Result<ResourceGraph> {
                Ok(graph.merge(service.generate(self)?)?)
            })?;

        info!(resources = graph.len(), "Synthesized cluster resources");
        Ok(graph)
    }

    fn cluster_resource(&self) -> Result<ResourceDefinition> {
        Ok(ResourceDefinition::new(ResourceType::EcsCluster, json!({}))?.with_tags(self.tags()))
    }

    fn load_balancer_resource(&self) -> Result<ResourceDefinition> {
        let scheme = if self.is_public() {
            "internet-facing"
        } else {
            "internal"
        };

        let properties = json!({
            "Scheme": scheme,
            "LoadBalancerAttributes": [
                {
                    "Key": "idle_timeout.timeout_seconds",
                    "Value": IDLE_TIMEOUT_SECONDS.to_string()
                }
            ],
            "Subnets": to_values(&self.network.subnets()),
            "SecurityGroups": to_values(&security::load_balancer_security_groups(self))
        });

        Ok(ResourceDefinition::new(ResourceType::LoadBalancer, properties)?.with_tags(self.tags()))
    }
}
