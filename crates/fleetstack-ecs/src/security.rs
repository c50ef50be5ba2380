//! Access-control topology
//!
//! Which security groups a cluster creates depends on two switches:
//!
//! | network  | exposure | created                                                   | load balancer groups        |
//! |----------|----------|-----------------------------------------------------------|-----------------------------|
//! | existing | any      | nothing                                                   | the network's groups        |
//! | new      | public   | container group, self ingress, per service LB group + ALB ingress | one per service     |
//! | new      | private  | container group, self ingress                             | none                        |
//!
//! A private cluster on a new network gets no load balancer group at all.
//! The internal load balancer then runs without security groups of its own.

use crate::cluster::Cluster;
use crate::error::{EcsError, Result};
use crate::service::ServiceSynthesizer;
use fleetstack_cloud::{NamePostFix, Reference, ResourceDefinition, ResourceGraph, ResourceType};
use fleetstack_core::SpecError;
use serde_json::json;
use tracing::{debug, warn};

/// Security groups to create at cluster level
///
/// Empty when the network is externally owned: its groups are referenced,
/// never created.
pub fn cluster_security_groups(cluster: &Cluster<'_>) -> Result<ResourceGraph> {
    if cluster.network().use_existing_network() {
        debug!("Existing network, no security groups to create");
        return Ok(ResourceGraph::new());
    }

    if !cluster.is_public() && !cluster.services().is_empty() {
        warn!(
            cluster = %cluster.cluster_name(),
            "Private cluster on a new network: no load balancer security group is created"
        );
    }

    let container_group = cluster.name(NamePostFix::ContainerSecurityGroup);

    let base = ResourceGraph::new()
        .with(
            &container_group,
            ResourceDefinition::new(
                ResourceType::SecurityGroup,
                json!({
                    "GroupDescription": "Access to the Fargate containers",
                    "VpcId": cluster.network().ref_name()
                }),
            )?
            .with_tags(cluster.tags()),
        )?
        .with(
            cluster.name(NamePostFix::SecurityGroupIngressSelf),
            ResourceDefinition::new(
                ResourceType::SecurityGroupIngress,
                json!({
                    "Description": "Ingress from other containers in the same security group",
                    "GroupId": { "Ref": container_group },
                    "IpProtocol": -1,
                    "SourceSecurityGroupId": { "Ref": container_group }
                }),
            )?,
        )?;

    cluster
        .services()
        .iter()
        .try_fold(base, |graph, service| -> Result<ResourceGraph> {
            Ok(graph.merge(service_security_groups(cluster, service.as_ref())?)?)
        })
}

/// Load balancer group and container-group ingress for one service
///
/// Only public clusters open a group per service.
pub fn service_security_groups(
    cluster: &Cluster<'_>,
    service: &dyn ServiceSynthesizer,
) -> Result<ResourceGraph> {
    if !cluster.is_public() {
        return Ok(ResourceGraph::new());
    }

    let service_name = service.name(NamePostFix::Service);
    let port = service.port().ok_or_else(|| {
        EcsError::Spec(SpecError::MissingPort {
            service: service_name.clone(),
        })
    })?;
    let group = load_balancer_group_name(cluster, service);

    let graph = ResourceGraph::new()
        .with(
            &group,
            ResourceDefinition::new(
                ResourceType::SecurityGroup,
                json!({
                    "GroupDescription": format!(
                        "Access to the public facing load balancer - task {}",
                        service_name
                    ),
                    "VpcId": cluster.network().ref_name(),
                    "SecurityGroupIngress": [
                        {
                            "CidrIp": "0.0.0.0/0",
                            "IpProtocol": "tcp",
                            "FromPort": port,
                            "ToPort": port
                        }
                    ]
                }),
            )?
            .with_tags(cluster.tags()),
        )?
        .with(
            alb_ingress_name(cluster, service),
            ResourceDefinition::new(
                ResourceType::SecurityGroupIngress,
                json!({
                    "Description": format!("Ingress from the ALB - task {}", service_name),
                    "GroupId": { "Ref": cluster.name(NamePostFix::ContainerSecurityGroup) },
                    "IpProtocol": -1,
                    "SourceSecurityGroupId": { "Ref": group }
                }),
            )?,
        )?;

    debug!(service = %service_name, port, "Opened load balancer security group");
    Ok(graph)
}

/// Security groups attached to the load balancer
///
/// One entry per service on a new public network, so the list never
/// depends on how many ingress rules exist.
pub fn load_balancer_security_groups(cluster: &Cluster<'_>) -> Vec<Reference> {
    if cluster.network().use_existing_network() {
        return cluster.network().security_groups();
    }
    if !cluster.is_public() {
        return Vec::new();
    }
    cluster
        .services()
        .iter()
        .map(|service| Reference::to(load_balancer_group_name(cluster, service.as_ref())))
        .collect()
}

/// Security groups the service tasks are placed in
pub fn container_security_groups(cluster: &Cluster<'_>) -> Vec<Reference> {
    if cluster.network().use_existing_network() {
        cluster.network().security_groups()
    } else {
        vec![Reference::to(
            cluster.name(NamePostFix::ContainerSecurityGroup),
        )]
    }
}

pub fn load_balancer_group_name(cluster: &Cluster<'_>, service: &dyn ServiceSynthesizer) -> String {
    format!(
        "{}{}",
        cluster.name(NamePostFix::LoadBalancerSecurityGroup),
        service.name(NamePostFix::Service)
    )
}

pub fn alb_ingress_name(cluster: &Cluster<'_>, service: &dyn ServiceSynthesizer) -> String {
    format!(
        "{}{}",
        cluster.name(NamePostFix::SecurityGroupIngressAlb),
        service.name(NamePostFix::Service)
    )
}
