//! Network placement
//!
//! The cluster only needs a read-only view of the network it runs in:
//! whether it is externally owned, how to refer to it, its subnets and
//! (when externally owned) the security groups that already exist.
//! [`Vpc`] is the implementation backed by [`VpcSpec`].

use crate::error::Result;
use fleetstack_cloud::{
    NamePostFix, Reference, ResourceDefinition, ResourceGraph, ResourceNamer, ResourceType,
};
use fleetstack_core::{Tags, VpcSpec};
use serde_json::json;

const NETWORK_PREFIX: &str = "Network";

/// Read-only view of the network a cluster is placed in
pub trait NetworkContext: Send + Sync {
    /// True when the VPC is owned outside this template
    fn use_existing_network(&self) -> bool;

    /// Reference to the VPC itself
    fn ref_name(&self) -> Reference;

    /// Subnets to place the load balancer and tasks in, in order
    fn subnets(&self) -> Vec<Reference>;

    /// Pre-existing security groups. Only meaningful when
    /// [`use_existing_network`](Self::use_existing_network) is true.
    fn security_groups(&self) -> Vec<Reference>;
}

/// VPC synthesizer
pub struct Vpc {
    spec: VpcSpec,
    namer: ResourceNamer,
    tags: Option<Tags>,
}

impl Vpc {
    pub fn new(stage: &str, spec: VpcSpec, tags: Option<Tags>) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            namer: ResourceNamer::new(NETWORK_PREFIX, stage),
            tags,
        })
    }

    pub fn name(&self, postfix: NamePostFix) -> String {
        self.namer.name(postfix)
    }

    /// Network resources to create
    ///
    /// Empty for an existing VPC. Otherwise the VPC, an internet gateway and
    /// its attachment, a public route table with a default route, and one
    /// subnet plus route-table association per CIDR block.
    pub fn generate(&self) -> Result<ResourceGraph> {
        if self.spec.existing.is_some() {
            tracing::debug!("Existing VPC, no network resources to create");
            return Ok(ResourceGraph::new());
        }

        let tags = self.tags.as_ref();
        let vpc = self.name(NamePostFix::Vpc);
        let gateway = self.name(NamePostFix::InternetGateway);
        let attachment = self.name(NamePostFix::GatewayAttachment);
        let route_table = self.name(NamePostFix::RouteTable);

        let mut graph = ResourceGraph::new()
            .with(
                &vpc,
                ResourceDefinition::new(
                    ResourceType::Vpc,
                    json!({
                        "CidrBlock": self.spec.cidr,
                        "EnableDnsSupport": true,
                        "EnableDnsHostnames": true
                    }),
                )?
                .with_tags(tags),
            )?
            .with(
                &gateway,
                ResourceDefinition::new(ResourceType::InternetGateway, json!({}))?.with_tags(tags),
            )?
            .with(
                &attachment,
                ResourceDefinition::new(
                    ResourceType::VpcGatewayAttachment,
                    json!({
                        "VpcId": { "Ref": vpc },
                        "InternetGatewayId": { "Ref": gateway }
                    }),
                )?,
            )?
            .with(
                &route_table,
                ResourceDefinition::new(ResourceType::RouteTable, json!({ "VpcId": { "Ref": vpc } }))?
                    .with_tags(tags),
            )?
            .with(
                self.name(NamePostFix::DefaultRoute),
                ResourceDefinition::new(
                    ResourceType::Route,
                    json!({
                        "RouteTableId": { "Ref": route_table },
                        "DestinationCidrBlock": "0.0.0.0/0",
                        "GatewayId": { "Ref": gateway }
                    }),
                )?
                .depends_on(&attachment),
            )?;

        for (index, cidr) in self.spec.subnets.iter().enumerate() {
            let subnet = self.namer.indexed(NamePostFix::Subnet, index);
            graph.insert(
                &subnet,
                ResourceDefinition::new(
                    ResourceType::Subnet,
                    json!({
                        "VpcId": { "Ref": vpc },
                        "CidrBlock": cidr,
                        "AvailabilityZone": { "Fn::Select": [index, { "Fn::GetAZs": "" }] },
                        "MapPublicIpOnLaunch": true
                    }),
                )?
                .with_tags(tags),
            )?;
            graph.insert(
                self.namer
                    .indexed(NamePostFix::SubnetRouteTableAssociation, index),
                ResourceDefinition::new(
                    ResourceType::SubnetRouteTableAssociation,
                    json!({
                        "SubnetId": { "Ref": subnet },
                        "RouteTableId": { "Ref": route_table }
                    }),
                )?,
            )?;
        }

        tracing::debug!(
            subnets = self.spec.subnets.len(),
            resources = graph.len(),
            "Synthesized network resources"
        );
        Ok(graph)
    }
}

impl NetworkContext for Vpc {
    fn use_existing_network(&self) -> bool {
        self.spec.existing.is_some()
    }

    fn ref_name(&self) -> Reference {
        match &self.spec.existing {
            Some(existing) => Reference::literal(&existing.vpc_id),
            None => Reference::to(self.name(NamePostFix::Vpc)),
        }
    }

    fn subnets(&self) -> Vec<Reference> {
        match &self.spec.existing {
            Some(existing) => existing
                .subnet_ids
                .iter()
                .map(Reference::literal)
                .collect(),
            None => (0..self.spec.subnets.len())
                .map(|index| Reference::to(self.namer.indexed(NamePostFix::Subnet, index)))
                .collect(),
        }
    }

    fn security_groups(&self) -> Vec<Reference> {
        match &self.spec.existing {
            Some(existing) => existing
                .security_group_ids
                .iter()
                .map(Reference::literal)
                .collect(),
            None => Vec::new(),
        }
    }
}
