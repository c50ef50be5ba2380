//! Logical resource naming
//!
//! Every logical name is `{Prefix}{Token}{Stage}`. The prefix identifies
//! the owner (a cluster, one of its services, a network), the token the
//! kind of resource, and the stage keeps names apart when several stages
//! share one template.

pub use fleetstack_core::pascal_case;

/// Resource-kind token appended to an owner's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamePostFix {
    Cluster,
    LoadBalancer,
    ContainerSecurityGroup,
    SecurityGroupIngressSelf,
    SecurityGroupIngressAlb,
    LoadBalancerSecurityGroup,
    Service,
    TaskDefinition,
    TargetGroup,
    LoadBalancerListener,
    Endpoint,
    Vpc,
    InternetGateway,
    GatewayAttachment,
    RouteTable,
    DefaultRoute,
    Subnet,
    SubnetRouteTableAssociation,
}

impl NamePostFix {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Cluster => "Cluster",
            Self::LoadBalancer => "LoadBalancer",
            Self::ContainerSecurityGroup => "ContainerSecurityGroup",
            Self::SecurityGroupIngressSelf => "SecurityGroupIngressSelf",
            Self::SecurityGroupIngressAlb => "SecurityGroupIngressALB",
            Self::LoadBalancerSecurityGroup => "LoadBalancerSecurityGroup",
            Self::Service => "Service",
            Self::TaskDefinition => "TaskDefinition",
            Self::TargetGroup => "TargetGroup",
            Self::LoadBalancerListener => "Listener",
            Self::Endpoint => "Endpoint",
            Self::Vpc => "VPC",
            Self::InternetGateway => "InternetGateway",
            Self::GatewayAttachment => "GatewayAttachment",
            Self::RouteTable => "RouteTable",
            Self::DefaultRoute => "DefaultRoute",
            Self::Subnet => "Subnet",
            Self::SubnetRouteTableAssociation => "SubnetRouteTableAssociation",
        }
    }
}

impl std::fmt::Display for NamePostFix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Builds logical names for one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNamer {
    prefix: String,
    stage: String,
}

impl ResourceNamer {
    pub fn new(prefix: &str, stage: &str) -> Self {
        Self {
            prefix: pascal_case(prefix),
            stage: pascal_case(stage),
        }
    }

    /// Namer for something owned by this one (e.g. a cluster's service)
    pub fn child(&self, segment: &str) -> Self {
        Self {
            prefix: format!("{}{}", self.prefix, pascal_case(segment)),
            stage: self.stage.clone(),
        }
    }

    pub fn name(&self, postfix: NamePostFix) -> String {
        format!("{}{}{}", self.prefix, postfix.token(), self.stage)
    }

    /// Name for the `index`-th resource of a repeated kind
    pub fn indexed(&self, postfix: NamePostFix, index: usize) -> String {
        format!("{}{}{}{}", self.prefix, postfix.token(), index, self.stage)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        let namer = ResourceNamer::new("ECS", "prod").child("billing-api");
        assert_eq!(namer.prefix(), "ECSBillingApi");
        assert_eq!(namer.stage(), "Prod");
        assert_eq!(namer.name(NamePostFix::Cluster), "ECSBillingApiClusterProd");
        assert_eq!(
            namer.name(NamePostFix::SecurityGroupIngressAlb),
            "ECSBillingApiSecurityGroupIngressALBProd"
        );
    }

    #[test]
    fn test_child_keeps_stage() {
        let cluster = ResourceNamer::new("ECS", "dev").child("api");
        let service = cluster.child("web");

        assert_eq!(service.name(NamePostFix::Service), "ECSApiWebServiceDev");
        assert_ne!(
            cluster.name(NamePostFix::Service),
            service.name(NamePostFix::Service)
        );
    }

    #[test]
    fn test_indexed() {
        let namer = ResourceNamer::new("network", "dev");
        assert_eq!(namer.indexed(NamePostFix::Subnet, 0), "NetworkSubnet0Dev");
        assert_eq!(namer.indexed(NamePostFix::Subnet, 1), "NetworkSubnet1Dev");
    }

    #[test]
    fn test_tokens_are_distinct() {
        let all = [
            NamePostFix::Cluster,
            NamePostFix::LoadBalancer,
            NamePostFix::ContainerSecurityGroup,
            NamePostFix::SecurityGroupIngressSelf,
            NamePostFix::SecurityGroupIngressAlb,
            NamePostFix::LoadBalancerSecurityGroup,
            NamePostFix::Service,
            NamePostFix::TaskDefinition,
            NamePostFix::TargetGroup,
            NamePostFix::LoadBalancerListener,
            NamePostFix::Endpoint,
            NamePostFix::Vpc,
            NamePostFix::InternetGateway,
            NamePostFix::GatewayAttachment,
            NamePostFix::RouteTable,
            NamePostFix::DefaultRoute,
            NamePostFix::Subnet,
            NamePostFix::SubnetRouteTableAssociation,
        ];

        let tokens: std::collections::HashSet<&str> = all.iter().map(|p| p.token()).collect();
        assert_eq!(tokens.len(), all.len());
    }
}
