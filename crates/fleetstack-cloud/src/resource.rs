//! Resource definitions

use crate::error::{Result, TemplateError};
use fleetstack_core::Tags;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Provider resource types this workspace emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    EcsCluster,
    EcsService,
    EcsTaskDefinition,
    LoadBalancer,
    TargetGroup,
    Listener,
    SecurityGroup,
    SecurityGroupIngress,
    Vpc,
    InternetGateway,
    VpcGatewayAttachment,
    RouteTable,
    Route,
    Subnet,
    SubnetRouteTableAssociation,
}

impl ResourceType {
    /// Type string understood by the provisioning engine
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EcsCluster => "AWS::ECS::Cluster",
            Self::EcsService => "AWS::ECS::Service",
            Self::EcsTaskDefinition => "AWS::ECS::TaskDefinition",
            Self::LoadBalancer => "AWS::ElasticLoadBalancingV2::LoadBalancer",
            Self::TargetGroup => "AWS::ElasticLoadBalancingV2::TargetGroup",
            Self::Listener => "AWS::ElasticLoadBalancingV2::Listener",
            Self::SecurityGroup => "AWS::EC2::SecurityGroup",
            Self::SecurityGroupIngress => "AWS::EC2::SecurityGroupIngress",
            Self::Vpc => "AWS::EC2::VPC",
            Self::InternetGateway => "AWS::EC2::InternetGateway",
            Self::VpcGatewayAttachment => "AWS::EC2::VPCGatewayAttachment",
            Self::RouteTable => "AWS::EC2::RouteTable",
            Self::Route => "AWS::EC2::Route",
            Self::Subnet => "AWS::EC2::Subnet",
            Self::SubnetRouteTableAssociation => "AWS::EC2::SubnetRouteTableAssociation",
        }
    }

    /// Whether the type accepts a `Tags` property
    pub const fn is_taggable(self) -> bool {
        match self {
            Self::EcsCluster
            | Self::EcsService
            | Self::EcsTaskDefinition
            | Self::LoadBalancer
            | Self::TargetGroup
            | Self::SecurityGroup
            | Self::Vpc
            | Self::InternetGateway
            | Self::RouteTable
            | Self::Subnet => true,
            Self::Listener
            | Self::SecurityGroupIngress
            | Self::VpcGatewayAttachment
            | Self::Route
            | Self::SubnetRouteTableAssociation => false,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What the engine does with the resource when it leaves the template
///
/// Everything synthesized here is torn down with its stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
    #[default]
    Delete,
}

/// A single entry of the resource graph
///
/// Serializes to the wire shape
/// `{ "Type": .., "DeletionPolicy": .., "DependsOn": [..]?, "Properties": {..} }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceDefinition {
    #[serde(rename = "Type")]
    pub resource_type: ResourceType,

    pub deletion_policy: DeletionPolicy,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    pub properties: Map<String, Value>,
}

impl ResourceDefinition {
    /// Create a definition with `DeletionPolicy: Delete`
    ///
    /// `properties` must be a JSON object.
    pub fn new(resource_type: ResourceType, properties: Value) -> Result<Self> {
        let Value::Object(properties) = properties else {
            return Err(TemplateError::InvalidProperties(
                resource_type.as_str().to_string(),
            ));
        };

        Ok(Self {
            resource_type,
            deletion_policy: DeletionPolicy::default(),
            depends_on: Vec::new(),
            properties,
        })
    }

    /// Stamp the tag set into `Properties.Tags`
    ///
    /// Only applies to taggable types. Without a tag set the properties are
    /// left untouched, so no `Tags` key appears.
    pub fn with_tags(mut self, tags: Option<&Tags>) -> Self {
        if let Some(tags) = tags {
            if self.resource_type.is_taggable() {
                self.properties.insert("Tags".to_string(), tags_value(tags));
            }
        }
        self
    }

    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.depends_on.push(name.into());
        self
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

fn tags_value(tags: &Tags) -> Value {
    Value::Array(
        tags.iter()
            .map(|(key, value)| serde_json::json!({ "Key": key, "Value": value }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let def = ResourceDefinition::new(ResourceType::EcsCluster, json!({})).unwrap();

        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({
                "Type": "AWS::ECS::Cluster",
                "DeletionPolicy": "Delete",
                "Properties": {}
            })
        );
    }

    #[test]
    fn test_depends_on_is_serialized_when_present() {
        let def = ResourceDefinition::new(ResourceType::EcsService, json!({ "DesiredCount": 1 }))
            .unwrap()
            .depends_on("ApiListenerDev");

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["DependsOn"], json!(["ApiListenerDev"]));
    }

    #[test]
    fn test_rejects_non_object_properties() {
        let result = ResourceDefinition::new(ResourceType::Vpc, json!(["not", "an", "object"]));
        assert_eq!(
            result,
            Err(TemplateError::InvalidProperties("AWS::EC2::VPC".to_string()))
        );
    }

    #[test]
    fn test_with_tags_on_taggable_type() {
        let tags = Tags::new().with("env", "prod");
        let def = ResourceDefinition::new(ResourceType::SecurityGroup, json!({}))
            .unwrap()
            .with_tags(Some(&tags));

        assert_eq!(
            def.property("Tags"),
            Some(&json!([{ "Key": "env", "Value": "prod" }]))
        );
    }

    #[test]
    fn test_with_tags_skips_untaggable_type() {
        let tags = Tags::new().with("env", "prod");
        let def = ResourceDefinition::new(ResourceType::SecurityGroupIngress, json!({}))
            .unwrap()
            .with_tags(Some(&tags));

        assert!(def.property("Tags").is_none());
    }

    #[test]
    fn test_without_tags_no_key() {
        let def = ResourceDefinition::new(ResourceType::LoadBalancer, json!({}))
            .unwrap()
            .with_tags(None);

        assert!(def.property("Tags").is_none());
    }

    #[test]
    fn test_tags_match_tag_set_serialization() {
        let tags = Tags::new().with("b", "2").with("a", "1");
        assert_eq!(tags_value(&tags), serde_json::to_value(&tags).unwrap());
    }
}
