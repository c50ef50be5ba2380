//! Network options

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};

/// Where the cluster's network comes from
///
/// With `existing` set, the VPC, its subnets and its security groups are
/// owned elsewhere and only referenced. Otherwise a new VPC is created from
/// `cidr` and `subnets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcSpec {
    #[serde(default)]
    pub existing: Option<ExistingVpc>,
    #[serde(default = "default_cidr")]
    pub cidr: String,
    /// One subnet per CIDR block, spread over availability zones in order
    #[serde(default = "default_subnets")]
    pub subnets: Vec<String>,
}

/// An externally managed VPC
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingVpc {
    pub vpc_id: String,
    #[serde(default)]
    pub subnet_ids: Vec<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
}

fn default_cidr() -> String {
    "10.0.0.0/16".to_string()
}

fn default_subnets() -> Vec<String> {
    vec!["10.0.0.0/24".to_string(), "10.0.1.0/24".to_string()]
}

impl Default for VpcSpec {
    fn default() -> Self {
        Self {
            existing: None,
            cidr: default_cidr(),
            subnets: default_subnets(),
        }
    }
}

impl VpcSpec {
    /// Reference an existing VPC
    pub fn existing(
        vpc_id: impl Into<String>,
        subnet_ids: Vec<String>,
        security_group_ids: Vec<String>,
    ) -> Self {
        Self {
            existing: Some(ExistingVpc {
                vpc_id: vpc_id.into(),
                subnet_ids,
                security_group_ids,
            }),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match &self.existing {
            Some(existing) if existing.subnet_ids.is_empty() => Err(SpecError::MissingSubnets {
                vpc_id: existing.vpc_id.clone(),
            }),
            None if self.subnets.is_empty() => Err(SpecError::NoSubnetBlocks),
            _ => Ok(()),
        }
    }
}
