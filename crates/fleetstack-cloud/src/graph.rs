//! Ordered resource graph

use crate::error::{Result, TemplateError};
use crate::resource::{ResourceDefinition, ResourceType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Resources keyed by logical name, in emission order
///
/// A name can be inserted only once. Fragments produced by different
/// synthesizers are combined with [`ResourceGraph::merge`], which fails on
/// the first name both sides define instead of letting one overwrite the
/// other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceGraph {
    entries: Vec<(String, ResourceDefinition)>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, resource: ResourceDefinition) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(TemplateError::DuplicateResource(name));
        }
        self.entries.push((name, resource));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, resource: ResourceDefinition) -> Result<Self> {
        self.insert(name, resource)?;
        Ok(self)
    }

    /// Append every entry of `other`, keeping both orders
    pub fn merge(mut self, other: ResourceGraph) -> Result<Self> {
        for (name, resource) in other.entries {
            self.insert(name, resource)?;
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ResourceDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, resource)| resource)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceDefinition)> {
        self.entries
            .iter()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    /// Get resources by type
    pub fn by_type(&self, resource_type: ResourceType) -> Vec<(&str, &ResourceDefinition)> {
        self.iter()
            .filter(|(_, resource)| resource.resource_type == resource_type)
            .collect()
    }
}

impl IntoIterator for ResourceGraph {
    type Item = (String, ResourceDefinition);
    type IntoIter = std::vec::IntoIter<(String, ResourceDefinition)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ResourceGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, resource) in &self.entries {
            map.serialize_entry(name, resource)?;
        }
        map.end()
    }
}
