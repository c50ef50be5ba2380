//! Stack outputs

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single stack output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
}

impl OutputDefinition {
    pub fn new(value: Value) -> Self {
        Self {
            description: None,
            value,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Outputs keyed by name, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    entries: Vec<(String, OutputDefinition)>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, output: OutputDefinition) -> Self {
        self.merge_entry(name.into(), output);
        self
    }

    /// Append the outputs of `other`
    ///
    /// Output names are the caller's to keep unique. This is not a plain
    /// map union where a later key overwrites an earlier one: on a
    /// collision the first definition wins and the later one is dropped
    /// with a warning.
    pub fn merge(mut self, other: Outputs) -> Self {
        for (name, output) in other.entries {
            self.merge_entry(name, output);
        }
        self
    }

    fn merge_entry(&mut self, name: String, output: OutputDefinition) {
        if self.contains(&name) {
            tracing::warn!(output = %name, "Output name defined twice, keeping the first");
            return;
        }
        self.entries.push((name, output));
    }

    pub fn get(&self, name: &str) -> Option<&OutputDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, output)| output)
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
}

impl Serialize for Outputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, output) in &self.entries {
            map.serialize_entry(name, output)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_merge_preserves_declaration_order() {
        let first = Outputs::new().with("B", OutputDefinition::new(json!("b")));
        let second = Outputs::new()
            .with("A", OutputDefinition::new(json!("a")))
            .with("C", OutputDefinition::new(json!("c")));

        let merged = first.merge(second);
        let names: Vec<&str> = merged.names().collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_merge_keeps_first_on_collision() {
        let first = Outputs::new().with("Url", OutputDefinition::new(json!("first")));
        let second = Outputs::new().with("Url", OutputDefinition::new(json!("second")));

        let merged = first.merge(second);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("Url").unwrap().value, json!("first"));
    }

    #[test]
    fn test_serialization() {
        let outputs = Outputs::new().with(
            "Endpoint",
            OutputDefinition::new(json!("http://example.com")).with_description("Web endpoint"),
        );

        assert_eq!(
            serde_json::to_value(&outputs).unwrap(),
            json!({
                "Endpoint": {
                    "Description": "Web endpoint",
                    "Value": "http://example.com"
                }
            })
        );
    }
}
