//! Intrinsic references

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// A value that is either a literal identifier or points at another resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Identifier of something that already exists (`vpc-0abc`, `sg-1234`)
    Literal(String),
    /// `{"Ref": name}`
    Ref(String),
    /// `{"Fn::GetAtt": [name, attribute]}`
    GetAtt { resource: String, attribute: String },
}

impl Reference {
    pub fn literal(id: impl Into<String>) -> Self {
        Self::Literal(id.into())
    }

    pub fn to(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }

    /// Name of the referenced resource, if this points into the graph
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Ref(name) => Some(name),
            Self::GetAtt { resource, .. } => Some(resource),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(id) => Value::String(id.clone()),
            Self::Ref(name) => json!({ "Ref": name }),
            Self::GetAtt {
                resource,
                attribute,
            } => json!({ "Fn::GetAtt": [resource, attribute] }),
        }
    }
}

impl From<&Reference> for Value {
    fn from(reference: &Reference) -> Self {
        reference.to_value()
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Render a list of references as a JSON array
pub fn to_values(references: &[Reference]) -> Value {
    Value::Array(references.iter().map(Reference::to_value).collect())
}
