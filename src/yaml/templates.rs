//! Topology templates and their assignments.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use super::Metadata;
use super::constraints::ConstraintClause;
use super::de::{self, short_form};
use super::definitions::{ArtifactDefinition, InterfaceDefinition, ParameterDefinition};
use crate::base::QName;

/// A property value on a template; any YAML value, including function calls.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PropertyAssignment(pub Value);

impl PropertyAssignment {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for PropertyAssignment {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

/// An attribute value, optionally with a description.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeAssignment {
    pub description: Option<String>,
    pub value: Option<Value>,
}

impl<'de> Deserialize<'de> for AttributeAssignment {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_extended = value.as_mapping().is_some_and(|map| {
            !map.is_empty()
                && map
                    .keys()
                    .all(|key| matches!(key.as_str(), Some("description" | "value")))
        });
        if !is_extended {
            return Ok(Self {
                description: None,
                value: Some(value).filter(|v| !v.is_null()),
            });
        }
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self {
            description,
            value: value.get("value").cloned(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub type_: QName,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    pub directives: Vec<String>,
    pub properties: IndexMap<String, PropertyAssignment>,
    pub attributes: IndexMap<String, AttributeAssignment>,
    pub requirements: Vec<IndexMap<String, RequirementAssignment>>,
    pub capabilities: IndexMap<String, CapabilityAssignment>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
    pub artifacts: IndexMap<String, ArtifactDefinition>,
    pub node_filter: Option<NodeFilterDefinition>,
    pub copy: Option<String>,
}

impl NodeTemplate {
    pub fn of_type(type_: impl Into<QName>) -> Self {
        Self {
            type_: type_.into(),
            ..Self::default()
        }
    }

    /// Append a requirement as its own single-key list entry.
    pub fn with_requirement(mut self, name: &str, requirement: RequirementAssignment) -> Self {
        let mut entry = IndexMap::new();
        entry.insert(name.to_string(), requirement);
        self.requirements.push(entry);
        self
    }
}

/// A requirement on a node template. The short form names the target node.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RequirementAssignment {
    pub node: Option<QName>,
    pub relationship: Option<RelationshipAssignment>,
    pub capability: Option<QName>,
    pub node_filter: Option<NodeFilterDefinition>,
    #[serde(deserialize_with = "de::scalar_list")]
    pub occurrences: Vec<String>,
}

short_form!(RequirementAssignment, |node| RequirementAssignment {
    node: Some(QName::from(node.as_str())),
    ..RequirementAssignment::default()
});

impl RequirementAssignment {
    pub fn new(node: &str, capability: &str, relationship: &str) -> Self {
        Self {
            node: Some(QName::from(node)),
            capability: Some(QName::from(capability)),
            relationship: Some(RelationshipAssignment::of_type(relationship)),
            ..Self::default()
        }
    }
}

/// The short form names the relationship type or template.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RelationshipAssignment {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub properties: IndexMap<String, PropertyAssignment>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
}

short_form!(RelationshipAssignment, |type_| RelationshipAssignment::of_type(
    type_.as_str()
));

impl RelationshipAssignment {
    pub fn of_type(type_: &str) -> Self {
        Self {
            type_: Some(QName::from(type_)),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapabilityAssignment {
    pub properties: IndexMap<String, PropertyAssignment>,
    pub attributes: IndexMap<String, AttributeAssignment>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeFilterDefinition {
    pub properties: Vec<IndexMap<String, PropertyFilterDefinition>>,
    pub capabilities: Vec<IndexMap<String, Value>>,
}

/// Constraints a node filter places on one property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyFilterDefinition {
    pub constraints: Vec<ConstraintClause>,
}

/// Either a single clause or a list of clauses.
impl<'de> Deserialize<'de> for PropertyFilterDefinition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let constraints = match Value::deserialize(deserializer)? {
            Value::Sequence(items) => items
                .into_iter()
                .map(serde_yaml::from_value)
                .collect::<Result<Vec<_>, _>>(),
            other => serde_yaml::from_value(other).map(|clause| vec![clause]),
        }
        .map_err(D::Error::custom)?;
        Ok(Self { constraints })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelationshipTemplate {
    #[serde(rename = "type")]
    pub type_: QName,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    pub properties: IndexMap<String, PropertyAssignment>,
    pub attributes: IndexMap<String, AttributeAssignment>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
    pub copy: Option<String>,
}

impl RelationshipTemplate {
    pub fn of_type(type_: impl Into<QName>) -> Self {
        Self {
            type_: type_.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupDefinition {
    #[serde(rename = "type")]
    pub type_: QName,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    pub properties: IndexMap<String, PropertyAssignment>,
    pub members: Vec<String>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolicyDefinition {
    #[serde(rename = "type")]
    pub type_: QName,
    pub description: Option<String>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    pub properties: IndexMap<String, PropertyAssignment>,
    pub targets: Vec<QName>,
}

impl PolicyDefinition {
    pub fn of_type(type_: impl Into<QName>) -> Self {
        Self {
            type_: type_.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubstitutionMappings {
    pub node_type: Option<QName>,
    pub capabilities: IndexMap<String, Vec<String>>,
    pub requirements: IndexMap<String, Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TopologyTemplateDefinition {
    pub description: Option<String>,
    pub inputs: IndexMap<String, ParameterDefinition>,
    pub node_templates: IndexMap<String, NodeTemplate>,
    pub relationship_templates: IndexMap<String, RelationshipTemplate>,
    pub groups: IndexMap<String, GroupDefinition>,
    pub policies: Vec<IndexMap<String, PolicyDefinition>>,
    pub outputs: IndexMap<String, ParameterDefinition>,
    pub substitution_mappings: Option<SubstitutionMappings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_short_form_names_node() {
        let req: RequirementAssignment = serde_yaml::from_str("db_server").unwrap();
        assert_eq!(req.node.as_ref().map(QName::local_part), Some("db_server"));
        assert!(req.relationship.is_none());
    }

    #[test]
    fn test_requirement_relationship_short_form() {
        let req: RequirementAssignment = serde_yaml::from_str(
            "node: web\ncapability: host\nrelationship: web_hosted_on",
        )
        .unwrap();
        let relationship = req.relationship.unwrap();
        assert_eq!(relationship.type_.unwrap().to_string(), "web_hosted_on");
    }

    #[test]
    fn test_attribute_assignment_forms() {
        let plain: AttributeAssignment = serde_yaml::from_str("8080").unwrap();
        assert_eq!(plain.value, Some(Value::from(8080)));
        assert!(plain.description.is_none());

        let extended: AttributeAssignment =
            serde_yaml::from_str("description: port\nvalue: 80").unwrap();
        assert_eq!(extended.description.as_deref(), Some("port"));
        assert_eq!(extended.value, Some(Value::from(80)));
    }

    #[test]
    fn test_property_filter_accepts_single_clause() {
        let filter: PropertyFilterDefinition = serde_yaml::from_str("equal: 2").unwrap();
        assert_eq!(filter.constraints.len(), 1);
        let filter: PropertyFilterDefinition =
            serde_yaml::from_str("[{greater_than: 1}, {less_than: 5}]").unwrap();
        assert_eq!(filter.constraints.len(), 2);
    }
}
