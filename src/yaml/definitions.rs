//! Definitions nested inside YAML types and templates.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use super::constraints::ConstraintClause;
use super::de::{self, short_form};
use crate::base::QName;

/// A typed property declaration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub status: Option<String>,
    pub constraints: Vec<ConstraintClause>,
    pub entry_schema: Option<EntrySchema>,
}

impl PropertyDefinition {
    pub fn of_type(type_: impl Into<QName>) -> Self {
        Self {
            type_: Some(type_.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeDefinition {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub default: Option<Value>,
    pub status: Option<String>,
    pub entry_schema: Option<EntrySchema>,
}

/// Element schema of list and map properties.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntrySchema {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub description: Option<String>,
    pub constraints: Vec<ConstraintClause>,
}

/// Topology inputs and outputs.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParameterDefinition {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub status: Option<String>,
    pub constraints: Vec<ConstraintClause>,
    pub entry_schema: Option<EntrySchema>,
    pub value: Option<Value>,
}

/// Operation inputs and outputs are either declared or assigned.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyAssignmentOrDefinition {
    Definition(PropertyDefinition),
    Assignment(Value),
}

/// A mapping with a `type` key is a definition; anything else is an assignment.
impl<'de> Deserialize<'de> for PropertyAssignmentOrDefinition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let value = Value::deserialize(deserializer)?;
        let is_definition = value
            .as_mapping()
            .is_some_and(|map| map.contains_key("type"));
        if is_definition {
            serde_yaml::from_value(value)
                .map(Self::Definition)
                .map_err(D::Error::custom)
        } else {
            Ok(Self::Assignment(value))
        }
    }
}

/// A requirement declared on a node type.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RequirementDefinition {
    pub capability: Option<QName>,
    pub node: Option<QName>,
    pub relationship: Option<RelationshipDefinition>,
    #[serde(deserialize_with = "de::scalar_list")]
    pub occurrences: Vec<String>,
    pub description: Option<String>,
}

short_form!(RequirementDefinition, |capability| RequirementDefinition {
    capability: Some(QName::from(capability.as_str())),
    ..RequirementDefinition::default()
});

impl RequirementDefinition {
    pub fn lower_bound(&self) -> Option<&str> {
        self.occurrences.first().map(String::as_str)
    }

    pub fn upper_bound(&self) -> Option<&str> {
        self.occurrences.get(1).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RelationshipDefinition {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
}

short_form!(RelationshipDefinition, |type_| RelationshipDefinition {
    type_: Some(QName::from(type_.as_str())),
    ..RelationshipDefinition::default()
});

/// A capability declared on a node type.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct CapabilityDefinition {
    pub description: Option<String>,
    #[serde(deserialize_with = "de::scalar_list")]
    pub occurrences: Vec<String>,
    pub valid_source_types: Vec<QName>,
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub properties: IndexMap<String, PropertyDefinition>,
    pub attributes: IndexMap<String, AttributeDefinition>,
}

short_form!(CapabilityDefinition, |type_| CapabilityDefinition {
    type_: Some(QName::from(type_.as_str())),
    ..CapabilityDefinition::default()
});

impl CapabilityDefinition {
    pub fn of_type(type_: impl Into<QName>) -> Self {
        Self {
            type_: Some(type_.into()),
            ..Self::default()
        }
    }

    pub fn lower_bound(&self) -> Option<&str> {
        self.occurrences.first().map(String::as_str)
    }

    pub fn upper_bound(&self) -> Option<&str> {
        self.occurrences.get(1).map(String::as_str)
    }
}

/// An interface on a type or template.
///
/// Operations are the keys of the mapping that are not `type` or `inputs`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterfaceDefinition {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub inputs: IndexMap<String, PropertyAssignmentOrDefinition>,
    #[serde(flatten)]
    pub operations: IndexMap<String, OperationDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct OperationDefinition {
    pub description: Option<String>,
    pub inputs: IndexMap<String, PropertyAssignmentOrDefinition>,
    pub outputs: IndexMap<String, PropertyAssignmentOrDefinition>,
    pub implementation: Option<Implementation>,
}

short_form!(OperationDefinition, |primary| OperationDefinition {
    implementation: Some(Implementation::primary(primary.as_str())),
    ..OperationDefinition::default()
});

impl OperationDefinition {
    pub fn implemented_by(primary: &str) -> Self {
        Self {
            implementation: Some(Implementation::primary(primary)),
            ..Self::default()
        }
    }
}

/// The artifacts implementing an operation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct Implementation {
    pub primary: Option<QName>,
    pub dependencies: Vec<QName>,
}

short_form!(Implementation, |primary| Implementation::primary(primary.as_str()));

impl Implementation {
    pub fn primary(primary: &str) -> Self {
        Self {
            primary: Some(QName::local(primary)),
            dependencies: Vec::new(),
        }
    }

    /// Dependencies first, then the primary artifact.
    pub fn referenced_artifacts(&self) -> impl Iterator<Item = &QName> {
        self.dependencies.iter().chain(self.primary.iter())
    }
}

/// An artifact declared inline on a type or template.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct ArtifactDefinition {
    #[serde(rename = "type")]
    pub type_: Option<QName>,
    pub repository: Option<String>,
    pub description: Option<String>,
    pub deploy_path: Option<String>,
    pub file: Option<String>,
    pub files: Vec<String>,
    pub properties: IndexMap<String, Value>,
}

short_form!(ArtifactDefinition, |file| ArtifactDefinition {
    file: Some(file),
    ..ArtifactDefinition::default()
});

impl ArtifactDefinition {
    pub fn new(type_: impl Into<QName>, file: impl Into<String>) -> Self {
        Self {
            type_: Some(type_.into()),
            file: Some(file.into()),
            ..Self::default()
        }
    }

    /// `file` followed by `files`.
    pub fn all_files(&self) -> impl Iterator<Item = &str> {
        self.file
            .iter()
            .chain(self.files.iter())
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct ImportDefinition {
    pub file: Option<String>,
    pub repository: Option<String>,
    pub namespace_uri: Option<String>,
    pub namespace_prefix: Option<String>,
}

short_form!(ImportDefinition, |file| ImportDefinition::from_file(file));

impl ImportDefinition {
    pub fn from_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RepositoryDefinition {
    pub description: Option<String>,
    pub url: Option<String>,
    pub credential: Option<Credential>,
}

short_form!(RepositoryDefinition, |url| RepositoryDefinition {
    url: Some(url),
    ..RepositoryDefinition::default()
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub protocol: Option<String>,
    pub token_type: Option<String>,
    pub token: Option<String>,
    pub keys: IndexMap<String, Value>,
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_requirement_definition() {
        let def: RequirementDefinition =
            serde_yaml::from_str("tosca.capabilities.Container").unwrap();
        assert_eq!(
            def.capability.as_ref().map(QName::local_part),
            Some("tosca.capabilities.Container")
        );
        assert!(def.node.is_none());
    }

    #[test]
    fn test_full_requirement_definition() {
        let def: RequirementDefinition = serde_yaml::from_str(
            "capability: Container\nnode: Compute\nrelationship: HostedOn\noccurrences: [1, UNBOUNDED]",
        )
        .unwrap();
        assert_eq!(def.node.as_ref().map(QName::local_part), Some("Compute"));
        assert_eq!(
            def.relationship
                .as_ref()
                .and_then(|r| r.type_.as_ref())
                .map(QName::local_part),
            Some("HostedOn")
        );
        assert_eq!(def.lower_bound(), Some("1"));
        assert_eq!(def.upper_bound(), Some("UNBOUNDED"));
    }

    #[test]
    fn test_interface_operations_are_flattened() {
        let def: InterfaceDefinition = serde_yaml::from_str(
            "type: tosca.interfaces.node.lifecycle.Standard\ncreate: scripts/create.sh\nstart:\n  implementation: start.sh\n  description: Start it",
        )
        .unwrap();
        assert_eq!(def.operations.len(), 2);
        let create = &def.operations["create"];
        assert_eq!(
            create
                .implementation
                .as_ref()
                .and_then(|i| i.primary.as_ref())
                .map(QName::local_part),
            Some("scripts/create.sh")
        );
        assert_eq!(
            def.operations["start"].description.as_deref(),
            Some("Start it")
        );
    }

    #[test]
    fn test_operation_outputs_distinguish_definitions() {
        let op: OperationDefinition = serde_yaml::from_str(
            "outputs:\n  port:\n    type: integer\n  url: { get_attribute: [SELF, url] }",
        )
        .unwrap();
        assert!(matches!(
            op.outputs["port"],
            PropertyAssignmentOrDefinition::Definition(_)
        ));
        assert!(matches!(
            op.outputs["url"],
            PropertyAssignmentOrDefinition::Assignment(_)
        ));
    }

    #[test]
    fn test_artifact_short_form() {
        let artifact: ArtifactDefinition = serde_yaml::from_str("scripts/install.sh").unwrap();
        assert_eq!(artifact.all_files().collect::<Vec<_>>(), vec!["scripts/install.sh"]);
    }
}
