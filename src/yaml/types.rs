//! YAML type declarations.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use super::Metadata;
use super::constraints::ConstraintClause;
use super::de;
use super::definitions::{
    ArtifactDefinition, AttributeDefinition, CapabilityDefinition, InterfaceDefinition,
    OperationDefinition, PropertyAssignmentOrDefinition, PropertyDefinition,
    RequirementDefinition,
};
use crate::base::QName;

/// Fields shared by every YAML type.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntityType {
    pub description: Option<String>,
    #[serde(deserialize_with = "version")]
    pub version: Option<String>,
    pub derived_from: Option<QName>,
    pub properties: IndexMap<String, PropertyDefinition>,
    pub attributes: IndexMap<String, AttributeDefinition>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
}

/// Versions are written as bare numbers (`1.0`) as often as strings.
fn version<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(super::scalar_string))
}

impl EntityType {
    pub fn derived_from(parent: impl Into<QName>) -> Self {
        Self {
            derived_from: Some(parent.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub requirements: Vec<IndexMap<String, RequirementDefinition>>,
    pub capabilities: IndexMap<String, CapabilityDefinition>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
    pub artifacts: IndexMap<String, ArtifactDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelationshipType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub valid_target_types: Vec<QName>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapabilityType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub valid_source_types: Vec<QName>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub mime_type: Option<String>,
    #[serde(deserialize_with = "de::scalar_list")]
    pub file_ext: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub constraints: Vec<ConstraintClause>,
}

/// Interface types declare operations as plain keys next to `inputs`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterfaceType {
    pub description: Option<String>,
    #[serde(deserialize_with = "version")]
    pub version: Option<String>,
    pub derived_from: Option<QName>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    pub inputs: IndexMap<String, PropertyAssignmentOrDefinition>,
    #[serde(flatten)]
    pub operations: IndexMap<String, OperationDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroupType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub members: Vec<QName>,
    pub requirements: Vec<IndexMap<String, RequirementDefinition>>,
    pub capabilities: IndexMap<String, CapabilityDefinition>,
    pub interfaces: IndexMap<String, InterfaceDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolicyType {
    #[serde(flatten)]
    pub entity: EntityType,
    pub targets: Vec<QName>,
    pub triggers: Option<Value>,
}
