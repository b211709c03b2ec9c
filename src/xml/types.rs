//! XML type declarations.

use super::properties::WineryPropertiesDefinition;
use crate::base::QName;

/// A name/value tag. XML TOSCA has no metadata, so metadata becomes tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fields shared by every XML type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityType {
    pub name: String,
    pub target_namespace: Option<String>,
    pub documentation: Vec<String>,
    pub derived_from: Option<QName>,
    pub tags: Vec<Tag>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub properties_definition: Option<WineryPropertiesDefinition>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.value.as_str())
    }

    /// The qualified name of this type.
    pub fn qname(&self) -> QName {
        QName::new(self.target_namespace.as_deref().unwrap_or(""), self.name.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeType {
    pub entity: EntityType,
    pub requirement_definitions: Vec<RequirementDefinition>,
    pub capability_definitions: Vec<CapabilityDefinition>,
    pub interfaces: Vec<Interface>,
}

impl NodeType {
    pub fn capability_definition(&self, name: &str) -> Option<&CapabilityDefinition> {
        self.capability_definitions.iter().find(|def| def.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationshipType {
    pub entity: EntityType,
    pub source_interfaces: Vec<Interface>,
    pub interfaces: Vec<Interface>,
    pub target_interfaces: Vec<Interface>,
    pub valid_source: Option<QName>,
    pub valid_target: Option<QName>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapabilityType {
    pub entity: EntityType,
    pub valid_source_types: Vec<QName>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactType {
    pub entity: EntityType,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyType {
    pub entity: EntityType,
    /// Node types the policy applies to.
    pub applies_to: Vec<QName>,
}

/// XML-only type synthesized from requirement definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequirementType {
    pub entity: EntityType,
    pub required_capability_type: Option<QName>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequirementDefinition {
    pub name: String,
    pub requirement_type: Option<QName>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub capability: Option<QName>,
    pub node: Option<QName>,
    pub relationship: Option<QName>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapabilityDefinition {
    pub name: String,
    pub capability_type: Option<QName>,
    pub documentation: Vec<String>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub valid_source_types: Vec<QName>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interface {
    pub name: String,
    pub operations: Vec<Operation>,
}

impl Interface {
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operation {
    pub name: String,
    pub documentation: Vec<String>,
    pub input_parameters: Vec<Parameter>,
    pub output_parameters: Vec<Parameter>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_: String,
    pub required: bool,
}
