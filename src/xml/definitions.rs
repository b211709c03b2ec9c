//! The root XML `Definitions` document.

use super::artifacts::{ArtifactTemplate, NodeTypeImplementation, RelationshipTypeImplementation};
use super::templates::ServiceTemplate;
use super::types::{
    ArtifactType, CapabilityType, NodeType, PolicyType, RelationshipType, RequirementType,
};

/// An XML import. Two imports are the same import when all fields match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Import {
    pub import_type: String,
    pub namespace: Option<String>,
    pub location: Option<String>,
}

/// One child element of `Definitions`, in document order.
#[derive(Clone, Debug, PartialEq)]
pub enum DefinitionsChild {
    ServiceTemplate(ServiceTemplate),
    NodeType(NodeType),
    NodeTypeImplementation(NodeTypeImplementation),
    RelationshipType(RelationshipType),
    RelationshipTypeImplementation(RelationshipTypeImplementation),
    CapabilityType(CapabilityType),
    ArtifactType(ArtifactType),
    ArtifactTemplate(ArtifactTemplate),
    PolicyType(PolicyType),
    RequirementType(RequirementType),
}

impl DefinitionsChild {
    /// The XML element name of this child.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::ServiceTemplate(_) => "ServiceTemplate",
            Self::NodeType(_) => "NodeType",
            Self::NodeTypeImplementation(_) => "NodeTypeImplementation",
            Self::RelationshipType(_) => "RelationshipType",
            Self::RelationshipTypeImplementation(_) => "RelationshipTypeImplementation",
            Self::CapabilityType(_) => "CapabilityType",
            Self::ArtifactType(_) => "ArtifactType",
            Self::ArtifactTemplate(_) => "ArtifactTemplate",
            Self::PolicyType(_) => "PolicyType",
            Self::RequirementType(_) => "RequirementType",
        }
    }
}

macro_rules! children_of {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&self) -> impl Iterator<Item = &$ty> {
            self.children.iter().filter_map(|child| match child {
                DefinitionsChild::$variant(inner) => Some(inner),
                _ => None,
            })
        }
    };
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Definitions {
    pub id: String,
    pub name: Option<String>,
    pub target_namespace: String,
    pub imports: Vec<Import>,
    pub children: Vec<DefinitionsChild>,
}

impl Definitions {
    pub fn new(id: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_namespace: target_namespace.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, child: DefinitionsChild) {
        self.children.push(child);
    }

    children_of!(service_templates, ServiceTemplate, ServiceTemplate);
    children_of!(node_types, NodeType, NodeType);
    children_of!(node_type_implementations, NodeTypeImplementation, NodeTypeImplementation);
    children_of!(relationship_types, RelationshipType, RelationshipType);
    children_of!(
        relationship_type_implementations,
        RelationshipTypeImplementation,
        RelationshipTypeImplementation
    );
    children_of!(capability_types, CapabilityType, CapabilityType);
    children_of!(artifact_types, ArtifactType, ArtifactType);
    children_of!(artifact_templates, ArtifactTemplate, ArtifactTemplate);
    children_of!(policy_types, PolicyType, PolicyType);
    children_of!(requirement_types, RequirementType, RequirementType);

    /// A node type declared here, by local name.
    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types().find(|nt| nt.entity.name == name)
    }

    pub fn artifact_template(&self, id: &str) -> Option<&ArtifactTemplate> {
        self.artifact_templates().find(|at| at.id == id)
    }
}
