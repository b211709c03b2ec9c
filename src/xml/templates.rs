//! XML service templates and topology elements.

use super::artifacts::DeploymentArtifact;
use super::properties::KvProperties;
use crate::base::QName;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceTemplate {
    pub id: String,
    pub name: String,
    pub target_namespace: String,
    pub documentation: Vec<String>,
    pub topology_template: Option<TopologyTemplate>,
    pub boundary_definitions: BoundaryDefinitions,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryDefinitions {
    pub policies: Vec<Policy>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyTemplate {
    pub documentation: Vec<String>,
    pub node_templates: Vec<NodeTemplate>,
    pub relationship_templates: Vec<RelationshipTemplate>,
    pub policies: Vec<Policy>,
}

impl TopologyTemplate {
    pub fn node_template(&self, id: &str) -> Option<&NodeTemplate> {
        self.node_templates.iter().find(|nt| nt.id == id)
    }

    pub fn relationship_template(&self, id: &str) -> Option<&RelationshipTemplate> {
        self.relationship_templates.iter().find(|rt| rt.id == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeTemplate {
    pub id: String,
    pub name: String,
    pub type_: QName,
    pub documentation: Vec<String>,
    pub x: String,
    pub y: String,
    pub properties: KvProperties,
    pub requirements: Vec<Requirement>,
    pub capabilities: Vec<Capability>,
    pub deployment_artifacts: Vec<DeploymentArtifact>,
    pub policies: Vec<Policy>,
}

impl NodeTemplate {
    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|cap| cap.name == name)
    }

    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|req| req.name == name)
    }

    /// The requirement bound to the given relationship template.
    pub fn requirement_for_relationship(&self, relationship: &str) -> Option<&Requirement> {
        self.requirements
            .iter()
            .find(|req| req.relationship.as_deref() == Some(relationship))
    }
}

/// A requirement instance.
///
/// `capability`, `node` and `relationship` are names, resolved when the
/// relationship template is converted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Requirement {
    pub id: String,
    pub name: String,
    pub type_: Option<QName>,
    pub capability: Option<String>,
    pub node: Option<String>,
    pub relationship: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Capability {
    pub id: String,
    pub name: String,
    pub type_: Option<QName>,
    pub properties: KvProperties,
}

/// A relationship between a concrete requirement and a concrete capability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationshipTemplate {
    pub id: String,
    pub name: String,
    pub type_: QName,
    pub documentation: Vec<String>,
    pub source: Requirement,
    pub target: Capability,
    pub properties: KvProperties,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Policy {
    pub name: String,
    pub type_: QName,
    pub documentation: Vec<String>,
    pub targets: Vec<QName>,
    pub properties: KvProperties,
}
