//! Artifact templates and type implementation wrappers.

use super::properties::KvProperties;
use crate::base::QName;

/// A first-class, namespace-addressable artifact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactTemplate {
    pub id: String,
    pub type_: Option<QName>,
    pub artifact_references: Vec<String>,
    pub properties: KvProperties,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeploymentArtifact {
    pub name: String,
    pub artifact_type: Option<QName>,
    pub artifact_ref: QName,
}

/// An artifact implementing an interface or a single operation.
///
/// `operation_name` is `None` when the artifact serves several operations;
/// `interface_name` is `None` when it serves several interfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImplementationArtifact {
    pub name: String,
    pub artifact_type: Option<QName>,
    pub artifact_ref: QName,
    pub interface_name: Option<String>,
    pub operation_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeTypeImplementation {
    pub id: String,
    pub node_type: QName,
    pub target_namespace: Option<String>,
    pub deployment_artifacts: Vec<DeploymentArtifact>,
    pub implementation_artifacts: Vec<ImplementationArtifact>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationshipTypeImplementation {
    pub id: String,
    pub relationship_type: QName,
    pub target_namespace: Option<String>,
    pub implementation_artifacts: Vec<ImplementationArtifact>,
}
