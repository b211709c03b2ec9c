//! Artifact templates and the deployment/implementation split.

use indexmap::IndexMap;
use tracing::debug;

use super::Context;
use crate::base::QName;
use crate::base::namespaces::{ARTIFACT_TYPES_NS, IMPLEMENTATION_SUFFIX, SCRIPT_ARTIFACT};
use crate::xml::{
    ArtifactTemplate, DeploymentArtifact, ImplementationArtifact, NodeTypeImplementation,
    RelationshipTypeImplementation,
};
use crate::yaml::{ArtifactDefinition, InterfaceDefinition, scalar_string};

/// Where an implementation artifact is used.
///
/// `None` means the artifact is shared: across several operations of one
/// interface (`operation`), or across interfaces (`interface`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUse {
    pub interface: Option<String>,
    pub operation: Option<String>,
}

impl ArtifactUse {
    fn record(&mut self, interface: &str, operation: &str) {
        if self.interface.as_deref() == Some(interface) {
            if self.operation.as_deref() != Some(operation) {
                self.operation = None;
            }
        } else {
            self.interface = None;
            self.operation = None;
        }
    }
}

/// Fold `(interface, operation, artifact)` usages into one [`ArtifactUse`]
/// per artifact, in first-use order.
pub fn classify_usages<'a, I>(usages: I) -> IndexMap<String, ArtifactUse>
where
    I: IntoIterator<Item = (&'a str, &'a str, String)>,
{
    let mut uses: IndexMap<String, ArtifactUse> = IndexMap::new();
    for (interface, operation, artifact) in usages {
        match uses.get_mut(&artifact) {
            Some(existing) => existing.record(interface, operation),
            None => {
                uses.insert(
                    artifact,
                    ArtifactUse {
                        interface: Some(interface.to_string()),
                        operation: Some(operation.to_string()),
                    },
                );
            }
        }
    }
    uses
}

/// Artifacts referenced from operation implementations, matched by local
/// name against the declared artifacts.
pub fn implementation_uses(
    artifacts: &IndexMap<String, ArtifactDefinition>,
    interfaces: &IndexMap<String, InterfaceDefinition>,
) -> IndexMap<String, ArtifactUse> {
    let usages = interfaces.iter().flat_map(|(interface, definition)| {
        definition
            .operations
            .iter()
            .filter_map(|(operation, op)| op.implementation.as_ref().map(|imp| (operation, imp)))
            .flat_map(move |(operation, implementation)| {
                implementation
                    .referenced_artifacts()
                    .filter(|artifact| artifacts.contains_key(artifact.local_part()))
                    .map(move |artifact| {
                        (
                            interface.as_str(),
                            operation.as_str(),
                            artifact.local_part().to_string(),
                        )
                    })
            })
    });
    classify_usages(usages)
}

/// The artifact template for an inline artifact definition.
pub(crate) fn artifact_template(id: &str, node: &ArtifactDefinition) -> ArtifactTemplate {
    ArtifactTemplate {
        id: id.to_string(),
        type_: node.type_.clone(),
        artifact_references: node.all_files().map(str::to_string).collect(),
        properties: node
            .properties
            .iter()
            .filter_map(|(key, value)| scalar_string(value).map(|v| (key.clone(), v)))
            .collect(),
    }
}

fn artifact_id(owner: &str, artifact: &str) -> String {
    format!("{owner}_{artifact}")
}

/// Register `<owner>_<name>` artifact templates and return deployment
/// artifacts referencing them.
pub(crate) fn deployment_artifacts<'a, I>(
    cx: &mut Context<'_>,
    owner: &str,
    artifacts: I,
) -> Vec<DeploymentArtifact>
where
    I: IntoIterator<Item = (&'a String, &'a ArtifactDefinition)>,
{
    artifacts
        .into_iter()
        .map(|(name, definition)| {
            let template = artifact_template(&artifact_id(owner, name), definition);
            let artifact_ref = QName::new(cx.session.namespace.as_str(), template.id.as_str());
            cx.session.add_artifact_template(template);
            DeploymentArtifact {
                name: name.clone(),
                artifact_type: definition.type_.clone(),
                artifact_ref,
            }
        })
        .collect()
}

fn implementation_artifacts(
    cx: &mut Context<'_>,
    owner: &str,
    artifacts: &IndexMap<String, ArtifactDefinition>,
    uses: IndexMap<String, ArtifactUse>,
) -> Vec<ImplementationArtifact> {
    uses.into_iter()
        .filter_map(|(name, usage)| {
            let definition = artifacts.get(&name)?;
            let template = artifact_template(&artifact_id(owner, &name), definition);
            let artifact_ref = QName::new(cx.session.namespace.as_str(), template.id.as_str());
            cx.session.add_artifact_template(template);
            Some(ImplementationArtifact {
                name,
                artifact_type: definition.type_.clone(),
                artifact_ref,
                interface_name: usage.interface,
                operation_name: usage.operation,
            })
        })
        .collect()
}

/// Build and record the `<type>_impl` wrapper of a node type.
///
/// Artifacts referenced by an operation implementation become implementation
/// artifacts; the rest become deployment artifacts.
pub(crate) fn node_type_implementation(
    cx: &mut Context<'_>,
    type_name: &str,
    target_namespace: Option<&str>,
    artifacts: &IndexMap<String, ArtifactDefinition>,
    interfaces: &IndexMap<String, InterfaceDefinition>,
) {
    let uses = implementation_uses(artifacts, interfaces);
    let deployment: Vec<_> = artifacts
        .iter()
        .filter(|(name, _)| !uses.contains_key(name.as_str()))
        .collect();
    let deployment_artifacts = deployment_artifacts(cx, type_name, deployment);
    let implementation_artifacts = implementation_artifacts(cx, type_name, artifacts, uses);
    debug!(
        node_type = type_name,
        deployment = deployment_artifacts.len(),
        implementation = implementation_artifacts.len(),
        "node type implementation"
    );

    let namespace = target_namespace.unwrap_or(&cx.session.namespace).to_string();
    cx.session.node_type_implementations.push(NodeTypeImplementation {
        id: format!("{type_name}{IMPLEMENTATION_SUFFIX}"),
        node_type: QName::new(namespace.as_str(), type_name),
        target_namespace: Some(namespace),
        deployment_artifacts,
        implementation_artifacts,
    });
}

/// Build and record the `<type>_impl` wrapper of a relationship type.
///
/// Relationship types declare no artifacts; each operation's primary
/// implementation becomes a script artifact. A primary that is a path is
/// named after its operation, otherwise after itself.
pub(crate) fn relationship_type_implementation(
    cx: &mut Context<'_>,
    type_name: &str,
    target_namespace: Option<&str>,
    interfaces: &IndexMap<String, InterfaceDefinition>,
) {
    let script_type = QName::new(ARTIFACT_TYPES_NS, SCRIPT_ARTIFACT);
    let mut artifacts = IndexMap::new();
    let mut usages = Vec::new();
    for (interface, definition) in interfaces {
        for (operation, op) in &definition.operations {
            let Some(primary) = op.implementation.as_ref().and_then(|imp| imp.primary.as_ref())
            else {
                continue;
            };
            let primary = primary.local_part();
            if primary.eq_ignore_ascii_case("null") {
                continue;
            }
            let (name, files) = if primary.contains('/') {
                (operation.clone(), vec![primary.to_string()])
            } else {
                (primary.to_string(), Vec::new())
            };
            artifacts.entry(name.clone()).or_insert_with(|| ArtifactDefinition {
                type_: Some(script_type.clone()),
                files,
                ..ArtifactDefinition::default()
            });
            usages.push((interface.as_str(), operation.as_str(), name));
        }
    }
    let uses = classify_usages(usages);
    let implementation_artifacts = implementation_artifacts(cx, type_name, &artifacts, uses);

    let namespace = target_namespace.unwrap_or(&cx.session.namespace).to_string();
    cx.session
        .relationship_type_implementations
        .push(RelationshipTypeImplementation {
            id: format!("{type_name}{IMPLEMENTATION_SUFFIX}"),
            relationship_type: QName::new(namespace.as_str(), type_name),
            target_namespace: Some(namespace),
            implementation_artifacts,
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(
        interface: &'static str,
        operation: &'static str,
        artifact: &str,
    ) -> (&'static str, &'static str, String) {
        (interface, operation, artifact.to_string())
    }

    #[test]
    fn test_single_use_keeps_both_annotations() {
        let uses = classify_usages([usage("Standard", "create", "install")]);
        assert_eq!(uses["install"].interface.as_deref(), Some("Standard"));
        assert_eq!(uses["install"].operation.as_deref(), Some("create"));
    }

    #[test]
    fn test_shared_within_interface_clears_operation() {
        let uses = classify_usages([
            usage("Standard", "create", "script"),
            usage("Standard", "start", "script"),
        ]);
        assert_eq!(uses["script"].interface.as_deref(), Some("Standard"));
        assert_eq!(uses["script"].operation, None);
    }

    #[test]
    fn test_shared_across_interfaces_clears_both() {
        let uses = classify_usages([
            usage("Standard", "create", "script"),
            usage("Configure", "create", "script"),
            usage("Standard", "start", "script"),
        ]);
        assert_eq!(
            uses["script"],
            ArtifactUse {
                interface: None,
                operation: None
            }
        );
    }

    #[test]
    fn test_implementation_uses_match_local_names_only_for_declared_artifacts() {
        let artifacts: IndexMap<String, ArtifactDefinition> = serde_yaml::from_str(
            "install: scripts/install.sh\nimage: images/disk.qcow2\n",
        )
        .unwrap();
        let interfaces: IndexMap<String, InterfaceDefinition> = serde_yaml::from_str(
            "Standard:\n  create:\n    implementation:\n      primary: install\n      dependencies: [helper]\n",
        )
        .unwrap();

        let uses = implementation_uses(&artifacts, &interfaces);

        assert_eq!(uses.keys().collect::<Vec<_>>(), ["install"]);
    }
}
