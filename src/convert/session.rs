//! Mutable state of one conversion call.

use indexmap::IndexMap;

use crate::base::QName;
use crate::base::namespaces::BOUNDARY_TARGET;
use crate::xml::{
    ArtifactTemplate, Import, NodeTemplate, NodeTypeImplementation, Policy,
    RelationshipTypeImplementation, RequirementType,
};
use crate::yaml::InterfaceType;

/// Entities synthesized while converting, plus lookup indices.
///
/// Owned by the [`Converter`](super::Converter) and cleared at the start of
/// every conversion.
#[derive(Debug, Default)]
pub struct Session {
    pub namespace: String,
    pub artifact_templates: IndexMap<String, ArtifactTemplate>,
    pub node_type_implementations: Vec<NodeTypeImplementation>,
    pub relationship_type_implementations: Vec<RelationshipTypeImplementation>,
    /// Policies by target node template name; untargeted under `"boundary"`.
    pub policies: IndexMap<String, Vec<Policy>>,
    pub imports: Vec<Import>,
    pub requirement_types: Vec<RequirementType>,
    pub node_templates: IndexMap<String, NodeTemplate>,
    pub interface_types: IndexMap<QName, InterfaceType>,
    /// The YAML node template being converted, as (name, type).
    pub current_node_template: Option<(String, QName)>,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Register an artifact template. An existing template with the same id
    /// is replaced in place.
    pub fn add_artifact_template(&mut self, template: ArtifactTemplate) {
        self.artifact_templates.insert(template.id.clone(), template);
    }

    pub fn add_policy(&mut self, target: &str, policy: Policy) {
        self.policies
            .entry(target.to_string())
            .or_default()
            .push(policy);
    }

    pub fn boundary_policies(&self) -> &[Policy] {
        self.policies
            .get(BOUNDARY_TARGET)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Add an import unless a structurally equal one is already present.
    pub fn add_import(&mut self, import: Import) -> bool {
        if self.imports.contains(&import) {
            return false;
        }
        self.imports.push(import);
        true
    }

    pub fn add_requirement_type(&mut self, requirement_type: RequirementType) {
        let exists = self
            .requirement_types
            .iter()
            .any(|rt| rt.entity.name == requirement_type.entity.name);
        if !exists {
            self.requirement_types.push(requirement_type);
        }
    }

    /// An interface type by qualified name, falling back to its local name.
    pub fn interface_type(&self, name: &QName) -> Option<&InterfaceType> {
        self.interface_types.get(name).or_else(|| {
            self.interface_types
                .iter()
                .find(|(key, _)| key.local_part() == name.local_part())
                .map(|(_, it)| it)
        })
    }

    pub fn current_node_template_name(&self) -> &str {
        self.current_node_template
            .as_ref()
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_are_deduplicated_structurally() {
        let mut session = Session::default();
        let import = Import {
            import_type: "t".into(),
            namespace: Some("ns".into()),
            location: Some("a.xsd".into()),
        };
        assert!(session.add_import(import.clone()));
        assert!(!session.add_import(import));
        assert_eq!(session.imports.len(), 1);
    }

    #[test]
    fn test_artifact_template_overwrite_keeps_position() {
        let mut session = Session::default();
        for id in ["a", "b"] {
            session.add_artifact_template(ArtifactTemplate {
                id: id.into(),
                ..ArtifactTemplate::default()
            });
        }
        session.add_artifact_template(ArtifactTemplate {
            id: "a".into(),
            artifact_references: vec!["x.sh".into()],
            ..ArtifactTemplate::default()
        });
        let ids: Vec<_> = session.artifact_templates.keys().cloned().collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(session.artifact_templates["a"].artifact_references, ["x.sh"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session {
            namespace: "ns".into(),
            ..Session::default()
        };
        session.add_policy(BOUNDARY_TARGET, Policy::default());
        session.reset();
        assert!(session.namespace.is_empty());
        assert!(session.policies.is_empty());
        assert!(session.boundary_policies().is_empty());
    }
}
