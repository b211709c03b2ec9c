//! The TOSCA YAML object model.
//!
//! These types mirror the TOSCA Simple Profile in YAML. They are read with
//! `serde_yaml`, rendered by [`crate::writer`], and are the source side of
//! [`crate::convert`].
//!
//! ```text
//! ServiceTemplate
//! ├── imports, repositories, dsl_definitions
//! ├── *_types: IndexMap<String, Type>          (declaration order preserved)
//! └── topology_template
//!     ├── node_templates / relationship_templates
//!     ├── policies: Vec<IndexMap<String, PolicyDefinition>>
//!     └── inputs / outputs / groups / substitution_mappings
//! ```

pub mod constraints;
pub(crate) mod de;
pub mod definitions;
pub mod templates;
pub mod types;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

pub use constraints::ConstraintClause;
pub use definitions::{
    ArtifactDefinition, AttributeDefinition, CapabilityDefinition, Credential, EntrySchema,
    Implementation, ImportDefinition, InterfaceDefinition, OperationDefinition,
    ParameterDefinition, PropertyAssignmentOrDefinition, PropertyDefinition,
    RelationshipDefinition, RepositoryDefinition, RequirementDefinition,
};
pub use templates::{
    AttributeAssignment, CapabilityAssignment, GroupDefinition, NodeFilterDefinition,
    NodeTemplate, PolicyDefinition, PropertyAssignment, PropertyFilterDefinition,
    RelationshipAssignment, RelationshipTemplate, RequirementAssignment, SubstitutionMappings,
    TopologyTemplateDefinition,
};
pub use types::{
    ArtifactType, CapabilityType, DataType, EntityType, GroupType, InterfaceType, NodeType,
    PolicyType, RelationshipType,
};

use crate::base::QName;

/// Ordered string metadata.
pub type Metadata = IndexMap<String, String>;

/// A TOSCA YAML service template document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceTemplate {
    pub tosca_definitions_version: Option<String>,
    #[serde(deserialize_with = "de::string_map")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "de::import_list")]
    pub imports: Vec<IndexMap<String, ImportDefinition>>,
    pub description: Option<String>,
    pub dsl_definitions: IndexMap<String, Value>,
    pub repositories: IndexMap<String, RepositoryDefinition>,
    pub artifact_types: IndexMap<String, ArtifactType>,
    pub data_types: IndexMap<String, DataType>,
    pub capability_types: IndexMap<String, CapabilityType>,
    pub interface_types: IndexMap<String, InterfaceType>,
    pub relationship_types: IndexMap<String, RelationshipType>,
    pub node_types: IndexMap<String, NodeType>,
    pub group_types: IndexMap<String, GroupType>,
    pub policy_types: IndexMap<String, PolicyType>,
    pub topology_template: Option<TopologyTemplateDefinition>,
}

impl ServiceTemplate {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            tosca_definitions_version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Look up a node type declared in this document by local name.
    pub fn node_type(&self, name: &QName) -> Option<&NodeType> {
        self.node_types.get(name.local_part())
    }
}

/// Render a scalar YAML value as a string.
///
/// Returns `None` for `null`, sequences and mappings.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Render any YAML value as a string; compound values use flow style.
///
/// `null` renders as `None`.
pub fn value_string(value: &Value) -> Option<String> {
    if let Some(scalar) = scalar_string(value) {
        return Some(scalar);
    }
    match value {
        Value::Sequence(items) => Some(format!(
            "[{}]",
            items
                .iter()
                .map(|item| value_string(item).unwrap_or_else(|| "null".to_string()))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        Value::Mapping(map) => Some(format!(
            "{{{}}}",
            map.iter()
                .map(|(key, item)| format!(
                    "{}: {}",
                    value_string(key).unwrap_or_default(),
                    value_string(item).unwrap_or_else(|| "null".to_string())
                ))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        _ => None,
    }
}
