//! Entity type conversion.

use indexmap::IndexMap;
use tracing::debug;

use super::Context;
use super::artifacts;
use super::dispatch::{fan_out, fan_out_list};
use super::interfaces::propagate_operation_outputs;
use crate::base::QName;
use crate::base::namespaces::{
    PROPERTIES_DEFINITION_SEGMENT, TARGET_NAMESPACE_KEY, XML_SCHEMA_NS,
};
use crate::interchange::InterchangeError;
use crate::xml::{self, ConstraintClauseKV, PropertyDefinitionKV, Tag, WineryPropertiesDefinition};
use crate::yaml::{self, ConstraintClause, InterfaceDefinition, PropertyDefinition, value_string};

const SOURCE_INTERFACES: &str = "SourceInterfaces";
const TARGET_INTERFACES: &str = "TargetInterfaces";

/// Fields common to every type: documentation, super type, metadata tags,
/// target namespace, version tag and the properties schema.
fn convert_entity_type(cx: &Context<'_>, name: &str, node: &yaml::EntityType) -> xml::EntityType {
    let target_namespace = node
        .metadata
        .get(TARGET_NAMESPACE_KEY)
        .cloned()
        .unwrap_or_else(|| cx.session.namespace.clone());
    let mut tags: Vec<Tag> = node
        .metadata
        .iter()
        .map(|(key, value)| Tag::new(key.as_str(), value.as_str()))
        .collect();
    if let Some(version) = &node.version {
        tags.push(Tag::new("version", version.as_str()));
    }
    let properties_definition = (!node.properties.is_empty())
        .then(|| properties_definition(&node.properties, &target_namespace, name));

    xml::EntityType {
        name: name.to_string(),
        target_namespace: Some(target_namespace),
        documentation: node.description.iter().cloned().collect(),
        derived_from: node.derived_from.clone(),
        tags,
        is_abstract: false,
        is_final: false,
        properties_definition,
    }
}

/// The KV properties schema of a type, in declaration order.
pub fn properties_definition(
    properties: &IndexMap<String, PropertyDefinition>,
    target_namespace: &str,
    type_name: &str,
) -> WineryPropertiesDefinition {
    WineryPropertiesDefinition {
        element_name: "properties".to_string(),
        namespace: format!("{target_namespace}/{PROPERTIES_DEFINITION_SEGMENT}/{type_name}"),
        property_definitions: properties
            .iter()
            .map(|(key, property)| PropertyDefinitionKV {
                key: key.clone(),
                type_: format!(
                    "xsd:{}",
                    property
                        .type_
                        .as_ref()
                        .map_or("inherited", |type_| type_.local_part())
                ),
                required: property.required.unwrap_or(true),
                default_value: property.default.as_ref().and_then(value_string),
                description: property.description.clone(),
                constraints: property.constraints.iter().map(convert_constraint).collect(),
            })
            .collect(),
    }
}

fn convert_constraint(constraint: &ConstraintClause) -> ConstraintClauseKV {
    ConstraintClauseKV {
        key: constraint.key().to_string(),
        value: constraint.value(),
        list: constraint.list(),
    }
}

pub(crate) fn convert_node_type(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::NodeType,
) -> Result<xml::NodeType, InterchangeError> {
    let entity = convert_entity_type(cx, name, &node.entity);
    let requirement_definitions = fan_out_list(cx, &node.requirements)?;
    let capability_definitions = fan_out(cx, &node.capabilities)?;
    let interfaces_with_outputs =
        propagate_operation_outputs(&node.interfaces, &node.entity.attributes);
    let interfaces = fan_out(cx, &interfaces_with_outputs)?;

    artifacts::node_type_implementation(
        cx,
        name,
        entity.target_namespace.as_deref(),
        &node.artifacts,
        &node.interfaces,
    );
    debug!(node_type = name, "converted node type");

    Ok(xml::NodeType {
        entity,
        requirement_definitions,
        capability_definitions,
        interfaces,
    })
}

/// Interfaces whose type's local part is `kind` (case-insensitive), or the
/// untyped ones when `kind` is `None`.
fn interfaces_of_kind(
    interfaces: &IndexMap<String, InterfaceDefinition>,
    kind: Option<&str>,
) -> IndexMap<String, InterfaceDefinition> {
    interfaces
        .iter()
        .filter(|(_, definition)| match (kind, &definition.type_) {
            (None, None) => true,
            (Some(kind), Some(type_)) => type_.local_part().eq_ignore_ascii_case(kind),
            _ => false,
        })
        .map(|(name, definition)| (name.clone(), definition.clone()))
        .collect()
}

pub(crate) fn convert_relationship_type(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::RelationshipType,
) -> Result<xml::RelationshipType, InterchangeError> {
    let entity = convert_entity_type(cx, name, &node.entity);
    let source_interfaces =
        fan_out(cx, &interfaces_of_kind(&node.interfaces, Some(SOURCE_INTERFACES)))?;
    let interfaces = fan_out(cx, &interfaces_of_kind(&node.interfaces, None))?;
    let target_interfaces =
        fan_out(cx, &interfaces_of_kind(&node.interfaces, Some(TARGET_INTERFACES)))?;

    let (valid_source, valid_target) = match node.valid_target_types.as_slice() {
        [source, target, ..] => (Some(source.clone()), Some(target.clone())),
        _ => (None, None),
    };

    artifacts::relationship_type_implementation(
        cx,
        name,
        entity.target_namespace.as_deref(),
        &node.interfaces,
    );

    Ok(xml::RelationshipType {
        entity,
        source_interfaces,
        interfaces,
        target_interfaces,
        valid_source,
        valid_target,
    })
}

pub(crate) fn convert_capability_type(
    cx: &Context<'_>,
    name: &str,
    node: &yaml::CapabilityType,
) -> xml::CapabilityType {
    xml::CapabilityType {
        entity: convert_entity_type(cx, name, &node.entity),
        valid_source_types: node.valid_source_types.clone(),
    }
}

/// Artifact types carry `file_ext` and `mime_type` as tags.
pub(crate) fn convert_artifact_type(
    cx: &Context<'_>,
    name: &str,
    node: &yaml::ArtifactType,
) -> xml::ArtifactType {
    let mut entity = convert_entity_type(cx, name, &node.entity);
    if !node.file_ext.is_empty() {
        entity
            .tags
            .push(Tag::new("file_ext", format!("[{}]", node.file_ext.join(","))));
    }
    if let Some(mime_type) = &node.mime_type {
        entity.tags.push(Tag::new("mime_type", mime_type.as_str()));
    }
    xml::ArtifactType { entity }
}

pub(crate) fn convert_policy_type(
    cx: &Context<'_>,
    name: &str,
    node: &yaml::PolicyType,
) -> xml::PolicyType {
    xml::PolicyType {
        entity: convert_entity_type(cx, name, &node.entity),
        applies_to: node.targets.clone(),
    }
}

pub(crate) fn convert_capability_definition(
    name: &str,
    node: &yaml::CapabilityDefinition,
) -> xml::CapabilityDefinition {
    xml::CapabilityDefinition {
        name: name.to_string(),
        capability_type: node.type_.clone(),
        documentation: node.description.iter().cloned().collect(),
        lower_bound: node.lower_bound().map(str::to_string),
        upper_bound: node.upper_bound().map(str::to_string),
        valid_source_types: node.valid_source_types.clone(),
    }
}

/// Name of the requirement type synthesized for a required capability type.
pub(crate) fn requirement_type_name(capability: &QName) -> String {
    format!("{}_Requirement", capability.local_part())
}

/// YAML has no requirement types. One is synthesized per required
/// capability type.
pub(crate) fn convert_requirement_definition(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::RequirementDefinition,
) -> xml::RequirementDefinition {
    let requirement_type = node.capability.as_ref().map(|capability| {
        let type_name = requirement_type_name(capability);
        let namespace = cx.session.namespace.clone();
        let mut entity = xml::EntityType::new(type_name.as_str());
        entity.target_namespace = Some(namespace.clone());
        cx.session.add_requirement_type(xml::RequirementType {
            entity,
            required_capability_type: Some(capability.clone()),
        });
        QName::new(namespace, type_name)
    });

    xml::RequirementDefinition {
        name: name.to_string(),
        requirement_type,
        lower_bound: node.lower_bound().map(str::to_string),
        upper_bound: node.upper_bound().map(str::to_string),
        capability: node.capability.clone(),
        node: node.node.clone(),
        relationship: node
            .relationship
            .as_ref()
            .and_then(|relationship| relationship.type_.clone()),
    }
}

/// Data types have no XML element; the first one registers an XSD import
/// for the whole namespace.
pub(crate) fn register_data_type(cx: &mut Context<'_>) {
    let encoded: String =
        url::form_urlencoded::byte_serialize(cx.session.namespace.as_bytes()).collect();
    cx.session.add_import(xml::Import {
        import_type: XML_SCHEMA_NS.to_string(),
        namespace: None,
        location: Some(format!("{encoded}.xsd")),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_definition_keeps_order_and_attributes() {
        let properties: IndexMap<String, PropertyDefinition> = serde_yaml::from_str(
            "p1:\n  type: string\n  required: true\n\
             p2:\n  type: integer\n  default: 5\n  constraints:\n    - in_range: [1, 10]\n",
        )
        .unwrap();

        let definition = properties_definition(&properties, "http://example.org", "Server");

        assert_eq!(definition.namespace, "http://example.org/propertiesDefinition/Server");
        assert_eq!(definition.keys().collect::<Vec<_>>(), ["p1", "p2"]);
        let p1 = definition.get("p1").unwrap();
        assert_eq!(p1.type_, "xsd:string");
        assert!(p1.required);
        assert_eq!(p1.default_value, None);
        let p2 = definition.get("p2").unwrap();
        assert_eq!(p2.type_, "xsd:integer");
        assert_eq!(p2.default_value.as_deref(), Some("5"));
        assert_eq!(
            p2.constraints,
            [ConstraintClauseKV {
                key: "in_range".into(),
                value: None,
                list: vec!["1".into(), "10".into()],
            }]
        );
    }

    #[test]
    fn test_untyped_property_is_inherited() {
        let mut properties = IndexMap::new();
        properties.insert("port".to_string(), PropertyDefinition::default());
        let definition = properties_definition(&properties, "ns", "T");
        assert_eq!(definition.property_definitions[0].type_, "xsd:inherited");
    }
}
