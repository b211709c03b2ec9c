//! Generic fan-out over heterogeneous `(name, entity)` collections.
//!
//! Every YAML collection (`node_types`, `requirements`, `policies`, ...) is
//! converted through the same path: each entry is wrapped in a [`YamlEntity`],
//! converted by the one function for its kind, and the result is unwrapped
//! into the caller's element type. Kinds without an XML counterpart yield
//! nothing and are dropped.

use indexmap::IndexMap;
use tracing::{error, trace};

use super::{Context, artifacts, interfaces, templates, types};
use crate::base::QName;
use crate::interchange::InterchangeError;
use crate::{xml, yaml};

/// A borrowed YAML entity of any convertible kind.
#[derive(Debug, Clone, Copy)]
pub(crate) enum YamlEntity<'a> {
    NodeType(&'a yaml::NodeType),
    RelationshipType(&'a yaml::RelationshipType),
    CapabilityType(&'a yaml::CapabilityType),
    ArtifactType(&'a yaml::ArtifactType),
    PolicyType(&'a yaml::PolicyType),
    DataType(&'a yaml::DataType),
    GroupType(&'a yaml::GroupType),
    InterfaceType(&'a yaml::InterfaceType),
    CapabilityDefinition(&'a yaml::CapabilityDefinition),
    RequirementDefinition(&'a yaml::RequirementDefinition),
    InterfaceDefinition(&'a yaml::InterfaceDefinition),
    OperationDefinition(&'a yaml::OperationDefinition),
    ArtifactDefinition(&'a yaml::ArtifactDefinition),
    ImportDefinition(&'a yaml::ImportDefinition),
    NodeTemplate(&'a yaml::NodeTemplate),
    RelationshipTemplate(&'a yaml::RelationshipTemplate),
    RequirementAssignment(&'a yaml::RequirementAssignment),
    CapabilityAssignment(&'a yaml::CapabilityAssignment),
    PolicyDefinition(&'a yaml::PolicyDefinition),
}

/// An owned XML entity produced by [`convert_entity`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum XmlEntity {
    NodeType(xml::NodeType),
    RelationshipType(xml::RelationshipType),
    CapabilityType(xml::CapabilityType),
    ArtifactType(xml::ArtifactType),
    PolicyType(xml::PolicyType),
    CapabilityDefinition(xml::CapabilityDefinition),
    RequirementDefinition(xml::RequirementDefinition),
    Interface(xml::Interface),
    Operation(xml::Operation),
    ArtifactTemplate(xml::ArtifactTemplate),
    Import(xml::Import),
    NodeTemplate(xml::NodeTemplate),
    RelationshipTemplate(xml::RelationshipTemplate),
    Requirement(xml::Requirement),
    Capability(xml::Capability),
    Policy(xml::Policy),
}

/// Unwraps one variant of [`XmlEntity`].
pub(crate) trait FromXmlEntity: Sized {
    const KIND: &'static str;

    /// The wrapped value, or the entity back when it is another variant.
    fn from_xml_entity(entity: XmlEntity) -> Result<Self, XmlEntity>;
}

macro_rules! entities {
    ($($variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a yaml::$variant> for YamlEntity<'a> {
                fn from(value: &'a yaml::$variant) -> Self {
                    YamlEntity::$variant(value)
                }
            }
        )*

        impl YamlEntity<'_> {
            pub(crate) fn kind(&self) -> &'static str {
                match self {
                    $(YamlEntity::$variant(_) => stringify!($variant),)*
                }
            }
        }
    };
}

entities!(
    NodeType,
    RelationshipType,
    CapabilityType,
    ArtifactType,
    PolicyType,
    DataType,
    GroupType,
    InterfaceType,
    CapabilityDefinition,
    RequirementDefinition,
    InterfaceDefinition,
    OperationDefinition,
    ArtifactDefinition,
    ImportDefinition,
    NodeTemplate,
    RelationshipTemplate,
    RequirementAssignment,
    CapabilityAssignment,
    PolicyDefinition,
);

macro_rules! xml_entities {
    ($($variant:ident),* $(,)?) => {
        $(
            impl FromXmlEntity for xml::$variant {
                const KIND: &'static str = stringify!($variant);

                fn from_xml_entity(entity: XmlEntity) -> Result<Self, XmlEntity> {
                    match entity {
                        XmlEntity::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*

        impl XmlEntity {
            pub(crate) fn kind(&self) -> &'static str {
                match self {
                    $(XmlEntity::$variant(_) => stringify!($variant),)*
                }
            }
        }
    };
}

xml_entities!(
    NodeType,
    RelationshipType,
    CapabilityType,
    ArtifactType,
    PolicyType,
    CapabilityDefinition,
    RequirementDefinition,
    Interface,
    Operation,
    ArtifactTemplate,
    Import,
    NodeTemplate,
    RelationshipTemplate,
    Requirement,
    Capability,
    Policy,
);

impl FromXmlEntity for XmlEntity {
    const KIND: &'static str = "entity";

    fn from_xml_entity(entity: XmlEntity) -> Result<Self, XmlEntity> {
        Ok(entity)
    }
}

/// Convert one named YAML entity. Kinds with no XML element return `None`.
pub(crate) fn convert_entity(
    cx: &mut Context<'_>,
    name: &str,
    entity: YamlEntity<'_>,
) -> Result<Option<XmlEntity>, InterchangeError> {
    trace!(kind = entity.kind(), name, "converting entity");
    let converted = match entity {
        YamlEntity::NodeType(node) => {
            XmlEntity::NodeType(types::convert_node_type(cx, name, node)?)
        }
        YamlEntity::RelationshipType(node) => {
            XmlEntity::RelationshipType(types::convert_relationship_type(cx, name, node)?)
        }
        YamlEntity::CapabilityType(node) => {
            XmlEntity::CapabilityType(types::convert_capability_type(cx, name, node))
        }
        YamlEntity::ArtifactType(node) => {
            XmlEntity::ArtifactType(types::convert_artifact_type(cx, name, node))
        }
        YamlEntity::PolicyType(node) => {
            XmlEntity::PolicyType(types::convert_policy_type(cx, name, node))
        }
        YamlEntity::DataType(_) => {
            types::register_data_type(cx);
            return Ok(None);
        }
        YamlEntity::GroupType(_) => return Ok(None),
        YamlEntity::InterfaceType(node) => {
            cx.session
                .interface_types
                .insert(QName::from(name), node.clone());
            return Ok(None);
        }
        YamlEntity::CapabilityDefinition(node) => {
            XmlEntity::CapabilityDefinition(types::convert_capability_definition(name, node))
        }
        YamlEntity::RequirementDefinition(node) => {
            XmlEntity::RequirementDefinition(types::convert_requirement_definition(cx, name, node))
        }
        YamlEntity::InterfaceDefinition(node) => {
            XmlEntity::Interface(interfaces::convert_interface(cx, name, node)?)
        }
        YamlEntity::OperationDefinition(node) => {
            XmlEntity::Operation(interfaces::convert_operation(name, node))
        }
        YamlEntity::ArtifactDefinition(node) => {
            XmlEntity::ArtifactTemplate(artifacts::artifact_template(name, node))
        }
        YamlEntity::ImportDefinition(node) => {
            XmlEntity::Import(templates::convert_import(cx, node))
        }
        YamlEntity::NodeTemplate(node) => {
            XmlEntity::NodeTemplate(templates::convert_node_template(cx, name, node)?)
        }
        YamlEntity::RelationshipTemplate(node) => {
            let template = templates::convert_relationship_template(cx, name, node)?;
            XmlEntity::RelationshipTemplate(template)
        }
        YamlEntity::RequirementAssignment(node) => {
            XmlEntity::Requirement(templates::convert_requirement_assignment(cx, name, node))
        }
        YamlEntity::CapabilityAssignment(node) => {
            XmlEntity::Capability(templates::convert_capability_assignment(cx, name, node))
        }
        YamlEntity::PolicyDefinition(node) => {
            XmlEntity::Policy(templates::convert_policy(name, node))
        }
    };
    Ok(Some(converted))
}

fn collect<'s, T, I>(cx: &mut Context<'_>, entries: I) -> Result<Vec<T>, InterchangeError>
where
    T: FromXmlEntity,
    I: IntoIterator<Item = (&'s str, YamlEntity<'s>)>,
{
    let mut output = Vec::new();
    for (name, entity) in entries {
        let Some(converted) = convert_entity(cx, name, entity)? else {
            continue;
        };
        match T::from_xml_entity(converted) {
            Ok(value) => output.push(value),
            Err(other) => {
                error!(expected = T::KIND, found = other.kind(), name, "unexpected entity kind");
                return Err(InterchangeError::UnexpectedVariant {
                    expected: T::KIND,
                    found: other.kind(),
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(output)
}

/// Convert every entry of a name-keyed map, in declaration order.
pub(crate) fn fan_out<'s, V, T>(
    cx: &mut Context<'_>,
    map: &'s IndexMap<String, V>,
) -> Result<Vec<T>, InterchangeError>
where
    &'s V: Into<YamlEntity<'s>>,
    T: FromXmlEntity,
{
    collect(cx, map.iter().map(|(name, value)| (name.as_str(), value.into())))
}

/// Convert a list of single-key maps, flattened in order.
pub(crate) fn fan_out_list<'s, V, T>(
    cx: &mut Context<'_>,
    list: &'s [IndexMap<String, V>],
) -> Result<Vec<T>, InterchangeError>
where
    &'s V: Into<YamlEntity<'s>>,
    T: FromXmlEntity,
{
    collect(
        cx,
        list.iter()
            .flat_map(|map| map.iter())
            .map(|(name, value)| (name.as_str(), value.into())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertOptions, InMemoryRegistry, Session};

    #[test]
    fn test_fan_out_reports_unexpected_variant() {
        let source = yaml::ServiceTemplate::default();
        let registry = InMemoryRegistry::new();
        let options = ConvertOptions::default();
        let mut session = Session::default();
        let mut cx = Context::new(&mut session, &source, &registry, &options);

        let mut capability_types = IndexMap::new();
        capability_types.insert("Endpoint".to_string(), yaml::CapabilityType::default());
        let result: Result<Vec<xml::NodeType>, _> = fan_out(&mut cx, &capability_types);

        match result {
            Err(InterchangeError::UnexpectedVariant { expected, found, name }) => {
                assert_eq!(expected, "NodeType");
                assert_eq!(found, "CapabilityType");
                assert_eq!(name, "Endpoint");
            }
            other => panic!("expected UnexpectedVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_fan_out_drops_kinds_without_xml_element() {
        let source = yaml::ServiceTemplate::default();
        let registry = InMemoryRegistry::new();
        let options = ConvertOptions::default();
        let mut session = Session::default();
        let mut cx = Context::new(&mut session, &source, &registry, &options);

        let mut interface_types = IndexMap::new();
        interface_types.insert("Standard".to_string(), yaml::InterfaceType::default());
        let converted: Vec<XmlEntity> = fan_out(&mut cx, &interface_types).unwrap();

        assert!(converted.is_empty());
        assert!(session.interface_types.contains_key(&QName::local("Standard")));
    }
}
