//! Topology conversion: node and relationship templates, policies, imports.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, error, warn};

use super::dispatch::{fan_out, fan_out_list};
use super::types::{convert_capability_definition, requirement_type_name};
use super::{CapabilitySearch, Context, artifacts};
use crate::base::QName;
use crate::base::namespaces::{BOUNDARY_TARGET, TOSCA_XML_NS};
use crate::interchange::InterchangeError;
use crate::xml::{self, KvProperties};
use crate::yaml::{self, PropertyAssignment, value_string};

fn kv_properties(properties: &IndexMap<String, PropertyAssignment>) -> KvProperties {
    properties
        .iter()
        .filter_map(|(key, assignment)| value_string(assignment.value()).map(|v| (key.clone(), v)))
        .collect()
}

/// Find the definition of capability `capability` for node type `node_type`.
///
/// Node types declared in the document being converted take precedence over
/// the registry. With [`CapabilitySearch::Hierarchy`] the `derived_from`
/// chain is followed until a definition is found.
pub(crate) fn capability_definition(
    cx: &Context<'_>,
    node_type: &QName,
    capability: &str,
) -> Option<xml::CapabilityDefinition> {
    let mut visited = HashSet::new();
    let mut current = Some(node_type.clone());
    while let Some(type_) = current.take() {
        if !visited.insert(type_.clone()) {
            break;
        }
        let local = cx.source.node_type(&type_);
        if let Some(definition) = local.and_then(|nt| nt.capabilities.get(capability)) {
            return Some(convert_capability_definition(capability, definition));
        }
        let registered = cx.registry.node_type(&type_);
        if let Some(definition) = registered
            .as_ref()
            .and_then(|nt| nt.capability_definition(capability))
        {
            return Some(definition.clone());
        }
        if cx.options.capability_search == CapabilitySearch::OwningType {
            break;
        }
        current = local
            .and_then(|nt| nt.entity.derived_from.clone())
            .or_else(|| registered.and_then(|nt| nt.entity.derived_from));
    }
    None
}

pub(crate) fn convert_node_template(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::NodeTemplate,
) -> Result<xml::NodeTemplate, InterchangeError> {
    cx.session.current_node_template = Some((name.to_string(), node.type_.clone()));

    let (x_key, y_key) = &cx.options.coordinate_keys;
    let x = node
        .metadata
        .get(x_key)
        .cloned()
        .unwrap_or_else(|| cx.options.default_coordinate.clone());
    let y = node
        .metadata
        .get(y_key)
        .cloned()
        .unwrap_or_else(|| cx.options.default_coordinate.clone());

    let mut documentation: Vec<String> = node.description.iter().cloned().collect();
    documentation.extend(
        node.metadata
            .iter()
            .map(|(key, value)| format!("{key}: {value}")),
    );

    let requirements = fan_out_list(cx, &node.requirements)?;
    let capabilities = fan_out(cx, &node.capabilities)?;
    let deployment_artifacts = artifacts::deployment_artifacts(cx, name, &node.artifacts);

    let template = xml::NodeTemplate {
        id: name.to_string(),
        name: name.to_string(),
        type_: node.type_.clone(),
        documentation,
        x,
        y,
        properties: kv_properties(&node.properties),
        requirements,
        capabilities,
        deployment_artifacts,
        policies: Vec::new(),
    };
    cx.session
        .node_templates
        .insert(name.to_string(), template.clone());
    cx.session.current_node_template = None;
    debug!(node_template = name, "converted node template");
    Ok(template)
}

/// A requirement of the current node template, with id `<template>_<name>`.
pub(crate) fn convert_requirement_assignment(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::RequirementAssignment,
) -> xml::Requirement {
    let template = cx.session.current_node_template_name().to_string();
    if node.capability.is_none() {
        warn!(node_template = %template, requirement = name, "requirement names no capability");
    }
    let type_ = cx
        .session
        .current_node_template
        .as_ref()
        .and_then(|(_, type_)| cx.source.node_type(type_))
        .and_then(|nt| {
            nt.requirements
                .iter()
                .flat_map(|map| map.iter())
                .find(|(key, _)| key.as_str() == name)
        })
        .and_then(|(_, definition)| definition.capability.as_ref())
        .map(|capability| {
            QName::new(cx.session.namespace.as_str(), requirement_type_name(capability))
        });

    xml::Requirement {
        id: format!("{template}_{name}"),
        name: name.to_string(),
        type_,
        capability: node.capability.as_ref().map(ToString::to_string),
        node: node.node.as_ref().map(ToString::to_string),
        relationship: node
            .relationship
            .as_ref()
            .and_then(|relationship| relationship.type_.as_ref())
            .map(ToString::to_string),
    }
}

/// A capability of the current node template; its type comes from the
/// node type's capability definition.
pub(crate) fn convert_capability_assignment(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::CapabilityAssignment,
) -> xml::Capability {
    let cx: &Context<'_> = cx;
    let template = cx.session.current_node_template_name();
    let type_ = cx
        .session
        .current_node_template
        .as_ref()
        .and_then(|(_, node_type)| capability_definition(cx, node_type, name))
        .and_then(|definition| definition.capability_type);

    xml::Capability {
        id: format!("{template}_{name}"),
        name: name.to_string(),
        type_,
        properties: kv_properties(&node.properties),
    }
}

/// Resolve a relationship template to its source requirement and target
/// capability.
///
/// The target capability is synthesized on the target node template from
/// its type's capability definition when the template does not declare it.
pub(crate) fn convert_relationship_template(
    cx: &mut Context<'_>,
    name: &str,
    node: &yaml::RelationshipTemplate,
) -> Result<xml::RelationshipTemplate, InterchangeError> {
    let Some(requirement) = cx
        .session
        .node_templates
        .values()
        .find_map(|nt| nt.requirement_for_relationship(name))
        .cloned()
    else {
        error!(relationship = name, "source requirement of relationship cannot be determined");
        return Err(InterchangeError::MissingSourceRequirement {
            relationship: name.to_string(),
        });
    };

    let (Some(target_name), Some(capability_name)) =
        (requirement.node.clone(), requirement.capability.clone())
    else {
        error!(requirement = %requirement.name, "requirement has no node or capability specified");
        return Err(InterchangeError::IncompleteRequirement {
            requirement: requirement.name.clone(),
        });
    };

    let Some(target) = cx.session.node_templates.get(&target_name) else {
        error!(
            node = %target_name,
            requirement = %requirement.name,
            "target node template cannot be found"
        );
        return Err(InterchangeError::MissingNode {
            node: target_name,
            requirement: requirement.name.clone(),
        });
    };

    let capability = match target.capability(&capability_name) {
        Some(capability) => capability.clone(),
        None => {
            let target_type = target.type_.clone();
            let Some(definition) = capability_definition(cx, &target_type, &capability_name) else {
                error!(
                    capability = %capability_name,
                    relationship = name,
                    "capability referenced by relationship cannot be found"
                );
                return Err(InterchangeError::MissingCapability {
                    capability: capability_name,
                    relationship: name.to_string(),
                });
            };
            let capability = xml::Capability {
                id: format!("{target_name}_{}", definition.name),
                name: definition.name,
                type_: definition.capability_type,
                properties: KvProperties::new(),
            };
            debug!(capability = %capability.id, "synthesized target capability");
            if let Some(target) = cx.session.node_templates.get_mut(&target_name) {
                target.capabilities.push(capability.clone());
            }
            capability
        }
    };

    Ok(xml::RelationshipTemplate {
        id: name.to_string(),
        name: node.type_.local_part().to_string(),
        type_: node.type_.clone(),
        documentation: node.description.iter().cloned().collect(),
        source: requirement,
        target: capability,
        properties: kv_properties(&node.properties),
    })
}

pub(crate) fn convert_policy(name: &str, node: &yaml::PolicyDefinition) -> xml::Policy {
    xml::Policy {
        name: name.to_string(),
        type_: node.type_.clone(),
        documentation: node.description.iter().cloned().collect(),
        targets: node.targets.clone(),
        properties: kv_properties(&node.properties),
    }
}

pub(crate) fn convert_import(cx: &Context<'_>, node: &yaml::ImportDefinition) -> xml::Import {
    xml::Import {
        import_type: TOSCA_XML_NS.to_string(),
        namespace: Some(
            node.namespace_uri
                .clone()
                .unwrap_or_else(|| cx.session.namespace.clone()),
        ),
        location: node.file.clone(),
    }
}

/// Convert the topology: node templates, then relationship templates, then
/// policies.
///
/// Untargeted policies go to the boundary; targeted ones stay in the
/// topology and are attached to each node template they name.
pub(crate) fn convert_topology(
    cx: &mut Context<'_>,
    node: &yaml::TopologyTemplateDefinition,
) -> Result<xml::TopologyTemplate, InterchangeError> {
    let _: Vec<xml::NodeTemplate> = fan_out(cx, &node.node_templates)?;
    let relationship_templates = fan_out(cx, &node.relationship_templates)?;
    let policies: Vec<xml::Policy> = fan_out_list(cx, &node.policies)?;

    let mut targeted = Vec::new();
    for policy in policies {
        if policy.targets.is_empty() {
            cx.session.add_policy(BOUNDARY_TARGET, policy);
            continue;
        }
        for target in &policy.targets {
            cx.session.add_policy(target.local_part(), policy.clone());
        }
        targeted.push(policy);
    }

    let node_templates = cx
        .session
        .node_templates
        .values()
        .map(|template| {
            let mut template = template.clone();
            if let Some(policies) = cx.session.policies.get(&template.id) {
                template.policies = policies.clone();
            }
            template
        })
        .collect();

    Ok(xml::TopologyTemplate {
        documentation: node.description.iter().cloned().collect(),
        node_templates,
        relationship_templates,
        policies: targeted,
    })
}
