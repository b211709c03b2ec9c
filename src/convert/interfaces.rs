//! Interfaces, operations and their parameters.

use indexmap::IndexMap;
use serde_yaml::Value;
use tracing::debug;

use super::Context;
use super::dispatch::fan_out;
use crate::base::QName;
use crate::interchange::InterchangeError;
use crate::xml;
use crate::yaml::{
    AttributeDefinition, InterfaceDefinition, OperationDefinition, PropertyAssignmentOrDefinition,
    PropertyDefinition,
};

const GET_OPERATION_OUTPUT: &str = "get_operation_output";

/// Convert an interface. Operations of its interface type come first; an
/// operation the interface redeclares replaces the default in place.
pub(crate) fn convert_interface(
    cx: &mut Context<'_>,
    name: &str,
    node: &InterfaceDefinition,
) -> Result<xml::Interface, InterchangeError> {
    let mut operations: IndexMap<String, xml::Operation> = IndexMap::new();
    if let Some(type_) = &node.type_ {
        if let Some(interface_type) = cx.session.interface_type(type_).cloned() {
            for operation in fan_out::<_, xml::Operation>(cx, &interface_type.operations)? {
                operations.insert(operation.name.clone(), operation);
            }
        }
    }
    for operation in fan_out::<_, xml::Operation>(cx, &node.operations)? {
        if operations.contains_key(&operation.name) {
            debug!(
                interface = name,
                operation = %operation.name,
                "overriding interface type operation"
            );
        }
        operations.insert(operation.name.clone(), operation);
    }
    Ok(xml::Interface {
        name: name.to_string(),
        operations: operations.into_values().collect(),
    })
}

pub(crate) fn convert_operation(name: &str, node: &OperationDefinition) -> xml::Operation {
    xml::Operation {
        name: name.to_string(),
        documentation: node.description.iter().cloned().collect(),
        input_parameters: convert_parameters(&node.inputs),
        output_parameters: convert_parameters(&node.outputs),
    }
}

/// Only declared parameters convert; plain assignments have no XML form.
fn convert_parameters(
    parameters: &IndexMap<String, PropertyAssignmentOrDefinition>,
) -> Vec<xml::Parameter> {
    parameters
        .iter()
        .filter_map(|(name, parameter)| match parameter {
            PropertyAssignmentOrDefinition::Definition(definition) => Some(xml::Parameter {
                name: name.clone(),
                type_: xsd_type(definition.type_.as_ref()).to_string(),
                required: definition.required.unwrap_or(true),
            }),
            PropertyAssignmentOrDefinition::Assignment(_) => None,
        })
        .collect()
}

/// XSD type name for a YAML data type. Unknown types map to `anyType`.
pub fn xsd_type(yaml_type: Option<&QName>) -> &'static str {
    let Some(yaml_type) = yaml_type else {
        return "anyType";
    };
    match yaml_type.local_part() {
        "string" | "version" | "range" | "scalar-unit.size" | "scalar-unit.time"
        | "scalar-unit.frequency" => "string",
        "integer" => "integer",
        "float" => "float",
        "boolean" => "boolean",
        "timestamp" => "dateTime",
        _ => "anyType",
    }
}

/// Attach outputs named by `get_operation_output` attribute defaults.
///
/// An attribute default `{ get_operation_output: [SELF, iface, op, out] }`
/// declares output `out` on `iface/op` with the attribute's type, unless the
/// operation already declares it.
pub(crate) fn propagate_operation_outputs(
    interfaces: &IndexMap<String, InterfaceDefinition>,
    attributes: &IndexMap<String, AttributeDefinition>,
) -> IndexMap<String, InterfaceDefinition> {
    let mut interfaces = interfaces.clone();
    if interfaces.is_empty() {
        return interfaces;
    }
    for (attribute_name, attribute) in attributes {
        let Some([_, interface, operation, output]) =
            attribute.default.as_ref().and_then(operation_output_reference)
        else {
            continue;
        };
        let Some(operation) = interfaces
            .get_mut(&interface)
            .and_then(|i| i.operations.get_mut(&operation))
        else {
            continue;
        };
        if operation.outputs.contains_key(&output) {
            continue;
        }
        debug!(attribute = %attribute_name, output = %output, "propagating operation output");
        let definition = PropertyDefinition {
            type_: attribute.type_.clone(),
            ..PropertyDefinition::default()
        };
        operation
            .outputs
            .insert(output, PropertyAssignmentOrDefinition::Definition(definition));
    }
    interfaces
}

fn operation_output_reference(default: &Value) -> Option<[String; 4]> {
    let items = default.as_mapping()?.get(GET_OPERATION_OUTPUT)?.as_sequence()?;
    let parts: Vec<String> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<_>>()?;
    let parts: [String; 4] = parts.try_into().ok()?;
    (parts[0] == "SELF").then_some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("string"), "string")]
    #[case(Some("integer"), "integer")]
    #[case(Some("timestamp"), "dateTime")]
    #[case(Some("tosca.datatypes.Credential"), "anyType")]
    #[case(None, "anyType")]
    fn test_xsd_type(#[case] yaml_type: Option<&str>, #[case] expected: &str) {
        let qname = yaml_type.map(QName::from);
        assert_eq!(xsd_type(qname.as_ref()), expected);
    }

    #[test]
    fn test_operation_output_is_propagated_once() {
        let interfaces: IndexMap<String, InterfaceDefinition> = serde_yaml::from_str(
            "Standard:\n  create: scripts/create.sh\n  start:\n    outputs:\n      url: { type: string }\n",
        )
        .unwrap();
        let attributes: IndexMap<String, AttributeDefinition> = serde_yaml::from_str(
            "id:\n  type: string\n  default: { get_operation_output: [SELF, Standard, create, id] }\n\
             url:\n  type: integer\n  default: { get_operation_output: [SELF, Standard, start, url] }\n\
             other:\n  type: string\n  default: { get_operation_output: [HOST, Standard, create, x] }\n",
        )
        .unwrap();

        let result = propagate_operation_outputs(&interfaces, &attributes);

        let create = &result["Standard"].operations["create"];
        assert_eq!(create.outputs.keys().collect::<Vec<_>>(), ["id"]);
        let start = &result["Standard"].operations["start"];
        match &start.outputs["url"] {
            PropertyAssignmentOrDefinition::Definition(def) => {
                assert_eq!(def.type_, Some(QName::local("string")));
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_assignments_do_not_become_parameters() {
        let operation: OperationDefinition = serde_yaml::from_str(
            "inputs:\n  port: { type: integer, required: false }\n  host: { get_input: host }\n",
        )
        .unwrap();
        let converted = convert_operation("configure", &operation);
        assert_eq!(
            converted.input_parameters,
            [xml::Parameter {
                name: "port".into(),
                type_: "integer".into(),
                required: false,
            }]
        );
    }
}
