//! TOSCA XML serialization of [`Definitions`].
//!
//! Write-only. Qualified-name attributes with a namespace declare their
//! prefix on the element that uses them:
//!
//! ```xml
//! <NodeTemplate xmlns:type="http://example.org" type="type:Server" .../>
//! ```

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use super::{FormatCapability, InterchangeError, ModelFormat};
use crate::base::QName;
use crate::base::namespaces::{TOSCA_XML_NS, WINERY_NS, XML_SCHEMA_NS};
use crate::xml::{
    ArtifactTemplate, Capability, CapabilityDefinition, Definitions, DefinitionsChild,
    DeploymentArtifact, EntityType, ImplementationArtifact, Interface, KvProperties, NodeTemplate,
    NodeType, NodeTypeImplementation, Parameter, Policy, RelationshipTemplate, RelationshipType,
    RelationshipTypeImplementation, Requirement, RequirementDefinition, ServiceTemplate,
    WineryPropertiesDefinition,
};

/// TOSCA XML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

impl ModelFormat for Xml {
    type Document = Definitions;

    fn name(&self) -> &'static str {
        "TOSCA XML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml", "tosca"]
    }

    fn mime_type(&self) -> &'static str {
        "application/xml"
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::WRITE_ONLY
    }

    fn read(&self, input: &[u8]) -> Result<Definitions, InterchangeError> {
        let _ = input;
        Err(InterchangeError::unsupported("reading TOSCA XML definitions"))
    }

    fn write(&self, document: &Definitions) -> Result<Vec<u8>, InterchangeError> {
        DefinitionsWriter::new().write(document)
    }

    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        let content = std::str::from_utf8(input)
            .map_err(|e| InterchangeError::xml(format!("Invalid UTF-8: {e}")))?;
        let trimmed = content.trim_start();
        if !trimmed.starts_with('<') {
            return Err(InterchangeError::xml("Content is not XML"));
        }
        if !trimmed.contains("Definitions") {
            return Err(InterchangeError::xml("Missing Definitions element"));
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Push `attr="prefix:local"`, declaring the prefix on the same element.
fn push_qname(start: &mut BytesStart<'_>, attr: &str, qname: &QName) {
    if qname.namespace_uri().is_empty() {
        start.push_attribute((attr, qname.local_part()));
        return;
    }
    let prefix = attr.to_ascii_lowercase();
    start.push_attribute((format!("xmlns:{prefix}").as_str(), qname.namespace_uri()));
    start.push_attribute((attr, format!("{prefix}:{}", qname.local_part()).as_str()));
}

fn push_opt(start: &mut BytesStart<'_>, attr: &str, value: Option<&str>) {
    if let Some(value) = value {
        start.push_attribute((attr, value));
    }
}

struct DefinitionsWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl DefinitionsWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    fn write(mut self, definitions: &Definitions) -> Result<Vec<u8>, InterchangeError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("Definitions");
        root.push_attribute(("xmlns", TOSCA_XML_NS));
        root.push_attribute(("xmlns:winery", WINERY_NS));
        root.push_attribute(("xmlns:xsd", XML_SCHEMA_NS));
        root.push_attribute(("id", definitions.id.as_str()));
        push_opt(&mut root, "name", definitions.name.as_deref());
        root.push_attribute(("targetNamespace", definitions.target_namespace.as_str()));
        self.event(Event::Start(root))?;

        for import in &definitions.imports {
            let mut start = BytesStart::new("Import");
            push_opt(&mut start, "namespace", import.namespace.as_deref());
            push_opt(&mut start, "location", import.location.as_deref());
            start.push_attribute(("importType", import.import_type.as_str()));
            self.event(Event::Empty(start))?;
        }

        for child in &definitions.children {
            self.child(child)?;
        }

        self.end("Definitions")?;
        let mut output = self.writer.into_inner().into_inner();
        output.push(b'\n');
        debug!(id = %definitions.id, bytes = output.len(), "serialized definitions");
        Ok(output)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), InterchangeError> {
        self.writer
            .write_event(event)
            .map_err(|e| InterchangeError::xml(format!("Write error: {e}")))
    }

    fn end(&mut self, name: &str) -> Result<(), InterchangeError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), InterchangeError> {
        self.event(Event::Start(BytesStart::new(name)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn documentation(&mut self, documentation: &[String]) -> Result<(), InterchangeError> {
        documentation
            .iter()
            .try_for_each(|text| self.text_element("Documentation", text))
    }

    /// `<name>` around one child per item; nothing when `items` is empty.
    fn wrapped<T>(
        &mut self,
        name: &str,
        items: &[T],
        mut each: impl FnMut(&mut Self, &T) -> Result<(), InterchangeError>,
    ) -> Result<(), InterchangeError> {
        if items.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new(name)))?;
        for item in items {
            each(self, item)?;
        }
        self.end(name)
    }

    fn child(&mut self, child: &DefinitionsChild) -> Result<(), InterchangeError> {
        match child {
            DefinitionsChild::ServiceTemplate(template) => self.service_template(template),
            DefinitionsChild::NodeType(node_type) => self.node_type(node_type),
            DefinitionsChild::NodeTypeImplementation(implementation) => {
                self.node_type_implementation(implementation)
            }
            DefinitionsChild::RelationshipType(relationship_type) => {
                self.relationship_type(relationship_type)
            }
            DefinitionsChild::RelationshipTypeImplementation(implementation) => {
                self.relationship_type_implementation(implementation)
            }
            DefinitionsChild::CapabilityType(capability_type) => {
                self.entity_type(child.element_name(), &capability_type.entity, |_| {}, |w| {
                    w.wrapped("ValidSourceTypes", &capability_type.valid_source_types, |w, t| {
                        let mut start = BytesStart::new("ValidSourceType");
                        push_qname(&mut start, "typeRef", t);
                        w.event(Event::Empty(start))
                    })
                })
            }
            DefinitionsChild::ArtifactType(artifact_type) => {
                self.entity_type(child.element_name(), &artifact_type.entity, |_| {}, |_| Ok(()))
            }
            DefinitionsChild::ArtifactTemplate(template) => self.artifact_template(template),
            DefinitionsChild::PolicyType(policy_type) => {
                self.entity_type(child.element_name(), &policy_type.entity, |_| {}, |w| {
                    w.wrapped("AppliesTo", &policy_type.applies_to, |w, t| {
                        let mut start = BytesStart::new("NodeTypeReference");
                        push_qname(&mut start, "typeRef", t);
                        w.event(Event::Empty(start))
                    })
                })
            }
            DefinitionsChild::RequirementType(requirement_type) => self.entity_type(
                child.element_name(),
                &requirement_type.entity,
                |start| {
                    if let Some(capability) = &requirement_type.required_capability_type {
                        push_qname(start, "requiredCapabilityType", capability);
                    }
                },
                |_| Ok(()),
            ),
        }
    }

    /// Common type element: attributes, documentation, tags, super type and
    /// properties schema, then the kind-specific body.
    fn entity_type(
        &mut self,
        element: &str,
        entity: &EntityType,
        attributes: impl FnOnce(&mut BytesStart<'_>),
        body: impl FnOnce(&mut Self) -> Result<(), InterchangeError>,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(element);
        start.push_attribute(("name", entity.name.as_str()));
        push_opt(&mut start, "targetNamespace", entity.target_namespace.as_deref());
        start.push_attribute(("abstract", yes_no(entity.is_abstract)));
        start.push_attribute(("final", yes_no(entity.is_final)));
        attributes(&mut start);
        self.event(Event::Start(start))?;

        self.documentation(&entity.documentation)?;
        self.wrapped("Tags", &entity.tags, |w, tag| {
            let mut start = BytesStart::new("Tag");
            start.push_attribute(("name", tag.name.as_str()));
            start.push_attribute(("value", tag.value.as_str()));
            w.event(Event::Empty(start))
        })?;
        if let Some(parent) = &entity.derived_from {
            let mut start = BytesStart::new("DerivedFrom");
            push_qname(&mut start, "typeRef", parent);
            self.event(Event::Empty(start))?;
        }
        if let Some(definition) = &entity.properties_definition {
            self.properties_definition(definition)?;
        }
        body(self)?;
        self.end(element)
    }

    fn properties_definition(
        &mut self,
        definition: &WineryPropertiesDefinition,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("winery:PropertiesDefinition");
        start.push_attribute(("elementname", definition.element_name.as_str()));
        start.push_attribute(("namespace", definition.namespace.as_str()));
        self.event(Event::Start(start))?;
        for property in &definition.property_definitions {
            self.event(Event::Start(BytesStart::new("winery:properties")))?;
            self.text_element("winery:key", &property.key)?;
            self.text_element("winery:type", &property.type_)?;
            self.text_element("winery:required", yes_no(property.required))?;
            if let Some(default) = &property.default_value {
                self.text_element("winery:defaultValue", default)?;
            }
            if let Some(description) = &property.description {
                self.text_element("winery:description", description)?;
            }
            self.wrapped("winery:constraints", &property.constraints, |w, constraint| {
                let mut start = BytesStart::new("winery:constraint");
                start.push_attribute(("key", constraint.key.as_str()));
                push_opt(&mut start, "value", constraint.value.as_deref());
                if constraint.list.is_empty() {
                    return w.event(Event::Empty(start));
                }
                w.event(Event::Start(start))?;
                for item in &constraint.list {
                    w.text_element("winery:value", item)?;
                }
                w.end("winery:constraint")
            })?;
            self.end("winery:properties")?;
        }
        self.end("winery:PropertiesDefinition")
    }

    fn properties(&mut self, properties: &KvProperties) -> Result<(), InterchangeError> {
        if properties.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new("Properties")))?;
        self.event(Event::Start(BytesStart::new("properties")))?;
        for (key, value) in properties {
            self.text_element(key, value)?;
        }
        self.end("properties")?;
        self.end("Properties")
    }

    fn interfaces(&mut self, name: &str, interfaces: &[Interface]) -> Result<(), InterchangeError> {
        self.wrapped(name, interfaces, |w, interface| {
            let mut start = BytesStart::new("Interface");
            start.push_attribute(("name", interface.name.as_str()));
            w.event(Event::Start(start))?;
            for operation in &interface.operations {
                let mut start = BytesStart::new("Operation");
                start.push_attribute(("name", operation.name.as_str()));
                w.event(Event::Start(start))?;
                w.documentation(&operation.documentation)?;
                w.wrapped("InputParameters", &operation.input_parameters, |w, p| {
                    w.parameter("InputParameter", p)
                })?;
                w.wrapped("OutputParameters", &operation.output_parameters, |w, p| {
                    w.parameter("OutputParameter", p)
                })?;
                w.end("Operation")?;
            }
            w.end("Interface")
        })
    }

    fn parameter(&mut self, element: &str, parameter: &Parameter) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(element);
        start.push_attribute(("name", parameter.name.as_str()));
        start.push_attribute(("type", parameter.type_.as_str()));
        start.push_attribute(("required", yes_no(parameter.required)));
        self.event(Event::Empty(start))
    }

    fn node_type(&mut self, node_type: &NodeType) -> Result<(), InterchangeError> {
        self.entity_type("NodeType", &node_type.entity, |_| {}, |w| {
            w.wrapped(
                "RequirementDefinitions",
                &node_type.requirement_definitions,
                Self::requirement_definition,
            )?;
            w.wrapped(
                "CapabilityDefinitions",
                &node_type.capability_definitions,
                Self::capability_definition,
            )?;
            w.interfaces("Interfaces", &node_type.interfaces)
        })
    }

    fn requirement_definition(
        &mut self,
        definition: &RequirementDefinition,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("RequirementDefinition");
        start.push_attribute(("name", definition.name.as_str()));
        if let Some(requirement_type) = &definition.requirement_type {
            push_qname(&mut start, "requirementType", requirement_type);
        }
        push_opt(&mut start, "lowerBound", definition.lower_bound.as_deref());
        push_opt(&mut start, "upperBound", definition.upper_bound.as_deref());
        self.event(Event::Empty(start))
    }

    fn capability_definition(
        &mut self,
        definition: &CapabilityDefinition,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("CapabilityDefinition");
        start.push_attribute(("name", definition.name.as_str()));
        if let Some(capability_type) = &definition.capability_type {
            push_qname(&mut start, "capabilityType", capability_type);
        }
        push_opt(&mut start, "lowerBound", definition.lower_bound.as_deref());
        push_opt(&mut start, "upperBound", definition.upper_bound.as_deref());
        if definition.documentation.is_empty() {
            return self.event(Event::Empty(start));
        }
        self.event(Event::Start(start))?;
        self.documentation(&definition.documentation)?;
        self.end("CapabilityDefinition")
    }

    fn relationship_type(
        &mut self,
        relationship_type: &RelationshipType,
    ) -> Result<(), InterchangeError> {
        self.entity_type("RelationshipType", &relationship_type.entity, |_| {}, |w| {
            w.interfaces("SourceInterfaces", &relationship_type.source_interfaces)?;
            w.interfaces("Interfaces", &relationship_type.interfaces)?;
            w.interfaces("TargetInterfaces", &relationship_type.target_interfaces)?;
            for (element, reference) in [
                ("ValidSource", &relationship_type.valid_source),
                ("ValidTarget", &relationship_type.valid_target),
            ] {
                if let Some(reference) = reference {
                    let mut start = BytesStart::new(element);
                    push_qname(&mut start, "typeRef", reference);
                    w.event(Event::Empty(start))?;
                }
            }
            Ok(())
        })
    }

    fn implementation_artifact(
        &mut self,
        artifact: &ImplementationArtifact,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("ImplementationArtifact");
        start.push_attribute(("name", artifact.name.as_str()));
        push_opt(&mut start, "interfaceName", artifact.interface_name.as_deref());
        push_opt(&mut start, "operationName", artifact.operation_name.as_deref());
        if let Some(artifact_type) = &artifact.artifact_type {
            push_qname(&mut start, "artifactType", artifact_type);
        }
        push_qname(&mut start, "artifactRef", &artifact.artifact_ref);
        self.event(Event::Empty(start))
    }

    fn deployment_artifact(
        &mut self,
        artifact: &DeploymentArtifact,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("DeploymentArtifact");
        start.push_attribute(("name", artifact.name.as_str()));
        if let Some(artifact_type) = &artifact.artifact_type {
            push_qname(&mut start, "artifactType", artifact_type);
        }
        push_qname(&mut start, "artifactRef", &artifact.artifact_ref);
        self.event(Event::Empty(start))
    }

    fn node_type_implementation(
        &mut self,
        implementation: &NodeTypeImplementation,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("NodeTypeImplementation");
        start.push_attribute(("name", implementation.id.as_str()));
        push_opt(&mut start, "targetNamespace", implementation.target_namespace.as_deref());
        push_qname(&mut start, "nodeType", &implementation.node_type);
        self.event(Event::Start(start))?;
        self.wrapped(
            "ImplementationArtifacts",
            &implementation.implementation_artifacts,
            Self::implementation_artifact,
        )?;
        self.wrapped(
            "DeploymentArtifacts",
            &implementation.deployment_artifacts,
            Self::deployment_artifact,
        )?;
        self.end("NodeTypeImplementation")
    }

    fn relationship_type_implementation(
        &mut self,
        implementation: &RelationshipTypeImplementation,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("RelationshipTypeImplementation");
        start.push_attribute(("name", implementation.id.as_str()));
        push_opt(&mut start, "targetNamespace", implementation.target_namespace.as_deref());
        push_qname(&mut start, "relationshipType", &implementation.relationship_type);
        self.event(Event::Start(start))?;
        self.wrapped(
            "ImplementationArtifacts",
            &implementation.implementation_artifacts,
            Self::implementation_artifact,
        )?;
        self.end("RelationshipTypeImplementation")
    }

    fn artifact_template(&mut self, template: &ArtifactTemplate) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("ArtifactTemplate");
        start.push_attribute(("id", template.id.as_str()));
        if let Some(type_) = &template.type_ {
            push_qname(&mut start, "type", type_);
        }
        self.event(Event::Start(start))?;
        self.properties(&template.properties)?;
        self.wrapped("ArtifactReferences", &template.artifact_references, |w, reference| {
            let mut start = BytesStart::new("ArtifactReference");
            start.push_attribute(("reference", reference.as_str()));
            w.event(Event::Empty(start))
        })?;
        self.end("ArtifactTemplate")
    }

    fn policy(&mut self, policy: &Policy) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("Policy");
        start.push_attribute(("name", policy.name.as_str()));
        push_qname(&mut start, "policyType", &policy.type_);
        self.event(Event::Start(start))?;
        self.documentation(&policy.documentation)?;
        self.properties(&policy.properties)?;
        self.end("Policy")
    }

    fn service_template(&mut self, template: &ServiceTemplate) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("ServiceTemplate");
        start.push_attribute(("id", template.id.as_str()));
        start.push_attribute(("name", template.name.as_str()));
        start.push_attribute(("targetNamespace", template.target_namespace.as_str()));
        self.event(Event::Start(start))?;
        self.documentation(&template.documentation)?;

        let boundary = &template.boundary_definitions;
        if !boundary.policies.is_empty() {
            self.event(Event::Start(BytesStart::new("BoundaryDefinitions")))?;
            self.wrapped("Policies", &boundary.policies, Self::policy)?;
            self.end("BoundaryDefinitions")?;
        }

        if let Some(topology) = &template.topology_template {
            self.event(Event::Start(BytesStart::new("TopologyTemplate")))?;
            self.documentation(&topology.documentation)?;
            for node_template in &topology.node_templates {
                self.node_template(node_template)?;
            }
            for relationship_template in &topology.relationship_templates {
                self.relationship_template(relationship_template)?;
            }
            self.end("TopologyTemplate")?;
        }
        self.end("ServiceTemplate")
    }

    fn node_template(&mut self, template: &NodeTemplate) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("NodeTemplate");
        start.push_attribute(("id", template.id.as_str()));
        start.push_attribute(("name", template.name.as_str()));
        push_qname(&mut start, "type", &template.type_);
        start.push_attribute(("winery:x", template.x.as_str()));
        start.push_attribute(("winery:y", template.y.as_str()));
        self.event(Event::Start(start))?;

        self.documentation(&template.documentation)?;
        self.properties(&template.properties)?;
        self.wrapped("Requirements", &template.requirements, Self::requirement)?;
        self.wrapped("Capabilities", &template.capabilities, Self::capability)?;
        self.wrapped("Policies", &template.policies, Self::policy)?;
        self.wrapped(
            "DeploymentArtifacts",
            &template.deployment_artifacts,
            Self::deployment_artifact,
        )?;
        self.end("NodeTemplate")
    }

    fn requirement(&mut self, requirement: &Requirement) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("Requirement");
        start.push_attribute(("id", requirement.id.as_str()));
        start.push_attribute(("name", requirement.name.as_str()));
        if let Some(type_) = &requirement.type_ {
            push_qname(&mut start, "type", type_);
        }
        self.event(Event::Empty(start))
    }

    fn capability(&mut self, capability: &Capability) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("Capability");
        start.push_attribute(("id", capability.id.as_str()));
        start.push_attribute(("name", capability.name.as_str()));
        if let Some(type_) = &capability.type_ {
            push_qname(&mut start, "type", type_);
        }
        if capability.properties.is_empty() {
            return self.event(Event::Empty(start));
        }
        self.event(Event::Start(start))?;
        self.properties(&capability.properties)?;
        self.end("Capability")
    }

    fn relationship_template(
        &mut self,
        template: &RelationshipTemplate,
    ) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("RelationshipTemplate");
        start.push_attribute(("id", template.id.as_str()));
        start.push_attribute(("name", template.name.as_str()));
        push_qname(&mut start, "type", &template.type_);
        self.event(Event::Start(start))?;
        self.documentation(&template.documentation)?;
        self.properties(&template.properties)?;
        for (element, reference) in [
            ("SourceElement", template.source.id.as_str()),
            ("TargetElement", template.target.id.as_str()),
        ] {
            let mut start = BytesStart::new(element);
            start.push_attribute(("ref", reference));
            self.event(Event::Empty(start))?;
        }
        self.end("RelationshipTemplate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{Import, Tag};

    fn render(definitions: &Definitions) -> String {
        String::from_utf8(Xml.write(definitions).unwrap()).unwrap()
    }

    #[test]
    fn test_xml_format_metadata() {
        assert_eq!(Xml.name(), "TOSCA XML");
        assert!(!Xml.capabilities().read);
        assert!(Xml.capabilities().write);
        assert!(Xml.read(b"<Definitions/>").is_err());
    }

    #[test]
    fn test_xml_validate() {
        assert!(Xml.validate(b"<?xml version=\"1.0\"?><Definitions/>").is_ok());
        assert!(Xml.validate(b"tosca_definitions_version: x").is_err());
    }

    #[test]
    fn test_write_definitions_root_and_imports() {
        let mut definitions = Definitions::new("app_Definitions", "http://example.org/app");
        definitions.imports.push(Import {
            import_type: XML_SCHEMA_NS.to_string(),
            namespace: None,
            location: Some("types.xsd".into()),
        });

        let output = render(&definitions);

        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(output.contains("id=\"app_Definitions\""));
        assert!(output.contains("targetNamespace=\"http://example.org/app\""));
        assert!(output.contains("<Import location=\"types.xsd\""));
    }

    #[test]
    fn test_write_node_type_with_namespaced_parent() {
        let mut entity = EntityType::new("Server");
        entity.derived_from = Some(QName::new("http://example.org/base", "Compute"));
        entity.tags.push(Tag::new("version", "1.0"));
        let mut definitions = Definitions::new("d", "http://example.org");
        definitions.push(DefinitionsChild::NodeType(NodeType {
            entity,
            ..NodeType::default()
        }));

        let output = render(&definitions);

        assert!(output.contains("<NodeType name=\"Server\""));
        assert!(output.contains("<Tag name=\"version\" value=\"1.0\"/>"));
        assert!(output.contains(
            "<DerivedFrom xmlns:typeref=\"http://example.org/base\" typeRef=\"typeref:Compute\"/>"
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut definitions = Definitions::new("d", "ns");
        definitions.push(DefinitionsChild::ServiceTemplate(ServiceTemplate {
            id: "s".into(),
            name: "s".into(),
            target_namespace: "ns".into(),
            documentation: vec!["a < b & c".into()],
            ..ServiceTemplate::default()
        }));
        assert!(render(&definitions).contains("<Documentation>a &lt; b &amp; c</Documentation>"));
    }
}
