//! YAML → XML conversion.
//!
//! A [`Converter`] turns one YAML [`ServiceTemplate`](yaml::ServiceTemplate)
//! into one XML [`Definitions`] document:
//!
//! ```text
//! convert(template, id, namespace)
//!   ├── reset session
//!   ├── interface_types      → session (merged into interfaces later)
//!   ├── imports, data_types  → XML imports
//!   ├── topology_template    → ServiceTemplate (node templates first, then
//!   │                          relationship templates, then policies)
//!   ├── node/relationship/capability/artifact/policy types
//!   └── assemble Definitions with every synthesized entity
//! ```
//!
//! Converters are free functions taking a [`Context`]: the mutable
//! [`Session`] plus read-only access to the source document, the
//! [`TypeRegistry`] and the [`ConvertOptions`].

mod artifacts;
mod dispatch;
mod interfaces;
mod options;
mod registry;
mod session;
mod templates;
mod types;

pub use artifacts::{ArtifactUse, classify_usages, implementation_uses};
pub use interfaces::xsd_type;
pub use options::{CapabilitySearch, ConvertOptions};
pub use registry::{InMemoryRegistry, TypeRegistry};
pub use session::Session;
pub use types::properties_definition;

use tracing::{debug, info};

use crate::interchange::InterchangeError;
use crate::xml::{self, Definitions, DefinitionsChild};
use crate::yaml;
use dispatch::{XmlEntity, fan_out, fan_out_list};

/// Everything a converter function can see.
pub(crate) struct Context<'a> {
    pub session: &'a mut Session,
    pub source: &'a yaml::ServiceTemplate,
    pub registry: &'a dyn TypeRegistry,
    pub options: &'a ConvertOptions,
}

impl<'a> Context<'a> {
    pub fn new(
        session: &'a mut Session,
        source: &'a yaml::ServiceTemplate,
        registry: &'a dyn TypeRegistry,
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            session,
            source,
            registry,
            options,
        }
    }
}

/// Converts YAML service templates to XML definitions.
///
/// The converter owns its session; every call to [`convert`](Self::convert)
/// starts from a clean one, so a converter can be reused.
pub struct Converter<R: TypeRegistry = InMemoryRegistry> {
    registry: R,
    options: ConvertOptions,
    session: Session,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(InMemoryRegistry::new())
    }
}

impl<R: TypeRegistry> Converter<R> {
    pub fn new(registry: R) -> Self {
        Self::with_options(registry, ConvertOptions::default())
    }

    pub fn with_options(registry: R, options: ConvertOptions) -> Self {
        Self {
            registry,
            options,
            session: Session::default(),
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// State left by the last conversion.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Clear all synthesized state.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Convert `template` into a definitions document `<id>_Definitions` in
    /// `namespace`.
    ///
    /// Fails when a relationship template cannot be resolved to a source
    /// requirement and a target capability.
    pub fn convert(
        &mut self,
        template: &yaml::ServiceTemplate,
        id: &str,
        namespace: &str,
    ) -> Result<Definitions, InterchangeError> {
        debug!(id, namespace, "converting service template");
        self.reset();
        self.session.namespace = namespace.to_string();

        let mut cx = Context::new(&mut self.session, template, &self.registry, &self.options);

        let _: Vec<XmlEntity> = fan_out(&mut cx, &template.interface_types)?;

        let imports: Vec<xml::Import> = fan_out_list(&mut cx, &template.imports)?;
        let _: Vec<XmlEntity> = fan_out(&mut cx, &template.data_types)?;
        let _: Vec<XmlEntity> = fan_out(&mut cx, &template.group_types)?;

        let topology_template = template
            .topology_template
            .as_ref()
            .map(|topology| templates::convert_topology(&mut cx, topology))
            .transpose()?;
        let service_template = xml::ServiceTemplate {
            id: id.to_string(),
            name: id.to_string(),
            target_namespace: namespace.to_string(),
            documentation: template.description.iter().cloned().collect(),
            topology_template,
            boundary_definitions: xml::BoundaryDefinitions {
                policies: cx.session.boundary_policies().to_vec(),
            },
        };

        let node_types: Vec<xml::NodeType> = fan_out(&mut cx, &template.node_types)?;
        let relationship_types: Vec<xml::RelationshipType> =
            fan_out(&mut cx, &template.relationship_types)?;
        let capability_types: Vec<xml::CapabilityType> =
            fan_out(&mut cx, &template.capability_types)?;
        let artifact_types: Vec<xml::ArtifactType> = fan_out(&mut cx, &template.artifact_types)?;
        let policy_types: Vec<xml::PolicyType> = fan_out(&mut cx, &template.policy_types)?;

        let session = &self.session;
        let mut definitions = Definitions::new(format!("{id}_Definitions"), namespace);
        definitions.name = Some(id.to_string());
        definitions.imports = imports;
        for import in &session.imports {
            if !definitions.imports.contains(import) {
                definitions.imports.push(import.clone());
            }
        }

        let children = std::iter::once(DefinitionsChild::ServiceTemplate(service_template))
            .chain(node_types.into_iter().map(DefinitionsChild::NodeType))
            .chain(
                session
                    .node_type_implementations
                    .iter()
                    .cloned()
                    .map(DefinitionsChild::NodeTypeImplementation),
            )
            .chain(relationship_types.into_iter().map(DefinitionsChild::RelationshipType))
            .chain(
                session
                    .relationship_type_implementations
                    .iter()
                    .cloned()
                    .map(DefinitionsChild::RelationshipTypeImplementation),
            )
            .chain(capability_types.into_iter().map(DefinitionsChild::CapabilityType))
            .chain(artifact_types.into_iter().map(DefinitionsChild::ArtifactType))
            .chain(
                session
                    .artifact_templates
                    .values()
                    .cloned()
                    .map(DefinitionsChild::ArtifactTemplate),
            )
            .chain(policy_types.into_iter().map(DefinitionsChild::PolicyType))
            .chain(
                session
                    .requirement_types
                    .iter()
                    .cloned()
                    .map(DefinitionsChild::RequirementType),
            );
        definitions.children.extend(children);

        info!(
            id = %definitions.id,
            children = definitions.children.len(),
            imports = definitions.imports.len(),
            "converted service template"
        );
        Ok(definitions)
    }
}

/// Convert with a fresh converter over `registry` and default options.
pub fn convert<R: TypeRegistry>(
    registry: R,
    template: &yaml::ServiceTemplate,
    id: &str,
    namespace: &str,
) -> Result<Definitions, InterchangeError> {
    Converter::new(registry).convert(template, id, namespace)
}
