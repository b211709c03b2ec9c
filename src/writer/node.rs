//! Structural rendering of every YAML model node.

use indexmap::IndexMap;
use serde_yaml::Value;

use super::printer::Printer;
use crate::base::QName;
use crate::base::namespaces::DEFAULT_YAML_NS;
use crate::yaml::{
    self, ArtifactDefinition, ArtifactType, AttributeAssignment, AttributeDefinition,
    CapabilityAssignment, CapabilityDefinition, CapabilityType, ConstraintClause, Credential,
    DataType, EntityType, EntrySchema, GroupDefinition, GroupType, Implementation,
    ImportDefinition, InterfaceDefinition, InterfaceType, Metadata, NodeFilterDefinition,
    NodeTemplate, NodeType, OperationDefinition, ParameterDefinition, PolicyDefinition,
    PolicyType, PropertyAssignment, PropertyAssignmentOrDefinition, PropertyDefinition,
    PropertyFilterDefinition, RelationshipAssignment, RelationshipDefinition,
    RelationshipTemplate, RelationshipType, RepositoryDefinition, RequirementAssignment,
    RequirementDefinition, ServiceTemplate, SubstitutionMappings, TopologyTemplateDefinition,
};

/// Indentation column plus the chain of keys leading to the current node.
///
/// Each recursive call receives its own copy; the innermost key names the
/// node being printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    indent: usize,
    context: Vec<String>,
}

impl Parameter {
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            context: Vec::new(),
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn add_context(&self, key: impl Into<String>) -> Self {
        let mut context = self.context.clone();
        context.push(key.into());
        Self {
            indent: self.indent,
            context,
        }
    }

    pub fn key(&self) -> &str {
        self.context.last().map_or("", String::as_str)
    }

    fn shifted(&self, columns: usize) -> Self {
        Self {
            indent: self.indent + columns,
            context: self.context.clone(),
        }
    }
}

/// Every node the writer knows how to render.
#[derive(Debug, Clone, Copy)]
pub enum VisitorNode<'a> {
    ServiceTemplate(&'a ServiceTemplate),
    TopologyTemplate(&'a TopologyTemplateDefinition),
    Import(&'a ImportDefinition),
    Repository(&'a RepositoryDefinition),
    Credential(&'a Credential),
    ArtifactType(&'a ArtifactType),
    DataType(&'a DataType),
    CapabilityType(&'a CapabilityType),
    InterfaceType(&'a InterfaceType),
    RelationshipType(&'a RelationshipType),
    NodeType(&'a NodeType),
    GroupType(&'a GroupType),
    PolicyType(&'a PolicyType),
    PropertyDefinition(&'a PropertyDefinition),
    AttributeDefinition(&'a AttributeDefinition),
    ParameterDefinition(&'a ParameterDefinition),
    EntrySchema(&'a EntrySchema),
    Constraint(&'a ConstraintClause),
    InterfaceDefinition(&'a InterfaceDefinition),
    OperationDefinition(&'a OperationDefinition),
    Implementation(&'a Implementation),
    RequirementDefinition(&'a RequirementDefinition),
    RelationshipDefinition(&'a RelationshipDefinition),
    CapabilityDefinition(&'a CapabilityDefinition),
    ArtifactDefinition(&'a ArtifactDefinition),
    NodeTemplate(&'a NodeTemplate),
    RelationshipTemplate(&'a RelationshipTemplate),
    GroupDefinition(&'a GroupDefinition),
    PolicyDefinition(&'a PolicyDefinition),
    RequirementAssignment(&'a RequirementAssignment),
    RelationshipAssignment(&'a RelationshipAssignment),
    CapabilityAssignment(&'a CapabilityAssignment),
    NodeFilter(&'a NodeFilterDefinition),
    PropertyFilter(&'a PropertyFilterDefinition),
    SubstitutionMappings(&'a SubstitutionMappings),
    PropertyAssignment(&'a PropertyAssignment),
    AttributeAssignment(&'a AttributeAssignment),
    PropertyAssignmentOrDefinition(&'a PropertyAssignmentOrDefinition),
}

macro_rules! visitor_node_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for VisitorNode<'a> {
                fn from(node: &'a $ty) -> Self {
                    VisitorNode::$variant(node)
                }
            }
        )*
    };
}

visitor_node_from! {
    ServiceTemplate(ServiceTemplate),
    TopologyTemplate(TopologyTemplateDefinition),
    Import(ImportDefinition),
    Repository(RepositoryDefinition),
    Credential(Credential),
    ArtifactType(ArtifactType),
    DataType(DataType),
    CapabilityType(CapabilityType),
    InterfaceType(InterfaceType),
    RelationshipType(RelationshipType),
    NodeType(NodeType),
    GroupType(GroupType),
    PolicyType(PolicyType),
    PropertyDefinition(PropertyDefinition),
    AttributeDefinition(AttributeDefinition),
    ParameterDefinition(ParameterDefinition),
    EntrySchema(EntrySchema),
    Constraint(ConstraintClause),
    InterfaceDefinition(InterfaceDefinition),
    OperationDefinition(OperationDefinition),
    Implementation(Implementation),
    RequirementDefinition(RequirementDefinition),
    RelationshipDefinition(RelationshipDefinition),
    CapabilityDefinition(CapabilityDefinition),
    ArtifactDefinition(ArtifactDefinition),
    NodeTemplate(NodeTemplate),
    RelationshipTemplate(RelationshipTemplate),
    GroupDefinition(GroupDefinition),
    PolicyDefinition(PolicyDefinition),
    RequirementAssignment(RequirementAssignment),
    RelationshipAssignment(RelationshipAssignment),
    CapabilityAssignment(CapabilityAssignment),
    NodeFilter(NodeFilterDefinition),
    PropertyFilter(PropertyFilterDefinition),
    SubstitutionMappings(SubstitutionMappings),
    PropertyAssignment(PropertyAssignment),
    AttributeAssignment(AttributeAssignment),
    PropertyAssignmentOrDefinition(PropertyAssignmentOrDefinition),
}

fn name(qname: Option<&QName>) -> Option<String> {
    qname.map(QName::to_prefixed_string)
}

fn names(qnames: &[QName]) -> Vec<String> {
    qnames.iter().map(QName::to_prefixed_string).collect()
}

fn constraint_operand(constraint: &ConstraintClause) -> Value {
    match constraint {
        ConstraintClause::Equal(v)
        | ConstraintClause::GreaterThan(v)
        | ConstraintClause::GreaterOrEqual(v)
        | ConstraintClause::LessThan(v)
        | ConstraintClause::LessOrEqual(v)
        | ConstraintClause::Length(v)
        | ConstraintClause::MinLength(v)
        | ConstraintClause::MaxLength(v) => v.clone(),
        ConstraintClause::InRange(values) | ConstraintClause::ValidValues(values) => {
            Value::Sequence(values.clone())
        }
        ConstraintClause::Pattern(pattern) => Value::String(pattern.clone()),
    }
}

/// Walks the model and renders each node at the indentation it is given.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Visitor {
    step: usize,
}

impl Visitor {
    pub fn new(step: usize) -> Self {
        Self { step }
    }

    fn printer(&self, parameter: &Parameter) -> Printer {
        Printer::new(parameter.indent, self.step)
    }

    fn nested(&self, parameter: &Parameter, steps: usize) -> Parameter {
        parameter.shifted(steps * self.step)
    }

    /// Render the fields of `node` at `parameter`'s indentation.
    pub fn visit(&self, node: VisitorNode<'_>, parameter: &Parameter) -> Printer {
        let p = parameter;
        let out = self.printer(p);
        match node {
            VisitorNode::ServiceTemplate(node) => self.service_template(node, p),
            VisitorNode::TopologyTemplate(node) => out
                .print_key_value("description", node.description.as_deref())
                .print(self.print_map("inputs", &node.inputs, p))
                .print(self.print_map("node_templates", &node.node_templates, p))
                .print(self.print_map("relationship_templates", &node.relationship_templates, p))
                .print(self.print_map("groups", &node.groups, p))
                .print(self.print_list_map("policies", &node.policies, p))
                .print(self.print_map("outputs", &node.outputs, p))
                .print(self.print_block(
                    "substitution_mappings",
                    node.substitution_mappings.as_ref(),
                    p,
                )),
            VisitorNode::Import(node) => out
                .print_key_value("file", node.file.as_deref())
                .print_key_value("repository", node.repository.as_deref())
                .print_key_value(
                    "namespace_uri",
                    node.namespace_uri.as_deref().filter(|uri| *uri != DEFAULT_YAML_NS),
                )
                .print_key_value("namespace_prefix", node.namespace_prefix.as_deref()),
            VisitorNode::Repository(node) => out
                .print_key_value("description", node.description.as_deref())
                .print_key_value("url", node.url.as_deref())
                .print(self.print_block("credential", node.credential.as_ref(), p)),
            VisitorNode::Credential(node) => out
                .print_key_value("protocol", node.protocol.as_deref())
                .print_key_value("token_type", node.token_type.as_deref())
                .print_key_value("token", node.token.as_deref())
                .print(self.print_map_object("keys", &node.keys, p))
                .print_key_value("user", node.user.as_deref()),
            VisitorNode::ArtifactType(node) => self
                .entity_type(&node.entity, p)
                .print_key_value("mime_type", node.mime_type.as_deref())
                .print_key_list("file_ext", &node.file_ext),
            VisitorNode::DataType(node) => self
                .entity_type(&node.entity, p)
                .print(self.print_list("constraints", &node.constraints, p)),
            VisitorNode::CapabilityType(node) => self
                .entity_type(&node.entity, p)
                .print_key_list("valid_source_types", &names(&node.valid_source_types)),
            VisitorNode::InterfaceType(node) => out
                .print_key_value("description", node.description.as_deref())
                .print_key_value("version", node.version.as_deref())
                .print_key_value("derived_from", name(node.derived_from.as_ref()).as_deref())
                .print(self.print_metadata(&node.metadata, p))
                .print(self.print_map("inputs", &node.inputs, p))
                .print(self.print_operations(&node.operations, p)),
            VisitorNode::RelationshipType(node) => self
                .entity_type(&node.entity, p)
                .print_key_list("valid_target_types", &names(&node.valid_target_types))
                .print(self.print_map("interfaces", &node.interfaces, p)),
            VisitorNode::NodeType(node) => self
                .entity_type(&node.entity, p)
                .print(self.print_list_map("requirements", &node.requirements, p))
                .print(self.print_map("capabilities", &node.capabilities, p))
                .print(self.print_map("interfaces", &node.interfaces, p))
                .print(self.print_map("artifacts", &node.artifacts, p)),
            VisitorNode::GroupType(node) => self
                .entity_type(&node.entity, p)
                .print_key_list("members", &names(&node.members))
                .print(self.print_list_map("requirements", &node.requirements, p))
                .print(self.print_map("capabilities", &node.capabilities, p))
                .print(self.print_map("interfaces", &node.interfaces, p)),
            VisitorNode::PolicyType(node) => self
                .entity_type(&node.entity, p)
                .print_key_list("targets", &names(&node.targets))
                .print_key_object("triggers", node.triggers.as_ref()),
            VisitorNode::PropertyDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("description", node.description.as_deref())
                .print_key_display("required", node.required)
                .print_key_object("default", node.default.as_ref())
                .print_key_value("status", node.status.as_deref())
                .print(self.print_list("constraints", &node.constraints, p))
                .print(self.print_block("entry_schema", node.entry_schema.as_ref(), p)),
            VisitorNode::AttributeDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("description", node.description.as_deref())
                .print_key_object("default", node.default.as_ref())
                .print_key_value("status", node.status.as_deref())
                .print(self.print_block("entry_schema", node.entry_schema.as_ref(), p)),
            VisitorNode::ParameterDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("description", node.description.as_deref())
                .print_key_display("required", node.required)
                .print_key_object("default", node.default.as_ref())
                .print_key_value("status", node.status.as_deref())
                .print(self.print_list("constraints", &node.constraints, p))
                .print(self.print_block("entry_schema", node.entry_schema.as_ref(), p))
                .print_key_object("value", node.value.as_ref()),
            VisitorNode::EntrySchema(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("description", node.description.as_deref())
                .print(self.print_list("constraints", &node.constraints, p)),
            VisitorNode::Constraint(node) => {
                out.print_key_object(&format!("- {}", node.key()), Some(&constraint_operand(node)))
            }
            VisitorNode::InterfaceDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print(self.print_map("inputs", &node.inputs, p))
                .print(self.print_operations(&node.operations, p)),
            VisitorNode::OperationDefinition(node) => out
                .print_key_value("description", node.description.as_deref())
                .print(self.print_map("inputs", &node.inputs, p))
                .print(self.print_map("outputs", &node.outputs, p))
                .print(self.print_block("implementation", node.implementation.as_ref(), p)),
            VisitorNode::Implementation(node) => out
                .print_key_value("primary", name(node.primary.as_ref()).as_deref())
                .print_key_list("dependencies", &names(&node.dependencies)),
            VisitorNode::RequirementDefinition(node) => out
                .print_key_value("capability", name(node.capability.as_ref()).as_deref())
                .print_key_value("node", name(node.node.as_ref()).as_deref())
                .print(self.print_block("relationship", node.relationship.as_ref(), p))
                .print_key_list("occurrences", &node.occurrences)
                .print_key_value("description", node.description.as_deref()),
            VisitorNode::RelationshipDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print(self.print_map("interfaces", &node.interfaces, p)),
            VisitorNode::CapabilityDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("description", node.description.as_deref())
                .print_key_list("occurrences", &node.occurrences)
                .print_key_list("valid_source_types", &names(&node.valid_source_types))
                .print(self.print_map("properties", &node.properties, p))
                .print(self.print_map("attributes", &node.attributes, p)),
            VisitorNode::ArtifactDefinition(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print_key_value("repository", node.repository.as_deref())
                .print_key_value("description", node.description.as_deref())
                .print_key_value("deploy_path", node.deploy_path.as_deref())
                .print_key_value("file", node.file.as_deref())
                .print_key_list("files", &node.files)
                .print(self.print_map_object("properties", &node.properties, p)),
            VisitorNode::NodeTemplate(node) => out
                .print_key_value("type", Some(node.type_.to_prefixed_string().as_str()))
                .print_key_value("description", node.description.as_deref())
                .print(self.print_metadata(&node.metadata, p))
                .print_key_list("directives", &node.directives)
                .print(self.print_map("properties", &node.properties, p))
                .print(self.print_map("attributes", &node.attributes, p))
                .print(self.print_list_map("requirements", &node.requirements, p))
                .print(self.print_map("capabilities", &node.capabilities, p))
                .print(self.print_map("interfaces", &node.interfaces, p))
                .print(self.print_map("artifacts", &node.artifacts, p))
                .print(self.print_block("node_filter", node.node_filter.as_ref(), p))
                .print_key_value("copy", node.copy.as_deref()),
            VisitorNode::RelationshipTemplate(node) => out
                .print_key_value("type", Some(node.type_.to_prefixed_string().as_str()))
                .print_key_value("description", node.description.as_deref())
                .print(self.print_metadata(&node.metadata, p))
                .print(self.print_map("properties", &node.properties, p))
                .print(self.print_map("attributes", &node.attributes, p))
                .print(self.print_map("interfaces", &node.interfaces, p))
                .print_key_value("copy", node.copy.as_deref()),
            VisitorNode::GroupDefinition(node) => out
                .print_key_value("type", Some(node.type_.to_prefixed_string().as_str()))
                .print_key_value("description", node.description.as_deref())
                .print(self.print_metadata(&node.metadata, p))
                .print(self.print_map("properties", &node.properties, p))
                .print_key_list("members", &node.members)
                .print(self.print_map("interfaces", &node.interfaces, p)),
            VisitorNode::PolicyDefinition(node) => out
                .print_key_value("type", Some(node.type_.to_prefixed_string().as_str()))
                .print_key_value("description", node.description.as_deref())
                .print(self.print_metadata(&node.metadata, p))
                .print(self.print_map("properties", &node.properties, p))
                .print_key_list("targets", &names(&node.targets)),
            VisitorNode::RequirementAssignment(node) => out
                .print_key_value("node", name(node.node.as_ref()).as_deref())
                .print(self.print_block("relationship", node.relationship.as_ref(), p))
                .print_key_value("capability", name(node.capability.as_ref()).as_deref())
                .print(self.print_block("node_filter", node.node_filter.as_ref(), p))
                .print_key_list("occurrences", &node.occurrences),
            VisitorNode::RelationshipAssignment(node) => out
                .print_key_value("type", name(node.type_.as_ref()).as_deref())
                .print(self.print_map("properties", &node.properties, p))
                .print(self.print_map("interfaces", &node.interfaces, p)),
            VisitorNode::CapabilityAssignment(node) => out
                .print(self.print_map("properties", &node.properties, p))
                .print(self.print_map("attributes", &node.attributes, p)),
            VisitorNode::NodeFilter(node) => out
                .print(self.print_list_map("properties", &node.properties, p))
                .print(self.print_list_map_object("capabilities", &node.capabilities, p)),
            VisitorNode::PropertyFilter(node) => node
                .constraints
                .iter()
                .fold(out, |out, constraint| out.print(self.visit(constraint.into(), p))),
            VisitorNode::SubstitutionMappings(node) => out
                .print_key_value("node_type", name(node.node_type.as_ref()).as_deref())
                .print(self.print_map_inline_list("capabilities", &node.capabilities, p))
                .print(self.print_map_inline_list("requirements", &node.requirements, p)),
            VisitorNode::PropertyAssignment(node) => {
                out.print_key_object(p.key(), Some(node.value()))
            }
            VisitorNode::AttributeAssignment(node) => out
                .print_key_value("description", node.description.as_deref())
                .print_key_object("value", node.value.as_ref()),
            VisitorNode::PropertyAssignmentOrDefinition(
                PropertyAssignmentOrDefinition::Definition(node),
            ) => self.visit(node.into(), p),
            VisitorNode::PropertyAssignmentOrDefinition(
                PropertyAssignmentOrDefinition::Assignment(value),
            ) => out.print_key_object(p.key(), Some(value)),
        }
    }

    fn service_template(&self, node: &ServiceTemplate, p: &Parameter) -> Printer {
        let mut out = self
            .printer(p)
            .print_key_value("tosca_definitions_version", node.tosca_definitions_version.as_deref())
            .print_new_line()
            .print(self.print_metadata(&node.metadata, p))
            .print(self.print_list_map("imports", &node.imports, p))
            .print_key_value("description", node.description.as_deref())
            .print(self.print_map_object("dsl_definitions", &node.dsl_definitions, p))
            .print(self.print_map("repositories", &node.repositories, p))
            .print(self.print_map("artifact_types", &node.artifact_types, p))
            .print(self.print_map("data_types", &node.data_types, p))
            .print(self.print_map("capability_types", &node.capability_types, p))
            .print(self.print_map("interface_types", &node.interface_types, p))
            .print(self.print_map("relationship_types", &node.relationship_types, p))
            .print(self.print_map("node_types", &node.node_types, p))
            .print(self.print_map("group_types", &node.group_types, p))
            .print(self.print_map("policy_types", &node.policy_types, p));
        if let Some(topology) = &node.topology_template {
            out = out.print(self.print_block("topology_template", Some(topology), p));
        }
        out
    }

    /// Fields shared by every entity type, in writing order.
    fn entity_type(&self, entity: &EntityType, p: &Parameter) -> Printer {
        self.printer(p)
            .print_key_value("description", entity.description.as_deref())
            .print_key_value("version", entity.version.as_deref())
            .print_key_value("derived_from", name(entity.derived_from.as_ref()).as_deref())
            .print(self.print_map("properties", &entity.properties, p))
            .print(self.print_map("attributes", &entity.attributes, p))
            .print(self.print_metadata(&entity.metadata, p))
    }

    /// `key: value` for assignments; `key:` followed by the indented body
    /// for everything else. An empty body prints `key: {}`.
    fn print_visitor_node(&self, node: VisitorNode<'_>, p: &Parameter) -> Printer {
        let out = self.printer(p);
        match node {
            VisitorNode::PropertyAssignment(_)
            | VisitorNode::PropertyAssignmentOrDefinition(
                PropertyAssignmentOrDefinition::Assignment(_),
            ) => self.visit(node, p),
            VisitorNode::AttributeAssignment(assignment) if assignment.description.is_none() => {
                let value = assignment.value.as_ref().unwrap_or(&Value::Null);
                out.print_key_object(p.key(), Some(value))
            }
            _ => {
                let body = self.visit(node, &self.nested(p, 1));
                if body.is_empty() {
                    out.print_key_object(p.key(), Some(&Value::Mapping(Default::default())))
                } else {
                    out.print_key(p.key()).print(body)
                }
            }
        }
    }

    /// `key:` then the body of `node` one step in; nothing for `None`.
    fn print_block<'a, T>(&self, key: &str, node: Option<&'a T>, p: &Parameter) -> Printer
    where
        &'a T: Into<VisitorNode<'a>>,
    {
        match node {
            Some(node) => self.print_visitor_node(node.into(), &p.add_context(key)),
            None => self.printer(p),
        }
    }

    fn print_map<'a, V>(&self, key: &str, map: &'a IndexMap<String, V>, p: &Parameter) -> Printer
    where
        &'a V: Into<VisitorNode<'a>>,
    {
        if map.is_empty() {
            return self.printer(p);
        }
        let inner = self.nested(p, 1);
        map.iter().fold(self.printer(p).print_key(key), |out, (name, value)| {
            out.print(self.print_visitor_node(value.into(), &inner.add_context(name.as_str())))
        })
    }

    /// Operations are keys of their interface, not a nested map.
    fn print_operations(
        &self,
        operations: &IndexMap<String, OperationDefinition>,
        p: &Parameter,
    ) -> Printer {
        operations.iter().fold(self.printer(p), |out, (name, operation)| {
            out.print(self.print_visitor_node(operation.into(), &p.add_context(name.as_str())))
        })
    }

    /// `key:` then one `- name:` item per entry, bodies three steps in.
    fn print_list_map<'a, V>(
        &self,
        key: &str,
        list: &'a [IndexMap<String, V>],
        p: &Parameter,
    ) -> Printer
    where
        &'a V: Into<VisitorNode<'a>>,
    {
        if list.iter().all(IndexMap::is_empty) {
            return self.printer(p);
        }
        let item = self.nested(p, 1);
        let body = self.nested(p, 3);
        list.iter()
            .flat_map(|map| map.iter())
            .fold(self.printer(p).print_key(key), |out, (name, value)| {
                out.print(self.printer(&item).print_list_key(name))
                    .print(self.visit(value.into(), &body.add_context(name.as_str())))
            })
    }

    fn print_list_map_object(
        &self,
        key: &str,
        list: &[IndexMap<String, Value>],
        p: &Parameter,
    ) -> Printer {
        if list.iter().all(IndexMap::is_empty) {
            return self.printer(p);
        }
        let item = self.nested(p, 1);
        let body = self.nested(p, 3);
        list.iter()
            .flat_map(|map| map.iter())
            .fold(self.printer(p).print_key(key), |out, (name, value)| {
                let entries = match value {
                    Value::Mapping(map) => map.iter().fold(self.printer(&body), |out, (k, v)| {
                        let key = yaml::scalar_string(k).unwrap_or_default();
                        out.print_key_object(&key, Some(v))
                    }),
                    _ => self.printer(&body),
                };
                out.print(self.printer(&item).print_list_key(name)).print(entries)
            })
    }

    fn print_list(&self, key: &str, constraints: &[ConstraintClause], p: &Parameter) -> Printer {
        if constraints.is_empty() {
            return self.printer(p);
        }
        let item = self.nested(p, 1);
        constraints.iter().fold(self.printer(p).print_key(key), |out, constraint| {
            out.print(self.visit(constraint.into(), &item))
        })
    }

    fn print_map_object(&self, key: &str, map: &IndexMap<String, Value>, p: &Parameter) -> Printer {
        if map.is_empty() {
            return self.printer(p);
        }
        map.iter()
            .fold(self.printer(p).print_key(key).indent(1), |out, (name, value)| {
                out.print_key_object(name, Some(value))
            })
    }

    fn print_map_inline_list(
        &self,
        key: &str,
        map: &IndexMap<String, Vec<String>>,
        p: &Parameter,
    ) -> Printer {
        if map.is_empty() {
            return self.printer(p);
        }
        map.iter()
            .fold(self.printer(p).print_key(key).indent(1), |out, (name, values)| {
                out.print_key_list(name, values)
            })
    }

    fn print_metadata(&self, metadata: &Metadata, p: &Parameter) -> Printer {
        if metadata.is_empty() {
            return self.printer(p);
        }
        metadata
            .iter()
            .fold(self.printer(p).print_key("metadata").indent(1), |out, (key, value)| {
                out.print_key_value(key, Some(value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<'a>(node: impl Into<VisitorNode<'a>>) -> String {
        Visitor::new(2).visit(node.into(), &Parameter::new(0)).into_string()
    }

    #[test]
    fn test_parameter_context_is_copied() {
        let root = Parameter::new(0);
        let child = root.add_context("node_types").add_context("Server");
        assert_eq!(root.key(), "");
        assert_eq!(child.key(), "Server");
    }

    #[test]
    fn test_constraints_render_as_list_items() {
        let property: PropertyDefinition = serde_yaml::from_str(
            "type: integer\nconstraints:\n  - in_range: [1, 10]\n  - equal: 5\n",
        )
        .unwrap();
        assert_eq!(
            render(&property),
            "type: integer\nconstraints:\n  - in_range: [1, 10]\n  - equal: 5\n"
        );
    }

    #[test]
    fn test_requirements_render_as_list_map() {
        let template: NodeTemplate = serde_yaml::from_str(
            "type: tosca.nodes.WebServer\n\
             requirements:\n  - host:\n      node: server\n      capability: tosca.capabilities.Compute\n",
        )
        .unwrap();
        assert_eq!(
            render(&template),
            "type: tosca.nodes.WebServer\n\
             requirements:\n  - host:\n      node: server\n      capability: tosca.capabilities.Compute\n"
        );
    }

    #[test]
    fn test_default_yaml_namespace_is_omitted_from_imports() {
        let import = ImportDefinition {
            file: Some("types.yaml".into()),
            namespace_uri: Some(DEFAULT_YAML_NS.into()),
            ..ImportDefinition::default()
        };
        assert_eq!(render(&import), "file: types.yaml\n");
    }

    #[test]
    fn test_operations_are_interface_keys() {
        let interface: InterfaceDefinition = serde_yaml::from_str(
            "type: tosca.interfaces.node.lifecycle.Standard\ncreate:\n  implementation: scripts/create.sh\n",
        )
        .unwrap();
        assert_eq!(
            render(&interface),
            "type: tosca.interfaces.node.lifecycle.Standard\ncreate:\n  implementation:\n    primary: scripts/create.sh\n"
        );
    }

    #[test]
    fn test_substitution_capabilities_render_inline() {
        let mappings: SubstitutionMappings = serde_yaml::from_str(
            "node_type: Database\ncapabilities:\n  endpoint: [db, endpoint]\n",
        )
        .unwrap();
        assert_eq!(
            render(&mappings),
            "node_type: Database\ncapabilities:\n  endpoint: [db, endpoint]\n"
        );
    }
}
