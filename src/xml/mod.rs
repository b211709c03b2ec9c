//! The TOSCA XML object model.
//!
//! The conversion target. Every element is plain data; serialization lives in
//! [`crate::interchange::xml`].

mod artifacts;
mod definitions;
mod properties;
mod templates;
mod types;

pub use artifacts::{
    ArtifactTemplate, DeploymentArtifact, ImplementationArtifact, NodeTypeImplementation,
    RelationshipTypeImplementation,
};
pub use definitions::{Definitions, DefinitionsChild, Import};
pub use properties::{
    ConstraintClauseKV, KvProperties, PropertyDefinitionKV, WineryPropertiesDefinition,
};
pub use templates::{
    BoundaryDefinitions, Capability, NodeTemplate, Policy, RelationshipTemplate, Requirement,
    ServiceTemplate, TopologyTemplate,
};
pub use types::{
    ArtifactType, CapabilityDefinition, CapabilityType, EntityType, Interface, NodeType,
    Operation, Parameter, PolicyType, RelationshipType, RequirementDefinition, RequirementType,
    Tag,
};

use crate::base::QName;

/// A type that may derive from another type and may be abstract.
pub trait HasInheritance {
    fn entity(&self) -> &EntityType;

    fn derived_from(&self) -> Option<&QName> {
        self.entity().derived_from.as_ref()
    }

    fn is_abstract(&self) -> bool {
        self.entity().is_abstract
    }

    fn qname(&self) -> QName {
        self.entity().qname()
    }
}

/// A template that instantiates a named type.
pub trait HasType {
    fn type_name(&self) -> &QName;
}

macro_rules! impl_inheritance {
    ($($ty:ty),* $(,)?) => {
        $(impl HasInheritance for $ty {
            fn entity(&self) -> &EntityType {
                &self.entity
            }
        })*
    };
}

impl_inheritance!(
    NodeType,
    RelationshipType,
    CapabilityType,
    ArtifactType,
    PolicyType,
    RequirementType,
);

impl HasType for NodeTemplate {
    fn type_name(&self) -> &QName {
        &self.type_
    }
}

impl HasType for RelationshipTemplate {
    fn type_name(&self) -> &QName {
        &self.type_
    }
}

impl HasType for Policy {
    fn type_name(&self) -> &QName {
        &self.type_
    }
}
