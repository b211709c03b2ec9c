//! Lookup of pre-existing XML definitions by type name.

use indexmap::IndexMap;

use crate::base::QName;
use crate::xml::{Definitions, DefinitionsChild, NodeType};

/// Read access to the definitions documents the conversion may reference.
///
/// All referenced external types must be loaded before conversion starts; a
/// type the registry cannot produce makes the reference fail.
pub trait TypeRegistry {
    /// The definitions document declaring `type_id`, if known.
    fn get_definitions(&self, type_id: &QName) -> Option<Definitions>;

    /// The node type `type_id`, taken from the first child of its document.
    fn node_type(&self, type_id: &QName) -> Option<NodeType> {
        let definitions = self.get_definitions(type_id)?;
        match definitions.children.into_iter().next()? {
            DefinitionsChild::NodeType(node_type) => Some(node_type),
            _ => None,
        }
    }
}

/// A registry holding definitions documents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    definitions: IndexMap<QName, Definitions>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: QName, definitions: Definitions) {
        self.definitions.insert(type_id, definitions);
    }

    /// Register a node type in its own single-child definitions document.
    pub fn insert_node_type(&mut self, node_type: NodeType) {
        let type_id = node_type.entity.qname();
        let mut definitions = Definitions::new(
            format!("{}_Definitions", node_type.entity.name),
            type_id.namespace_uri(),
        );
        definitions.push(DefinitionsChild::NodeType(node_type));
        self.insert(type_id, definitions);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl TypeRegistry for InMemoryRegistry {
    fn get_definitions(&self, type_id: &QName) -> Option<Definitions> {
        self.definitions.get(type_id).cloned()
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn get_definitions(&self, type_id: &QName) -> Option<Definitions> {
        (**self).get_definitions(type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::EntityType;

    #[test]
    fn test_insert_node_type_is_found_by_qname() {
        let mut registry = InMemoryRegistry::new();
        let mut entity = EntityType::new("Server");
        entity.target_namespace = Some("http://example.org/types".into());
        registry.insert_node_type(NodeType {
            entity,
            ..NodeType::default()
        });

        let found = registry.node_type(&QName::new("http://example.org/types", "Server"));
        assert_eq!(found.map(|nt| nt.entity.name), Some("Server".to_string()));
        assert!(registry.node_type(&QName::local("Server")).is_none());
    }
}
