//! Key/value property schemas (the Winery properties-definition extension).

use indexmap::IndexMap;

/// Property values of a template, already rendered to strings.
pub type KvProperties = IndexMap<String, String>;

/// A flat properties schema attached to an entity type.
///
/// XML TOSCA types reference an XSD element for their properties; the KV
/// form replaces that with an inline ordered list of typed keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WineryPropertiesDefinition {
    pub element_name: String,
    pub namespace: String,
    pub property_definitions: Vec<PropertyDefinitionKV>,
}

impl WineryPropertiesDefinition {
    pub fn get(&self, key: &str) -> Option<&PropertyDefinitionKV> {
        self.property_definitions.iter().find(|p| p.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.property_definitions.iter().map(|p| p.key.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDefinitionKV {
    pub key: String,
    /// `xsd:`-prefixed type name.
    pub type_: String,
    pub required: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub constraints: Vec<ConstraintClauseKV>,
}

/// A constraint carried through verbatim as operator, value and list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintClauseKV {
    pub key: String,
    pub value: Option<String>,
    pub list: Vec<String>,
}
