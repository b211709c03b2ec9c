//! Conversion options.

/// Where to look for a capability definition when a relationship targets a
/// capability the target node template does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapabilitySearch {
    /// Only the target's own node type. Capabilities inherited from a
    /// super type are not found.
    #[default]
    OwningType,
    /// The target's node type, then each `derived_from` ancestor in turn.
    Hierarchy,
}

/// Options for converting a YAML service template to XML definitions.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub capability_search: CapabilitySearch,
    /// Metadata keys read for the `x`/`y` coordinates of node templates.
    pub coordinate_keys: (String, String),
    /// Coordinate used when the metadata key is absent.
    pub default_coordinate: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            capability_search: CapabilitySearch::default(),
            coordinate_keys: ("x".to_string(), "y".to_string()),
            default_coordinate: "0".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn with_capability_search(mut self, search: CapabilitySearch) -> Self {
        self.capability_search = search;
        self
    }
}
