//! Type hierarchy resolution for template substitution.
//!
//! A template whose type is abstract must be substituted by a template of a
//! concrete subtype before deployment. The functions here compute, for each
//! such template, the forest of types derived from its type.

use indexmap::IndexMap;
use tracing::trace;

use crate::base::QName;
use crate::xml::{HasInheritance, HasType};

/// A type together with the types derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtypes<'a, T> {
    pub element: &'a T,
    pub children: Vec<Subtypes<'a, T>>,
}

impl<'a, T> Subtypes<'a, T> {
    pub fn new(element: &'a T) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    /// This type and all of its descendants, depth first.
    pub fn flatten(&self) -> Vec<&'a T> {
        let mut output = vec![self.element];
        for child in &self.children {
            output.extend(child.flatten());
        }
        output
    }
}

/// The subtype forest below `root`.
///
/// Returns `None` when `root` is unknown or not abstract. Every type whose
/// super type is `root` becomes a tree, recursively. The type graph must be
/// acyclic.
pub fn collect_type_hierarchy<'a, T: HasInheritance>(
    types: &'a IndexMap<QName, T>,
    root: &QName,
) -> Option<Vec<Subtypes<'a, T>>> {
    let root_type = types.get(root)?;
    if !root_type.is_abstract() {
        return None;
    }
    Some(collect_subtypes(types, root))
}

fn collect_subtypes<'a, T: HasInheritance>(
    types: &'a IndexMap<QName, T>,
    parent: &QName,
) -> Vec<Subtypes<'a, T>> {
    types
        .iter()
        .filter(|(_, candidate)| candidate.derived_from() == Some(parent))
        .map(|(name, candidate)| {
            trace!(parent = %parent, subtype = %name, "found subtype");
            Subtypes {
                element: candidate,
                children: collect_subtypes(types, name),
            }
        })
        .collect()
}

/// Templates whose type is abstract, each paired with its subtype forest.
/// An abstract type nothing derives from offers no substitute and is skipped.
pub fn collect_substitutable_templates<'a, R: HasType, T: HasInheritance>(
    templates: &'a [R],
    types: &'a IndexMap<QName, T>,
) -> Vec<(&'a R, Vec<Subtypes<'a, T>>)> {
    templates
        .iter()
        .filter_map(|template| {
            collect_type_hierarchy(types, template.type_name())
                .filter(|subtypes| !subtypes.is_empty())
                .map(|subtypes| (template, subtypes))
        })
        .collect()
}
