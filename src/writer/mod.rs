//! TOSCA YAML writer.
//!
//! Renders a [`ServiceTemplate`] as YAML text with a fixed key order per
//! node kind. Absent and empty fields are omitted.
//!
//! ```text
//! tosca_definitions_version: tosca_simple_yaml_1_1
//!
//! node_types:
//!   MyServer:
//!     derived_from: tosca.nodes.Compute
//! ```

mod node;
mod printer;

pub use node::{Parameter, VisitorNode};
pub use printer::Printer;

use std::path::Path;

use tracing::debug;

use crate::interchange::InterchangeError;
use crate::yaml::ServiceTemplate;
use node::Visitor;

/// Writer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Columns per nesting level.
    pub indent_size: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { indent_size: 2 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Writer {
    options: WriterOptions,
}

impl Writer {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> WriterOptions {
        self.options
    }

    pub fn render(&self, template: &ServiceTemplate) -> String {
        Visitor::new(self.options.indent_size)
            .visit(template.into(), &Parameter::new(0))
            .into_string()
    }

    /// Render `template` into `path`, creating missing parent directories.
    pub fn write(&self, template: &ServiceTemplate, path: &Path) -> Result<(), InterchangeError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let text = self.render(template);
        std::fs::write(path, &text)?;
        debug!(path = %path.display(), bytes = text.len(), "wrote service template");
        Ok(())
    }
}

/// Render with default options.
pub fn to_string(template: &ServiceTemplate) -> String {
    Writer::default().render(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::NodeType;

    #[test]
    fn test_version_is_followed_by_blank_line() {
        let text = to_string(&ServiceTemplate::new("tosca_simple_yaml_1_1"));
        assert_eq!(text, "tosca_definitions_version: tosca_simple_yaml_1_1\n\n");
    }

    #[test]
    fn test_indent_size_is_configurable() {
        let mut template = ServiceTemplate::new("tosca_simple_yaml_1_1");
        template.node_types.insert(
            "Server".into(),
            NodeType {
                entity: crate::yaml::EntityType::derived_from("tosca.nodes.Root"),
                ..NodeType::default()
            },
        );
        let text = Writer::new(WriterOptions { indent_size: 4 }).render(&template);
        assert!(
            text.contains("node_types:\n    Server:\n        derived_from: tosca.nodes.Root\n")
        );
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/out/service.yaml");
        Writer::default()
            .write(&ServiceTemplate::new("tosca_simple_yaml_1_1"), &path)
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("tosca_definitions_version"));
    }
}
