//! TOSCA YAML format support.
//!
//! Reads service templates with `serde_yaml` and writes them with
//! [`crate::writer`].
//!
//! ```yaml
//! tosca_definitions_version: tosca_simple_yaml_1_1
//!
//! topology_template:
//!   node_templates:
//!     server:
//!       type: tosca.nodes.Compute
//! ```

use super::{FormatCapability, InterchangeError, ModelFormat};
use crate::writer::{Writer, WriterOptions};
use crate::yaml::ServiceTemplate;

/// YAML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml {
    pub writer: WriterOptions,
}

impl ModelFormat for Yaml {
    type Document = ServiceTemplate;

    fn name(&self) -> &'static str {
        "TOSCA YAML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/x-yaml"
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    fn read(&self, input: &[u8]) -> Result<ServiceTemplate, InterchangeError> {
        self.validate(input)?;
        serde_yaml::from_slice(input)
            .map_err(|e| InterchangeError::yaml(format!("YAML parse error: {e}")))
    }

    fn write(&self, document: &ServiceTemplate) -> Result<Vec<u8>, InterchangeError> {
        Ok(Writer::new(self.writer).render(document).into_bytes())
    }

    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        let content = std::str::from_utf8(input)
            .map_err(|e| InterchangeError::yaml(format!("Invalid UTF-8: {e}")))?;

        if content.trim().is_empty() {
            return Err(InterchangeError::yaml("Empty YAML content"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "\
tosca_definitions_version: tosca_simple_yaml_1_1

metadata:
  template_name: web
description: A web server
topology_template:
  node_templates:
    server:
      type: tosca.nodes.Compute
      properties:
        port: 8080
";

    #[test]
    fn test_yaml_format_metadata() {
        assert_eq!(Yaml::default().extensions(), &["yaml", "yml"]);
        assert_eq!(Yaml::default().capabilities(), FormatCapability::FULL);
    }

    #[test]
    fn test_read_service_template() {
        let template = Yaml::default().read(SERVICE.as_bytes()).unwrap();
        assert_eq!(template.tosca_definitions_version.as_deref(), Some("tosca_simple_yaml_1_1"));
        assert_eq!(template.metadata.get("template_name").map(String::as_str), Some("web"));
        let topology = template.topology_template.unwrap();
        assert!(topology.node_templates.contains_key("server"));
    }

    #[test]
    fn test_written_template_reads_back() {
        let format = Yaml::default();
        let template = format.read(SERVICE.as_bytes()).unwrap();
        let written = format.write(&template).unwrap();
        assert_eq!(format.read(&written).unwrap(), template);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let error = Yaml::default().read(b"  \n").unwrap_err();
        assert!(matches!(error, InterchangeError::Yaml(_)));
    }
}
