//! Serialization forms of TOSCA documents.
//!
//! - **YAML** - TOSCA Simple Profile service templates (read and write)
//! - **XML** - TOSCA 1.0 `Definitions` documents (write)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐                         ┌──────────────┐
//! │  YAML File   │                         │   XML File   │
//! └──────┬───────┘                         └──────▲───────┘
//!        │ Yaml::read                             │ Xml::write
//!        ▼                                        │
//! ┌──────────────────┐   convert::Converter ┌─────┴────────────┐
//! │ yaml::Service-   │ ───────────────────▶ │ xml::Definitions │
//! │ Template         │                      └──────────────────┘
//! └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tosca::interchange::{ModelFormat, Xml, Yaml};
//!
//! let template = Yaml::default().read(&std::fs::read("service.yaml")?)?;
//! let definitions = tosca::convert::Converter::default()
//!     .convert(&template, "service", "http://example.org/service")?;
//! std::fs::write("service.xml", Xml.write(&definitions)?)?;
//! ```

mod error;
mod format;
mod xml;
mod yaml;

pub use error::InterchangeError;
pub use format::{FormatCapability, ModelFormat};
pub use xml::Xml;
pub use yaml::Yaml;

/// A serialization form, as detected from a path or MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Xml,
}

/// Supported file extensions for interchange formats.
pub fn supported_extensions() -> &'static [&'static str] {
    &["yaml", "yml", "xml", "tosca"]
}

/// Detect format from file extension.
pub fn detect_format(path: &std::path::Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => Some(Format::Yaml),
        "xml" | "tosca" => Some(Format::Xml),
        _ => None,
    }
}

/// Detect format from MIME type.
pub fn detect_format_from_mime(mime: &str) -> Option<Format> {
    match mime {
        "application/x-yaml" | "text/yaml" | "application/yaml" => Some(Format::Yaml),
        "application/xml" | "text/xml" => Some(Format::Xml),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case("service.yaml", Some(Format::Yaml))]
    #[case("service.YML", Some(Format::Yaml))]
    #[case("definitions.xml", Some(Format::Xml))]
    #[case("archive.csar", None)]
    #[case("noext", None)]
    fn test_detect_format(#[case] path: &str, #[case] expected: Option<Format>) {
        assert_eq!(detect_format(Path::new(path)), expected);
    }

    #[test]
    fn test_detect_format_from_mime() {
        assert_eq!(detect_format_from_mime("text/yaml"), Some(Format::Yaml));
        assert_eq!(detect_format_from_mime("application/xml"), Some(Format::Xml));
        assert_eq!(detect_format_from_mime("application/json"), None);
    }

    #[test]
    fn test_every_supported_extension_is_detected() {
        for ext in supported_extensions() {
            assert!(detect_format(Path::new(&format!("file.{ext}"))).is_some());
        }
    }
}
