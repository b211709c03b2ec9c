//! Common trait for TOSCA interchange formats.

use super::InterchangeError;

/// Capabilities supported by a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCapability {
    /// Can read/import documents.
    pub read: bool,
    /// Can write/export documents.
    pub write: bool,
    /// Preserves all semantic information.
    pub lossless: bool,
}

impl FormatCapability {
    /// Full capability (read, write, lossless).
    pub const FULL: Self = Self {
        read: true,
        write: true,
        lossless: true,
    };

    /// Read-only capability.
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
        lossless: true,
    };

    /// Write-only capability.
    pub const WRITE_ONLY: Self = Self {
        read: false,
        write: true,
        lossless: false,
    };
}

/// Trait for TOSCA serialization forms.
///
/// Each form works on its own document type: a YAML
/// [`ServiceTemplate`](crate::yaml::ServiceTemplate) or an XML
/// [`Definitions`](crate::xml::Definitions). Conversion between the two is
/// the job of [`crate::convert`], not of the format.
pub trait ModelFormat: Send + Sync {
    /// The in-memory document this format reads and writes.
    type Document;

    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Capabilities of this format implementation.
    fn capabilities(&self) -> FormatCapability;

    /// Read a document from bytes.
    fn read(&self, input: &[u8]) -> Result<Self::Document, InterchangeError>;

    /// Write a document to bytes.
    fn write(&self, document: &Self::Document) -> Result<Vec<u8>, InterchangeError>;

    /// Validate that the input is well-formed for this format.
    ///
    /// This is a quick check that doesn't fully parse the content.
    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        let _ = input;
        Ok(())
    }
}
