//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur during conversion, reading or writing.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A relationship template that no node template requirement points at.
    #[error("no requirement references relationship template '{relationship}'")]
    MissingSourceRequirement { relationship: String },

    /// A requirement bound to a relationship but lacking node or capability.
    #[error("requirement '{requirement}' does not name both a target node and a capability")]
    IncompleteRequirement { requirement: String },

    /// A requirement targets a node template that does not exist.
    #[error("node template '{node}' targeted by requirement '{requirement}' not found")]
    MissingNode { node: String, requirement: String },

    /// No capability definition could be found for a relationship target.
    #[error("capability '{capability}' for relationship template '{relationship}' not found")]
    MissingCapability {
        capability: String,
        relationship: String,
    },

    /// A converted entity came back as a different kind than requested.
    #[error("expected {expected} for '{name}', found {found}")]
    UnexpectedVariant {
        expected: &'static str,
        found: &'static str,
        name: String,
    },

    /// Unsupported feature or format direction.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl InterchangeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// True for errors raised by an unresolvable cross-reference.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(
            self,
            Self::MissingSourceRequirement { .. }
                | Self::IncompleteRequirement { .. }
                | Self::MissingNode { .. }
                | Self::MissingCapability { .. }
        )
    }
}

impl From<serde_yaml::Error> for InterchangeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::yaml(err.to_string())
    }
}
