//! # tosca-interchange
//!
//! Conversion of TOSCA service templates from the YAML Simple Profile to the
//! XML `Definitions` form, plus a structural YAML writer.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange  → Yaml / Xml formats, errors
//!   ↓
//! convert      → YAML → XML converter, session, type registry
//! substitution → abstract type hierarchies over XML types
//! writer       → YAML text rendering
//!   ↓
//! yaml, xml    → the two object models
//!   ↓
//! base         → QName, well-known namespaces
//! ```

/// Foundation types: QName, namespace constants
pub mod base;

/// The TOSCA YAML object model
pub mod yaml;

/// The TOSCA XML object model
pub mod xml;

/// YAML → XML conversion
pub mod convert;

/// Substitution: abstract type hierarchy resolution
pub mod substitution;

/// Structural YAML writer
pub mod writer;

/// Serialization formats and errors
pub mod interchange;

pub use base::QName;
pub use convert::{ConvertOptions, Converter, TypeRegistry};
pub use interchange::InterchangeError;
