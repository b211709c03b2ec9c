//! Foundation types shared by both TOSCA object models.
//!
//! - [`QName`] - Namespace-qualified names used for every cross-reference
//! - [`namespaces`] - Well-known namespace URIs and generated-name constants
//!
//! This module has NO dependencies on other crate modules.

pub mod namespaces;
mod qname;

pub use qname::QName;
