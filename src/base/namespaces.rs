//! Well-known namespaces and naming conventions.

/// Namespace of TOSCA XML definitions documents.
pub const TOSCA_XML_NS: &str = "http://docs.oasis-open.org/tosca/ns/2011/12";

/// Import type for XML schema imports.
pub const XML_SCHEMA_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Namespace of the Winery properties-definition extension.
pub const WINERY_NS: &str = "http://www.opentosca.org/winery/extensions/tosca/2013/02/12";

/// Namespace of the artifact type synthesized for relationship operations.
pub const ARTIFACT_TYPES_NS: &str = "http://opentosca.org/artifacttypes";

/// Local name of the artifact type synthesized for relationship operations.
pub const SCRIPT_ARTIFACT: &str = "ScriptArtifact";

/// Default TOSCA YAML namespace; imports in this namespace omit `namespace_uri`.
pub const DEFAULT_YAML_NS: &str = "http://docs.oasis-open.org/tosca/ns/simple/yaml/1.0";

/// Policy target key reserved for policies without explicit targets.
pub const BOUNDARY_TARGET: &str = "boundary";

/// Suffix appended to a type name to form its implementation wrapper id.
pub const IMPLEMENTATION_SUFFIX: &str = "_impl";

/// Path segment used in generated properties-definition namespaces.
pub const PROPERTIES_DEFINITION_SEGMENT: &str = "propertiesDefinition";

/// Metadata key carrying a type's target namespace.
pub const TARGET_NAMESPACE_KEY: &str = "targetNamespace";
