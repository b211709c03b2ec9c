//! End-to-end conversion of YAML service templates into XML definitions.

use rstest::rstest;
use tosca::QName;
use tosca::convert::{CapabilitySearch, ConvertOptions, Converter, InMemoryRegistry};
use tosca::interchange::{InterchangeError, ModelFormat, Xml, Yaml};
use tosca::xml::{self, CapabilityDefinition, Definitions, EntityType, NodeType};
use tosca::yaml::ServiceTemplate;

const NAMESPACE: &str = "http://example.org/tosca/app";

fn parse(source: &str) -> ServiceTemplate {
    Yaml::default().read(source.as_bytes()).expect("parse")
}

fn convert(source: &str) -> Result<Definitions, InterchangeError> {
    Converter::default().convert(&parse(source), "app", NAMESPACE)
}

fn topology(definitions: &Definitions) -> &xml::TopologyTemplate {
    definitions
        .service_templates()
        .next()
        .and_then(|template| template.topology_template.as_ref())
        .expect("topology")
}

const HOSTED: &str = r#"
tosca_definitions_version: tosca_simple_yaml_1_1
node_types:
  BaseHost:
    capabilities:
      hosted:
        type: tosca.capabilities.Container
  Host:
    derived_from: BaseHost
  DirectHost:
    capabilities:
      hosted: tosca.capabilities.Container
  App: {}
topology_template:
  node_templates:
    A:
      type: App
      requirements:
        - r1:
            node: B
            capability: hosted
            relationship: rel1
    B:
      type: HOST_TYPE
  relationship_templates:
    rel1:
      type: tosca.relationships.HostedOn
"#;

fn hosted_on(host_type: &str) -> String {
    HOSTED.replace("HOST_TYPE", host_type)
}

#[test]
fn test_relationship_binds_requirement_to_synthesized_capability() {
    let definitions = convert(&hosted_on("DirectHost")).expect("convert");
    let topology = topology(&definitions);

    let relationship = topology.relationship_template("rel1").expect("rel1");
    assert_eq!(relationship.source.id, "A_r1");
    assert_eq!(relationship.source.name, "r1");
    assert_eq!(relationship.target.id, "B_hosted");
    assert_eq!(relationship.target.name, "hosted");
    assert_eq!(
        relationship.target.type_.as_ref().map(QName::local_part),
        Some("tosca.capabilities.Container")
    );

    let b = topology.node_template("B").expect("B");
    assert_eq!(b.capabilities.len(), 1);
    assert_eq!(b.capabilities[0].id, "B_hosted");
}

#[test]
fn test_missing_capability_definition_is_fatal() {
    let error = convert(&hosted_on("App")).unwrap_err();
    assert!(matches!(
        error,
        InterchangeError::MissingCapability { ref capability, ref relationship }
            if capability == "hosted" && relationship == "rel1"
    ));
}

#[rstest]
#[case(CapabilitySearch::OwningType, false)]
#[case(CapabilitySearch::Hierarchy, true)]
fn test_inherited_capability_depends_on_search(
    #[case] search: CapabilitySearch,
    #[case] found: bool,
) {
    let options = ConvertOptions::default().with_capability_search(search);
    let mut converter = Converter::with_options(InMemoryRegistry::new(), options);

    let result = converter.convert(&parse(&hosted_on("Host")), "app", NAMESPACE);

    assert_eq!(result.is_ok(), found);
    if let Ok(definitions) = result {
        let relationship = topology(&definitions).relationship_template("rel1").unwrap();
        assert_eq!(relationship.target.id, "B_hosted");
    }
}

#[test]
fn test_capability_found_in_registry() {
    let mut entity = EntityType::new("RemoteHost");
    entity.target_namespace = Some("http://example.org/remote".into());
    let mut registry = InMemoryRegistry::new();
    registry.insert_node_type(NodeType {
        entity,
        capability_definitions: vec![CapabilityDefinition {
            name: "hosted".into(),
            capability_type: Some(QName::local("tosca.capabilities.Container")),
            ..CapabilityDefinition::default()
        }],
        ..NodeType::default()
    });

    let source = hosted_on("'{http://example.org/remote}RemoteHost'");
    let definitions = Converter::new(registry)
        .convert(&parse(&source), "app", NAMESPACE)
        .expect("convert");

    let relationship = topology(&definitions).relationship_template("rel1").unwrap();
    assert_eq!(relationship.target.id, "B_hosted");
}

#[rstest]
#[case::no_requirement(
    "A:\n      type: App\n",
    "MissingSourceRequirement"
)]
#[case::no_node(
    "A:\n      type: App\n      requirements:\n        - r1:\n            capability: hosted\n            relationship: rel1\n",
    "IncompleteRequirement"
)]
#[case::unknown_node(
    "A:\n      type: App\n      requirements:\n        - r1:\n            node: Z\n            capability: hosted\n            relationship: rel1\n",
    "MissingNode"
)]
fn test_unresolvable_relationship(#[case] node_templates: &str, #[case] expected: &str) {
    let source = format!(
        "tosca_definitions_version: tosca_simple_yaml_1_1\n\
         node_types:\n  App: {{}}\n\
         topology_template:\n  node_templates:\n    {node_templates}\
         \x20 relationship_templates:\n    rel1:\n      type: tosca.relationships.HostedOn\n"
    );

    let error = convert(&source).unwrap_err();

    assert!(error.is_unresolved_reference());
    assert!(format!("{error:?}").starts_with(expected), "got {error:?}");
}

#[test]
fn test_properties_definition_in_declaration_order() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
node_types:
  Server:
    properties:
      p1:
        type: string
        required: true
      p2:
        type: integer
        default: 5
"#,
    )
    .expect("convert");

    let server = definitions.node_type("Server").expect("Server");
    let properties = server.entity.properties_definition.as_ref().expect("properties");
    assert_eq!(properties.namespace, format!("{NAMESPACE}/propertiesDefinition/Server"));
    assert_eq!(properties.keys().collect::<Vec<_>>(), ["p1", "p2"]);
    assert_eq!(properties.get("p1").unwrap().type_, "xsd:string");
    assert_eq!(properties.get("p2").unwrap().default_value.as_deref(), Some("5"));
}

#[test]
fn test_shared_script_is_one_artifact_template() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
node_types:
  WebServer:
    artifacts:
      script:
        type: tosca.artifacts.Implementation.Bash
        file: script.sh
      package:
        type: tosca.artifacts.Deployment
        file: app.tar.gz
    interfaces:
      Standard:
        type: tosca.interfaces.node.lifecycle.Standard
        create:
          implementation: script
        configure:
          implementation: script
"#,
    )
    .expect("convert");

    let templates: Vec<_> = definitions.artifact_templates().map(|t| t.id.as_str()).collect();
    assert_eq!(templates, ["WebServer_package", "WebServer_script"]);
    assert_eq!(
        definitions.artifact_template("WebServer_script").unwrap().artifact_references,
        ["script.sh"]
    );

    let implementation = definitions.node_type_implementations().next().expect("impl");
    assert_eq!(implementation.id, "WebServer_impl");
    assert_eq!(implementation.implementation_artifacts.len(), 1);
    let artifact = &implementation.implementation_artifacts[0];
    assert_eq!(artifact.name, "script");
    assert_eq!(artifact.interface_name.as_deref(), Some("Standard"));
    assert_eq!(artifact.operation_name, None);
    assert_eq!(artifact.artifact_ref, QName::new(NAMESPACE, "WebServer_script"));

    assert_eq!(implementation.deployment_artifacts.len(), 1);
    assert_eq!(implementation.deployment_artifacts[0].name, "package");
}

#[test]
fn test_operation_output_is_propagated_from_attribute() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
node_types:
  Server:
    attributes:
      server_id:
        type: string
        default: { get_operation_output: [SELF, Standard, create, id] }
    interfaces:
      Standard:
        create:
          implementation: create.sh
"#,
    )
    .expect("convert");

    let server = definitions.node_type("Server").unwrap();
    let create = server
        .interface("Standard")
        .and_then(|interface| interface.operation("create"))
        .expect("create");
    assert!(create.output_parameters.iter().any(|p| p.name == "id"));
}

#[test]
fn test_interface_type_operations_come_first() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
interface_types:
  Lifecycle:
    start:
      description: Start the service
node_types:
  Server:
    interfaces:
      Lifecycle:
        type: Lifecycle
        stop:
          implementation: stop.sh
"#,
    )
    .expect("convert");

    let interface = definitions.node_type("Server").unwrap().interface("Lifecycle").unwrap();
    let operations: Vec<_> = interface.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(operations, ["start", "stop"]);
}

#[test]
fn test_interface_operations_override_interface_type_defaults() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
interface_types:
  Lifecycle:
    create:
      description: Default create
    start:
      description: Start the service
node_types:
  Server:
    interfaces:
      Lifecycle:
        type: Lifecycle
        create:
          description: Server create
          implementation: create.sh
"#,
    )
    .expect("convert");

    let interface = definitions.node_type("Server").unwrap().interface("Lifecycle").unwrap();
    let operations: Vec<_> = interface.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(operations, ["create", "start"]);
    assert_eq!(interface.operations[0].documentation, ["Server create"]);
}

#[test]
fn test_policies_split_between_boundary_and_targets() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
topology_template:
  node_templates:
    web:
      type: tosca.nodes.WebServer
      metadata:
        x: "120"
        y: "40"
  policies:
    - everywhere:
        type: tosca.policies.Monitoring
    - placement:
        type: tosca.policies.Placement
        targets: [web]
"#,
    )
    .expect("convert");

    let service = definitions.service_templates().next().unwrap();
    let boundary: Vec<_> =
        service.boundary_definitions.policies.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(boundary, ["everywhere"]);

    let web = topology(&definitions).node_template("web").unwrap();
    assert_eq!(web.policies.len(), 1);
    assert_eq!(web.policies[0].name, "placement");
    assert_eq!((web.x.as_str(), web.y.as_str()), ("120", "40"));
}

#[test]
fn test_requirement_types_are_synthesized_once() {
    let definitions = convert(
        r#"
tosca_definitions_version: tosca_simple_yaml_1_1
node_types:
  App:
    requirements:
      - host: tosca.capabilities.Container
      - backup_host:
          capability: tosca.capabilities.Container
          occurrences: [0, 1]
"#,
    )
    .expect("convert");

    let names: Vec<_> = definitions.requirement_types().map(|t| t.entity.name.as_str()).collect();
    assert_eq!(names, ["tosca.capabilities.Container_Requirement"]);

    let app = definitions.node_type("App").unwrap();
    assert_eq!(app.requirement_definitions.len(), 2);
    assert_eq!(app.requirement_definitions[1].lower_bound.as_deref(), Some("0"));
    assert_eq!(app.requirement_definitions[1].upper_bound.as_deref(), Some("1"));
}

#[test]
fn test_reset_between_conversions() {
    let with_everything = r#"
tosca_definitions_version: tosca_simple_yaml_1_1
data_types:
  Credentials:
    properties:
      user: { type: string }
node_types:
  Server:
    artifacts:
      image: { type: tosca.artifacts.Deployment.Image, file: server.img }
topology_template:
  node_templates:
    s1:
      type: Server
  policies:
    - monitor:
        type: tosca.policies.Monitoring
"#;
    let bare = "tosca_definitions_version: tosca_simple_yaml_1_1\n\
                topology_template:\n  node_templates:\n    s2:\n      type: Server\n";

    let mut converter = Converter::default();
    let first = converter.convert(&parse(with_everything), "first", NAMESPACE).unwrap();
    assert_eq!(first.imports.len(), 1);
    assert_eq!(first.artifact_templates().count(), 1);

    let second = converter.convert(&parse(bare), "second", NAMESPACE).unwrap();
    assert!(second.imports.is_empty());
    assert_eq!(second.artifact_templates().count(), 0);
    let service = second.service_templates().next().unwrap();
    assert!(service.boundary_definitions.policies.is_empty());
    let ids: Vec<_> = topology(&second).node_templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["s2"]);
}

#[test]
fn test_data_type_import_location_is_url_encoded() {
    let definitions = convert(
        "tosca_definitions_version: tosca_simple_yaml_1_1\n\
         data_types:\n  A: {}\n  B: {}\n",
    )
    .unwrap();

    assert_eq!(definitions.imports.len(), 1);
    assert_eq!(
        definitions.imports[0].location.as_deref(),
        Some("http%3A%2F%2Fexample.org%2Ftosca%2Fapp.xsd")
    );
}

#[test]
fn test_definitions_serialize_to_xml() {
    let definitions = convert(&hosted_on("DirectHost")).unwrap();

    let output = String::from_utf8(Xml.write(&definitions).unwrap()).unwrap();

    assert!(output.contains("<Definitions"));
    assert!(output.contains("id=\"app_Definitions\""));
    assert!(output.contains("<NodeTemplate id=\"A\" name=\"A\""));
    assert!(output.contains("<Capability id=\"B_hosted\" name=\"hosted\""));
    assert!(output.contains("<SourceElement ref=\"A_r1\"/>"));
    assert!(output.contains("<TargetElement ref=\"B_hosted\"/>"));
}
