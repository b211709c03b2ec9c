//! Rendering YAML service templates as text.

use rstest::rstest;
use tempfile::TempDir;
use tosca::interchange::{ModelFormat, Yaml};
use tosca::writer::{Writer, WriterOptions, to_string};
use tosca::yaml::{NodeTemplate, ServiceTemplate, TopologyTemplateDefinition};

fn parse(source: &str) -> ServiceTemplate {
    Yaml::default().read(source.as_bytes()).expect("parse")
}

#[test]
fn test_canonical_section_order_and_indentation() {
    let template = parse(
        r#"
node_types:
  Server:
    properties:
      port:
        default: 8080
        type: integer
    derived_from: tosca.nodes.Compute
topology_template:
  node_templates:
    s:
      properties:
        port: 9090
      type: Server
description: Demo
imports:
  - base:
      namespace_prefix: base
      file: base.yaml
      namespace_uri: http://example.org/base
tosca_definitions_version: tosca_simple_yaml_1_1
"#,
    );

    assert_eq!(
        to_string(&template),
        "\
tosca_definitions_version: tosca_simple_yaml_1_1

imports:
  - base:
      file: base.yaml
      namespace_uri: http://example.org/base
      namespace_prefix: base
description: Demo
node_types:
  Server:
    derived_from: tosca.nodes.Compute
    properties:
      port:
        type: integer
        default: 8080
topology_template:
  node_templates:
    s:
      type: Server
      properties:
        port: 9090
"
    );
}

#[rstest]
#[case(2, "topology_template:\n  node_templates:\n    web:\n      type: WebServer\n")]
#[case(4, "topology_template:\n    node_templates:\n        web:\n            type: WebServer\n")]
fn test_absent_fields_print_nothing(#[case] indent_size: usize, #[case] expected: &str) {
    let mut topology = TopologyTemplateDefinition::default();
    topology
        .node_templates
        .insert("web".into(), NodeTemplate::of_type("WebServer"));
    let template = ServiceTemplate {
        topology_template: Some(topology),
        ..ServiceTemplate::default()
    };

    let text = Writer::new(WriterOptions { indent_size }).render(&template);

    assert_eq!(text, format!("\n{expected}"));
}

#[test]
fn test_rich_template_reads_back_unchanged() {
    let source = r#"
tosca_definitions_version: tosca_simple_yaml_1_1
metadata:
  template_author: ops
repositories:
  images:
    url: https://images.example.org
    credential:
      user: deployer
      token: secret
artifact_types:
  Script:
    derived_from: tosca.artifacts.Implementation
    mime_type: application/x-sh
    file_ext: [sh, bash]
data_types:
  Port:
    derived_from: integer
    constraints:
      - in_range: [1, 65535]
capability_types:
  Endpoint:
    version: 1.0
    valid_source_types: [Client]
relationship_types:
  ConnectsTo:
    valid_target_types: [Endpoint]
node_types:
  Server:
    derived_from: tosca.nodes.Compute
    description: |
      line one
      line two
    attributes:
      ip:
        type: string
    requirements:
      - host:
          capability: tosca.capabilities.Container
          occurrences: [1, 1]
    capabilities:
      endpoint:
        type: Endpoint
    interfaces:
      Standard:
        type: tosca.interfaces.node.lifecycle.Standard
        create:
          inputs:
            port:
              type: integer
              required: false
          implementation:
            primary: create.sh
            dependencies: [common.sh]
    artifacts:
      create.sh:
        type: Script
        file: scripts/create.sh
group_types:
  Cluster:
    members: [Server]
policy_types:
  Scaling:
    targets: [Cluster]
topology_template:
  inputs:
    port:
      type: integer
      default: 8080
  node_templates:
    s1:
      type: Server
      directives: [select]
      properties:
        port: { get_input: port }
      requirements:
        - host:
            node: vm
            relationship: s1_on_vm
      node_filter:
        properties:
          - num_cpus:
              - in_range: [1, 4]
    vm:
      type: tosca.nodes.Compute
  relationship_templates:
    s1_on_vm:
      type: tosca.relationships.HostedOn
  groups:
    cluster:
      type: Cluster
      members: [s1]
  policies:
    - scale:
        type: Scaling
        targets: [cluster]
  outputs:
    address:
      value: { get_attribute: [s1, ip] }
  substitution_mappings:
    node_type: Server
    capabilities:
      endpoint: [s1, endpoint]
"#;
    let template = parse(source);

    let written = to_string(&template);

    assert_eq!(parse(&written), template, "rendered:\n{written}");
}

#[test]
fn test_multi_line_description_is_escaped() {
    let template = parse(
        "node_types:\n  Server:\n    description: >-\n      folded\n      text\n\n      \"kept\"\n",
    );

    let written = to_string(&template);

    assert!(written.contains("    description: \"folded text\\n\\\"kept\\\"\"\n"), "{written}");
    assert_eq!(parse(&written), template);
}

#[test]
fn test_write_to_nested_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("service.yaml");
    let template =
        parse("tosca_definitions_version: tosca_simple_yaml_1_1\ndescription: written\n");

    Writer::default().write(&template, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "tosca_definitions_version: tosca_simple_yaml_1_1\n\ndescription: written\n");
}

#[test]
fn test_write_reports_io_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    let result =
        Writer::default().write(&ServiceTemplate::default(), &blocker.join("service.yaml"));

    assert!(matches!(result, Err(tosca::InterchangeError::Io(_))));
}
