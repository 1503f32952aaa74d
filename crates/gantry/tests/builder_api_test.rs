//! Integration tests for the Diagram builder API
//!
//! These tests verify that the public API works and is usable.

use gantry::{Diagram, DiagramOptions, config::AppConfig};
use gantry::semantic::{Direction, NodeCategory};
use tempfile::tempdir;

#[test]
fn test_builder_api_exists() {
    // Just verify the API compiles and can be constructed
    let _diagram = Diagram::new("Smoke");
    let _options = DiagramOptions::default().with_direction(Direction::TopToBottom);
}

#[test]
fn test_render_simple_diagram_to_svg_string() {
    let mut diagram = Diagram::new("Simple");
    let a = diagram.node(NodeCategory::ComputeInstance, "web");
    let b = diagram.node(NodeCategory::ComputeInstance, "db");
    diagram.connect(a, b).expect("same-session handles");

    let svg = diagram.render_svg().expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("web"));
    assert!(svg.contains("db"));
}

#[test]
fn test_render_writes_file_named_after_title() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut diagram = Diagram::new("My Test Diagram");
    diagram.node(NodeCategory::User, "admin");

    let path = diagram
        .render_to_dir(temp_dir.path())
        .expect("Failed to render");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("my_test_diagram.svg")
    );
    let content = std::fs::read_to_string(&path).expect("Artifact should exist");
    assert!(content.contains("<svg"));
}

#[test]
fn test_rerendering_overwrites_the_previous_artifact() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let build = |label: &str| {
        let mut diagram = Diagram::new("Stable Name");
        diagram.node(NodeCategory::User, label);
        diagram
    };

    let first = build("before")
        .render_to_dir(temp_dir.path())
        .expect("first render");
    let second = build("after")
        .render_to_dir(temp_dir.path())
        .expect("second render");

    assert_eq!(first, second);
    let content = std::fs::read_to_string(&second).unwrap();
    assert!(content.contains("after"));
    assert!(!content.contains("before"));
}

#[test]
fn test_build_aborts_without_artifact_on_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let cwd = std::env::current_dir().unwrap();

    // The closure fails, so no artifact may appear anywhere.
    let result = Diagram::build("Broken Run", DiagramOptions::default(), |d| {
        d.node(NodeCategory::User, "ok");
        d.chain(&[])?;
        Ok(())
    });

    assert!(result.is_err());
    assert!(!cwd.join("broken_run.svg").exists());
    assert!(!temp_dir.path().join("broken_run.svg").exists());
}

#[test]
fn test_render_with_config_background() {
    let config: AppConfig =
        toml::from_str("[style]\nbackground_color = \"#fafafa\"").expect("valid config");

    let mut diagram = Diagram::new("Configured");
    diagram.node(NodeCategory::Gateway, "gw");

    let svg = diagram.render_svg_with(&config).expect("Failed to render");
    assert!(svg.contains("<svg"));
}

/// The full development-environment scenario: IaC tooling feeding a VPC
/// with nested security group and subnet containment.
#[test]
fn test_development_environment_scenario() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let options = DiagramOptions::default().with_direction(Direction::LeftToRight);
    let mut diagram = Diagram::with_options("Development Environment", options);

    let (ssh_config, userdata, terraform) = diagram
        .cluster("IaC", |d| {
            let ssh_config = d.node(NodeCategory::GenericIcon, "ssh.config.tpl");
            let userdata = d.node(NodeCategory::GenericIcon, "userdata.tpl");
            let terraform = d.node(NodeCategory::SdkTool, "Terraform");
            Ok((ssh_config, userdata, terraform))
        })
        .expect("IaC cluster");

    let (gateway, route_table, ec2) = diagram
        .cluster("VPC", |d| {
            let gateway = d.node(NodeCategory::Gateway, "Internet Gateway");
            let route_table = d.node(NodeCategory::RouteTable, "Route Table");
            let ec2 = d.cluster("Public Security Group", |d| {
                d.cluster("Public Subnet", |d| {
                    Ok(d.node(NodeCategory::ComputeInstance, "EC2"))
                })
            })?;
            Ok((gateway, route_table, ec2))
        })
        .expect("VPC cluster");

    diagram.connect(ssh_config, terraform).unwrap();
    // The template pair references each other, so both directions exist.
    diagram.connect(ssh_config, userdata).unwrap();
    diagram.connect(userdata, ssh_config).unwrap();
    diagram.connect(ssh_config, gateway).unwrap();
    diagram.connect(gateway, route_table).unwrap();
    diagram.connect(route_table, ec2).unwrap();
    diagram.connect(userdata, ec2).unwrap();

    assert_eq!(diagram.node_count(), 6);
    assert_eq!(diagram.edge_count(), 7);
    assert_eq!(diagram.cluster_count(), 4);
    assert_eq!(
        diagram.cluster_path(ec2).unwrap(),
        vec!["VPC", "Public Security Group", "Public Subnet"]
    );
    assert_eq!(diagram.output_file_name(), "development_environment.svg");

    let path = diagram
        .render_to_dir(temp_dir.path())
        .expect("Failed to render scenario");
    let svg = std::fs::read_to_string(&path).expect("Artifact should exist");

    for label in [
        "ssh.config.tpl",
        "userdata.tpl",
        "Terraform",
        "Internet Gateway",
        "Route Table",
        "EC2",
    ] {
        assert!(svg.contains(label), "missing node label {label}");
    }
    for title in ["IaC", "VPC", "Public Security Group", "Public Subnet"] {
        assert!(svg.contains(title), "missing cluster title {title}");
    }
}

#[test]
fn test_rerendering_the_same_construction_is_byte_identical() {
    let build = || {
        let mut diagram = Diagram::new("Stable");
        let a = diagram.node(NodeCategory::GenericIcon, "a");
        let b = diagram
            .cluster("box", |d| Ok(d.node(NodeCategory::ComputeInstance, "b")))
            .expect("cluster");
        diagram.connect(a, b).unwrap();
        diagram
    };

    let first = build().render_svg().expect("first render");
    let second = build().render_svg().expect("second render");
    assert_eq!(first, second);
}

#[test]
fn test_handles_from_another_session_are_rejected() {
    let mut first = Diagram::new("First");
    let stray = first.node(NodeCategory::User, "stray");

    let mut second = Diagram::new("Second");
    let local = second.node(NodeCategory::User, "local");

    assert!(second.connect(stray, local).is_err());
    assert!(second.connect(local, stray).is_err());
}
