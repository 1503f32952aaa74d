//! The built-in development environment architecture.
//!
//! Declares the provisioning templates, the Terraform tool, and the VPC
//! containment chain down to the EC2 instance, with the edges between them.

use gantry::{ConstructionError, Diagram, DiagramOptions};
use gantry::semantic::NodeCategory;

/// Build the development environment diagram without rendering it.
pub fn development_environment(options: DiagramOptions) -> Result<Diagram, ConstructionError> {
    let mut diagram = Diagram::with_options("Development Environment", options);

    let (ssh_config, userdata, terraform) = diagram.cluster("IaC", |d| {
        let ssh_config = d.node(NodeCategory::GenericIcon, "ssh.config.tpl");
        let userdata = d.node(NodeCategory::GenericIcon, "userdata.tpl");
        let terraform = d.node(NodeCategory::SdkTool, "Terraform");
        Ok((ssh_config, userdata, terraform))
    })?;

    let (gateway, route_table, ec2) = diagram.cluster("VPC", |d| {
        let gateway = d.node(NodeCategory::Gateway, "Internet Gateway");
        let route_table = d.node(NodeCategory::RouteTable, "Route Table");
        let ec2 = d.cluster("Public Security Group", |d| {
            d.cluster("Public Subnet", |d| {
                Ok(d.node(NodeCategory::ComputeInstance, "EC2"))
            })
        })?;
        Ok((gateway, route_table, ec2))
    })?;

    diagram.connect(ssh_config, terraform)?;
    // The two templates reference each other.
    diagram.connect(ssh_config, userdata)?;
    diagram.connect(userdata, ssh_config)?;
    diagram.chain(&[ssh_config, gateway, route_table, ec2])?;
    diagram.connect(userdata, ec2)?;

    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprint_matches_the_architecture() {
        let diagram = development_environment(DiagramOptions::default()).unwrap();

        assert_eq!(diagram.node_count(), 6);
        assert_eq!(diagram.edge_count(), 7);
        assert_eq!(diagram.cluster_count(), 4);
        assert_eq!(diagram.title(), "Development Environment");
        assert_eq!(diagram.output_file_name(), "development_environment.svg");
    }

    #[test]
    fn blueprint_renders_to_svg() {
        let diagram = development_environment(DiagramOptions::default()).unwrap();
        let svg = diagram.render_svg().expect("blueprint should render");

        assert!(svg.contains("Terraform"));
        assert!(svg.contains("Public Subnet"));
    }
}
