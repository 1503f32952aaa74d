//! Renders the development environment architecture into the current
//! working directory as `development_environment.svg`.
//!
//! Run with: `cargo run --example development_environment`

use gantry::{Diagram, DiagramOptions};
use gantry::semantic::{Direction, NodeCategory};

fn main() -> Result<(), gantry::GantryError> {
    let options = DiagramOptions::default().with_direction(Direction::LeftToRight);

    let path = Diagram::build("Development Environment", options, |d| {
        let (ssh_config, userdata, terraform) = d.cluster("IaC", |d| {
            let ssh_config = d.node(NodeCategory::GenericIcon, "ssh.config.tpl");
            let userdata = d.node(NodeCategory::GenericIcon, "userdata.tpl");
            let terraform = d.node(NodeCategory::SdkTool, "Terraform");
            Ok((ssh_config, userdata, terraform))
        })?;

        let (gateway, route_table, ec2) = d.cluster("VPC", |d| {
            let gateway = d.node(NodeCategory::Gateway, "Internet Gateway");
            let route_table = d.node(NodeCategory::RouteTable, "Route Table");
            let ec2 = d.cluster("Public Security Group", |d| {
                d.cluster("Public Subnet", |d| {
                    Ok(d.node(NodeCategory::ComputeInstance, "EC2"))
                })
            })?;
            Ok((gateway, route_table, ec2))
        })?;

        d.connect(ssh_config, terraform)?;
        d.connect(ssh_config, userdata)?;
        d.connect(userdata, ssh_config)?;
        d.chain(&[ssh_config, gateway, route_table, ec2])?;
        d.connect(userdata, ec2)?;
        Ok(())
    })?;

    println!("wrote {}", path.display());
    Ok(())
}
