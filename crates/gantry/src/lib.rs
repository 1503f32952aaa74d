//! Gantry - architecture diagrams as code.
//!
//! This library provides a typed builder for declaring nodes, clusters, and
//! edges, a hierarchical layout engine, and SVG rendering. A diagram is an
//! explicit [`Diagram`] session value; rendering consumes it and writes an
//! artifact named after the diagram title.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gantry::{Diagram, DiagramOptions};
//! use gantry::semantic::{Direction, NodeCategory};
//!
//! let options = DiagramOptions::default().with_direction(Direction::LeftToRight);
//! let path = Diagram::build("Two Tier App", options, |d| {
//!     let web = d.node(NodeCategory::ComputeInstance, "web");
//!     let db = d.cluster("Storage", |d| {
//!         Ok(d.node(NodeCategory::ComputeInstance, "db"))
//!     })?;
//!     d.connect(web, db)?;
//!     Ok(())
//! })
//! .expect("Failed to render");
//! println!("wrote {}", path.display());
//! ```

pub mod config;

mod diagram;
mod error;
mod export;
mod layout;
mod structure;

pub use gantry_core::{color, draw, geometry, semantic};

pub use diagram::{Diagram, DiagramOptions, NodeHandle};
pub use error::{ConstructionError, GantryError, RenderError};
