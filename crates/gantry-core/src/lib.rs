//! Gantry Core Types and Definitions
//!
//! This crate provides the foundational types for the Gantry diagram
//! renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual definitions for diagram elements ([`draw`] module)
//! - **Semantic**: Semantic model types for diagrams ([`semantic`] module)
//! - **Text**: Label measurement backed by a shared font system ([`text`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
pub mod text;
