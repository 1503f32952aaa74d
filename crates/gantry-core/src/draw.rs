//! Drawable definitions for diagram elements.
//!
//! Node symbols are described by a [`ShapeDefinition`], which knows how to
//! size itself around a label, clip an incoming edge to its boundary, and
//! render itself to SVG. Everything that ends up in the output document
//! implements [`Drawable`].

pub mod shape;
mod text;

pub use shape::{DiamondDefinition, OvalDefinition, RectangleDefinition, ShapeDefinition};
pub use text::Text;

use crate::geometry::{Point, Size};

pub trait Drawable: std::fmt::Debug {
    /// Render this element centered on `position`.
    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node>;

    fn size(&self) -> Size;
}
