//! Shape definitions for node symbols.

mod diamond;
mod oval;
mod rectangle;

pub use diamond::DiamondDefinition;
pub use oval::OvalDefinition;
pub use rectangle::RectangleDefinition;

use crate::{
    color::Color,
    geometry::{Insets, Point, Size},
};

/// A stateless description of a node symbol's outline.
///
/// Positions passed to these methods are shape centers. The same definition
/// is shared by sizing (layout), edge clipping (export), and rendering.
pub trait ShapeDefinition: std::fmt::Debug {
    /// Shape size needed to contain the given content with padding.
    fn calculate_shape_size(&self, content_size: Size, padding: Insets) -> Size;

    /// Point where a ray from `center` toward `toward` leaves a shape of
    /// the given size centered at `center`.
    fn find_intersection(&self, center: Point, toward: Point, size: Size) -> Point;

    /// Render the outline centered on `position`.
    fn render_to_svg(&self, position: Point, size: Size) -> Box<dyn svg::Node>;

    fn fill_color(&self) -> Option<Color>;

    fn line_color(&self) -> Color;

    fn line_width(&self) -> usize;

    fn clone_box(&self) -> Box<dyn ShapeDefinition>;
}

impl Clone for Box<dyn ShapeDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Minimum symbol size, so degenerate labels still render something visible.
pub(crate) const MIN_SHAPE_SIZE: Size = Size::new(40.0, 30.0);
