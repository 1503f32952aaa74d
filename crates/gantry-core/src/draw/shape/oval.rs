use svg::node::element as svg_element;

use super::{MIN_SHAPE_SIZE, ShapeDefinition};
use crate::{
    color::Color,
    geometry::{Insets, Point, Size},
};

/// Ellipse shape definition, used for person/user symbols.
#[derive(Debug, Clone)]
pub struct OvalDefinition {
    fill_color: Option<Color>,
    line_color: Color,
    line_width: usize,
}

impl OvalDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }
}

impl Default for OvalDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            line_color: Color::default(),
            line_width: 2,
        }
    }
}

impl ShapeDefinition for OvalDefinition {
    fn calculate_shape_size(&self, content_size: Size, padding: Insets) -> Size {
        // An ellipse inscribed in the padded box would clip the label
        // corners, so scale up by sqrt(2) to circumscribe the content.
        let padded = content_size.add_padding(padding);
        Size::new(
            padded.width() * std::f32::consts::SQRT_2,
            padded.height() * std::f32::consts::SQRT_2,
        )
        .max(MIN_SHAPE_SIZE)
    }

    fn find_intersection(&self, center: Point, toward: Point, size: Size) -> Point {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;

        let direction = toward.sub_point(center);
        let length = direction.hypot();
        if length < 0.001 {
            return center;
        }

        let dx = direction.x() / length;
        let dy = direction.y() / length;

        // Radius of the ellipse at the ray's angle:
        // r = (a*b) / sqrt((b*cosθ)² + (a*sinθ)²)
        let angle = dy.atan2(dx);
        let radius = (half_width * half_height)
            / (half_height * angle.cos()).hypot(half_width * angle.sin());

        Point::new(
            dx.mul_add(radius, center.x()),
            dy.mul_add(radius, center.y()),
        )
    }

    fn render_to_svg(&self, position: Point, size: Size) -> Box<dyn svg::Node> {
        let mut ellipse = svg_element::Ellipse::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("rx", size.width() / 2.0)
            .set("ry", size.height() / 2.0)
            .set("stroke", self.line_color.to_string())
            .set("stroke-width", self.line_width)
            .set("fill", "white");

        if let Some(fill_color) = self.fill_color {
            ellipse = ellipse
                .set("fill", fill_color.to_string())
                .set("fill-opacity", fill_color.alpha());
        }

        ellipse.into()
    }

    fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    fn line_color(&self) -> Color {
        self.line_color
    }

    fn line_width(&self) -> usize {
        self.line_width
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn axis_aligned_intersections_hit_the_radii() {
        let def = OvalDefinition::new();
        let center = Point::new(0.0, 0.0);
        let size = Size::new(20.0, 10.0);

        let right = def.find_intersection(center, Point::new(50.0, 0.0), size);
        assert_approx_eq!(f32, right.x(), 10.0, epsilon = 0.01);
        assert_approx_eq!(f32, right.y(), 0.0, epsilon = 0.01);

        let up = def.find_intersection(center, Point::new(0.0, -50.0), size);
        assert_approx_eq!(f32, up.x(), 0.0, epsilon = 0.01);
        assert_approx_eq!(f32, up.y(), -5.0, epsilon = 0.01);
    }

    #[test]
    fn shape_size_circumscribes_content() {
        let def = OvalDefinition::new();
        let size = def.calculate_shape_size(Size::new(100.0, 40.0), Insets::uniform(0.0));

        assert!(size.width() > 100.0);
        assert!(size.height() > 40.0);
    }
}
