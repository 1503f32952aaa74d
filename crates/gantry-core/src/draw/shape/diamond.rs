use svg::node::element as svg_element;

use super::{MIN_SHAPE_SIZE, ShapeDefinition};
use crate::{
    color::Color,
    geometry::{Insets, Point, Size},
};

/// Rhombus shape definition, used for gateway symbols.
#[derive(Debug, Clone)]
pub struct DiamondDefinition {
    fill_color: Option<Color>,
    line_color: Color,
    line_width: usize,
}

impl DiamondDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }
}

impl Default for DiamondDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            line_color: Color::default(),
            line_width: 2,
        }
    }
}

impl ShapeDefinition for DiamondDefinition {
    fn calculate_shape_size(&self, content_size: Size, padding: Insets) -> Size {
        // A rhombus inscribed in the padded box halves the usable area;
        // double both dimensions so the label fits inside the outline.
        let padded = content_size.add_padding(padding);
        Size::new(padded.width() * 2.0, padded.height() * 2.0).max(MIN_SHAPE_SIZE)
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

        // The rhombus boundary satisfies |x|/hw + |y|/hh = 1, so the ray
        // parameter is 1 / (|dx|/hw + |dy|/hh).
        let t = 1.0 / (dx.abs() / half_width + dy.abs() / half_height);

        Point::new(dx.mul_add(t, center.x()), dy.mul_add(t, center.y()))
    }

    fn render_to_svg(&self, position: Point, size: Size) -> Box<dyn svg::Node> {
        let bounds = position.to_bounds(size);
        let points = format!(
            "{},{} {},{} {},{} {},{}",
            position.x(),
            bounds.min_y(),
            bounds.max_x(),
            position.y(),
            position.x(),
            bounds.max_y(),
            bounds.min_x(),
            position.y(),
        );

        let mut polygon = svg_element::Polygon::new()
            .set("points", points)
            .set("stroke", self.line_color.to_string())
            .set("stroke-width", self.line_width)
            .set("fill", "white");

        if let Some(fill_color) = self.fill_color {
            polygon = polygon
                .set("fill", fill_color.to_string())
                .set("fill-opacity", fill_color.alpha());
        }

        polygon.into()
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
    fn intersection_hits_the_vertices_on_axes() {
        let def = DiamondDefinition::new();
        let center = Point::new(0.0, 0.0);
        let size = Size::new(20.0, 12.0);

        let right = def.find_intersection(center, Point::new(100.0, 0.0), size);
        assert_approx_eq!(f32, right.x(), 10.0, epsilon = 0.01);

        let down = def.find_intersection(center, Point::new(0.0, 100.0), size);
        assert_approx_eq!(f32, down.y(), 6.0, epsilon = 0.01);
    }

    #[test]
    fn diagonal_intersection_lies_on_the_edge() {
        let def = DiamondDefinition::new();
        let center = Point::new(0.0, 0.0);
        let size = Size::new(20.0, 20.0);

        let hit = def.find_intersection(center, Point::new(30.0, 30.0), size);
        // |x|/10 + |y|/10 == 1 on the boundary.
        assert_approx_eq!(
            f32,
            hit.x().abs() / 10.0 + hit.y().abs() / 10.0,
            1.0,
            epsilon = 0.01
        );
    }
}
