use svg::node::element as svg_element;

use super::{MIN_SHAPE_SIZE, ShapeDefinition};
use crate::{
    color::Color,
    geometry::{Insets, Point, Size},
};

/// Rectangle shape definition, optionally with rounded corners.
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    line_color: Color,
    line_width: usize,
    rounded: usize,
}

impl RectangleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_rounded(mut self, radius: usize) -> Self {
        self.rounded = radius;
        self
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            line_color: Color::default(),
            line_width: 2,
            rounded: 0,
        }
    }
}

impl ShapeDefinition for RectangleDefinition {
    fn calculate_shape_size(&self, content_size: Size, padding: Insets) -> Size {
        content_size.add_padding(padding).max(MIN_SHAPE_SIZE)
    }

    fn find_intersection(&self, center: Point, toward: Point, size: Size) -> Point {
        let direction = toward.sub_point(center);
        let length = direction.hypot();
        if length < 0.001 {
            return center;
        }

        let dx = direction.x() / length;
        let dy = direction.y() / length;

        // Distance along the ray to the first boundary crossing, vertical
        // or horizontal, whichever comes sooner.
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        let tx = if dx.abs() < 0.001 {
            f32::INFINITY
        } else {
            half_width / dx.abs()
        };
        let ty = if dy.abs() < 0.001 {
            f32::INFINITY
        } else {
            half_height / dy.abs()
        };
        let t = tx.min(ty);

        Point::new(dx.mul_add(t, center.x()), dy.mul_add(t, center.y()))
    }

    fn render_to_svg(&self, position: Point, size: Size) -> Box<dyn svg::Node> {
        let bounds = position.to_bounds(size);

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", size.width())
            .set("height", size.height())
            .set("stroke", self.line_color.to_string())
            .set("stroke-width", self.line_width)
            .set("fill", "white")
            .set("rx", self.rounded);

        if let Some(fill_color) = self.fill_color {
            rect = rect
                .set("fill", fill_color.to_string())
                .set("fill-opacity", fill_color.alpha());
        }

        rect.into()
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
    fn shape_size_never_shrinks_below_minimum() {
        let def = RectangleDefinition::new();
        let size = def.calculate_shape_size(Size::new(1.0, 1.0), Insets::uniform(2.0));

        assert_approx_eq!(f32, size.width(), MIN_SHAPE_SIZE.width());
        assert_approx_eq!(f32, size.height(), MIN_SHAPE_SIZE.height());
    }

    #[test]
    fn intersection_lands_on_the_border() {
        let def = RectangleDefinition::new();
        let center = Point::new(0.0, 0.0);
        let size = Size::new(20.0, 10.0);

        // Straight right: hits the vertical edge at x = 10.
        let right = def.find_intersection(center, Point::new(100.0, 0.0), size);
        assert_approx_eq!(f32, right.x(), 10.0);
        assert_approx_eq!(f32, right.y(), 0.0);

        // Straight down: hits the horizontal edge at y = 5.
        let down = def.find_intersection(center, Point::new(0.0, 100.0), size);
        assert_approx_eq!(f32, down.x(), 0.0);
        assert_approx_eq!(f32, down.y(), 5.0);
    }

    #[test]
    fn degenerate_direction_stays_at_center() {
        let def = RectangleDefinition::new();
        let center = Point::new(3.0, 4.0);
        let hit = def.find_intersection(center, center, Size::new(10.0, 10.0));
        assert_eq!(hit, center);
    }
}
