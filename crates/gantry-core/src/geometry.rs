//! Basic geometric types shared by the layout and export stages.
//!
//! Positions are centers unless a method says otherwise; the export stage
//! converts to top-left corners through [`Point::to_bounds`].

/// A point in diagram space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Component-wise sum of two points.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Component-wise difference of two points.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean distance from the origin.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Bounds of a box of the given size centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds {
            min_x: self.x - size.width / 2.0,
            min_y: self.y - size.height / 2.0,
            max_x: self.x + size.width / 2.0,
            max_y: self.y + size.height / 2.0,
        }
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// The larger of each dimension.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows both dimensions by the given insets.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Geometric center.
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The smallest bounds containing both inputs.
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shifts the whole box by an offset.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x(),
            min_y: self.min_y + offset.y(),
            max_x: self.max_x + offset.x(),
            max_y: self.max_y + offset.y(),
        }
    }

    /// Grows the box outward by the given insets.
    pub fn expand(self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }
}

/// Spacing around an element, one value per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Extra top inset, used for cluster title strips.
    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 2.0);

        assert_eq!(a.add_point(b), Point::new(4.0, 6.0));
        assert_eq!(a.sub_point(b), Point::new(2.0, 2.0));
        assert_approx_eq!(f32, a.hypot(), 5.0);
    }

    #[test]
    fn point_to_bounds_centers_the_box() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(6.0, 8.0));

        assert_approx_eq!(f32, bounds.min_x(), 7.0);
        assert_approx_eq!(f32, bounds.min_y(), 16.0);
        assert_approx_eq!(f32, bounds.max_x(), 13.0);
        assert_approx_eq!(f32, bounds.max_y(), 24.0);
        assert_eq!(bounds.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn size_max_and_padding() {
        let a = Size::new(10.0, 30.0);
        let b = Size::new(20.0, 15.0);

        assert_eq!(a.max(b), Size::new(20.0, 30.0));

        let padded = a.add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_approx_eq!(f32, padded.width(), 16.0);
        assert_approx_eq!(f32, padded.height(), 34.0);
    }

    #[test]
    fn bounds_union_covers_both() {
        let a = Bounds::new(0.0, 0.0, 4.0, 4.0);
        let b = Bounds::new(2.0, -1.0, 6.0, 3.0);
        let union = a.union(b);

        assert_eq!(union, Bounds::new(0.0, -1.0, 6.0, 4.0));
        assert!(union.contains(Point::new(5.0, 0.0)));
        assert!(union.contains(Point::new(1.0, 3.5)));
    }

    #[test]
    fn bounds_translate_preserves_size() {
        let bounds = Bounds::new(1.0, 2.0, 5.0, 6.0);
        let moved = bounds.translate(Point::new(3.0, -1.0));

        assert_eq!(moved, Bounds::new(4.0, 1.0, 8.0, 5.0));
        assert_eq!(moved.to_size(), bounds.to_size());
    }

    #[test]
    fn bounds_expand_applies_each_side() {
        let bounds = Bounds::new(2.0, 3.0, 6.0, 8.0);
        let expanded = bounds.expand(Insets::new(1.0, 2.0, 3.0, 4.0));

        assert_eq!(expanded, Bounds::new(-2.0, 2.0, 8.0, 11.0));
    }

    #[test]
    fn insets_with_top_keeps_other_sides() {
        let insets = Insets::uniform(5.0).with_top(20.0);

        assert_approx_eq!(f32, insets.top(), 20.0);
        assert_approx_eq!(f32, insets.bottom(), 5.0);
        assert_approx_eq!(f32, insets.horizontal_sum(), 10.0);
        assert_approx_eq!(f32, insets.vertical_sum(), 25.0);
    }

    proptest! {
        #[test]
        fn union_is_commutative(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Bounds::new(ax, ay, ax + aw, ay + ah);
            let b = Bounds::new(bx, by, bx + bw, by + bh);
            prop_assert_eq!(a.union(b), b.union(a));
        }

        #[test]
        fn center_of_centered_bounds_roundtrips(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let center = Point::new(x, y).to_bounds(Size::new(w, h)).center();
            prop_assert!((center.x() - x).abs() < 1e-3);
            prop_assert!((center.y() - y).abs() < 1e-3);
        }
    }
}
