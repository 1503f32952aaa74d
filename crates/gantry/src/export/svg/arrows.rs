//! Arrowhead markers and edge paths.

use svg::node::element::{Definitions, Marker, Path};

use gantry_core::{color::Color, geometry::Point};

/// Marker definitions for every arrow color in use.
pub(super) fn create_marker_definitions<'a, I>(colors: I) -> Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let mut defs = Definitions::new();

    for color in colors {
        let arrowhead = Marker::new()
            .set("id", format!("arrowhead-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string()),
            );
        defs = defs.add(arrowhead);
    }

    defs
}

fn create_path_data(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

/// A straight stroked line from `start` to `end` with an arrowhead at the
/// end. Both points are expected to lie on symbol boundaries already.
pub(super) fn create_path(start: Point, end: Point, color: &Color, width: usize) -> Path {
    Path::new()
        .set("d", create_path_data(start, end))
        .set("fill", "none")
        .set("stroke", color.to_string())
        .set("stroke-width", width)
        .set(
            "marker-end",
            format!("url(#arrowhead-{})", color.to_id_safe_string()),
        )
}
