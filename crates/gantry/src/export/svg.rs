//! SVG document assembly.
//!
//! Draw order matters: cluster boxes outermost-first so nested boxes paint
//! on top, then node symbols, then arrows so lines are never hidden under
//! a fill.

mod arrows;

use indexmap::IndexMap;
use log::debug;
use svg::{
    Document,
    node::element::{Group, Rectangle, Text as SvgText},
};

use gantry_core::{
    color::Color,
    draw::Drawable,
    geometry::Size,
};

use super::Exporter;
use crate::layout::{DiagramLayout, PlacedCluster, PlacedEdge};

const MARGIN: f32 = 50.0;
const CLUSTER_TITLE_FONT_SIZE: usize = 12;
const CLUSTER_TITLE_INSET: f32 = 10.0;

fn edge_color() -> Color {
    Color::new("#4a4a4a").expect("edge color literal always parses")
}

fn cluster_line_color() -> Color {
    Color::new("#9aa0a6").expect("cluster color literal always parses")
}

/// SVG exporter with its document-level options.
pub(crate) struct SvgBuilder {
    background: Option<Color>,
}

impl SvgBuilder {
    pub(crate) fn new() -> Self {
        Self { background: None }
    }

    pub(crate) fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    fn render_cluster(&self, cluster: &PlacedCluster) -> Group {
        let bounds = cluster.bounds;

        // Deeper boxes get a slightly darker wash so nesting stays legible.
        let shade = 250 - (cluster.depth.min(4) as u8) * 5;
        let fill = format!("rgb({shade},{shade},{shade})");

        let frame = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", fill)
            .set("stroke", cluster_line_color().to_string())
            .set("stroke-width", 1)
            .set("rx", 4);

        let title = SvgText::new(cluster.title.clone())
            .set("x", bounds.min_x() + CLUSTER_TITLE_INSET)
            .set("y", bounds.min_y() + CLUSTER_TITLE_INSET + 4.0)
            .set("font-family", "Arial")
            .set("font-size", CLUSTER_TITLE_FONT_SIZE)
            .set("fill", "#333333");

        Group::new().add(frame).add(title)
    }

    fn render_edge(&self, layout: &DiagramLayout, edge: &PlacedEdge) -> svg::node::element::Path {
        let from = layout.node(edge.from);
        let to = layout.node(edge.to);

        // Clip the line to each symbol's boundary so the arrowhead touches
        // the border instead of the center.
        let start = from
            .shape
            .find_intersection(from.position, to.position, from.size);
        let end = to
            .shape
            .find_intersection(to.position, from.position, to.size);

        arrows::create_path(start, end, &edge_color(), 1)
    }
}

impl Exporter for SvgBuilder {
    fn render_document(&self, layout: &DiagramLayout) -> Document {
        let content_size = layout.content_bounds().to_size();
        let svg_size = Size::new(
            MARGIN.mul_add(2.0, content_size.width()),
            MARGIN.mul_add(2.0, content_size.height()),
        );
        debug!(width = svg_size.width(), height = svg_size.height(); "Final SVG dimensions");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if let Some(background) = self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background.to_string()),
            );
        }

        // One marker per distinct arrow color, deduplicated by id.
        let mut marker_colors: IndexMap<String, Color> = IndexMap::new();
        if !layout.edges().is_empty() {
            let color = edge_color();
            marker_colors.insert(color.to_id_safe_string(), color);
        }
        doc = doc.add(arrows::create_marker_definitions(marker_colors.values()));

        let mut main_group = Group::new();

        // Outermost clusters first.
        let mut clusters: Vec<&PlacedCluster> = layout.clusters().iter().collect();
        clusters.sort_by_key(|cluster| cluster.depth);
        for cluster in clusters {
            main_group = main_group.add(self.render_cluster(cluster));
        }

        for node in layout.nodes() {
            main_group = main_group.add(node.shape.render_to_svg(node.position, node.size));
            main_group = main_group.add(node.label.render_to_svg(node.position));
        }

        for edge in layout.edges() {
            main_group = main_group.add(self.render_edge(layout, edge));
        }

        let transform_group = Group::new()
            .set(
                "transform",
                format!("translate({MARGIN}, {MARGIN})"),
            )
            .add(main_group);

        doc.add(transform_group)
    }
}
