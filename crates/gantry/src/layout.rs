//! Hierarchical diagram layout.
//!
//! Scopes are laid out innermost-first so cluster sizes are known before
//! their parents place them, then absolute positions are assigned top-down.
//! Within a scope the layered engine (see [`sugiyama`]) positions members;
//! the flow [`Direction`] is applied as a coordinate transform of the
//! layered result, so one engine serves all four directions.

mod sugiyama;

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};

use gantry_core::{
    draw::{Drawable, ShapeDefinition, Text},
    geometry::{Bounds, Insets, Point, Size},
    semantic::{Direction, NodeCategory},
    text,
};

use crate::{
    diagram::ClusterId,
    error::RenderError,
    structure::{ContainmentScope, Member, ScopeTree},
};

const NODE_FONT_SIZE: usize = 14;
const CLUSTER_TITLE_FONT_SIZE: usize = 12;
const CLUSTER_TITLE_HEIGHT: f32 = 22.0;
const NODE_PADDING: f32 = 12.0;

/// A node with its final absolute center position.
#[derive(Debug)]
pub(crate) struct PlacedNode {
    pub(crate) index: NodeIndex,
    pub(crate) category: NodeCategory,
    pub(crate) label: Text,
    pub(crate) shape: Box<dyn ShapeDefinition>,
    pub(crate) position: Point,
    pub(crate) size: Size,
}

/// A cluster box with its final absolute bounds.
#[derive(Debug)]
pub(crate) struct PlacedCluster {
    pub(crate) title: String,
    pub(crate) bounds: Bounds,
    pub(crate) depth: usize,
}

/// A directed edge between two placed nodes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlacedEdge {
    pub(crate) from: NodeIndex,
    pub(crate) to: NodeIndex,
}

/// The fully positioned diagram, ready for export.
#[derive(Debug)]
pub(crate) struct DiagramLayout {
    nodes: Vec<PlacedNode>,
    clusters: Vec<PlacedCluster>,
    edges: Vec<PlacedEdge>,
    content_bounds: Bounds,
}

impl DiagramLayout {
    pub(crate) fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    pub(crate) fn clusters(&self) -> &[PlacedCluster] {
        &self.clusters
    }

    pub(crate) fn edges(&self) -> &[PlacedEdge] {
        &self.edges
    }

    pub(crate) fn content_bounds(&self) -> Bounds {
        self.content_bounds
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &PlacedNode {
        self.nodes
            .iter()
            .find(|node| node.index == index)
            .expect("edges only reference placed nodes")
    }
}

/// Builder for the layout engine with its spacing knobs.
pub(crate) struct EngineBuilder {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    cluster_padding: f32,
}

impl EngineBuilder {
    pub(crate) fn new() -> Self {
        Self {
            horizontal_spacing: 50.0,
            vertical_spacing: 50.0,
            cluster_padding: 20.0,
        }
    }

    pub(crate) fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    pub(crate) fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub(crate) fn with_cluster_padding(mut self, padding: f32) -> Self {
        self.cluster_padding = padding;
        self
    }

    /// Lay out the whole scope tree.
    pub(crate) fn build(
        &self,
        tree: &ScopeTree<'_>,
        direction: Direction,
    ) -> Result<DiagramLayout, RenderError> {
        // Spacing comes from user configuration; a negative or non-finite
        // value would corrupt every coordinate downstream.
        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("cluster_padding", self.cluster_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::Layout(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let diagram = tree.diagram();

        // Node symbol sizing from measured labels.
        let mut node_labels = HashMap::new();
        let mut node_sizes = HashMap::new();
        for index in diagram.graph().node_indices() {
            let record = &diagram.graph()[index];
            let label = Text::new(record.label.clone(), NODE_FONT_SIZE);
            let size = record
                .category
                .shape_definition()
                .calculate_shape_size(label.size(), Insets::uniform(NODE_PADDING));
            node_labels.insert(index, label);
            node_sizes.insert(index, size);
        }

        // Relative layout per scope, innermost first.
        let mut scope_layouts: HashMap<Option<ClusterId>, ScopeLayout> = HashMap::new();
        let mut cluster_sizes: HashMap<ClusterId, Size> = HashMap::new();
        for scope in tree.scopes() {
            let layout = self.layout_scope(scope, direction, &node_sizes, &cluster_sizes)?;

            if let Some(cluster) = scope.container() {
                let title = &diagram.clusters()[cluster].title;
                let title_size = text::measure(title, CLUSTER_TITLE_FONT_SIZE);
                let outer = layout
                    .content_size
                    .add_padding(self.cluster_insets())
                    .max(Size::new(
                        title_size.width() + 2.0 * self.cluster_padding,
                        0.0,
                    ));
                cluster_sizes.insert(cluster, outer);
            }

            scope_layouts.insert(scope.container(), layout);
        }

        // Absolute placement, top-down from the root scope.
        let mut nodes = Vec::new();
        let mut clusters = Vec::new();
        self.place_scope(
            tree,
            None,
            Point::new(0.0, 0.0),
            0,
            &scope_layouts,
            &cluster_sizes,
            &node_labels,
            &node_sizes,
            &mut nodes,
            &mut clusters,
        );

        let edges = diagram
            .edges()
            .map(|(from, to)| PlacedEdge {
                from: diagram.resolve(from).expect("own handle"),
                to: diagram.resolve(to).expect("own handle"),
            })
            .collect();

        let root_size = scope_layouts[&None].content_size;
        let content_bounds = Bounds::new(0.0, 0.0, root_size.width(), root_size.height());
        debug!(
            width = content_bounds.width(),
            height = content_bounds.height();
            "Layout complete"
        );

        Ok(DiagramLayout {
            nodes,
            clusters,
            edges,
            content_bounds,
        })
    }

    fn cluster_insets(&self) -> Insets {
        Insets::uniform(self.cluster_padding)
            .with_top(self.cluster_padding + CLUSTER_TITLE_HEIGHT)
    }

    /// Position one scope's members relative to the scope's own origin.
    fn layout_scope(
        &self,
        scope: &ContainmentScope,
        direction: Direction,
        node_sizes: &HashMap<NodeIndex, Size>,
        cluster_sizes: &HashMap<ClusterId, Size>,
    ) -> Result<ScopeLayout, RenderError> {
        let sizes: Vec<Size> = scope
            .members()
            .iter()
            .map(|member| match member {
                Member::Node(index) => node_sizes[index],
                Member::Cluster(cluster) => cluster_sizes[cluster],
            })
            .collect();

        let hints = acyclic_hints(scope.layout_edges(), sizes.len());
        let raw = sugiyama::position_members(
            &sizes,
            &hints,
            self.horizontal_spacing,
            self.vertical_spacing,
        );

        // Direction transform, then shift so content starts at the origin.
        let transformed: Vec<Point> = raw.iter().map(|&p| transform(p, direction)).collect();
        let bounds = transformed
            .iter()
            .zip(&sizes)
            .map(|(&center, &size)| center.to_bounds(size))
            .reduce(Bounds::union)
            .unwrap_or_default();

        let origin = bounds.min_point();
        let positions = transformed
            .into_iter()
            .map(|center| center.sub_point(origin))
            .collect();

        Ok(ScopeLayout {
            positions,
            content_size: bounds.to_size(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn place_scope(
        &self,
        tree: &ScopeTree<'_>,
        container: Option<ClusterId>,
        origin: Point,
        depth: usize,
        scope_layouts: &HashMap<Option<ClusterId>, ScopeLayout>,
        cluster_sizes: &HashMap<ClusterId, Size>,
        node_labels: &HashMap<NodeIndex, Text>,
        node_sizes: &HashMap<NodeIndex, Size>,
        nodes: &mut Vec<PlacedNode>,
        clusters: &mut Vec<PlacedCluster>,
    ) {
        let diagram = tree.diagram();
        let scope = tree.scope_of(container);
        let layout = &scope_layouts[&container];

        for (member, &relative) in scope.members().iter().zip(&layout.positions) {
            let center = origin.add_point(relative);
            match *member {
                Member::Node(index) => {
                    let record = &diagram.graph()[index];
                    nodes.push(PlacedNode {
                        index,
                        category: record.category,
                        label: node_labels[&index].clone(),
                        shape: record.category.shape_definition(),
                        position: center,
                        size: node_sizes[&index],
                    });
                }
                Member::Cluster(cluster) => {
                    let bounds = center.to_bounds(cluster_sizes[&cluster]);
                    clusters.push(PlacedCluster {
                        title: diagram.clusters()[cluster].title.clone(),
                        bounds,
                        depth: depth + 1,
                    });

                    let insets = self.cluster_insets();
                    let inner_origin = bounds
                        .min_point()
                        .add_point(Point::new(insets.left(), insets.top()));
                    self.place_scope(
                        tree,
                        Some(cluster),
                        inner_origin,
                        depth + 1,
                        scope_layouts,
                        cluster_sizes,
                        node_labels,
                        node_sizes,
                        nodes,
                        clusters,
                    );
                }
            }
        }
    }
}

#[derive(Debug)]
struct ScopeLayout {
    /// Member centers relative to the scope origin, in member order.
    positions: Vec<Point>,
    content_size: Size,
}

/// Map a layered (top-to-bottom) position into the requested flow direction.
fn transform(p: Point, direction: Direction) -> Point {
    match direction {
        Direction::TopToBottom => p,
        Direction::BottomToTop => Point::new(p.x(), -p.y()),
        Direction::LeftToRight => Point::new(p.y(), p.x()),
        Direction::RightToLeft => Point::new(-p.y(), p.x()),
    }
}

/// Reduce layout hints to a simple DAG: drop self-loops and duplicates,
/// then skip any edge that would close a cycle. Edges are considered in
/// declaration order, so the first direction of a mutual pair wins.
fn acyclic_hints(edges: &[(usize, usize)], member_count: usize) -> Vec<(usize, usize)> {
    let mut seen = std::collections::HashSet::new();
    let mut graph: DiGraph<(), ()> = DiGraph::new();
    let indices: Vec<_> = (0..member_count).map(|_| graph.add_node(())).collect();

    let mut hints: Vec<(usize, usize)> = Vec::new();
    for &(from, to) in edges {
        if from == to || !seen.insert((from, to)) {
            continue;
        }
        // A path from `to` back to `from` means this edge would close a cycle.
        if petgraph::algo::has_path_connecting(&graph, indices[to], indices[from], None) {
            continue;
        }
        graph.add_edge(indices[from], indices[to], ());
        hints.push((from, to));
    }

    hints
}
