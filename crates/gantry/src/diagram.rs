//! The diagram construction API.
//!
//! A [`Diagram`] is an explicit construction session: nodes, clusters, and
//! edges are declared against it, and rendering consumes it. This replaces
//! the implicit "currently open diagram/cluster" global state found in
//! diagram-as-code scripting libraries with context objects the borrow
//! checker can see.
//!
//! # Examples
//!
//! ```no_run
//! use gantry::{Diagram, DiagramOptions};
//! use gantry::semantic::NodeCategory;
//!
//! let mut diagram = Diagram::new("Two Tier App");
//! let (web, db) = diagram.cluster("Backend", |d| {
//!     let web = d.node(NodeCategory::ComputeInstance, "web");
//!     let db = d.node(NodeCategory::ComputeInstance, "db");
//!     Ok((web, db))
//! })?;
//! diagram.connect(web, db)?;
//! let path = diagram.render()?;
//! # Ok::<(), gantry::GantryError>(())
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};

use gantry_core::semantic::{Direction, NodeCategory, OutputFormat};

use crate::{
    config::AppConfig,
    error::{ConstructionError, GantryError, RenderError},
    export::{Exporter, svg::SvgBuilder},
    layout::EngineBuilder,
    structure::ScopeTree,
};

/// Session ids are minted once per [`Diagram`] so handles from a closed or
/// foreign session can be rejected at runtime.
static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Options accepted when opening a diagram session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramOptions {
    /// Flow direction of the layout. Defaults to left-to-right.
    pub direction: Direction,
    /// Output artifact format. Defaults to SVG.
    pub output_format: OutputFormat,
}

impl DiagramOptions {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }
}

/// An opaque reference to a node created by [`Diagram::node`].
///
/// Handles are `Copy` and carry the id of the session that minted them.
/// Labels are display text only; two nodes may share a label and still be
/// distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    session: u64,
    index: NodeIndex,
}

pub(crate) type ClusterId = usize;

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) category: NodeCategory,
    pub(crate) label: String,
    pub(crate) cluster: Option<ClusterId>,
}

#[derive(Debug)]
pub(crate) struct ClusterRecord {
    pub(crate) title: String,
    pub(crate) parent: Option<ClusterId>,
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) children: Vec<ClusterId>,
}

/// A diagram construction session.
///
/// Nodes attach to the innermost active cluster; clusters are scoped to a
/// closure so the active-cluster stack cannot leak. Rendering consumes the
/// session, so handles cannot outlive their diagram.
#[derive(Debug)]
pub struct Diagram {
    session: u64,
    title: String,
    options: DiagramOptions,
    graph: DiGraph<NodeRecord, ()>,
    clusters: Vec<ClusterRecord>,
    root_clusters: Vec<ClusterId>,
    root_nodes: Vec<NodeIndex>,
    active: Vec<ClusterId>,
}

impl Diagram {
    /// Open a construction session with default options.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_options(title, DiagramOptions::default())
    }

    /// Open a construction session with explicit options.
    pub fn with_options(title: impl Into<String>, options: DiagramOptions) -> Self {
        let title = title.into();
        let session = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        info!(title, session; "Opening diagram session");

        Self {
            session,
            title,
            options,
            graph: DiGraph::new(),
            clusters: Vec::new(),
            root_clusters: Vec::new(),
            root_nodes: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Scoped construction: build the graph inside `f`, then render exactly
    /// once into the current working directory on normal exit.
    ///
    /// A closure error aborts before any artifact is produced.
    pub fn build<F>(
        title: impl Into<String>,
        options: DiagramOptions,
        f: F,
    ) -> Result<PathBuf, GantryError>
    where
        F: FnOnce(&mut Diagram) -> Result<(), ConstructionError>,
    {
        let mut diagram = Self::with_options(title, options);
        f(&mut diagram)?;
        diagram.render()
    }

    /// The diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The options this session was opened with.
    pub fn options(&self) -> DiagramOptions {
        self.options
    }

    /// Open a nested cluster scope for the duration of the closure.
    ///
    /// Nodes created inside the closure attach to this cluster unless a
    /// deeper cluster is opened. The scope is popped on both the normal and
    /// the error path.
    pub fn cluster<T, F>(&mut self, title: &str, f: F) -> Result<T, ConstructionError>
    where
        F: FnOnce(&mut Diagram) -> Result<T, ConstructionError>,
    {
        let id = self.clusters.len();
        let parent = self.active.last().copied();
        self.clusters.push(ClusterRecord {
            title: title.to_string(),
            parent,
            nodes: Vec::new(),
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.clusters[parent].children.push(id),
            None => self.root_clusters.push(id),
        }

        debug!(title, depth = self.active.len() + 1; "Entering cluster scope");
        self.active.push(id);
        let result = f(self);
        self.active.pop();

        result
    }

    /// Create a node attached to the innermost active cluster, or to the
    /// diagram root if no cluster is active.
    pub fn node(&mut self, category: NodeCategory, label: &str) -> NodeHandle {
        let cluster = self.active.last().copied();
        let index = self.graph.add_node(NodeRecord {
            category,
            label: label.to_string(),
            cluster,
        });

        match cluster {
            Some(cluster) => self.clusters[cluster].nodes.push(index),
            None => self.root_nodes.push(index),
        }

        debug!(label, category:% = category; "Created node");
        NodeHandle {
            session: self.session,
            index,
        }
    }

    /// Record a directed edge and return the target handle, so connects can
    /// be strung together: `connect(a, b)` then `connect(b, c)`.
    pub fn connect(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
    ) -> Result<NodeHandle, ConstructionError> {
        let from_index = self.resolve(from)?;
        let to_index = self.resolve(to)?;
        self.graph.add_edge(from_index, to_index, ());
        Ok(to)
    }

    /// Record edges pairwise along a sequence of nodes and return the last
    /// handle. `chain(&[a, b, c])` records a→b and b→c.
    pub fn chain(&mut self, handles: &[NodeHandle]) -> Result<NodeHandle, ConstructionError> {
        let (&last, _) = handles.split_last().ok_or(ConstructionError::EmptyChain)?;
        for pair in handles.windows(2) {
            self.connect(pair[0], pair[1])?;
        }
        Ok(last)
    }

    /// Number of nodes declared so far.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges declared so far.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of clusters declared so far.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// All edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle)> + '_ {
        self.graph.edge_indices().map(|edge| {
            let (from, to) = self
                .graph
                .edge_endpoints(edge)
                .expect("edge index from the graph itself");
            (
                NodeHandle {
                    session: self.session,
                    index: from,
                },
                NodeHandle {
                    session: self.session,
                    index: to,
                },
            )
        })
    }

    /// The title of the nearest enclosing cluster of a node, or `None` for
    /// root-level nodes.
    pub fn enclosing_cluster(
        &self,
        handle: NodeHandle,
    ) -> Result<Option<&str>, ConstructionError> {
        let index = self.resolve(handle)?;
        Ok(self.graph[index]
            .cluster
            .map(|cluster| self.clusters[cluster].title.as_str()))
    }

    /// Cluster titles enclosing a node, outermost first.
    pub fn cluster_path(&self, handle: NodeHandle) -> Result<Vec<&str>, ConstructionError> {
        let index = self.resolve(handle)?;
        let mut path = Vec::new();
        let mut current = self.graph[index].cluster;
        while let Some(cluster) = current {
            path.push(self.clusters[cluster].title.as_str());
            current = self.clusters[cluster].parent;
        }
        path.reverse();
        Ok(path)
    }

    /// The artifact file name derived from the title: lowercased, whitespace
    /// joined with underscores, plus the format extension.
    pub fn output_file_name(&self) -> String {
        let slug = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        let slug = if slug.is_empty() {
            "untitled".to_string()
        } else {
            slug
        };
        format!("{slug}.{}", self.options.output_format.extension())
    }

    /// Render to an SVG string with default configuration.
    pub fn render_svg(&self) -> Result<String, GantryError> {
        self.render_svg_with(&AppConfig::default())
    }

    /// Render to an SVG string.
    pub fn render_svg_with(&self, config: &AppConfig) -> Result<String, GantryError> {
        let document = self.render_document(config)?;
        Ok(document.to_string())
    }

    /// Render and write the artifact into the current working directory.
    ///
    /// Consumes the session; the returned path is the written file.
    pub fn render(self) -> Result<PathBuf, GantryError> {
        self.render_to_dir(Path::new("."))
    }

    /// Render and write the artifact into `dir` with default configuration.
    pub fn render_to_dir(self, dir: impl AsRef<Path>) -> Result<PathBuf, GantryError> {
        self.render_to_dir_with(dir, &AppConfig::default())
    }

    /// Render and write the artifact into `dir`.
    ///
    /// Re-running the same construction overwrites the previous artifact of
    /// the same name.
    pub fn render_to_dir_with(
        self,
        dir: impl AsRef<Path>,
        config: &AppConfig,
    ) -> Result<PathBuf, GantryError> {
        let path = dir.as_ref().join(self.output_file_name());
        let document = self.render_document(config)?;

        info!(path = path.display().to_string(); "Writing diagram artifact");
        fs::write(&path, document.to_string()).map_err(RenderError::Io)?;

        Ok(path)
    }

    fn render_document(&self, config: &AppConfig) -> Result<svg::Document, GantryError> {
        info!(title = self.title, nodes = self.node_count(), edges = self.edge_count(); "Building diagram structure");
        let scopes = ScopeTree::from_diagram(self);

        let layout = EngineBuilder::new()
            .with_horizontal_spacing(config.layout().horizontal_spacing())
            .with_vertical_spacing(config.layout().vertical_spacing())
            .with_cluster_padding(config.layout().cluster_padding())
            .build(&scopes, self.options.direction)?;
        debug!(placed_nodes = layout.nodes().len(); "Layout calculated");

        let background = config
            .style()
            .background_color()
            .map_err(RenderError::Style)?;
        let exporter = SvgBuilder::new().with_background(background);

        Ok(exporter.render_document(&layout))
    }

    pub(crate) fn resolve(&self, handle: NodeHandle) -> Result<NodeIndex, ConstructionError> {
        if handle.session != self.session {
            return Err(ConstructionError::ForeignHandle {
                expected: self.session,
                actual: handle.session,
            });
        }
        if self.graph.node_weight(handle.index).is_none() {
            return Err(ConstructionError::UnknownNode);
        }
        Ok(handle.index)
    }

    pub(crate) fn graph(&self) -> &DiGraph<NodeRecord, ()> {
        &self.graph
    }

    pub(crate) fn clusters(&self) -> &[ClusterRecord] {
        &self.clusters
    }

    pub(crate) fn root_clusters(&self) -> &[ClusterId] {
        &self.root_clusters
    }

    pub(crate) fn root_nodes(&self) -> &[NodeIndex] {
        &self.root_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagrams_support_debug_formatting() {
        let mut diagram = Diagram::new("Development Environment");
        diagram.node(NodeCategory::User, "alice");

        let formatted = format!("{diagram:?}");
        assert!(formatted.contains("Development Environment"));
    }

    #[test]
    fn nodes_attach_to_the_innermost_cluster() {
        let mut diagram = Diagram::new("t");
        let outer = diagram.node(NodeCategory::GenericIcon, "outer");
        let (mid, inner) = diagram
            .cluster("A", |d| {
                let mid = d.node(NodeCategory::GenericIcon, "mid");
                let inner = d.cluster("B", |d| Ok(d.node(NodeCategory::GenericIcon, "inner")))?;
                Ok((mid, inner))
            })
            .unwrap();

        assert_eq!(diagram.enclosing_cluster(outer).unwrap(), None);
        assert_eq!(diagram.enclosing_cluster(mid).unwrap(), Some("A"));
        assert_eq!(diagram.enclosing_cluster(inner).unwrap(), Some("B"));
        assert_eq!(diagram.cluster_path(inner).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn cluster_scope_pops_on_error() {
        let mut diagram = Diagram::new("t");
        let result: Result<(), ConstructionError> =
            diagram.cluster("broken", |_| Err(ConstructionError::EmptyChain));
        assert!(result.is_err());

        // The failed scope must not leak into later nodes.
        let after = diagram.node(NodeCategory::GenericIcon, "after");
        assert_eq!(diagram.enclosing_cluster(after).unwrap(), None);
    }

    #[test]
    fn chain_records_pairwise_edges() {
        let mut diagram = Diagram::new("t");
        let a = diagram.node(NodeCategory::GenericIcon, "a");
        let b = diagram.node(NodeCategory::GenericIcon, "b");
        let c = diagram.node(NodeCategory::GenericIcon, "c");

        let last = diagram.chain(&[a, b, c]).unwrap();
        assert_eq!(last, c);
        assert_eq!(diagram.edge_count(), 2);

        let edges: Vec<_> = diagram.edges().collect();
        assert_eq!(edges, vec![(a, b), (b, c)]);
    }

    #[test]
    fn chain_of_one_adds_no_edges() {
        let mut diagram = Diagram::new("t");
        let a = diagram.node(NodeCategory::GenericIcon, "a");
        assert_eq!(diagram.chain(&[a]).unwrap(), a);
        assert_eq!(diagram.edge_count(), 0);
    }

    #[test]
    fn empty_chain_is_rejected() {
        let mut diagram = Diagram::new("t");
        assert!(matches!(
            diagram.chain(&[]),
            Err(ConstructionError::EmptyChain)
        ));
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut first = Diagram::new("first");
        let stray = first.node(NodeCategory::GenericIcon, "stray");

        let mut second = Diagram::new("second");
        let local = second.node(NodeCategory::GenericIcon, "local");

        assert!(matches!(
            second.connect(stray, local),
            Err(ConstructionError::ForeignHandle { .. })
        ));
        assert!(matches!(
            second.enclosing_cluster(stray),
            Err(ConstructionError::ForeignHandle { .. })
        ));
    }

    #[test]
    fn duplicate_labels_are_distinct_nodes() {
        let mut diagram = Diagram::new("t");
        let a = diagram.node(NodeCategory::GenericIcon, "twin");
        let b = diagram.node(NodeCategory::GenericIcon, "twin");

        assert_ne!(a, b);
        assert_eq!(diagram.node_count(), 2);
    }

    #[test]
    fn output_file_name_is_normalized() {
        let diagram = Diagram::new("Development  Environment");
        assert_eq!(diagram.output_file_name(), "development_environment.svg");

        let odd = Diagram::new("  Spaced   Out Title ");
        assert_eq!(odd.output_file_name(), "spaced_out_title.svg");

        let empty = Diagram::new("");
        assert_eq!(empty.output_file_name(), "untitled.svg");
    }
}
