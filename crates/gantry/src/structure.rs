//! Containment structure for layout.
//!
//! The builder's cluster tree is flattened into [`ContainmentScope`]s in
//! post-order (innermost first), so cluster sizes can be computed before
//! their parents are laid out. Edges whose endpoints live in different
//! clusters are projected onto the nearest scope that contains both: each
//! endpoint is lifted to its ancestor that is an immediate member of that
//! scope, and the projected pair becomes a layout hint there. The original
//! edges are untouched; arrows are always drawn between the real nodes.

use log::trace;
use petgraph::graph::NodeIndex;

use crate::diagram::{ClusterId, Diagram};

/// An immediate member of a containment scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Member {
    Node(NodeIndex),
    Cluster(ClusterId),
}

/// One containment level: the diagram root or a single cluster.
#[derive(Debug)]
pub(crate) struct ContainmentScope {
    container: Option<ClusterId>,
    members: Vec<Member>,
    /// Layout hints as (source, target) indices into `members`.
    layout_edges: Vec<(usize, usize)>,
}

impl ContainmentScope {
    pub(crate) fn container(&self) -> Option<ClusterId> {
        self.container
    }

    pub(crate) fn members(&self) -> &[Member] {
        &self.members
    }

    pub(crate) fn layout_edges(&self) -> &[(usize, usize)] {
        &self.layout_edges
    }
}

/// All containment scopes of a diagram, post-order (root last).
#[derive(Debug)]
pub(crate) struct ScopeTree<'a> {
    diagram: &'a Diagram,
    scopes: Vec<ContainmentScope>,
}

impl<'a> ScopeTree<'a> {
    pub(crate) fn from_diagram(diagram: &'a Diagram) -> Self {
        let mut tree = Self {
            diagram,
            scopes: Vec::new(),
        };

        tree.collect_scope(None);
        tree.project_edges();

        trace!(scopes = tree.scopes.len(); "Built scope tree");
        tree
    }

    pub(crate) fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    /// Scopes in post-order: every cluster scope precedes its parent, the
    /// root scope is last.
    pub(crate) fn scopes(&self) -> &[ContainmentScope] {
        &self.scopes
    }

    /// The scope describing the given container.
    pub(crate) fn scope_of(&self, container: Option<ClusterId>) -> &ContainmentScope {
        self.scopes
            .iter()
            .find(|scope| scope.container == container)
            .expect("every container has a scope")
    }

    fn collect_scope(&mut self, container: Option<ClusterId>) {
        let (child_clusters, own_nodes) = match container {
            Some(cluster) => {
                let record = &self.diagram.clusters()[cluster];
                (record.children.clone(), record.nodes.clone())
            }
            None => (
                self.diagram.root_clusters().to_vec(),
                self.diagram.root_nodes().to_vec(),
            ),
        };

        for &child in &child_clusters {
            self.collect_scope(Some(child));
        }

        let mut members: Vec<Member> = own_nodes.into_iter().map(Member::Node).collect();
        members.extend(child_clusters.into_iter().map(Member::Cluster));

        self.scopes.push(ContainmentScope {
            container,
            members,
            layout_edges: Vec::new(),
        });
    }

    /// Lift every edge to the deepest scope containing both endpoints and
    /// record it there as a member-to-member layout hint.
    fn project_edges(&mut self) {
        let graph = self.diagram.graph();

        for edge in graph.edge_indices() {
            let (from, to) = graph
                .edge_endpoints(edge)
                .expect("edge index from the graph itself");

            let from_chain = self.container_chain(from);
            let to_chain = self.container_chain(to);

            // Deepest container that appears in both chains.
            let common = from_chain
                .iter()
                .find(|container| to_chain.contains(container))
                .copied()
                .expect("both chains end at the root");

            let from_member = Self::member_in_scope(from, &from_chain, common);
            let to_member = Self::member_in_scope(to, &to_chain, common);
            if from_member == to_member {
                // Both endpoints collapse onto the same cluster; nothing to
                // hint at this level.
                continue;
            }

            let scope = self
                .scopes
                .iter_mut()
                .find(|scope| scope.container == common)
                .expect("every container has a scope");
            let from_index = scope
                .members
                .iter()
                .position(|&m| m == from_member)
                .expect("projected member belongs to the common scope");
            let to_index = scope
                .members
                .iter()
                .position(|&m| m == to_member)
                .expect("projected member belongs to the common scope");
            scope.layout_edges.push((from_index, to_index));
        }
    }

    /// Containers of a node from its immediate cluster up to the root.
    fn container_chain(&self, node: NodeIndex) -> Vec<Option<ClusterId>> {
        let mut chain = Vec::new();
        let mut current = self.diagram.graph()[node].cluster;
        while let Some(cluster) = current {
            chain.push(Some(cluster));
            current = self.diagram.clusters()[cluster].parent;
        }
        chain.push(None);
        chain
    }

    /// The ancestor of `node` that is an immediate member of `scope`.
    fn member_in_scope(
        node: NodeIndex,
        chain: &[Option<ClusterId>],
        scope: Option<ClusterId>,
    ) -> Member {
        if chain.first() == Some(&scope) {
            return Member::Node(node);
        }

        // The element just before `scope` in the chain is the child cluster
        // of `scope` on the node's path.
        let position = chain
            .iter()
            .position(|&container| container == scope)
            .expect("scope is on the chain");
        match chain[position - 1] {
            Some(cluster) => Member::Cluster(cluster),
            None => unreachable!("the root is always the last chain element"),
        }
    }
}
