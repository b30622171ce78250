//! Encoding views into abstract graph descriptions.
//!
//! A [`GraphDescription`] is everything the layout engine needs to know about
//! a view: labeled nodes grouped into clusters, the visible relationship
//! edges, and for layered views the invisible ordering edges that force
//! top-to-bottom ranking.
//!
//! # Layering
//!
//! The layout engine does not order disconnected clusters vertically on its
//! own. Container and Component views therefore place one invisible anchor
//! node in each of the top, core and bottom clusters, chain the anchors
//! (`top -> core -> bottom`), and chain every core node between the top and
//! bottom anchors. A layered graph with `n` core nodes has `n + 1`
//! ordering edges.
//!
//! System Context views use two regions instead: a highlighted core cluster
//! and a plain list of external nodes.

mod label;

pub use label::escape_html;

use log::debug;

use blueprint_core::{
    color::{Palette, Swatch},
    model::{Component, Container, EntityKind, Model, Persona, Relationship, System},
};

use crate::view::{Role, View, ViewKind, ViewNode, ViewRef};

/// Name of the top anchor node.
pub const TOP_ANCHOR: &str = "__blueprint_anchor_top";
/// Name of the core anchor node.
pub const CORE_ANCHOR: &str = "__blueprint_anchor_core";
/// Name of the bottom anchor node.
pub const BOTTOM_ANCHOR: &str = "__blueprint_anchor_bottom";

/// Default number of characters per label line.
pub const DEFAULT_LINE_LIMIT: usize = 38;

/// The closed set of node kinds a graph can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Persona,
    System,
    Container,
    Component,
    /// Invisible node used only to order clusters.
    Anchor,
}

/// A node of the graph, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
    /// HTML-like label. Empty for anchors.
    pub label: String,
    /// Fill and border colors. `None` for anchors.
    pub swatch: Option<Swatch>,
    /// Relative link to the next-level-down view.
    pub link: Option<String>,
}

impl GraphNode {
    fn anchor(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Anchor,
            label: String::new(),
            swatch: None,
            link: None,
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.kind == NodeKind::Anchor
    }
}

/// A visible, labeled relationship edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub destination: String,
    pub label: String,
}

/// An invisible edge chaining nodes from top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingEdge {
    pub path: Vec<String>,
}

impl OrderingEdge {
    fn through(node: &str) -> Self {
        Self {
            path: vec![
                TOP_ANCHOR.to_string(),
                node.to_string(),
                BOTTOM_ANCHOR.to_string(),
            ],
        }
    }
}

/// The three clusters of a layered graph.
///
/// Every cluster starts with its anchor node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers {
    pub top: Vec<GraphNode>,
    pub core: Vec<GraphNode>,
    pub bottom: Vec<GraphNode>,
    pub ordering: Vec<OrderingEdge>,
}

/// How the nodes of a graph are grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clusters {
    /// A highlighted core cluster plus undifferentiated external nodes.
    Regions {
        core: Vec<GraphNode>,
        external: Vec<GraphNode>,
    },
    /// Top, core and bottom clusters linked by invisible ordering edges.
    Layered(Layers),
}

/// An abstract graph ready for textual emission to the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDescription {
    title: String,
    clusters: Clusters,
    edges: Vec<GraphEdge>,
}

impl GraphDescription {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clusters(&self) -> &Clusters {
        &self.clusters
    }

    /// Visible relationship edges.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Invisible ordering edges. Empty for region layouts.
    pub fn ordering_edges(&self) -> &[OrderingEdge] {
        match &self.clusters {
            Clusters::Regions { .. } => &[],
            Clusters::Layered(layers) => &layers.ordering,
        }
    }

    /// Iterate over every node in every cluster, anchors included.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        let groups: [&[GraphNode]; 3] = match &self.clusters {
            Clusters::Regions { core, external } => [core, external, &[]],
            Clusters::Layered(layers) => [&layers.top, &layers.core, &layers.bottom],
        };
        groups.into_iter().flatten()
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes().find(|node| node.name == name)
    }
}

/// Where a view node ends up in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Core,
    Top,
    Bottom,
    External,
}

fn placement(kind: ViewKind, role: Role) -> Placement {
    match (kind, role) {
        (_, Role::Core) => Placement::Core,
        (ViewKind::Context, _) => Placement::External,
        (ViewKind::Container, Role::Persona) => Placement::Top,
        (ViewKind::Container, Role::System | Role::Container) => Placement::Bottom,
        (ViewKind::Component, Role::Persona | Role::Container) => Placement::Top,
        (ViewKind::Component, Role::System) => Placement::Bottom,
    }
}

/// Turns views into [`GraphDescription`]s using a palette and a label width.
#[derive(Debug, Clone)]
pub struct Encoder {
    palette: Palette,
    line_limit: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Palette::default(), DEFAULT_LINE_LIMIT)
    }
}

impl Encoder {
    pub fn new(palette: Palette, line_limit: usize) -> Self {
        Self {
            palette,
            line_limit,
        }
    }

    /// Encode `view`, looking entity details up in `model`.
    ///
    /// View nodes missing from `model` are skipped.
    pub fn encode(&self, model: &Model, view: &View) -> GraphDescription {
        let mut core = Vec::new();
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        let mut external = Vec::new();

        for view_node in view.nodes() {
            let Some(node) = self.entity_node(model, view_node) else {
                debug!(name = view_node.name; "Skipping node missing from model");
                continue;
            };
            match placement(view.kind(), view_node.role) {
                Placement::Core => core.push(node),
                Placement::Top => top.push(node),
                Placement::Bottom => bottom.push(node),
                Placement::External => external.push(node),
            }
        }

        let edges = view
            .relationships()
            .iter()
            .map(|rel| self.relationship_edge(rel))
            .collect();

        let clusters = match view.kind() {
            ViewKind::Context => {
                external.extend(top.into_iter().chain(bottom));
                Clusters::Regions { core, external }
            }
            ViewKind::Container | ViewKind::Component => {
                top.extend(external);
                Clusters::Layered(layer(top, core, bottom))
            }
        };

        let graph = GraphDescription {
            title: view.title().to_string(),
            clusters,
            edges,
        };
        debug!(
            title = graph.title,
            nodes = graph.nodes().count(),
            edges = graph.edges.len(),
            ordering_edges = graph.ordering_edges().len();
            "Graph encoded"
        );
        graph
    }

    fn entity_node(&self, model: &Model, node: &ViewNode) -> Option<GraphNode> {
        match node.kind {
            EntityKind::Persona => model.persona(&node.name).map(|p| self.persona_node(p)),
            EntityKind::System => model.system(&node.name).map(|s| self.system_node(s)),
            EntityKind::Container => model.container(&node.name).map(|c| self.container_node(c)),
            EntityKind::Component => model.component(&node.name).map(|c| self.component_node(c)),
            EntityKind::SystemContext => None,
        }
    }

    fn persona_node(&self, persona: &Persona) -> GraphNode {
        GraphNode {
            name: persona.name.clone(),
            kind: NodeKind::Persona,
            label: label::node_label(
                &persona.name,
                "Persona",
                "",
                &persona.description,
                self.line_limit,
            ),
            swatch: Some(self.palette.persona),
            link: None,
        }
    }

    fn system_node(&self, system: &System) -> GraphNode {
        GraphNode {
            name: system.name.clone(),
            kind: NodeKind::System,
            label: label::node_label(
                &system.name,
                "System",
                "",
                &system.description,
                self.line_limit,
            ),
            swatch: Some(self.palette.system),
            link: Some(label::drill_down_link(&ViewRef::container(&system.name))),
        }
    }

    fn container_node(&self, container: &Container) -> GraphNode {
        GraphNode {
            name: container.name.clone(),
            kind: NodeKind::Container,
            label: label::node_label(
                &container.name,
                "Container",
                &container.technology,
                &container.description,
                self.line_limit,
            ),
            swatch: Some(self.palette.container),
            link: Some(label::drill_down_link(&ViewRef::component(&container.name))),
        }
    }

    fn component_node(&self, component: &Component) -> GraphNode {
        GraphNode {
            name: component.name.clone(),
            kind: NodeKind::Component,
            label: label::node_label(
                &component.name,
                "Component",
                &component.technology,
                &component.description,
                self.line_limit,
            ),
            swatch: Some(self.palette.component),
            link: None,
        }
    }

    fn relationship_edge(&self, rel: &Relationship) -> GraphEdge {
        GraphEdge {
            source: rel.source.clone(),
            destination: rel.destination.clone(),
            label: label::edge_label(&rel.description, &rel.technology, self.line_limit),
        }
    }
}

/// Add anchors and ordering edges around the three groups.
fn layer(mut top: Vec<GraphNode>, mut core: Vec<GraphNode>, mut bottom: Vec<GraphNode>) -> Layers {
    let mut ordering = Vec::with_capacity(core.len() + 1);
    ordering.push(OrderingEdge::through(CORE_ANCHOR));
    ordering.extend(core.iter().map(|node| OrderingEdge::through(&node.name)));

    top.insert(0, GraphNode::anchor(TOP_ANCHOR));
    core.insert(0, GraphNode::anchor(CORE_ANCHOR));
    bottom.insert(0, GraphNode::anchor(BOTTOM_ANCHOR));

    Layers {
        top,
        core,
        bottom,
        ordering,
    }
}
