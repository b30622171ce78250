//! DOT emission for graph descriptions.
//!
//! The graph is assembled as a `dot-structures` AST and printed with the
//! `graphviz-rust` printer, so quoting of identifiers is handled in one place.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::graph::{Clusters, GraphDescription, GraphEdge, GraphNode, OrderingEdge};

const CORE_BORDER: &str = "#7b7b7b";

/// Quoted identifier, escaping embedded quotes and backslashes.
fn quoted(text: &str) -> Id {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    Id::Escaped(format!("\"{escaped}\""))
}

/// HTML-like identifier. `text` must be a well-formed label body.
fn html(text: &str) -> Id {
    Id::Html(format!("<{text}>"))
}

fn plain(text: &str) -> Id {
    Id::Plain(text.to_string())
}

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(plain(key), value)
}

fn node_id(name: &str) -> NodeId {
    NodeId(quoted(name), None)
}

fn global_attributes() -> Vec<Stmt> {
    vec![
        Stmt::Attribute(attr("ranksep", quoted("1.5 equally"))),
        Stmt::Attribute(attr("nodesep", quoted("1.5 equally"))),
        Stmt::GAttribute(GraphAttributes::Node(vec![
            attr("fontcolor", quoted("white")),
            attr("fontsize", plain("11")),
            attr("fontname", quoted("Sans")),
            attr("shape", quoted("box")),
            attr("style", quoted("filled,rounded")),
            attr("margin", quoted("0.20,0.20")),
        ])),
        Stmt::GAttribute(GraphAttributes::Edge(vec![
            attr("fontcolor", quoted("dimgrey")),
            attr("color", quoted("dimgrey")),
            attr("fontsize", plain("11")),
            attr("fontname", quoted("Sans")),
        ])),
    ]
}

fn node_stmt(node: &GraphNode) -> Stmt {
    let mut attributes = Vec::new();
    if node.is_anchor() {
        attributes.push(attr("style", quoted("invis")));
    } else {
        attributes.push(attr("label", html(&node.label)));
    }
    if let Some(swatch) = &node.swatch {
        attributes.push(attr("fillcolor", quoted(&swatch.fill.to_hex())));
        attributes.push(attr("color", quoted(&swatch.border.to_hex())));
    }
    if let Some(link) = &node.link {
        attributes.push(attr("URL", quoted(link)));
    }
    Stmt::Node(Node {
        id: node_id(&node.name),
        attributes,
    })
}

fn edge_stmt(edge: &GraphEdge) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(&edge.source)),
            Vertex::N(node_id(&edge.destination)),
        ),
        attributes: vec![attr("label", html(&edge.label))],
    })
}

fn ordering_stmt(edge: &OrderingEdge) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Chain(edge.path.iter().map(|name| Vertex::N(node_id(name))).collect()),
        attributes: vec![attr("style", quoted("invis"))],
    })
}

fn cluster(name: &str, mut stmts: Vec<Stmt>, nodes: &[GraphNode]) -> Stmt {
    stmts.extend(nodes.iter().map(node_stmt));
    Stmt::Subgraph(Subgraph {
        id: plain(name),
        stmts,
    })
}

fn core_cluster(nodes: &[GraphNode]) -> Stmt {
    cluster(
        "cluster_core",
        vec![
            Stmt::Attribute(attr("color", quoted(CORE_BORDER))),
            Stmt::Attribute(attr("style", quoted("dashed,rounded,bold"))),
        ],
        nodes,
    )
}

fn hidden_cluster(name: &str, nodes: &[GraphNode]) -> Stmt {
    cluster(name, vec![Stmt::Attribute(attr("style", quoted("invis")))], nodes)
}

/// Build the DOT AST of `graph`.
pub fn to_graph(graph: &GraphDescription) -> Graph {
    let mut stmts = global_attributes();

    match graph.clusters() {
        Clusters::Regions { core, external } => {
            stmts.push(core_cluster(core));
            stmts.extend(external.iter().map(node_stmt));
        }
        Clusters::Layered(layers) => {
            stmts.push(core_cluster(&layers.core));
            stmts.push(hidden_cluster("cluster_top", &layers.top));
            stmts.push(hidden_cluster("cluster_bottom", &layers.bottom));
            stmts.extend(layers.ordering.iter().map(ordering_stmt));
        }
    }
    stmts.extend(graph.edges().iter().map(edge_stmt));

    Graph::DiGraph {
        id: quoted(graph.title()),
        strict: false,
        stmts,
    }
}

/// Print `graph` as DOT text for the layout engine.
pub fn to_dot(graph: &GraphDescription) -> String {
    to_graph(graph).print(&mut PrinterContext::default())
}
