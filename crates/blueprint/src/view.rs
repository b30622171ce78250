//! Views: role-partitioned subsets of a model scoped to one diagram.
//!
//! A view is addressed by a [`ViewRef`], a view kind plus the name of its
//! focal entity. The projection algorithms in [`projection`] decide which
//! entities belong to a view and which relationships are relevant to it.

mod projection;

pub use projection::{
    component_view, container_view, generic_context_view, project, system_context_view,
};

use std::{fmt, path::PathBuf, str::FromStr};

use blueprint_core::model::{EntityKind, Relationship};

/// The three C4 view levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// System Context view, focused on a declared system context or on all systems.
    Context,
    /// Container view, focused on a system.
    Container,
    /// Component view, focused on a container.
    Component,
}

impl ViewKind {
    /// All view kinds, from the most abstract to the most detailed.
    pub const ALL: [ViewKind; 3] = [ViewKind::Context, ViewKind::Container, ViewKind::Component];

    /// Returns the name of the kind, e.g. `"container"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Context => "context",
            ViewKind::Container => "container",
            ViewKind::Component => "component",
        }
    }

    /// Returns the path segment views of this kind are published under.
    pub fn segment(&self) -> &'static str {
        match self {
            ViewKind::Context => "contexts",
            ViewKind::Container => "containers",
            ViewKind::Component => "components",
        }
    }

    /// Resolve a path segment produced by [`ViewKind::segment`].
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.segment() == s)
            .ok_or_else(|| format!("unknown view kind `{s}`, expected context, container or component"))
    }
}

/// Address of a view: its kind and the name of its focal entity.
///
/// The generic context view, showing every system of the project, has no
/// focal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewRef {
    kind: ViewKind,
    name: Option<String>,
}

impl ViewRef {
    /// Create a reference from its parts.
    pub fn new(kind: ViewKind, name: Option<String>) -> Self {
        Self { kind, name }
    }

    /// The generic context view containing all systems.
    pub fn generic() -> Self {
        Self::new(ViewKind::Context, None)
    }

    /// The context view of a declared system context.
    pub fn context(name: impl Into<String>) -> Self {
        Self::new(ViewKind::Context, Some(name.into()))
    }

    /// The container view of a system.
    pub fn container(system: impl Into<String>) -> Self {
        Self::new(ViewKind::Container, Some(system.into()))
    }

    /// The component view of a container.
    pub fn component(container: impl Into<String>) -> Self {
        Self::new(ViewKind::Component, Some(container.into()))
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Relative path of the published page, e.g. `containers/Shop.html`.
    ///
    /// Drill-down links in node labels point at these locations. The generic
    /// view is published as `contexts/index.html`. Returns `None` when the
    /// focal name cannot be used as a single file name: it is empty, `.` or
    /// `..`, contains a path separator or a control character, or is a
    /// context named `index`.
    pub fn output_path(&self) -> Option<PathBuf> {
        let file = match &self.name {
            Some(name) if self.is_publishable(name) => format!("{name}.html"),
            Some(_) => return None,
            None => "index.html".to_string(),
        };
        Some(PathBuf::from(self.kind.segment()).join(file))
    }

    fn is_publishable(&self, name: &str) -> bool {
        !matches!(name, "" | "." | "..")
            && !name.contains(|c: char| matches!(c, '/' | '\\') || c.is_control())
            && !(self.kind == ViewKind::Context && name == "index")
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} view `{name}`", self.kind),
            None => write!(f, "generic {} view", self.kind),
        }
    }
}

/// The semantic role of a node within its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A focal entity of the view.
    Core,
    Persona,
    /// A system outside the focus, listed or discovered through relationships.
    System,
    /// A container outside the focus, discovered through relationships.
    Container,
}

/// An entity included in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub name: String,
    pub kind: EntityKind,
    pub role: Role,
}

/// A derived, read-only snapshot of the entities and relationships of one diagram.
///
/// Every node of a view exists in the model it was projected from, and every
/// relationship has both endpoints among the nodes.
///
/// Nodes are unique by name, since names identify graph nodes and
/// relationship endpoints. When entities of different kinds share a name,
/// such as a system and a persona, only the first one added is kept: focal
/// entities before the others, and systems before personas.
#[derive(Debug, Clone)]
pub struct View {
    reference: ViewRef,
    title: String,
    description: String,
    nodes: Vec<ViewNode>,
    relationships: Vec<Relationship>,
}

impl View {
    pub fn reference(&self) -> &ViewRef {
        &self.reference
    }

    pub fn kind(&self) -> ViewKind {
        self.reference.kind
    }

    /// Title shown above the diagram, e.g. `"[Containers] Shop"`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All nodes, core nodes first.
    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    /// Nodes with the given role, in view order.
    pub fn nodes_with(&self, role: Role) -> impl Iterator<Item = &ViewNode> {
        self.nodes.iter().filter(move |node| node.role == role)
    }

    pub fn node(&self, name: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Relationships between nodes of this view, in model order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}
