//! Projection of a model onto the three standard views.
//!
//! Names referenced by a view that do not exist in the model are dropped
//! without a diagnostic. Only the entity store reports definition errors.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use blueprint_core::model::{Container, EntityKind, Model, System, SystemContext};

use super::{Role, View, ViewKind, ViewNode, ViewRef};
use crate::error::BlueprintError;

const GENERIC_TITLE: &str = "System Context Diagram";
const GENERIC_DESCRIPTION: &str =
    "The complete system context diagram, containing all systems of the current project.";

/// Nodes of a view under construction, unique by name. The first role wins.
#[derive(Default)]
struct NodeSet {
    nodes: IndexMap<String, ViewNode>,
}

impl NodeSet {
    fn add(&mut self, name: &str, kind: EntityKind, role: Role) {
        match self.nodes.entry(name.to_string()) {
            Entry::Occupied(existing) if existing.get().kind != kind => {
                debug!(
                    name,
                    kept:? = existing.get().kind,
                    dropped:? = kind;
                    "Entities of different kinds share a name, keeping the first"
                );
            }
            Entry::Occupied(existing) => {
                trace!(name, role:? = existing.get().role; "Node already in view");
            }
            Entry::Vacant(slot) => {
                slot.insert(ViewNode {
                    name: name.to_string(),
                    kind,
                    role,
                });
            }
        }
    }

    fn into_view(
        self,
        model: &Model,
        reference: ViewRef,
        title: String,
        description: String,
    ) -> View {
        let relationships = model
            .relevant_relationships(self.nodes.keys().map(String::as_str))
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            view:% = reference,
            nodes = self.nodes.len(),
            relationships = relationships.len();
            "View projected"
        );

        View {
            reference,
            title,
            description,
            nodes: self.nodes.into_values().collect(),
            relationships,
        }
    }
}

/// Build the view addressed by `reference`.
///
/// # Errors
///
/// Returns [`BlueprintError::ViewNotFound`] if the focal entity does not exist.
pub fn project(model: &Model, reference: &ViewRef) -> Result<View, BlueprintError> {
    let not_found = || BlueprintError::ViewNotFound(reference.clone());

    match (reference.kind(), reference.name()) {
        (ViewKind::Context, None) => Ok(generic_context_view(model)),
        (ViewKind::Context, Some(name)) => model
            .system_context(name)
            .map(|context| system_context_view(model, context))
            .ok_or_else(not_found),
        (ViewKind::Container, Some(name)) => model
            .system(name)
            .map(|system| container_view(model, system))
            .ok_or_else(not_found),
        (ViewKind::Component, Some(name)) => model
            .container(name)
            .map(|container| component_view(model, container))
            .ok_or_else(not_found),
        (ViewKind::Container | ViewKind::Component, None) => Err(not_found()),
    }
}

/// The System Context view of a declared [`SystemContext`].
///
/// Core systems are the context's core systems, peripheral systems its
/// external systems, and every persona of the model is included.
pub fn system_context_view(model: &Model, context: &SystemContext) -> View {
    let mut nodes = NodeSet::default();

    for name in &context.core_systems {
        add_system(model, &mut nodes, name, Role::Core);
    }
    for name in &context.external_systems {
        add_system(model, &mut nodes, name, Role::System);
    }
    for name in model.personas().keys() {
        nodes.add(name, EntityKind::Persona, Role::Persona);
    }

    nodes.into_view(
        model,
        ViewRef::context(&context.name),
        format!("[System Context] {}", context.name),
        context.description.clone(),
    )
}

/// The System Context view of the whole project: every system is core.
pub fn generic_context_view(model: &Model) -> View {
    let mut nodes = NodeSet::default();

    for name in model.systems().keys() {
        nodes.add(name, EntityKind::System, Role::Core);
    }
    for name in model.personas().keys() {
        nodes.add(name, EntityKind::Persona, Role::Persona);
    }

    nodes.into_view(
        model,
        ViewRef::generic(),
        format!("[System Context] {GENERIC_TITLE}"),
        GENERIC_DESCRIPTION.to_string(),
    )
}

/// The Container view of `system`.
///
/// Core nodes are the containers of the system. Systems and personas related
/// to any of them, in either direction, join the view.
pub fn container_view(model: &Model, system: &System) -> View {
    let containers: Vec<&str> = model
        .containers()
        .values()
        .filter(|container| container.system == system.name)
        .map(|container| container.name.as_str())
        .collect();

    let mut nodes = NodeSet::default();
    for name in &containers {
        nodes.add(name, EntityKind::Container, Role::Core);
    }
    for name in &containers {
        for (_, other) in model.relationships_of(name) {
            if model.system(other).is_some() {
                nodes.add(other, EntityKind::System, Role::System);
            }
            if model.persona(other).is_some() {
                nodes.add(other, EntityKind::Persona, Role::Persona);
            }
        }
    }

    nodes.into_view(
        model,
        ViewRef::container(&system.name),
        format!("[Containers] {}", system.name),
        system.description.clone(),
    )
}

/// The Component view of `container`.
///
/// Core nodes are the components of the container. Systems and containers
/// related to any of them, in either direction, join the view.
pub fn component_view(model: &Model, container: &Container) -> View {
    let components: Vec<&str> = model
        .components()
        .values()
        .filter(|component| component.container == container.name)
        .map(|component| component.name.as_str())
        .collect();

    let mut nodes = NodeSet::default();
    for name in &components {
        nodes.add(name, EntityKind::Component, Role::Core);
    }
    for name in &components {
        for (_, other) in model.relationships_of(name) {
            if model.system(other).is_some() {
                nodes.add(other, EntityKind::System, Role::System);
            }
            if model.container(other).is_some() {
                nodes.add(other, EntityKind::Container, Role::Container);
            }
        }
    }

    nodes.into_view(
        model,
        ViewRef::component(&container.name),
        format!("[Components] {}", container.name),
        container.description.clone(),
    )
}

fn add_system(model: &Model, nodes: &mut NodeSet, name: &str, role: Role) {
    if model.system(name).is_some() {
        nodes.add(name, EntityKind::System, role);
    } else {
        debug!(name; "Dropping unknown system from view");
    }
}
