//! The C4 entity store.
//!
//! A [`Model`] holds every entity parsed from a project, keyed by name per
//! entity kind. Entities reference each other by name only; references are
//! resolved by lookup when a view is projected, never by back-pointers.
//!
//! The model is built once per parse pass and only read afterwards. Duplicate
//! definitions never overwrite an existing entry: the first definition wins
//! and the duplicate is recorded as a [`Diagnostic`].

use std::{collections::HashSet, fmt};

use indexmap::{IndexMap, map::Entry};
use log::{debug, warn};

use crate::diagnostic::{Diagnostic, ErrorCode, Location};

/// The kinds of named entities a model stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Persona,
    SystemContext,
    System,
    Container,
    Component,
}

impl EntityKind {
    /// Returns the display name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Persona => "Persona",
            EntityKind::SystemContext => "SystemContext",
            EntityKind::System => "System",
            EntityKind::Container => "Container",
            EntityKind::Component => "Component",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity stored in a [`Model`].
pub trait Entity {
    /// The kind every value of this type belongs to.
    const KIND: EntityKind;

    /// The unique name of the entity within its kind.
    fn name(&self) -> &str;
}

/// A person or role interacting with the software systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// A user-declared grouping of systems shown together in one context view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemContext {
    pub name: String,
    pub description: String,
    /// Systems in focus.
    pub core_systems: Vec<String>,
    /// Systems shown as peripheral.
    pub external_systems: Vec<String>,
}

/// A software system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// A deployable unit of a [`System`], e.g. an application or a data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    /// Name of the owning system. Not validated.
    pub system: String,
    pub description: String,
    pub technology: String,
    pub tags: Vec<String>,
}

/// A building block inside a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    /// Name of the owning container. Not validated.
    pub container: String,
    pub description: String,
    pub technology: String,
    pub tags: Vec<String>,
}

/// A directed, described relationship between two entities of any kind.
///
/// Endpoints are free-text names and may reference entities that do not
/// exist. Several relationships may share the same endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source: String,
    pub destination: String,
    pub description: String,
    pub technology: String,
    pub tags: Vec<String>,
}

impl Relationship {
    /// Returns the endpoint opposite to `name`, if `name` is one of the endpoints.
    ///
    /// A self-relationship yields the entity itself.
    pub fn other_end(&self, name: &str) -> Option<&str> {
        if self.source == name {
            Some(&self.destination)
        } else if self.destination == name {
            Some(&self.source)
        } else {
            None
        }
    }
}

macro_rules! impl_entity {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_entity!(Persona, SystemContext, System, Container, Component);

/// The C4 architecture model of a project.
#[derive(Debug, Clone, Default)]
pub struct Model {
    personas: IndexMap<String, Persona>,
    system_contexts: IndexMap<String, SystemContext>,
    systems: IndexMap<String, System>,
    containers: IndexMap<String, Container>,
    components: IndexMap<String, Component>,
    relationships: Vec<Relationship>,
    errors: Vec<Diagnostic>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// All personas, in definition order.
    pub fn personas(&self) -> &IndexMap<String, Persona> {
        &self.personas
    }

    /// All system contexts, in definition order.
    pub fn system_contexts(&self) -> &IndexMap<String, SystemContext> {
        &self.system_contexts
    }

    /// All systems, in definition order.
    pub fn systems(&self) -> &IndexMap<String, System> {
        &self.systems
    }

    /// All containers, in definition order.
    pub fn containers(&self) -> &IndexMap<String, Container> {
        &self.containers
    }

    /// All components, in definition order.
    pub fn components(&self) -> &IndexMap<String, Component> {
        &self.components
    }

    /// All relationships, in definition order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Diagnostics collected while the model was built.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn persona(&self, name: &str) -> Option<&Persona> {
        self.personas.get(name)
    }

    pub fn system_context(&self, name: &str) -> Option<&SystemContext> {
        self.system_contexts.get(name)
    }

    pub fn system(&self, name: &str) -> Option<&System> {
        self.systems.get(name)
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.get(name)
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Add a persona. Returns `false` and records an error if the name is taken.
    pub fn add_persona(&mut self, persona: Persona, location: Location) -> bool {
        insert_unique(&mut self.personas, &mut self.errors, persona, location)
    }

    /// Add a system context. Returns `false` and records an error if the name is taken.
    pub fn add_system_context(&mut self, context: SystemContext, location: Location) -> bool {
        insert_unique(&mut self.system_contexts, &mut self.errors, context, location)
    }

    /// Add a system. Returns `false` and records an error if the name is taken.
    pub fn add_system(&mut self, system: System, location: Location) -> bool {
        insert_unique(&mut self.systems, &mut self.errors, system, location)
    }

    /// Add a container. Returns `false` and records an error if the name is taken.
    pub fn add_container(&mut self, container: Container, location: Location) -> bool {
        insert_unique(&mut self.containers, &mut self.errors, container, location)
    }

    /// Add a component. Returns `false` and records an error if the name is taken.
    pub fn add_component(&mut self, component: Component, location: Location) -> bool {
        insert_unique(&mut self.components, &mut self.errors, component, location)
    }

    /// Add a relationship. Endpoints are not checked.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        debug!(
            source = relationship.source,
            destination = relationship.destination;
            "Adding relationship"
        );
        self.relationships.push(relationship);
    }

    /// Record a diagnostic produced while reading the project.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Returns every relationship whose source and destination are both in `nodes`.
    ///
    /// Results keep the order of [`Model::relationships`], so repeated queries
    /// over the same model produce identical diagrams.
    ///
    /// # Examples
    ///
    /// ```
    /// # use blueprint_core::model::{Model, Relationship};
    /// let mut model = Model::new();
    /// for (source, destination) in [("A", "B"), ("B", "C")] {
    ///     model.add_relationship(Relationship {
    ///         source: source.to_string(),
    ///         destination: destination.to_string(),
    ///         description: String::new(),
    ///         technology: String::new(),
    ///         tags: vec![String::new()],
    ///     });
    /// }
    ///
    /// let relevant = model.relevant_relationships(["A", "B"]);
    /// assert_eq!(relevant.len(), 1);
    /// assert_eq!(relevant[0].destination, "B");
    /// ```
    pub fn relevant_relationships<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n str>,
    ) -> Vec<&Relationship> {
        let nodes: HashSet<&str> = nodes.into_iter().collect();
        self.relationships
            .iter()
            .filter(|rel| {
                nodes.contains(rel.source.as_str()) && nodes.contains(rel.destination.as_str())
            })
            .collect()
    }

    /// Iterate over `(relationship, other endpoint)` for every relationship
    /// touching `name`, in either direction.
    pub fn relationships_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (&'a Relationship, &'a str)> + 'a {
        self.relationships
            .iter()
            .filter_map(move |rel| rel.other_end(name).map(|other| (rel, other)))
    }
}

/// Insert `entity` unless its name is already taken, recording a duplicate error.
fn insert_unique<E: Entity>(
    entries: &mut IndexMap<String, E>,
    errors: &mut Vec<Diagnostic>,
    entity: E,
    location: Location,
) -> bool {
    match entries.entry(entity.name().to_owned()) {
        Entry::Occupied(entry) => {
            warn!(kind = E::KIND.as_str(), name = entry.key(), location:% = location; "Duplicate definition");
            errors.push(
                Diagnostic::error(format!("{} is already defined: {}", E::KIND, entry.key()))
                    .with_code(ErrorCode::E200)
                    .with_location(location),
            );
            false
        }
        Entry::Vacant(entry) => {
            debug!(kind = E::KIND.as_str(), name = entry.key(); "Adding entity");
            entry.insert(entity);
            true
        }
    }
}
