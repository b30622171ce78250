//! Turning `Key = value` definitions into model entities.

use log::debug;

use blueprint_core::{
    diagnostic::{Diagnostic, ErrorCode, Location},
    model::{Component, Container, Model, Persona, Relationship, System, SystemContext},
};

use crate::reader::split_fields;

/// Field layout of one definition keyword.
struct Layout {
    kind: &'static str,
    fields: &'static [&'static str],
}

impl Layout {
    fn usage(&self) -> String {
        format!(
            "{} requires {} elements: {}",
            self.kind,
            self.fields.len(),
            self.fields.join(" | ")
        )
    }
}

const PERSONA: Layout = Layout {
    kind: "Persona",
    fields: &["Name", "Description", "Tags"],
};

const SYSTEM: Layout = Layout {
    kind: "System",
    fields: &["Name", "Description", "Tags"],
};

const CONTAINER: Layout = Layout {
    kind: "Container",
    fields: &["System", "Name", "Description", "Technology", "Tags"],
};

const COMPONENT: Layout = Layout {
    kind: "Component",
    fields: &["Container", "Name", "Description", "Technology", "Tags"],
};

const RELATIONSHIP: Layout = Layout {
    kind: "Relationship",
    fields: &["Source", "Description", "Technology", "Destination", "Tags"],
};

const SYSTEM_CONTEXT: Layout = Layout {
    kind: "SystemContext",
    fields: &["CoreSystems", "ExternalSystems", "Name", "Description"],
};

/// Split a comma separated list, trimming every entry.
///
/// An empty input yields a single empty entry, not an empty list.
///
/// # Examples
///
/// ```
/// use blueprint_parser::parse_tags;
///
/// assert_eq!(parse_tags(" web, internal "), ["web", "internal"]);
/// assert_eq!(parse_tags(""), [""]);
/// ```
pub fn parse_tags(list: &str) -> Vec<String> {
    list.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Split `value` according to `layout`, reporting field count problems.
///
/// Too few fields drop the definition. Extra fields are reported as a warning
/// and ignored.
fn fields<'v>(
    model: &mut Model,
    layout: &Layout,
    value: &'v str,
    location: &Location,
) -> Option<Vec<&'v str>> {
    let mut fields = split_fields(value);
    let expected = layout.fields.len();

    if fields.len() < expected {
        model.report(
            Diagnostic::error(layout.usage())
                .with_code(ErrorCode::E101)
                .with_location(location.clone()),
        );
        return None;
    }
    if fields.len() > expected {
        model.report(
            Diagnostic::warning(layout.usage())
                .with_code(ErrorCode::E102)
                .with_location(location.clone()),
        );
        fields.truncate(expected);
    }
    Some(fields)
}

/// Add the entity defined by `keyword = value` to `model`.
pub(crate) fn define(model: &mut Model, keyword: &str, value: &str, location: Location) {
    match keyword {
        "Persona" | "Person" => persona(model, value, location),
        "System" | "SoftwareSystem" => system(model, value, location),
        "Container" => container(model, value, location),
        "Component" => component(model, value, location),
        "Relationship" => relationship(model, value, location),
        "SystemContext" => system_context(model, value, location),
        _ => {
            debug!(keyword, location:% = location; "Unknown keyword");
            model.report(
                Diagnostic::error(format!("unknown keyword: {keyword}"))
                    .with_code(ErrorCode::E100)
                    .with_location(location),
            );
        }
    }
}

fn persona(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &PERSONA, value, &location) else {
        return;
    };
    let persona = Persona {
        name: fields[0].to_string(),
        description: fields[1].to_string(),
        tags: parse_tags(fields[2]),
    };
    model.add_persona(persona, location);
}

fn system(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &SYSTEM, value, &location) else {
        return;
    };
    let system = System {
        name: fields[0].to_string(),
        description: fields[1].to_string(),
        tags: parse_tags(fields[2]),
    };
    model.add_system(system, location);
}

fn container(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &CONTAINER, value, &location) else {
        return;
    };
    let container = Container {
        system: fields[0].to_string(),
        name: fields[1].to_string(),
        description: fields[2].to_string(),
        technology: fields[3].to_string(),
        tags: parse_tags(fields[4]),
    };
    model.add_container(container, location);
}

fn component(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &COMPONENT, value, &location) else {
        return;
    };
    let component = Component {
        container: fields[0].to_string(),
        name: fields[1].to_string(),
        description: fields[2].to_string(),
        technology: fields[3].to_string(),
        tags: parse_tags(fields[4]),
    };
    model.add_component(component, location);
}

fn relationship(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &RELATIONSHIP, value, &location) else {
        return;
    };
    model.add_relationship(Relationship {
        source: fields[0].to_string(),
        description: fields[1].to_string(),
        technology: fields[2].to_string(),
        destination: fields[3].to_string(),
        tags: parse_tags(fields[4]),
    });
}

fn system_context(model: &mut Model, value: &str, location: Location) {
    let Some(fields) = fields(model, &SYSTEM_CONTEXT, value, &location) else {
        return;
    };
    let context = SystemContext {
        core_systems: parse_tags(fields[0]),
        external_systems: parse_tags(fields[1]),
        name: fields[2].to_string(),
        description: fields[3].to_string(),
    };
    model.add_system_context(context, location);
}

#[cfg(test)]
mod tests {
    use blueprint_core::diagnostic::Severity;

    use super::*;

    fn location(line: usize) -> Location {
        Location::new("test/parsesystem", line)
    }

    #[test]
    fn test_parse_system() {
        let mut model = Model::new();

        define(
            &mut model,
            "System",
            " Test System | Test Description | tag1,tag2",
            location(1),
        );

        assert!(model.errors().is_empty());
        assert_eq!(
            model.system("Test System"),
            Some(&System {
                name: "Test System".to_string(),
                description: "Test Description".to_string(),
                tags: vec!["tag1".to_string(), "tag2".to_string()],
            })
        );
    }

    #[test]
    fn test_parse_system_missing_element() {
        let mut model = Model::new();

        define(&mut model, "System", " Test System | Test Description", location(1));

        assert_eq!(model.errors().len(), 1);
        let err = &model.errors()[0];
        assert_eq!(
            err.message(),
            "System requires 3 elements: Name | Description | Tags"
        );
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert_eq!(err.location(), Some(&location(1)));
        assert!(model.systems().is_empty());
    }

    #[test]
    fn test_parse_system_extra_element_is_a_warning() {
        let mut model = Model::new();

        define(&mut model, "System", "Shop | Sells | web | surplus", location(2));

        assert_eq!(model.errors().len(), 1);
        assert_eq!(model.errors()[0].severity(), Severity::Warning);
        assert_eq!(model.errors()[0].code(), Some(ErrorCode::E102));
        assert_eq!(model.system("Shop").unwrap().tags, ["web"]);
    }

    #[test]
    fn test_parse_system_duplicate() {
        let mut model = Model::new();
        let value = " Test System | Test Description | tag1,tag2";

        define(&mut model, "System", value, location(1));
        define(&mut model, "System", value, location(2));

        assert_eq!(model.errors().len(), 1);
        let err = &model.errors()[0];
        assert_eq!(err.message(), "System is already defined: Test System");
        assert_eq!(err.location(), Some(&location(2)));
        assert_eq!(model.systems().len(), 1);
    }

    #[test]
    fn test_empty_tags_yield_single_empty_tag() {
        let mut model = Model::new();

        define(&mut model, "Person", "Customer | Buys things |", location(1));

        assert_eq!(model.persona("Customer").unwrap().tags, [""]);
    }

    #[test]
    fn test_parse_container_and_component() {
        let mut model = Model::new();

        define(
            &mut model,
            "Container",
            "Shop | Web App | Serves pages | Rust | web",
            location(1),
        );
        define(
            &mut model,
            "Component",
            "Web App | Cart | Holds items | Rust |",
            location(2),
        );

        let container = model.container("Web App").unwrap();
        assert_eq!(container.system, "Shop");
        assert_eq!(container.technology, "Rust");
        let component = model.component("Cart").unwrap();
        assert_eq!(component.container, "Web App");
        assert_eq!(component.description, "Holds items");
    }

    #[test]
    fn test_parse_relationship_field_order() {
        let mut model = Model::new();

        define(
            &mut model,
            "Relationship",
            "Web App | Reads orders | SQL | Database | db",
            location(1),
        );

        let rel = &model.relationships()[0];
        assert_eq!(rel.source, "Web App");
        assert_eq!(rel.description, "Reads orders");
        assert_eq!(rel.technology, "SQL");
        assert_eq!(rel.destination, "Database");
    }

    #[test]
    fn test_parse_system_context() {
        let mut model = Model::new();

        define(
            &mut model,
            "SystemContext",
            "Shop, Billing | Bank | Checkout | Paying for orders",
            location(1),
        );

        let context = model.system_context("Checkout").unwrap();
        assert_eq!(context.core_systems, ["Shop", "Billing"]);
        assert_eq!(context.external_systems, ["Bank"]);
        assert_eq!(context.description, "Paying for orders");
    }

    #[test]
    fn test_unknown_keyword() {
        let mut model = Model::new();

        define(&mut model, "Sytem", "A | b | c", location(9));

        assert_eq!(model.errors().len(), 1);
        assert_eq!(model.errors()[0].message(), "unknown keyword: Sytem");
        assert_eq!(model.errors()[0].code(), Some(ErrorCode::E100));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tags_are_trimmed_and_counted(tags in prop::collection::vec("[a-z]{0,6}", 1..8)) {
            let list = tags
                .iter()
                .map(|tag| format!("  {tag} "))
                .collect::<Vec<_>>()
                .join(",");

            prop_assert_eq!(parse_tags(&list), tags);
        }
    }
}
