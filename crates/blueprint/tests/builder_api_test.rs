//! Integration tests for the Blueprint builder API
//!
//! The layout engine is replaced by shell commands so the tests do not need
//! Graphviz installed.

use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use blueprint::{
    Blueprint, BlueprintError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    view::{Role, ViewKind, ViewRef},
};

const PROJECT: &str = "\
Persona = Customer | Buys things online |
System = Shop | Sells things | core
System = Payment Provider | Moves money | external
Container = Shop | Web App | Serves the storefront | Rust |
Container = Shop | Database | Stores orders | PostgreSQL |
Component = Web App | Cart | Holds items | Rust |
Relationship = Customer | Browses | HTTPS | Web App |
Relationship = Web App | Reads and writes | SQL | Database |
Relationship = Database | Settles orders | REST | Payment Provider |
Relationship = Cart | Persists | SQL | Database |
SystemContext = Shop | Payment Provider | Checkout | Paying for an order
";

fn project() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("model.txt"), PROJECT).unwrap();
    dir
}

fn with_command(command: &str, args: &[&str]) -> Blueprint {
    let layout = LayoutConfig::new(command, args.iter().map(|a| a.to_string()).collect(), 38);
    Blueprint::new(AppConfig::new(layout, StyleConfig::default()))
}

#[test]
fn test_builder_api_exists() {
    let _builder = Blueprint::default();
}

#[test]
fn test_load_and_project_container_view() {
    let dir = project();
    let blueprint = Blueprint::default();

    let model = blueprint.load(dir.path()).expect("Failed to load project");
    let view = blueprint
        .view(&model, &ViewRef::container("Shop"))
        .expect("Shop has a container view");

    assert!(model.errors().is_empty(), "{:?}", model.errors());
    assert_eq!(view.kind(), ViewKind::Container);
    assert_eq!(view.title(), "[Containers] Shop");
    let core: Vec<_> = view.nodes_with(Role::Core).map(|n| n.name.as_str()).collect();
    assert_eq!(core, ["Web App", "Database"]);
    assert!(view.node("Payment Provider").is_some());
    assert!(view.node("Customer").is_some());
    assert_eq!(view.relationships().len(), 3);
}

#[test]
fn test_unknown_view_is_not_found() {
    let dir = project();
    let blueprint = Blueprint::default();
    let model = blueprint.load(dir.path()).unwrap();

    let err = blueprint
        .view(&model, &ViewRef::component("Nope"))
        .unwrap_err();

    assert!(matches!(err, BlueprintError::ViewNotFound(_)));
    assert_eq!(err.to_string(), "component view `Nope` not found");
}

#[test]
fn test_dot_output() {
    let dir = project();
    let blueprint = Blueprint::default();
    let model = blueprint.load(dir.path()).unwrap();
    let view = blueprint.view(&model, &ViewRef::context("Checkout")).unwrap();

    let dot = blueprint.dot(&model, &view).unwrap();

    assert!(dot.contains("digraph \"[System Context] Checkout\""));
    assert!(dot.contains("URL=\"../containers/Payment%20Provider.html\""));
}

#[test]
fn test_invalid_style_is_a_config_error() {
    let config: AppConfig = toml::from_str(
        r#"
        [style.system]
        fill = "not-a-color"
        border = "black"
        "#,
    )
    .unwrap();
    let blueprint = Blueprint::new(config);
    let dir = project();
    let model = blueprint.load(dir.path()).unwrap();
    let view = blueprint.view(&model, &ViewRef::generic()).unwrap();

    let err = blueprint.dot(&model, &view).unwrap_err();

    assert!(matches!(err, BlueprintError::Config(_)));
}

#[cfg(unix)]
#[test]
fn test_render_page_embeds_engine_output() {
    let dir = project();
    let blueprint = with_command("sh", &["-c", "echo '<svg>ok</svg>'; echo 'Warning: odd' >&2"]);
    let model = blueprint.load(dir.path()).unwrap();
    let view = blueprint.view(&model, &ViewRef::generic()).unwrap();

    let page = blueprint.render_page(&model, &view).unwrap();

    assert!(page.error.is_none());
    assert!(page.html.contains("<svg>ok</svg>"));
    assert!(page.html.contains("Graphviz Warnings"));
    assert!(page.html.contains("[System Context] System Context Diagram"));
}

#[cfg(unix)]
#[test]
fn test_render_page_reports_engine_failure() {
    let dir = project();
    let blueprint = with_command("sh", &["-c", "echo 'syntax error' >&2; exit 1"]);
    let model = blueprint.load(dir.path()).unwrap();
    let view = blueprint.view(&model, &ViewRef::container("Shop")).unwrap();

    let page = blueprint.render_page(&model, &view).unwrap();

    assert!(page.error.is_some());
    assert!(page.html.contains("Graphviz Errors"));
    assert!(page.html.contains("syntax error"));
}

#[cfg(unix)]
#[test]
fn test_export_writes_every_view() {
    let dir = project();
    let out = tempdir().unwrap();
    let blueprint = with_command("cat", &[]);
    let model = blueprint.load(dir.path()).unwrap();

    let report = blueprint.export(&model, out.path()).unwrap();

    assert!(report.is_success(), "{:?}", report.failures());
    for page in [
        "components/Web App.html",
        "components/Database.html",
        "containers/Shop.html",
        "containers/Payment Provider.html",
        "contexts/Checkout.html",
        "contexts/index.html",
    ] {
        assert!(out.path().join(page).is_file(), "missing {page}");
    }
    assert_eq!(report.written().len(), 6);
}

#[cfg(unix)]
#[test]
fn test_export_continues_past_failing_views() {
    let dir = project();
    let out = tempdir().unwrap();
    let blueprint = with_command("false", &[]);
    let model = blueprint.load(dir.path()).unwrap();

    let report = blueprint.export(&model, out.path()).unwrap();

    assert_eq!(report.failures().len(), 6);
    assert_eq!(report.written().len(), 6);
    let index = fs::read_to_string(out.path().join(Path::new("contexts/index.html"))).unwrap();
    assert!(index.contains("Graphviz Errors"));
}

#[cfg(unix)]
#[test]
fn test_export_keeps_pages_inside_output_dir() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("model.txt"),
        "System = ../../escaped | Tries to leave | \n\
         System = Front/Back | Nests directories | \n",
    )
    .unwrap();
    let out = tempdir().unwrap();
    let site = out.path().join("site");
    let blueprint = with_command("cat", &[]);
    let model = blueprint.load(dir.path()).unwrap();

    let report = blueprint.export(&model, &site).unwrap();

    let failed: Vec<_> = report.failures().iter().map(|f| f.view.clone()).collect();
    assert_eq!(
        failed,
        [ViewRef::container("../../escaped"), ViewRef::container("Front/Back")]
    );
    assert!(report
        .failures()
        .iter()
        .all(|f| matches!(f.error, BlueprintError::Unpublishable(_))));
    assert!(!out.path().join("escaped.html").exists());
    assert!(!site.join("containers/Front").exists());
    assert!(report.written().iter().all(|path| path.starts_with(&site)));
    assert!(site.join("contexts/index.html").is_file());
}

#[cfg(unix)]
#[test]
fn test_export_reserves_index_for_generic_context() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("model.txt"),
        "System = Shop | Sells things | \n\
         System = Bank | Moves money | \n\
         SystemContext = Shop | Bank | index | Shadows the generic view\n",
    )
    .unwrap();
    let out = tempdir().unwrap();
    let blueprint = with_command("cat", &[]);
    let model = blueprint.load(dir.path()).unwrap();

    let report = blueprint.export(&model, out.path()).unwrap();

    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].view, ViewRef::context("index"));
    let index = out.path().join("contexts/index.html");
    let mut written = report.written().to_vec();
    written.dedup();
    assert_eq!(written.len(), report.written().len());
    assert!(report.written().contains(&index));
    let html = fs::read_to_string(index).unwrap();
    assert!(html.contains("System Context Diagram"));
    assert!(!html.contains("Shadows the generic view"));
}
