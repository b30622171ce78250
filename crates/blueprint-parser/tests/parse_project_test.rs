//! Integration tests for reading whole project directories.

use std::fs;

use tempfile::tempdir;

use blueprint_core::diagnostic::ErrorCode;
use blueprint_parser::{ParseError, parse_project};

#[test]
fn test_parse_project_reads_nested_files() {
    let dir = tempdir().expect("Failed to create temp directory");
    fs::write(
        dir.path().join("systems.txt"),
        "System = Shop | Sells things | core\nPersona = Customer | Buys things |\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("shop")).unwrap();
    fs::write(
        dir.path().join("shop").join("containers.txt"),
        "Container = Shop | Web App | Serves the \\\n   storefront | Rust |\n\
         Relationship = Customer | Browses | HTTPS | Web App |\n",
    )
    .unwrap();

    let model = parse_project(dir.path()).expect("Failed to parse project");

    assert!(model.errors().is_empty(), "{:?}", model.errors());
    assert!(model.system("Shop").is_some());
    assert!(model.persona("Customer").is_some());
    assert_eq!(
        model.container("Web App").unwrap().description,
        "Serves the storefront"
    );
    assert_eq!(model.relationships().len(), 1);
}

#[test]
fn test_duplicate_across_files_reports_second_location() {
    let dir = tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("a.txt"), "System = Shop | first |\n").unwrap();
    fs::write(dir.path().join("b.txt"), "\n\nSystem = Shop | second |\n").unwrap();

    let model = parse_project(dir.path()).expect("Failed to parse project");

    assert_eq!(model.systems().len(), 1);
    assert_eq!(model.system("Shop").unwrap().description, "first");
    assert_eq!(model.errors().len(), 1);

    let err = &model.errors()[0];
    assert_eq!(err.code(), Some(ErrorCode::E200));
    let location = err.location().expect("duplicate carries a location");
    assert_eq!(location.file(), dir.path().join("b.txt"));
    assert_eq!(location.line(), 3);
}

#[test]
fn test_diagnostics_do_not_stop_parsing() {
    let dir = tempdir().expect("Failed to create temp directory");
    fs::write(
        dir.path().join("model.txt"),
        "Widget = nope\nSystem = Broken\nno equals sign here\nSystem = Shop | ok |\n",
    )
    .unwrap();

    let model = parse_project(dir.path()).expect("Failed to parse project");

    assert_eq!(model.errors().len(), 2);
    assert_eq!(model.errors()[0].location().unwrap().line(), 1);
    assert_eq!(model.errors()[1].location().unwrap().line(), 2);
    assert!(model.system("Shop").is_some());
}

#[test]
fn test_missing_project_is_an_io_error() {
    let dir = tempdir().expect("Failed to create temp directory");
    let missing = dir.path().join("does-not-exist");

    let err = parse_project(&missing).unwrap_err();

    match err {
        ParseError::Io { path, .. } => assert_eq!(path, missing),
    }
}
