//! Integration tests for the generation pipeline.
//!
//! These tests run the library end to end on the school fixture: parse,
//! expand, render, and write through a job configuration.

use std::fs;
use std::path::PathBuf;

use blueprint_define::TypeRef;
use blueprint_gen::config::Config;
use blueprint_gen::openapi::render_openapi;
use blueprint_gen::parser::load_service;
use blueprint_gen::runner::{expand_file, run_config};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/school.yaml")
}

#[test]
fn fixture_parses_and_resolves() {
    let service = load_service(&fixture()).unwrap();
    let students = service.find_resource("Students").unwrap();

    assert_eq!(
        students.find_field("status").unwrap().field.ty,
        TypeRef::enumeration("StudentStatus")
    );
    assert_eq!(
        students.find_field("address").unwrap().field.ty,
        TypeRef::object("Address")
    );
    assert_eq!(students.endpoints.len(), 1);
}

#[test]
fn custom_endpoint_follows_standard_endpoints() {
    let service = expand_file(&fixture()).unwrap();
    let students = service.find_resource("Students").unwrap();
    let names: Vec<_> = students.endpoints.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Create", "Get", "List", "Update", "Delete", "Search", "Graduate"]
    );

    let graduate = students.find_endpoint("Graduate").unwrap();
    assert_eq!(graduate.error_responses.len(), 7);
}

#[test]
fn read_only_resource_renders_read_paths_only() {
    let doc = render_openapi(&expand_file(&fixture()).unwrap()).unwrap();
    let courses = doc["paths"]["/courses"].as_object().unwrap();
    assert_eq!(courses.keys().collect::<Vec<_>>(), vec!["get"]);
    assert!(doc["paths"]["/courses/{id}"].get("delete").is_none());
    assert!(doc["paths"]["/courses/_search"]["post"].is_object());
}

#[test]
fn rendered_defaults_and_examples_are_typed() {
    let doc = render_openapi(&expand_file(&fixture()).unwrap()).unwrap();
    let students = &doc["components"]["schemas"]["Students"];
    assert_eq!(students["properties"]["status"]["default"], "Active");
    assert_eq!(students["properties"]["firstName"]["examples"][0], "Ada");
    assert_eq!(
        students["required"],
        serde_json::json!(["id", "meta", "firstName"])
    );
}

#[test]
fn every_schema_reference_resolves() {
    let doc = render_openapi(&expand_file(&fixture()).unwrap()).unwrap();
    let schemas = doc["components"]["schemas"].as_object().unwrap();

    let text = doc.to_string();
    let prefix = "#/components/schemas/";
    for (idx, _) in text.match_indices(prefix) {
        let rest = &text[idx + prefix.len()..];
        let name: String = rest.chars().take_while(|c| *c != '"').collect();
        assert!(schemas.contains_key(&name), "dangling reference to {name}");
    }
}

#[test]
fn config_jobs_write_every_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("blueprint.yaml");
    fs::write(
        &config_path,
        format!(
            "jobs:\n  - specification: {}\n    overlay: out/school.expanded.yaml\n    openapiJson: out/school.openapi.json\n    openapiYaml: out/school.openapi.yaml\n    schema: out/blueprint.schema.json\n",
            fixture().display()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let reports = run_config(&config).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].written.len(), 4);
    for path in &reports[0].written {
        assert!(path.starts_with(temp_dir.path()));
        assert!(path.exists(), "{}", path.display());
    }

    let expanded = load_service(&temp_dir.path().join("out/school.expanded.yaml")).unwrap();
    assert!(expanded.has_object("StudentsFilter"));
}
