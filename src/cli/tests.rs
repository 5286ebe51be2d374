//! Unit tests for CLI commands
#![allow(clippy::unwrap_used)]

use super::commands::map_only_to_scope;
use crate::cli::{inspect_json, inspect_report, run, Cli, Commands, OnlyPart};
use crate::generator::{GenerationScope, Language, Mode};
use crate::spec::parse_api;
use clap::Parser;
use std::fs;

const FIXTURE: &str = include_str!("../../tests/fixtures/users.raml");

#[test]
fn test_generate_command_defaults() {
    let cli = Cli::try_parse_from(["ramlgen", "generate", "--spec", "api.raml"]).unwrap();
    assert_eq!(cli.log_level, "info");
    match cli.command {
        Commands::Generate {
            spec,
            output,
            language,
            kind,
            only,
            no_format,
            ..
        } => {
            assert_eq!(spec.to_string_lossy(), "api.raml");
            assert!(output.is_none());
            assert!(language.is_none());
            assert!(kind.is_none());
            assert!(only.is_none());
            assert!(!no_format);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "ramlgen",
        "generate",
        "--spec",
        "api.raml",
        "--language",
        "rust",
        "--kind",
        "client",
        "--only",
        "types,bodies",
        "--no-format",
        "--log-level",
        "debug",
    ])
    .unwrap();
    assert_eq!(cli.log_level, "debug");
    match cli.command {
        Commands::Generate {
            language,
            kind,
            only,
            no_format,
            ..
        } => {
            assert_eq!(language, Some(Language::Rust));
            assert_eq!(kind, Some(Mode::Client));
            assert_eq!(only, Some(vec![OnlyPart::Types, OnlyPart::Bodies]));
            assert!(no_format);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_unknown_language_rejected() {
    assert!(Cli::try_parse_from([
        "ramlgen",
        "generate",
        "--spec",
        "api.raml",
        "--language",
        "cobol"
    ])
    .is_err());
}

#[test]
fn test_map_only_to_scope() {
    assert_eq!(map_only_to_scope(None), GenerationScope::all());
    let scope = map_only_to_scope(Some(&[OnlyPart::Resources]));
    assert!(!scope.types);
    assert!(!scope.bodies);
    assert!(scope.resources);
}

#[test]
fn test_inspect_report() {
    let api = parse_api(FIXTURE).unwrap();
    let report = inspect_report(&api, Language::Go).unwrap();
    assert!(report.starts_with("Users API\ntypes:\n"));
    assert!(report.contains("  Tags: Array = []string\n"));
    assert!(report.contains("  User: PlainObject 3 field(s)\n"));
    assert!(report.contains("bodies:\n  UsersGetResp\n"));
    assert!(report.contains("    DELETE /users/{id} -> UsersIdDelete\n"));
}

#[test]
fn test_inspect_json() {
    let api = parse_api(FIXTURE).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&inspect_json(&api, Language::Rust).unwrap()).unwrap();
    assert_eq!(json["title"], "Users API");
    let tags = json["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Tags")
        .unwrap();
    assert_eq!(tags["kind"], "array");
    assert_eq!(tags["one_line_def"], "Vec<String>");
    assert_eq!(json["resources"][0]["methods"][1]["verb"], "POST");
    assert_eq!(
        json["resources"][0]["methods"][1]["req_body"],
        "UsersPostReq"
    );
}

#[test]
fn test_run_generate_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("users.raml");
    fs::write(&spec, FIXTURE).unwrap();
    fs::write(
        dir.path().join("ramlgen.toml"),
        "language = \"rust\"\noutput = \"src/api\"\nformat = false\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "ramlgen",
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--only",
        "types",
    ])
    .unwrap();
    run(&cli).unwrap();

    let out = dir.path().join("src").join("api");
    assert!(out.join("user.rs").exists());
    assert!(out.join("mod.rs").exists());
    assert!(!out.join("users_if.rs").exists());
}

#[test]
fn test_run_generate_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("users.raml");
    fs::write(&spec, FIXTURE).unwrap();
    let missing = dir.path().join("missing.toml");
    let cli = Cli::try_parse_from([
        "ramlgen",
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
