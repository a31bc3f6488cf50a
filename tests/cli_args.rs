//! CLI argument parsing tests.

use clap::Parser;
use enginn::cli::{parse_assignment, parse_identifier, Cli, Command, Entity};
use serde_json::json;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["enginn", "get", "character", "7", "--project", "abc"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get {
            entity,
            id,
            project,
        } => {
            assert_eq!(entity, Entity::Character);
            assert_eq!(id, "7");
            assert_eq!(project.as_deref(), Some("abc"));
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_plural_alias() {
    let cli = Cli::parse_from(["enginn", "list", "projects"]);

    match cli.command {
        Command::List { entity, all, .. } => {
            assert_eq!(entity, Entity::Project);
            assert!(!all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_with_filters_and_pagination() {
    let cli = Cli::parse_from([
        "enginn",
        "--json",
        "list",
        "take-batches",
        "--project",
        "abc",
        "--page",
        "2",
        "--per",
        "10",
        "--filter",
        "name_cont=intro",
        "--filter",
        "id_eq=3",
    ]);

    assert!(cli.json);
    match cli.command {
        Command::List {
            entity,
            page,
            per,
            filters,
            ..
        } => {
            assert_eq!(entity, Entity::TakeBatch);
            assert_eq!(page, Some(2));
            assert_eq!(per, Some(10));
            assert_eq!(
                filters,
                vec![
                    ("name_cont".to_string(), json!("intro")),
                    ("id_eq".to_string(), json!(3)),
                ]
            );
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_rejects_page_with_all() {
    let result = Cli::try_parse_from(["enginn", "list", "lines", "--page", "2", "--all"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_update_requires_attributes() {
    let result = Cli::try_parse_from(["enginn", "update", "scene", "1", "--project", "abc"]);
    assert!(result.is_err());

    let cli = Cli::parse_from([
        "enginn", "update", "scene", "1", "--project", "abc", "--set", "name=Outro",
    ]);
    match cli.command {
        Command::Update { attributes, .. } => {
            assert_eq!(attributes, vec![("name".to_string(), json!("Outro"))]);
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "enginn",
        "delete",
        "take",
        "12",
        "--project",
        "abc",
        "--verbose",
        "--token",
        "secret",
        "--api-url",
        "http://localhost:3000",
    ]);

    assert!(cli.verbose);
    assert_eq!(cli.token.as_deref(), Some("secret"));
    assert_eq!(cli.api_url, "http://localhost:3000");
    assert!(matches!(cli.command, Command::Delete { .. }));
}

#[test]
fn test_parse_assignment() {
    assert_eq!(parse_assignment("count=3"), Ok(("count".to_string(), json!(3))));
    assert_eq!(parse_assignment("ok=true"), Ok(("ok".to_string(), json!(true))));
    assert_eq!(
        parse_assignment("name=Rocky Balboa"),
        Ok(("name".to_string(), json!("Rocky Balboa")))
    );
    assert_eq!(parse_assignment("empty="), Ok(("empty".to_string(), json!(""))));
    assert!(parse_assignment("novalue").is_err());
    assert!(parse_assignment("=3").is_err());
}

#[test]
fn test_parse_identifier() {
    assert_eq!(parse_identifier("42"), json!(42));
    assert_eq!(parse_identifier("a1b2"), json!("a1b2"));
}

#[test]
fn test_entity_needs_project() {
    assert!(!Entity::Project.needs_project());
    assert!(Entity::SynthesisExport.needs_project());
}
