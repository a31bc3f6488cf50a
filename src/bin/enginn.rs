//! Enginn API CLI binary.
//!
//! A command-line interface for interacting with the Enginn API.

use clap::Parser;
use enginn::cli::{parse_identifier, Cli, Command, Entity};
use enginn::output::{table, PrettyPrint};
use enginn::{
    Character, DictionaryEntry, EnginnClient, EnginnError, Line, LineTag, Project, Resource,
    ResourceIndex, ResourceKind, Scene, Scope, SynthesisExport, Take, TakeBatch,
};
use serde_json::Value;
use std::process::ExitCode;

/// Run `$body` with `$kind` bound to the resource kind matching `$entity`.
macro_rules! with_kind {
    ($entity:expr, $kind:ident => $body:expr) => {
        match $entity {
            Entity::Project => {
                type $kind = Project;
                $body
            }
            Entity::Character => {
                type $kind = Character;
                $body
            }
            Entity::Take => {
                type $kind = Take;
                $body
            }
            Entity::Line => {
                type $kind = Line;
                $body
            }
            Entity::Scene => {
                type $kind = Scene;
                $body
            }
            Entity::TakeBatch => {
                type $kind = TakeBatch;
                $body
            }
            Entity::LineTag => {
                type $kind = LineTag;
                $body
            }
            Entity::DictionaryEntry => {
                type $kind = DictionaryEntry;
                $body
            }
            Entity::SynthesisExport => {
                type $kind = SynthesisExport;
                $body
            }
        }
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let client = match client_from(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set ENGINN_API_TOKEN environment variable or pass --token");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn client_from(cli: &Cli) -> enginn::Result<EnginnClient> {
    let token = cli
        .token
        .as_deref()
        .ok_or_else(|| EnginnError::ConfigMissing("API token not set".to_string()))?;
    EnginnClient::new(token, &cli.api_url)
}

async fn run(client: &EnginnClient, cli: Cli) -> enginn::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::List {
            entity,
            project,
            page,
            per,
            filters,
            all,
        } => {
            let scope = scope_for(client, entity, project.as_deref())?;
            let options = ListOptions {
                page,
                per,
                filters,
                all,
            };
            with_kind!(entity, K => handle_list::<K>(scope, options, json).await)
        }
        Command::Get {
            entity,
            id,
            project,
        } => {
            let scope = scope_for(client, entity, project.as_deref())?;
            with_kind!(entity, K => {
                let mut resource = Resource::<K>::with_identifier(scope, parse_identifier(&id));
                resource.fetch().await?;
                output_single(&resource, json)
            })
        }
        Command::Create {
            entity,
            project,
            attributes,
        } => {
            let scope = scope_for(client, entity, project.as_deref())?;
            with_kind!(entity, K => {
                let mut resource = Resource::<K>::new(scope, attributes.into_iter().collect::<enginn::Attributes>());
                resource.save().await?;
                output_single(&resource, json)
            })
        }
        Command::Update {
            entity,
            id,
            project,
            attributes,
        } => {
            let scope = scope_for(client, entity, project.as_deref())?;
            with_kind!(entity, K => {
                let mut resource = Resource::<K>::with_identifier(scope, parse_identifier(&id));
                for (key, value) in attributes {
                    resource.set(key, value);
                }
                resource.save().await?;
                output_single(&resource, json)
            })
        }
        Command::Delete {
            entity,
            id,
            project,
        } => {
            let scope = scope_for(client, entity, project.as_deref())?;
            with_kind!(entity, K => {
                let mut resource = Resource::<K>::with_identifier(scope, parse_identifier(&id));
                resource.destroy().await?;
                eprintln!("Deleted {}", resource.route());
                Ok(())
            })
        }
    }
}

/// Root scope for projects, the project's scope for everything else.
fn scope_for(client: &EnginnClient, entity: Entity, project: Option<&str>) -> enginn::Result<Scope> {
    if !entity.needs_project() {
        return Ok(client.scope());
    }
    let uid = project.ok_or_else(|| {
        EnginnError::ConfigMissing(format!("--project is required for {entity:?} resources"))
    })?;
    Ok(client.project(uid).child_scope())
}

struct ListOptions {
    page: Option<u32>,
    per: Option<u32>,
    filters: Vec<(String, Value)>,
    all: bool,
}

async fn handle_list<K: ResourceKind>(
    scope: Scope,
    options: ListOptions,
    json: bool,
) -> enginn::Result<()> {
    let mut index = ResourceIndex::<K>::new(scope).filter(options.filters);
    if let Some(per) = options.per {
        index = index.per(per);
    }

    if options.all {
        let resources = index.collect_all().await?;
        return output_list(&resources, json, None);
    }

    let mut index = index.page(options.page.unwrap_or(1));
    index.fetch().await?;
    let pagination = index.pagination();
    let footer = match (pagination.last, pagination.count) {
        (Some(last), Some(count)) => format!(
            "\nPage {}/{} ({} total items)",
            pagination.current, last, count
        ),
        _ => format!("\nPage {}", pagination.current),
    };
    output_list(index.items(), json, Some(footer))
}

fn output_single<K: ResourceKind>(resource: &Resource<K>, json: bool) -> enginn::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resource.attributes())?);
    } else {
        println!("{}", resource.pretty_print());
    }
    Ok(())
}

fn output_list<K: ResourceKind>(
    resources: &[Resource<K>],
    json: bool,
    footer: Option<String>,
) -> enginn::Result<()> {
    if json {
        let items: Vec<_> = resources.iter().map(Resource::attributes).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("{}", table(resources));
        if let Some(footer) = footer {
            println!("{footer}");
        }
    }
    Ok(())
}
