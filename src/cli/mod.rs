//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the enginn binary.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::client::DEFAULT_API_URL;

/// Enginn API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "enginn", about = "Enginn API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    /// API token.
    #[arg(long, global = true, env = "ENGINN_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL.
    #[arg(long, global = true, env = "ENGINN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List resources with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Project uid (required for everything but projects).
        #[arg(long)]
        project: Option<String>,

        /// Page number (1-indexed).
        #[arg(long, conflicts_with = "all")]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per: Option<u32>,

        /// Filter as `key=value`, sent as `q[key]=value`. Repeatable.
        #[arg(long = "filter", value_parser = parse_assignment)]
        filters: Vec<(String, Value)>,

        /// Walk every page instead of printing one.
        #[arg(long)]
        all: bool,
    },

    /// Get a single resource by identifier.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The uid (projects) or id (everything else).
        id: String,

        /// Project uid (required for everything but projects).
        #[arg(long)]
        project: Option<String>,
    },

    /// Create a resource.
    Create {
        /// The type of resource to create.
        entity: Entity,

        /// Project uid (required for everything but projects).
        #[arg(long)]
        project: Option<String>,

        /// Attribute as `key=value`. Repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        attributes: Vec<(String, Value)>,
    },

    /// Update attributes of a resource.
    Update {
        /// The type of resource to update.
        entity: Entity,

        /// The uid (projects) or id (everything else).
        id: String,

        /// Project uid (required for everything but projects).
        #[arg(long)]
        project: Option<String>,

        /// Attribute as `key=value`. Repeatable.
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        attributes: Vec<(String, Value)>,
    },

    /// Delete a resource.
    Delete {
        /// The type of resource to delete.
        entity: Entity,

        /// The uid (projects) or id (everything else).
        id: String,

        /// Project uid (required for everything but projects).
        #[arg(long)]
        project: Option<String>,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A project.
    #[value(alias = "projects")]
    Project,
    /// A character of a project.
    #[value(alias = "characters")]
    Character,
    /// A take (one rendition of a line).
    #[value(alias = "takes")]
    Take,
    /// A line of dialogue.
    #[value(alias = "lines")]
    Line,
    /// A scene.
    #[value(alias = "scenes")]
    Scene,
    /// A batch of takes.
    #[value(alias = "take-batches")]
    TakeBatch,
    /// A line tag.
    #[value(alias = "line-tags")]
    LineTag,
    /// A pronunciation dictionary entry.
    #[value(alias = "dictionary-entries")]
    DictionaryEntry,
    /// A synthesis export.
    #[value(alias = "synthesis-exports")]
    SynthesisExport,
}

impl Entity {
    /// Whether resources of this type live under a project.
    pub fn needs_project(self) -> bool {
        self != Self::Project
    }
}

/// Parse `key=value`; the value is read as JSON when it parses, else kept as
/// a string (`count=3` is a number, `name=Rocky` a string).
pub fn parse_assignment(input: &str) -> Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{input}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{input}'"));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Read an identifier argument: all-digit input becomes a number.
pub fn parse_identifier(input: &str) -> Value {
    input
        .parse::<u64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(input.to_string()))
}
