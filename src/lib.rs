//! Enginn API client library.
//!
//! A Rust library for the Enginn voice-production REST API. Every API
//! resource (projects, characters, takes, lines, scenes...) is handled by two
//! generic types:
//!
//! - [`Resource`] - one remote object with a dynamic attribute bag that can
//!   be fetched, saved (created or updated) and destroyed
//! - [`ResourceIndex`] - a filterable, paginated query over resources of one
//!   kind, iterated lazily page by page through a [`Cursor`]
//!
//! Concrete kinds such as [`Project`] or [`Character`] implement
//! [`ResourceKind`] and add typed accessors and relationship helpers.
//!
//! # Quick Start
//!
//! ```no_run
//! use enginn::EnginnClient;
//!
//! #[tokio::main]
//! async fn main() -> enginn::Result<()> {
//!     // Create client from environment variables
//!     let client = EnginnClient::from_env()?;
//!
//!     // Fetch a project by uid
//!     let mut project = client.project("a1b2c3");
//!     project.fetch().await?;
//!     println!("Project: {:?}", project.name());
//!
//!     // Iterate over every character named "Rocky", 50 per request
//!     let mut characters = project.characters().filter([("name_eq", "Rocky")]).per(50);
//!     let mut cursor = characters.iter();
//!     while let Some(character) = cursor.next().await {
//!         let mut character = character?;
//!
//!         // Navigate to related resources
//!         let takes = character.takes().collect_all().await?;
//!         println!("{:?}: {} takes", character.name(), takes.len());
//!
//!         // Mutate and persist
//!         character.set("description", "A boxer");
//!         character.save().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Request methods return [`EnginnError`]; API failures carry a
//! [`RemoteError`] whose [`ErrorKind`] is derived from the HTTP status.
//! Each request method also has a `*_quietly` variant that records the error
//! on the instance and returns `false` instead.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ENGINN_API_TOKEN` (required) - Your Enginn API token
//! - `ENGINN_API_URL` (optional) - Base URL (defaults to `https://app.enginn.tech/api/v1`)

mod attributes;
pub mod cli;
mod client;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
pub mod output;
mod pagination;
mod resource;
mod resource_index;
mod scope;
mod traits;

// Re-export core types
pub use attributes::Attributes;
pub use client::{EnginnClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{EnginnError, ErrorKind, RemoteError, Result};
pub use pagination::{Filters, Pagination, MAX_PAGES};
pub use resource::Resource;
pub use resource_index::{Cursor, ResourceIndex};
pub use scope::Scope;

// Re-export traits
pub use traits::{QueryPairs, ResourceKind, Transport};

// Re-export resource kinds
pub use models::{
    Character, DictionaryEntry, Line, LineTag, Project, Scene, SynthesisExport, Take, TakeBatch,
};
