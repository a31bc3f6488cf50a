//! Enginn API resource kinds.
//!
//! Each kind is a marker type implementing
//! [`ResourceKind`](crate::ResourceKind); its typed accessors and
//! relationship helpers are inherent methods on
//! [`Resource<Kind>`](crate::Resource).

mod character;
mod dictionary_entry;
mod line;
mod project;
mod scene;
mod synthesis_export;
mod take;

pub use character::*;
pub use dictionary_entry::*;
pub use line::*;
pub use project::*;
pub use scene::*;
pub use synthesis_export::*;
pub use take::*;
