//! Trait definitions for the Enginn client.
//!
//! [`Transport`] is the seam between the resource layer and HTTP, and
//! [`ResourceKind`] is what every concrete API resource implements.

mod kind;
mod transport;

pub use kind::ResourceKind;
pub use transport::{QueryPairs, Transport};
