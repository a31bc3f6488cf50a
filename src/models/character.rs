//! Character resource.

use serde_json::Value;

use crate::models::Take;
use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::traits::ResourceKind;

/// A voiced character of a project.
#[derive(Debug, Clone, Copy)]
pub struct Character;

impl ResourceKind for Character {
    const NAME: &'static str = "Character";
    const PATH: &'static str = "characters";
}

impl Resource<Character> {
    /// The character name.
    pub fn name(&self) -> Option<&str> {
        self.attributes().get_str("name")
    }

    /// Takes recorded or synthesized for this character.
    pub fn takes(&self) -> ResourceIndex<Take> {
        self.related("character_id_eq")
    }

    /// A take by id, not fetched yet.
    pub fn take(&self, id: impl Into<Value>) -> Resource<Take> {
        Resource::with_identifier(self.scope().clone(), id)
    }
}
