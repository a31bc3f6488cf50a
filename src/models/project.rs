//! Project resource and its child collections.

use serde_json::Value;

use crate::models::{
    Character, DictionaryEntry, Line, LineTag, Scene, SynthesisExport, Take, TakeBatch,
};
use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::scope::Scope;
use crate::traits::ResourceKind;

/// An Enginn project.
///
/// Projects are the top-level containers: characters, lines, scenes, takes
/// and everything else live under `projects/{uid}`. Projects are addressed
/// by their opaque `uid` rather than their numeric `id`.
#[derive(Debug, Clone, Copy)]
pub struct Project;

impl ResourceKind for Project {
    const NAME: &'static str = "Project";
    const PATH: &'static str = "projects";
    const IDENTIFIER: &'static str = "uid";
}

impl Resource<Project> {
    /// The project uid.
    pub fn uid(&self) -> Option<&str> {
        self.attributes().get_str("uid")
    }

    /// The project name.
    pub fn name(&self) -> Option<&str> {
        self.attributes().get_str("name")
    }

    /// Scope for resources living under this project.
    pub fn child_scope(&self) -> Scope {
        self.scope().nested(self.route())
    }

    /// Characters of this project.
    pub fn characters(&self) -> ResourceIndex<Character> {
        ResourceIndex::new(self.child_scope())
    }

    /// A character of this project by id, not fetched yet.
    pub fn character(&self, id: impl Into<Value>) -> Resource<Character> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Takes of this project.
    pub fn takes(&self) -> ResourceIndex<Take> {
        ResourceIndex::new(self.child_scope())
    }

    /// A take of this project by id, not fetched yet.
    pub fn take(&self, id: impl Into<Value>) -> Resource<Take> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Lines of this project.
    pub fn lines(&self) -> ResourceIndex<Line> {
        ResourceIndex::new(self.child_scope())
    }

    /// A line of this project by id, not fetched yet.
    pub fn line(&self, id: impl Into<Value>) -> Resource<Line> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Scenes of this project.
    pub fn scenes(&self) -> ResourceIndex<Scene> {
        ResourceIndex::new(self.child_scope())
    }

    /// A scene of this project by id, not fetched yet.
    pub fn scene(&self, id: impl Into<Value>) -> Resource<Scene> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Take batches of this project.
    pub fn take_batches(&self) -> ResourceIndex<TakeBatch> {
        ResourceIndex::new(self.child_scope())
    }

    /// A take batch of this project by id, not fetched yet.
    pub fn take_batch(&self, id: impl Into<Value>) -> Resource<TakeBatch> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Line tags of this project.
    pub fn line_tags(&self) -> ResourceIndex<LineTag> {
        ResourceIndex::new(self.child_scope())
    }

    /// A line tag of this project by id, not fetched yet.
    pub fn line_tag(&self, id: impl Into<Value>) -> Resource<LineTag> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Pronunciation dictionary of this project.
    pub fn dictionary_entries(&self) -> ResourceIndex<DictionaryEntry> {
        ResourceIndex::new(self.child_scope())
    }

    /// A dictionary entry of this project by id, not fetched yet.
    pub fn dictionary_entry(&self, id: impl Into<Value>) -> Resource<DictionaryEntry> {
        Resource::with_identifier(self.child_scope(), id)
    }

    /// Synthesis exports of this project.
    pub fn synthesis_exports(&self) -> ResourceIndex<SynthesisExport> {
        ResourceIndex::new(self.child_scope())
    }

    /// A synthesis export of this project by id, not fetched yet.
    pub fn synthesis_export(&self, id: impl Into<Value>) -> Resource<SynthesisExport> {
        Resource::with_identifier(self.child_scope(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnginnClient;

    fn project() -> Resource<Project> {
        EnginnClient::new("token", "http://localhost")
            .unwrap()
            .project("abc")
    }

    #[test]
    fn test_project_routes_by_uid() {
        let project = project();
        assert_eq!(project.route(), "projects/abc");
        assert_eq!(project.uid(), Some("abc"));
        assert!(!project.is_new());
    }

    #[test]
    fn test_project_with_only_id_is_new() {
        let client = EnginnClient::new("token", "http://localhost").unwrap();
        let project = Resource::<Project>::new(client.scope(), [("id", 1)]);
        assert!(project.is_new());
        assert_eq!(project.route(), "projects");
    }

    #[test]
    fn test_child_routes() {
        let project = project();
        assert_eq!(project.characters().route(), "projects/abc/characters");
        assert_eq!(project.takes().route(), "projects/abc/takes");
        assert_eq!(project.lines().route(), "projects/abc/lines");
        assert_eq!(project.scenes().route(), "projects/abc/scenes");
        assert_eq!(project.take_batches().route(), "projects/abc/take_batches");
        assert_eq!(project.line_tags().route(), "projects/abc/line_tags");
        assert_eq!(
            project.dictionary_entries().route(),
            "projects/abc/dictionary_entries"
        );
        assert_eq!(
            project.synthesis_exports().route(),
            "projects/abc/synthesis_exports"
        );
        assert_eq!(project.character(42).route(), "projects/abc/characters/42");
        assert_eq!(project.take_batch(7).route(), "projects/abc/take_batches/7");
    }
}
