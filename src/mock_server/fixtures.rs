//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

use super::state::{MockState, Record};

/// Uid of the project seeded by [`Fixtures::default_scenario`].
pub const DEFAULT_PROJECT_UID: &str = "test-project";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// A project with a name.
    pub fn project(name: &str) -> Record {
        record(json!({ "name": name, "language": "en" }))
    }

    /// A character with a name.
    pub fn character(name: &str) -> Record {
        record(json!({ "name": name, "gender": "unknown" }))
    }

    /// A line of dialogue for a character.
    pub fn line(text: &str, character_id: u64, scene_id: u64) -> Record {
        record(json!({
            "text": text,
            "character_id": character_id,
            "scene_id": scene_id,
        }))
    }

    /// A take of a line.
    pub fn take(line_id: u64, character_id: u64) -> Record {
        record(json!({
            "line_id": line_id,
            "character_id": character_id,
            "is_final": false,
        }))
    }

    /// A scene.
    pub fn scene(name: &str) -> Record {
        record(json!({ "name": name }))
    }

    /// Create a default set of test data for common scenarios.
    ///
    /// One project, [`DEFAULT_PROJECT_UID`], holding: characters 1 "Rocky"
    /// and 2 "Adrian"; scene 3 "Training"; lines 4 and 5 spoken by Rocky in
    /// scene 3; takes 6 and 7 of line 4.
    pub fn default_scenario() -> MockState {
        let uid = DEFAULT_PROJECT_UID;
        MockState::new()
            .with_project(uid, Self::project("Test Project"))
            .with_resource(uid, "characters", Self::character("Rocky"))
            .with_resource(uid, "characters", Self::character("Adrian"))
            .with_resource(uid, "scenes", Self::scene("Training"))
            .with_resource(uid, "lines", Self::line("Yo Adrian!", 1, 3))
            .with_resource(uid, "lines", Self::line("It ain't over", 1, 3))
            .with_resource(uid, "takes", Self::take(4, 1))
            .with_resource(uid, "takes", Self::take(4, 1))
    }
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}
