//! Scene resource.

use crate::models::Line;
use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::traits::ResourceKind;

/// A scene grouping lines of a script.
#[derive(Debug, Clone, Copy)]
pub struct Scene;

impl ResourceKind for Scene {
    const NAME: &'static str = "Scene";
    const PATH: &'static str = "scenes";
}

impl Resource<Scene> {
    /// The scene name.
    pub fn name(&self) -> Option<&str> {
        self.attributes().get_str("name")
    }

    /// Lines of this scene.
    pub fn lines(&self) -> ResourceIndex<Line> {
        self.related("scene_id_eq")
    }
}
