//! Line and LineTag resources.

use crate::models::Take;
use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::traits::ResourceKind;

/// A line of dialogue.
#[derive(Debug, Clone, Copy)]
pub struct Line;

impl ResourceKind for Line {
    const NAME: &'static str = "Line";
    const PATH: &'static str = "lines";
}

impl Resource<Line> {
    /// Takes of this line.
    pub fn takes(&self) -> ResourceIndex<Take> {
        self.related("line_id_eq")
    }
}

/// A label attached to lines.
#[derive(Debug, Clone, Copy)]
pub struct LineTag;

impl ResourceKind for LineTag {
    const NAME: &'static str = "LineTag";
    const PATH: &'static str = "line_tags";
}

impl Resource<LineTag> {
    /// The tag name.
    pub fn name(&self) -> Option<&str> {
        self.attributes().get_str("name")
    }

    /// Lines carrying this tag.
    pub fn lines(&self) -> ResourceIndex<Line> {
        self.related("line_tag_id_eq")
    }
}
