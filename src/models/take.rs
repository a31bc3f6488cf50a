//! Take and TakeBatch resources.

use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::traits::ResourceKind;

/// One rendition of a line by a character.
#[derive(Debug, Clone, Copy)]
pub struct Take;

impl ResourceKind for Take {
    const NAME: &'static str = "Take";
    const PATH: &'static str = "takes";
}

impl Resource<Take> {
    /// Id of the character speaking this take.
    pub fn character_id(&self) -> Option<i64> {
        self.attributes().get_i64("character_id")
    }

    /// Id of the line this take renders.
    pub fn line_id(&self) -> Option<i64> {
        self.attributes().get_i64("line_id")
    }
}

/// A group of takes generated together.
#[derive(Debug, Clone, Copy)]
pub struct TakeBatch;

impl ResourceKind for TakeBatch {
    const NAME: &'static str = "TakeBatch";
    const PATH: &'static str = "take_batches";
}

impl Resource<TakeBatch> {
    /// Takes belonging to this batch.
    pub fn takes(&self) -> ResourceIndex<Take> {
        self.related("take_batch_id_eq")
    }
}
