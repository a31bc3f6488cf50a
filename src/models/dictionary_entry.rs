//! Pronunciation dictionary entries.

use crate::resource::Resource;
use crate::traits::ResourceKind;

/// A word and how the synthesizer should pronounce it.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryEntry;

impl ResourceKind for DictionaryEntry {
    const NAME: &'static str = "DictionaryEntry";
    const PATH: &'static str = "dictionary_entries";
}

impl Resource<DictionaryEntry> {
    /// The written form.
    pub fn word(&self) -> Option<&str> {
        self.attributes().get_str("word")
    }
}
