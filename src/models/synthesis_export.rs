//! Synthesis export resource.

use crate::traits::ResourceKind;

/// An export of synthesized audio.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisExport;

impl ResourceKind for SynthesisExport {
    const NAME: &'static str = "SynthesisExport";
    const PATH: &'static str = "synthesis_exports";
}
