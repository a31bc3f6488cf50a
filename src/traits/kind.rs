//! ResourceKind trait describing a concrete API resource.

use convert_case::{Case, Casing};

/// Static description of one API resource type.
///
/// Each marker type (like [`Character`](crate::Character)) implements this
/// trait; [`Resource`](crate::Resource) and
/// [`ResourceIndex`](crate::ResourceIndex) are generic over it.
///
/// # Example
///
/// ```ignore
/// pub struct Color;
///
/// impl ResourceKind for Color {
///     const NAME: &'static str = "Color";
///     const PATH: &'static str = "colors";
/// }
/// ```
pub trait ResourceKind: Send + Sync + 'static {
    /// Type name in PascalCase (e.g. `"TakeBatch"`).
    const NAME: &'static str;

    /// Route segment for the collection (e.g. `"take_batches"`).
    const PATH: &'static str;

    /// Attribute holding the identifier used in routes.
    ///
    /// Also decides whether a resource is new (attribute absent) or existing.
    const IDENTIFIER: &'static str = "id";

    /// Key wrapping the attributes in create/update bodies
    /// (`"TakeBatch"` becomes `"take_batch"`).
    fn resource_name() -> String {
        Self::NAME.to_case(Case::Snake)
    }
}
