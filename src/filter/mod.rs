//! Filter components composed by the controller.
//!
//! - [`discrete`] - Multi-select facets over one comparable value per record
//! - [`range`] - Closed numeric range facets with clamping mutators
//!
//! Every filter is a pure predicate: inactive filters match everything, and
//! the controller combines active ones conjunctively.

pub mod discrete;
pub mod range;

pub use discrete::DiscreteFacet;
pub use range::RangeFacet;

use std::any::Any;

/// Type-erased seam over [`DiscreteFacet`], letting the controller hold
/// facets with different value types in one collection and route mutations
/// by id. Concrete value types are recovered by downcasting.
pub(crate) trait FacetFilter<T>: Send + Sync {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn matches(&self, record: &T) -> bool;
    fn is_active(&self) -> bool;
    fn reset(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
