//! # Sift - In-Memory Faceted Search and Filter Engine
//!
//! Sift progressively narrows a bounded, in-memory collection of records
//! through three composable filter mechanisms - free-text search, discrete
//! multi-select facets, and numeric range facets - plus a selectable sort
//! order, recomputing the displayed result on every state change.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Inverted token index with prefix matching over extracted
//!   text fields
//! - [`filter`] - Discrete and range facet filters
//! - [`sort`] - Named sort criteria applied to the filtered set
//! - [`controller`] - The [`SearchFilterController`] composing everything
//!   into one recomputed, debounced result
//! - [`utils`] - Tokenization and query normalization
//!
//! ## Quick Start
//!
//! ```
//! use sift::{DiscreteFacet, RangeFacet, SearchFilterController, SortCriterion};
//!
//! struct Profile {
//!     name: String,
//!     kudos: i64,
//!     tier: u8,
//! }
//!
//! let mut controller = SearchFilterController::new();
//! controller.add_text_field(|p: &Profile| p.name.clone());
//! controller
//!     .register_facet(DiscreteFacet::new("tier", "Tier", |p: &Profile| p.tier))
//!     .unwrap();
//! controller
//!     .register_range(RangeFacet::new("kudos", "Kudos", 0, 1000, 10, |p: &Profile| p.kudos))
//!     .unwrap();
//! controller
//!     .register_sort(SortCriterion::descending_by("kudos", "Kudos", |p: &Profile| p.kudos))
//!     .unwrap();
//!
//! controller.initialize_with_records(vec![
//!     Profile { name: "John".into(), kudos: 500, tier: 1 },
//!     Profile { name: "Jane".into(), kudos: 200, tier: 2 },
//! ]);
//!
//! controller.set_range("kudos", 300, 1000).unwrap();
//! assert_eq!(controller.displayed()[0].name, "John");
//! ```
//!
//! The controller is a plain owned value: all mutators take `&mut self` and
//! recompute synchronously before returning, so a reader never observes a
//! stale or partially updated result. Query edits are the one exception -
//! they restart a debounce window and are applied by polling
//! [`SearchFilterController::poll_debounce`] from the host's event loop.

pub mod controller;
pub mod filter;
pub mod index;
pub mod sort;
pub mod types;
pub mod utils;

pub use controller::SearchFilterController;
pub use filter::{DiscreteFacet, RangeFacet};
pub use index::TextIndex;
pub use sort::SortCriterion;
pub use types::{CmpFn, ControllerConfig, KeyFn, NumFn, RecordId, TextFn};
