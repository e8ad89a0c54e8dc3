use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Unique identifier for a record in the base collection.
///
/// Ids are assigned by position, so iterating a posting set in ascending id
/// order reproduces insertion order.
pub type RecordId = u32;

/// Extracts one searchable text field from a record.
pub type TextFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// Extracts the discrete value a facet filters on.
pub type KeyFn<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;

/// Extracts the numeric value a range facet filters on.
pub type NumFn<T> = Box<dyn Fn(&T) -> i64 + Send + Sync>;

/// Pure comparator backing a sort criterion.
pub type CmpFn<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Configuration for a [`SearchFilterController`](crate::SearchFilterController)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Quiet period after the last query edit before the effective query
    /// is updated and results recompute
    pub debounce_ms: u64,
    /// Tokens shorter than this are not indexed or matched
    pub min_token_len: usize,
    /// Tokens longer than this are skipped (likely hashes or encoded blobs)
    pub max_token_len: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_token_len: 2,
            max_token_len: 128,
        }
    }
}
