//! Search/filter controller composing the index, facets, and sort order
//! into one recomputed result.
//!
//! The controller is the only component a presentation layer talks to. It
//! owns the base collection, the text index, every registered filter, and
//! the sort registry, and republishes the displayed result wholesale after
//! every state change. All mutators take `&mut self`, so recomputations can
//! never interleave; the query debouncer is the single deferred action and
//! is polled, never blocked on.

mod debounce;

use crate::filter::{DiscreteFacet, FacetFilter, RangeFacet};
use crate::index::TextIndex;
use crate::sort::SortCriterion;
use crate::types::{ControllerConfig, RecordId, TextFn};
use crate::utils::normalize_query;
use anyhow::{Result, anyhow, bail};
use debounce::QueryDebouncer;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Duration;

/// Reactive controller over an in-memory collection of records.
///
/// Starts uninitialized: every mutator is accepted but the displayed result
/// stays empty (results are never matched against an absent index).
/// [`initialize_with_records`](Self::initialize_with_records) builds the
/// index, swaps in the collection, and recomputes synchronously; it may be
/// called again to reload.
pub struct SearchFilterController<T> {
    config: ControllerConfig,
    text_fields: Vec<TextFn<T>>,
    records: Vec<T>,
    index: Option<TextIndex>,
    facets: Vec<Box<dyn FacetFilter<T>>>,
    ranges: Vec<RangeFacet<T>>,
    sorts: Vec<SortCriterion<T>>,
    active_sort: Option<usize>,
    raw_query: String,
    effective_query: String,
    debounce: QueryDebouncer,
    displayed: Vec<RecordId>,
}

impl<T: Send + Sync + 'static> SearchFilterController<T> {
    /// Create an uninitialized controller with the default configuration
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Create an uninitialized controller with an explicit configuration
    pub fn with_config(config: ControllerConfig) -> Self {
        let debounce = QueryDebouncer::new(Duration::from_millis(config.debounce_ms));
        Self {
            config,
            text_fields: Vec::new(),
            records: Vec::new(),
            index: None,
            facets: Vec::new(),
            ranges: Vec::new(),
            sorts: Vec::new(),
            active_sort: None,
            raw_query: String::new(),
            effective_query: String::new(),
            debounce,
            displayed: Vec::new(),
        }
    }

    /// Add a searchable text field. Takes effect at the next
    /// [`initialize_with_records`](Self::initialize_with_records).
    pub fn add_text_field(&mut self, extract: impl Fn(&T) -> String + Send + Sync + 'static) {
        self.text_fields.push(Box::new(extract));
    }

    /// Register a discrete facet. Fails fast on a duplicate id.
    pub fn register_facet<V>(&mut self, facet: DiscreteFacet<T, V>) -> Result<()>
    where
        V: Eq + Hash + Clone + Send + Sync + 'static,
    {
        if self.facets.iter().any(|f| f.id() == facet.id()) {
            bail!("discrete facet `{}` is already registered", facet.id());
        }
        self.facets.push(Box::new(facet));
        Ok(())
    }

    /// Register a range facet. Fails fast on a duplicate id.
    pub fn register_range(&mut self, range: RangeFacet<T>) -> Result<()> {
        if self.ranges.iter().any(|r| r.id() == range.id()) {
            bail!("range facet `{}` is already registered", range.id());
        }
        self.ranges.push(range);
        Ok(())
    }

    /// Register a sort criterion. Fails fast on a duplicate id.
    pub fn register_sort(&mut self, criterion: SortCriterion<T>) -> Result<()> {
        if self.sorts.iter().any(|s| s.id() == criterion.id()) {
            bail!("sort criterion `{}` is already registered", criterion.id());
        }
        self.sorts.push(criterion);
        Ok(())
    }

    /// Load (or reload) the base collection.
    ///
    /// Builds a fresh index before touching any published state, then swaps
    /// index and collection in together, clears the search query along with
    /// any pending debounced edit, and recomputes synchronously. Facet,
    /// range, and sort state survive a reload.
    pub fn initialize_with_records(&mut self, records: Vec<T>) {
        let index = TextIndex::build(&records, &self.text_fields, &self.config);
        self.records = records;
        self.index = Some(index);
        self.raw_query.clear();
        self.effective_query.clear();
        self.debounce.clear();
        self.recompute();
    }

    /// Whether a collection has been loaded
    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    // ---- Search query ----

    /// Record a query edit.
    ///
    /// The raw query is updated immediately (for echoing back to the caller)
    /// but results do not recompute until the debounce window elapses without
    /// another edit; see [`poll_debounce`](Self::poll_debounce).
    pub fn update_search_query(&mut self, text: &str) {
        self.raw_query = text.to_string();
        self.debounce.record_edit(text.to_string());
    }

    /// Apply a pending query edit if its debounce window has elapsed.
    ///
    /// Returns true when the effective query changed and results were
    /// recomputed. The host drives this from its timer or event loop.
    pub fn poll_debounce(&mut self) -> bool {
        if !self.debounce.is_ready() {
            return false;
        }
        let Some(text) = self.debounce.flush() else {
            return false;
        };
        self.effective_query = normalize_query(&text);
        self.recompute();
        true
    }

    /// Time until a pending query edit is ready to apply, or None when no
    /// edit is pending
    pub fn debounce_remaining(&self) -> Option<Duration> {
        if self.debounce.has_pending() {
            self.debounce.time_until_ready()
        } else {
            None
        }
    }

    /// Reset the query to empty and recompute immediately, cancelling any
    /// pending debounced edit. This is a direct reset, not a query edit.
    pub fn clear_search(&mut self) {
        self.raw_query.clear();
        self.effective_query.clear();
        self.debounce.clear();
        self.recompute();
    }

    /// Raw query text as typed
    pub fn search_query(&self) -> &str {
        &self.raw_query
    }

    /// Trimmed, case-normalized query currently applied to results
    pub fn effective_query(&self) -> &str {
        &self.effective_query
    }

    // ---- Discrete facets ----

    /// Flip membership of `value` in the selection of facet `id` and
    /// recompute. Errors on an unknown id or a value type mismatch.
    pub fn toggle_facet<V>(&mut self, id: &str, value: V) -> Result<()>
    where
        V: Eq + Hash + Clone + Send + Sync + 'static,
    {
        let slot = self.facet_slot(id)?;
        self.facets[slot]
            .as_any_mut()
            .downcast_mut::<DiscreteFacet<T, V>>()
            .ok_or_else(|| anyhow!("facet `{id}` does not hold values of the requested type"))?
            .toggle(value);
        self.recompute();
        Ok(())
    }

    /// Clear the selection of facet `id` and recompute.
    pub fn reset_facet(&mut self, id: &str) -> Result<()> {
        let slot = self.facet_slot(id)?;
        self.facets[slot].reset();
        self.recompute();
        Ok(())
    }

    /// Currently selected values of facet `id`
    pub fn facet_selected<V>(&self, id: &str) -> Result<&HashSet<V>>
    where
        V: Eq + Hash + Clone + Send + Sync + 'static,
    {
        let slot = self.facet_slot(id)?;
        let facet = self.facets[slot]
            .as_any()
            .downcast_ref::<DiscreteFacet<T, V>>()
            .ok_or_else(|| anyhow!("facet `{id}` does not hold values of the requested type"))?;
        Ok(facet.selected())
    }

    /// Whether facet `id` has any selection
    pub fn facet_is_active(&self, id: &str) -> Result<bool> {
        Ok(self.facets[self.facet_slot(id)?].is_active())
    }

    /// Display title of facet `id`
    pub fn facet_title(&self, id: &str) -> Result<&str> {
        Ok(self.facets[self.facet_slot(id)?].title())
    }

    /// Ids of every registered discrete facet, in registration order
    pub fn facet_ids(&self) -> Vec<&str> {
        self.facets.iter().map(|f| f.id()).collect()
    }

    /// Count, per value of facet `id`, the records that pass the search
    /// constraint and every *other* filter.
    ///
    /// The facet's own selection is excluded so the counts show what each
    /// choice would yield if toggled.
    pub fn facet_counts<V>(&self, id: &str) -> Result<HashMap<V, usize>>
    where
        V: Eq + Hash + Clone + Send + Sync + 'static,
    {
        let slot = self.facet_slot(id)?;
        let facet = self.facets[slot]
            .as_any()
            .downcast_ref::<DiscreteFacet<T, V>>()
            .ok_or_else(|| anyhow!("facet `{id}` does not hold values of the requested type"))?;

        let constraint = self
            .index
            .as_ref()
            .and_then(|index| index.query(&self.effective_query));

        let candidates = self
            .records
            .iter()
            .enumerate()
            .filter(|(pos, record)| {
                constraint
                    .as_ref()
                    .is_none_or(|matched| matched.contains(*pos as RecordId))
                    && self
                        .facets
                        .iter()
                        .enumerate()
                        .all(|(i, other)| i == slot || other.matches(record))
                    && self.ranges.iter().all(|r| r.matches(record))
            })
            .map(|(_, record)| record);

        Ok(facet.count_values(candidates))
    }

    // ---- Range facets ----

    /// Replace the current range of facet `id` (clamped) and recompute.
    pub fn set_range(&mut self, id: &str, low: i64, high: i64) -> Result<()> {
        let slot = self.range_slot(id)?;
        self.ranges[slot].set_range(low, high);
        self.recompute();
        Ok(())
    }

    /// Move the lower endpoint of facet `id` (clamped) and recompute.
    pub fn set_range_min(&mut self, id: &str, value: i64) -> Result<()> {
        let slot = self.range_slot(id)?;
        self.ranges[slot].set_min(value);
        self.recompute();
        Ok(())
    }

    /// Move the upper endpoint of facet `id` (clamped) and recompute.
    pub fn set_range_max(&mut self, id: &str, value: i64) -> Result<()> {
        let slot = self.range_slot(id)?;
        self.ranges[slot].set_max(value);
        self.recompute();
        Ok(())
    }

    /// Restore facet `id` to its full bounds and recompute.
    pub fn reset_range(&mut self, id: &str) -> Result<()> {
        let slot = self.range_slot(id)?;
        self.ranges[slot].reset();
        self.recompute();
        Ok(())
    }

    /// Current `(low, high)` selection of range facet `id`
    pub fn range(&self, id: &str) -> Result<(i64, i64)> {
        Ok(self.ranges[self.range_slot(id)?].current())
    }

    /// Fixed `(min_bound, max_bound)` of range facet `id`
    pub fn range_bounds(&self, id: &str) -> Result<(i64, i64)> {
        Ok(self.ranges[self.range_slot(id)?].bounds())
    }

    /// Slider step of range facet `id`
    pub fn range_step(&self, id: &str) -> Result<i64> {
        Ok(self.ranges[self.range_slot(id)?].step())
    }

    /// Whether range facet `id` is narrowed from its full bounds
    pub fn range_is_active(&self, id: &str) -> Result<bool> {
        Ok(self.ranges[self.range_slot(id)?].is_active())
    }

    /// Ids of every registered range facet, in registration order
    pub fn range_ids(&self) -> Vec<&str> {
        self.ranges.iter().map(|r| r.id()).collect()
    }

    // ---- Sort ----

    /// Select the active sort criterion by id, or None for base-collection
    /// order. Recomputes immediately.
    pub fn set_sort_criterion(&mut self, id: Option<&str>) -> Result<()> {
        self.active_sort = match id {
            Some(id) => Some(self.sort_slot(id)?),
            None => None,
        };
        self.recompute();
        Ok(())
    }

    /// Id of the active sort criterion, if any
    pub fn sort_criterion(&self) -> Option<&str> {
        self.active_sort.map(|slot| self.sorts[slot].id())
    }

    /// Ids of every registered sort criterion, in registration order
    pub fn sort_ids(&self) -> Vec<&str> {
        self.sorts.iter().map(|s| s.id()).collect()
    }

    // ---- Output ----

    /// Reset every discrete and range facet to inactive and recompute.
    /// The query and sort criterion are left untouched.
    pub fn clear_all_filters(&mut self) {
        for facet in &mut self.facets {
            facet.reset();
        }
        for range in &mut self.ranges {
            range.reset();
        }
        self.recompute();
    }

    /// Records currently passing every active filter, in sorted order.
    /// Always reflects the most recent synchronous recomputation.
    pub fn displayed(&self) -> Vec<&T> {
        self.displayed
            .iter()
            .map(|&id| &self.records[id as usize])
            .collect()
    }

    /// Ids of the displayed records
    pub fn displayed_ids(&self) -> &[RecordId] {
        &self.displayed
    }

    // ---- Internals ----

    fn facet_slot(&self, id: &str) -> Result<usize> {
        self.facets
            .iter()
            .position(|f| f.id() == id)
            .ok_or_else(|| anyhow!("no discrete facet registered with id `{id}`"))
    }

    fn range_slot(&self, id: &str) -> Result<usize> {
        self.ranges
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| anyhow!("no range facet registered with id `{id}`"))
    }

    fn sort_slot(&self, id: &str) -> Result<usize> {
        self.sorts
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| anyhow!("no sort criterion registered with id `{id}`"))
    }

    /// Recompute the displayed result from current state, run to completion.
    fn recompute(&mut self) {
        let Some(index) = &self.index else {
            // Uninitialized: never expose records matched against an absent
            // index
            self.displayed.clear();
            return;
        };

        let constraint = index.query(&self.effective_query);

        let mut ids: Vec<RecordId> = Vec::new();
        {
            // Short-circuits per record on the first failing predicate; the
            // predicates are pure, so evaluation order cannot change the
            // result.
            let passes = |record: &T| {
                self.facets.iter().all(|f| f.matches(record))
                    && self.ranges.iter().all(|r| r.matches(record))
            };

            match &constraint {
                Some(matched) => {
                    // Bitmap iteration is ascending, which is insertion order
                    for id in matched {
                        if let Some(record) = self.records.get(id as usize) {
                            if passes(record) {
                                ids.push(id);
                            }
                        }
                    }
                }
                None => {
                    for (pos, record) in self.records.iter().enumerate() {
                        if passes(record) {
                            ids.push(pos as RecordId);
                        }
                    }
                }
            }
        }

        if let Some(slot) = self.active_sort {
            let criterion = &self.sorts[slot];
            let records = &self.records;
            // sort_by is stable: equal keys keep base-collection order
            ids.sort_by(|&a, &b| criterion.compare(&records[a as usize], &records[b as usize]));
        }

        self.displayed = ids;
    }
}

impl<T: Send + Sync + 'static> Default for SearchFilterController<T> {
    fn default() -> Self {
        Self::new()
    }
}
