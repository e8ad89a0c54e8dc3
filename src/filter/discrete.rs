use crate::filter::FacetFilter;
use crate::types::KeyFn;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Multi-select facet over one extractable value per record.
///
/// Holds the set of currently selected values; an empty selection means the
/// facet is inactive and matches every record. Toggling has set semantics,
/// so toggling the same value twice restores the prior selection.
pub struct DiscreteFacet<T, V> {
    id: String,
    title: String,
    extract: KeyFn<T, V>,
    selected: HashSet<V>,
}

impl<T, V> DiscreteFacet<T, V>
where
    V: Eq + Hash + Clone,
{
    /// Create a facet filtering on the value produced by `extract`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        extract: impl Fn(&T) -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            extract: Box::new(extract),
            selected: HashSet::new(),
        }
    }

    /// Facet identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Flip membership of `value` in the selection set.
    pub fn toggle(&mut self, value: V) {
        if !self.selected.remove(&value) {
            self.selected.insert(value);
        }
    }

    /// Clear the selection, deactivating the facet.
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    /// Currently selected values
    pub fn selected(&self) -> &HashSet<V> {
        &self.selected
    }

    /// Whether any value is selected
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Whether `record` passes this facet: always true when inactive,
    /// otherwise the extracted value must be selected.
    pub fn matches(&self, record: &T) -> bool {
        self.selected.is_empty() || self.selected.contains(&(self.extract)(record))
    }

    /// Count how many of `records` carry each value of this facet.
    pub(crate) fn count_values<'a>(
        &self,
        records: impl Iterator<Item = &'a T>,
    ) -> HashMap<V, usize>
    where
        T: 'a,
    {
        let mut counts: HashMap<V, usize> = HashMap::new();
        for record in records {
            *counts.entry((self.extract)(record)).or_insert(0) += 1;
        }
        counts
    }
}

impl<T, V> FacetFilter<T> for DiscreteFacet<T, V>
where
    T: 'static,
    V: Eq + Hash + Clone + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn matches(&self, record: &T) -> bool {
        DiscreteFacet::matches(self, record)
    }

    fn is_active(&self) -> bool {
        DiscreteFacet::is_active(self)
    }

    fn reset(&mut self) {
        DiscreteFacet::reset(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
