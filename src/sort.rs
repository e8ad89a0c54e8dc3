//! Named sort criteria applied to the filtered result set.

use crate::types::CmpFn;
use std::cmp::Ordering;

/// A named total ordering over records.
///
/// Criteria are registered on the controller and selected by id; the active
/// criterion is applied as the final recomputation step with a stable sort,
/// so records comparing equal keep their base-collection order.
pub struct SortCriterion<T> {
    id: String,
    title: String,
    cmp: CmpFn<T>,
}

impl<T> SortCriterion<T> {
    /// Create a criterion from an arbitrary pure comparator.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cmp: Box::new(cmp),
        }
    }

    /// Criterion ordering records by `key` ascending.
    pub fn ascending_by<K: Ord>(
        id: impl Into<String>,
        title: impl Into<String>,
        key: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, title, move |a, b| key(a).cmp(&key(b)))
    }

    /// Criterion ordering records by `key` descending.
    pub fn descending_by<K: Ord>(
        id: impl Into<String>,
        title: impl Into<String>,
        key: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, title, move |a, b| key(b).cmp(&key(a)))
    }

    /// Criterion identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_by_key() {
        let criterion = SortCriterion::ascending_by("len", "Length", |s: &&str| s.len());
        let mut items = vec!["ccc", "a", "bb"];
        items.sort_by(|a, b| criterion.compare(a, b));
        assert_eq!(items, vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_descending_by_key() {
        let criterion = SortCriterion::descending_by("score", "Score", |v: &i32| *v);
        let mut items = vec![10, 500, 50];
        items.sort_by(|a, b| criterion.compare(a, b));
        assert_eq!(items, vec![500, 50, 10]);
    }
}
