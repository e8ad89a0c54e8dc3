use crate::types::NumFn;

/// Closed numeric range facet over one extractable value per record.
///
/// The facet holds fixed bounds `[min_bound, max_bound]` and a current
/// sub-range. Mutations clamp rather than reject, so
/// `min_bound <= low <= high <= max_bound` holds after every call. The facet
/// is active exactly when the current range differs from the full bounds;
/// while inactive it matches every record, including ones whose extracted
/// value falls outside the bounds.
pub struct RangeFacet<T> {
    id: String,
    title: String,
    min_bound: i64,
    max_bound: i64,
    step: i64,
    extract: NumFn<T>,
    low: i64,
    high: i64,
}

impl<T> RangeFacet<T> {
    /// Create a range facet over `[min_bound, max_bound]` with the full
    /// range selected (inactive). A degenerate `max_bound < min_bound` is
    /// raised to `min_bound`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        min_bound: i64,
        max_bound: i64,
        step: i64,
        extract: impl Fn(&T) -> i64 + Send + Sync + 'static,
    ) -> Self {
        let max_bound = max_bound.max(min_bound);
        Self {
            id: id.into(),
            title: title.into(),
            min_bound,
            max_bound,
            step: step.max(1),
            extract: Box::new(extract),
            low: min_bound,
            high: max_bound,
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

    /// Fixed bounds `(min_bound, max_bound)`
    pub fn bounds(&self) -> (i64, i64) {
        (self.min_bound, self.max_bound)
    }

    /// Slider increment step
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Current selection `(low, high)`
    pub fn current(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    /// Whether the current range differs from the full bounds
    pub fn is_active(&self) -> bool {
        (self.low, self.high) != (self.min_bound, self.max_bound)
    }

    /// Replace the current range.
    ///
    /// Both endpoints are clamped to the bounds independently; if the pair is
    /// then out of order it collapses to a single point at the smaller value.
    pub fn set_range(&mut self, low: i64, high: i64) {
        let low = low.clamp(self.min_bound, self.max_bound);
        let high = high.clamp(self.min_bound, self.max_bound);
        if low > high {
            let point = low.min(high);
            self.low = point;
            self.high = point;
        } else {
            self.low = low;
            self.high = high;
        }
    }

    /// Move the lower endpoint. A new minimum can never exceed the current
    /// maximum; it is pulled down to it, collapsing the range to a point.
    pub fn set_min(&mut self, value: i64) {
        self.low = value.clamp(self.min_bound, self.high);
    }

    /// Move the upper endpoint, clamped to `[low, max_bound]`.
    pub fn set_max(&mut self, value: i64) {
        self.high = value.clamp(self.low, self.max_bound);
    }

    /// Restore the full bounds, deactivating the facet.
    pub fn reset(&mut self) {
        self.low = self.min_bound;
        self.high = self.max_bound;
    }

    /// Whether `record` passes this facet: always true when inactive,
    /// otherwise the extracted value must lie in `[low, high]` (inclusive).
    pub fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        let value = (self.extract)(record);
        value >= self.low && value <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kudos_facet() -> RangeFacet<i64> {
        RangeFacet::new("kudos", "Kudos", 0, 100, 1, |k: &i64| *k)
    }

    fn assert_invariant(facet: &RangeFacet<i64>) {
        let (min, max) = facet.bounds();
        let (low, high) = facet.current();
        assert!(min <= low && low <= high && high <= max);
    }

    #[test]
    fn test_set_range_clamps_to_bounds() {
        let mut facet = kudos_facet();
        facet.set_range(-10, 150);
        assert_eq!(facet.current(), (0, 100));
        assert!(!facet.is_active());
        assert_invariant(&facet);
    }

    #[test]
    fn test_set_range_out_of_order_collapses() {
        let mut facet = kudos_facet();
        facet.set_range(80, 20);
        assert_eq!(facet.current(), (20, 20));
        assert_invariant(&facet);
    }

    #[test]
    fn test_set_min_pulled_down_to_current_max() {
        let mut facet = kudos_facet();
        facet.set_range(10, 50);
        facet.set_min(70);
        assert_eq!(facet.current(), (50, 50));
        assert_invariant(&facet);
    }

    #[test]
    fn test_set_max_pulled_up_to_current_min() {
        let mut facet = kudos_facet();
        facet.set_range(40, 90);
        facet.set_max(10);
        assert_eq!(facet.current(), (40, 40));
        assert_invariant(&facet);
    }

    #[test]
    fn test_reset_deactivates() {
        let mut facet = kudos_facet();
        facet.set_range(30, 60);
        assert!(facet.is_active());
        facet.reset();
        assert_eq!(facet.current(), (0, 100));
        assert!(!facet.is_active());
    }

    #[test]
    fn test_matches_inclusive_endpoints() {
        let mut facet = kudos_facet();
        facet.set_range(30, 60);
        assert!(facet.matches(&30));
        assert!(facet.matches(&60));
        assert!(!facet.matches(&29));
        assert!(!facet.matches(&61));
    }

    #[test]
    fn test_inactive_matches_out_of_bound_values() {
        let facet = kudos_facet();
        assert!(facet.matches(&-5));
        assert!(facet.matches(&5000));
    }

    #[test]
    fn test_degenerate_bounds_raised() {
        let facet = RangeFacet::new("x", "X", 10, 3, 1, |k: &i64| *k);
        assert_eq!(facet.bounds(), (10, 10));
        assert_eq!(facet.current(), (10, 10));
        assert!(!facet.is_active());
    }
}
