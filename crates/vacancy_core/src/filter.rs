/// A selectable industry from the catalog's dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Industry {
    pub id: String,
    pub name: String,
}

/// Immutable copy of the filter values at a point in time.
///
/// `expected_salary` is kept verbatim (numeric text) because it round-trips
/// to the fetch request as text; only `has_active_filters` trims it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSnapshot {
    pub industry: Option<Industry>,
    pub expected_salary: String,
    pub only_with_salary: bool,
}

impl FilterSnapshot {
    /// True iff at least one filter is set. Blank salary text counts as
    /// unset.
    pub fn has_active_filters(&self) -> bool {
        self.industry.is_some()
            || !self.expected_salary.trim().is_empty()
            || self.only_with_salary
    }
}

/// Single-writer container for the session's filter values.
///
/// Mutations are synchronous and immediately observable; persistence happens
/// through `Effect::SaveFilters` emitted by `update`, so a failed save never
/// rolls back in-memory state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FilterState {
    current: FilterSnapshot,
}

impl FilterState {
    pub(crate) fn set_industry(&mut self, industry: Option<Industry>) {
        self.current.industry = industry;
    }

    /// `None` normalizes to empty text, matching a cleared input field.
    pub(crate) fn set_salary(&mut self, salary: Option<String>) {
        self.current.expected_salary = salary.unwrap_or_default();
    }

    pub(crate) fn set_only_with_salary(&mut self, only_with_salary: bool) {
        self.current.only_with_salary = only_with_salary;
    }

    pub(crate) fn clear_all(&mut self) {
        self.current = FilterSnapshot::default();
    }

    /// Seeds state from a persisted snapshot at session start.
    pub(crate) fn restore(&mut self, snapshot: FilterSnapshot) {
        self.current = snapshot;
    }

    pub(crate) fn snapshot(&self) -> FilterSnapshot {
        self.current.clone()
    }

    pub(crate) fn has_active_filters(&self) -> bool {
        self.current.has_active_filters()
    }
}

/// Case-insensitive substring filter for the industry picker. A blank
/// needle returns the whole dictionary in catalog order.
pub fn filter_industries(industries: &[Industry], needle: &str) -> Vec<Industry> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return industries.to_vec();
    }
    industries
        .iter()
        .filter(|industry| industry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
