use crate::{FetchTicket, FilterSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the catalog collaborator for one result page. The ticket rides
    /// along and comes back with the result so stale replies can be told
    /// apart from current ones.
    FetchPage {
        ticket: FetchTicket,
        query: String,
        filters: FilterSnapshot,
    },
    /// Persist the current filter snapshot, best-effort.
    SaveFilters(FilterSnapshot),
}
