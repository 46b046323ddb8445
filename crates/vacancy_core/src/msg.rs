use crate::{FetchFailure, FetchTicket, FilterSnapshot, Industry, VacancyPreview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted query text (already debounced by the shell). Filters
    /// are read from the session's filter container.
    SearchRequested { query: String },
    /// User scrolled to the end of the accumulated results.
    LoadNextPage,
    /// User emptied the query input.
    SearchCleared,
    /// A page fetch resolved. Stale tickets are discarded on arrival.
    PageFetched {
        ticket: FetchTicket,
        result: Result<Vec<VacancyPreview>, FetchFailure>,
    },
    /// User picked (or cleared) an industry in the filter editor.
    IndustryPicked(Option<Industry>),
    /// User edited the expected-salary field; `None` means cleared.
    SalaryChanged(Option<String>),
    /// User toggled the "only with salary" checkbox.
    OnlyWithSalaryToggled(bool),
    /// User reset every filter.
    FiltersCleared,
    /// Restore persisted filters at session start.
    FiltersRestored(FilterSnapshot),
    /// Fallback for placeholder wiring.
    NoOp,
}
