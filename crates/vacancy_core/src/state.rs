use crate::filter::FilterState;
use crate::{
    AppViewModel, FetchFailure, FetchTicket, FilterSnapshot, Industry, SearchState, VacancyPreview,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    search: SearchSession,
    filters: FilterState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            search: self.search.state.clone(),
            filters: self.filters.snapshot(),
            has_active_filters: self.filters.has_active_filters(),
        }
    }

    /// Returns whether the state changed since the last call, resetting the
    /// flag. The shell broadcasts the view only when this is true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchSession {
        &mut self.search
    }

    pub(crate) fn search(&self) -> &SearchSession {
        &self.search
    }

    pub(crate) fn filters(&self) -> &FilterState {
        &self.filters
    }
}

/// One search interaction context: the current query/filter pair, the
/// pagination cursor, and the accumulated result rows.
///
/// `epoch` tags every outgoing fetch; bumping it (new search, clear)
/// invalidates whatever is still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchSession {
    state: SearchState,
    query: String,
    filters: FilterSnapshot,
    current_page: u32,
    max_pages: u32,
    found: u32,
    accumulated: Vec<VacancyPreview>,
    in_flight: bool,
    epoch: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            state: SearchState::Empty,
            query: String::new(),
            filters: FilterSnapshot::default(),
            current_page: 0,
            max_pages: 1,
            found: 0,
            accumulated: Vec::new(),
            in_flight: false,
            epoch: 0,
        }
    }
}

impl SearchSession {
    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn filters(&self) -> &FilterSnapshot {
        &self.filters
    }

    /// Idempotent-resubmission guard: the exact same query/filter pair as
    /// the last accepted search is a no-op.
    pub(crate) fn is_same_request(&self, query: &str, filters: &FilterSnapshot) -> bool {
        query == self.query && *filters == self.filters
    }

    /// Accepts a new search: resets pagination, invalidates in-flight
    /// fetches and issues the ticket for page 0.
    pub(crate) fn begin_search(&mut self, query: String, filters: FilterSnapshot) -> FetchTicket {
        self.query = query;
        self.filters = filters;
        self.current_page = 0;
        self.max_pages = 1;
        self.found = 0;
        self.accumulated.clear();
        self.epoch += 1;
        self.in_flight = true;
        self.state = SearchState::Loading;
        FetchTicket {
            epoch: self.epoch,
            page: 0,
        }
    }

    /// Advances the pagination cursor if another page exists and nothing is
    /// in flight. Returns the ticket for the fetch to issue, or `None` when
    /// the request is a no-op.
    pub(crate) fn try_next_page(&mut self) -> Option<FetchTicket> {
        if self.in_flight || self.current_page >= self.max_pages.saturating_sub(1) {
            return None;
        }
        self.current_page += 1;
        self.in_flight = true;
        self.state = SearchState::LoadingMore {
            items: self.accumulated.clone(),
        };
        Some(FetchTicket {
            epoch: self.epoch,
            page: self.current_page,
        })
    }

    /// Resets the query and accumulated results. Filters are untouched; the
    /// epoch bump makes any in-flight result stale.
    pub(crate) fn clear(&mut self) {
        self.query.clear();
        self.accumulated.clear();
        self.current_page = 0;
        self.max_pages = 1;
        self.found = 0;
        self.in_flight = false;
        self.epoch += 1;
        self.state = SearchState::Empty;
    }

    /// Applies a fetch outcome. Returns whether anything observable
    /// changed; a stale ticket changes nothing.
    pub(crate) fn apply_fetched(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<VacancyPreview>, FetchFailure>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = false;
        match result {
            Ok(items) if !items.is_empty() => {
                // Page totals ride on every item; read them once per page.
                self.max_pages = self.max_pages.max(items[0].pages);
                self.found = items[0].found;
                if self.current_page == 0 {
                    self.accumulated.clear();
                }
                self.accumulated.extend(items);
                self.state = SearchState::Content {
                    items: self.accumulated.clone(),
                    found: self.found,
                };
            }
            Ok(_) => {
                if self.accumulated.is_empty() {
                    self.state = SearchState::NotFound;
                } else {
                    // An empty append page keeps prior content visible.
                    self.state = SearchState::Content {
                        items: self.accumulated.clone(),
                        found: self.found,
                    };
                }
            }
            Err(failure) => {
                if self.current_page > 0 {
                    // Roll the cursor back so a retried next-page request
                    // re-fetches the page that just failed.
                    self.current_page -= 1;
                    self.state = SearchState::ContentWithLoadingError {
                        items: self.accumulated.clone(),
                    };
                } else {
                    self.state = match failure {
                        FetchFailure::NoConnectivity => SearchState::NoInternet,
                        FetchFailure::Server => SearchState::Error,
                        FetchFailure::NotFound => SearchState::NotFound,
                    };
                }
            }
        }
        true
    }
}

// Filter mutations live on AppState so update.rs has one place to go
// through; each returns the snapshot to persist.
impl AppState {
    pub(crate) fn set_industry(&mut self, industry: Option<Industry>) -> FilterSnapshot {
        self.filters.set_industry(industry);
        self.filters.snapshot()
    }

    pub(crate) fn set_salary(&mut self, salary: Option<String>) -> FilterSnapshot {
        self.filters.set_salary(salary);
        self.filters.snapshot()
    }

    pub(crate) fn set_only_with_salary(&mut self, only_with_salary: bool) -> FilterSnapshot {
        self.filters.set_only_with_salary(only_with_salary);
        self.filters.snapshot()
    }

    pub(crate) fn clear_filters(&mut self) -> FilterSnapshot {
        self.filters.clear_all();
        self.filters.snapshot()
    }

    pub(crate) fn restore_filters(&mut self, snapshot: FilterSnapshot) {
        self.filters.restore(snapshot);
    }
}
