use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchRequested { query } => {
            // Blank text and the unchanged query/filter pair are no-ops.
            if query.trim().is_empty() {
                return (state, Vec::new());
            }
            let filters = state.filters().snapshot();
            if state.search().is_same_request(&query, &filters) {
                return (state, Vec::new());
            }
            let ticket = state
                .search_mut()
                .begin_search(query.clone(), filters.clone());
            state.mark_dirty();
            vec![Effect::FetchPage {
                ticket,
                query,
                filters,
            }]
        }
        Msg::LoadNextPage => match state.search_mut().try_next_page() {
            Some(ticket) => {
                state.mark_dirty();
                let query = state.search().query().to_owned();
                let filters = state.search().filters().clone();
                vec![Effect::FetchPage {
                    ticket,
                    query,
                    filters,
                }]
            }
            None => Vec::new(),
        },
        Msg::SearchCleared => {
            state.search_mut().clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageFetched { ticket, result } => {
            if state.search_mut().apply_fetched(ticket, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::IndustryPicked(industry) => {
            let snapshot = state.set_industry(industry);
            state.mark_dirty();
            vec![Effect::SaveFilters(snapshot)]
        }
        Msg::SalaryChanged(salary) => {
            let snapshot = state.set_salary(salary);
            state.mark_dirty();
            vec![Effect::SaveFilters(snapshot)]
        }
        Msg::OnlyWithSalaryToggled(only_with_salary) => {
            let snapshot = state.set_only_with_salary(only_with_salary);
            state.mark_dirty();
            vec![Effect::SaveFilters(snapshot)]
        }
        Msg::FiltersCleared => {
            let snapshot = state.clear_filters();
            state.mark_dirty();
            vec![Effect::SaveFilters(snapshot)]
        }
        Msg::FiltersRestored(snapshot) => {
            // Seeding from disk is not a user mutation; no save is emitted.
            state.restore_filters(snapshot);
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
