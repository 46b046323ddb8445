use std::sync::Once;

use vacancy_core::{
    update, AppState, Effect, FetchFailure, FetchTicket, Msg, SearchState, VacancyPreview,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(session_logging::initialize_for_tests);
}

fn preview(id: &str, found: u32, pages: u32) -> VacancyPreview {
    VacancyPreview {
        id: id.to_string(),
        name: format!("Vacancy {id}"),
        employer_name: "Acme".to_string(),
        salary_from: Some(100_000),
        salary_to: None,
        currency: Some("RUR".to_string()),
        logo_url: None,
        found,
        pages,
    }
}

fn search(state: AppState, query: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SearchRequested {
            query: query.to_string(),
        },
    )
}

fn fetch_ticket(effects: &[Effect]) -> FetchTicket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("fetch effect")
}

#[test]
fn blank_query_is_noop() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = search(state.clone(), "   ");
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = search(state.clone(), "");
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn accepted_search_enters_loading_and_fetches_page_zero() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");

    assert_eq!(state.view().search, SearchState::Loading);
    assert_eq!(effects.len(), 1);
    let ticket = fetch_ticket(&effects);
    assert_eq!(ticket.page, 0);
    match &effects[0] {
        Effect::FetchPage { query, .. } => assert_eq!(query, "engineer"),
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn repeated_query_and_filters_pair_is_noop() {
    init_logging();
    let (state, first) = search(AppState::new(), "engineer");
    assert_eq!(first.len(), 1);

    let (next, effects) = search(state.clone(), "engineer");
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn non_empty_first_page_becomes_content() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);

    let items = vec![preview("1", 2, 1), preview("2", 2, 1)];
    let (state, effects) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(items.clone()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().search, SearchState::Content { items, found: 2 });
}

#[test]
fn empty_first_page_becomes_not_found() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);

    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(state.view().search, SearchState::NotFound);
}

#[test]
fn next_page_is_noop_on_last_page() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(vec![preview("1", 2, 1), preview("2", 2, 1)]),
        },
    );

    let (next, effects) = update(state.clone(), Msg::LoadNextPage);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn page_zero_failures_replace_visible_state() {
    init_logging();
    for (failure, expected) in [
        (FetchFailure::NoConnectivity, SearchState::NoInternet),
        (FetchFailure::Server, SearchState::Error),
        (FetchFailure::NotFound, SearchState::NotFound),
    ] {
        let (state, effects) = search(AppState::new(), "x");
        let ticket = fetch_ticket(&effects);
        let (state, _) = update(
            state,
            Msg::PageFetched {
                ticket,
                result: Err(failure),
            },
        );
        assert_eq!(state.view().search, expected);
    }
}

#[test]
fn append_failure_keeps_loaded_content() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let items = vec![preview("1", 30, 2), preview("2", 30, 2)];
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(items.clone()),
        },
    );

    let (state, effects) = update(state, Msg::LoadNextPage);
    let ticket = fetch_ticket(&effects);
    assert_eq!(ticket.page, 1);
    assert_eq!(
        state.view().search,
        SearchState::LoadingMore {
            items: items.clone()
        }
    );

    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Err(FetchFailure::Server),
        },
    );
    assert_eq!(
        state.view().search,
        SearchState::ContentWithLoadingError { items }
    );
}

#[test]
fn retry_after_append_failure_refetches_same_page() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(vec![preview("1", 30, 3)]),
        },
    );

    let (state, effects) = update(state, Msg::LoadNextPage);
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Err(FetchFailure::NoConnectivity),
        },
    );

    let (_, effects) = update(state, Msg::LoadNextPage);
    assert_eq!(fetch_ticket(&effects).page, ticket.page);
}

#[test]
fn next_page_is_noop_while_fetch_in_flight() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(vec![preview("1", 30, 3)]),
        },
    );

    let (state, effects) = update(state, Msg::LoadNextPage);
    assert_eq!(effects.len(), 1);

    let (next, effects) = update(state.clone(), Msg::LoadNextPage);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn load_more_appends_in_page_order() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let first = vec![preview("1", 3, 2), preview("2", 3, 2)];
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(first.clone()),
        },
    );

    let (state, effects) = update(state, Msg::LoadNextPage);
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(vec![preview("3", 3, 2)]),
        },
    );

    let mut all = first;
    all.push(preview("3", 3, 2));
    assert_eq!(
        state.view().search,
        SearchState::Content {
            items: all,
            found: 3
        }
    );
}

#[test]
fn empty_append_page_returns_to_content() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);
    let items = vec![preview("1", 2, 2), preview("2", 2, 2)];
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(items.clone()),
        },
    );

    let (state, effects) = update(state, Msg::LoadNextPage);
    let ticket = fetch_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(state.view().search, SearchState::Content { items, found: 2 });
}

#[test]
fn superseded_fetch_result_is_discarded() {
    init_logging();
    let (state, effects) = search(AppState::new(), "first");
    let stale_ticket = fetch_ticket(&effects);

    let (state, effects) = search(state, "second");
    let current_ticket = fetch_ticket(&effects);
    assert_ne!(stale_ticket.epoch, current_ticket.epoch);

    let (state, effects) = update(
        state,
        Msg::PageFetched {
            ticket: stale_ticket,
            result: Ok(vec![preview("stale", 1, 1)]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().search, SearchState::Loading);

    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket: current_ticket,
            result: Ok(vec![preview("fresh", 1, 1)]),
        },
    );
    assert_eq!(
        state.view().search,
        SearchState::Content {
            items: vec![preview("fresh", 1, 1)],
            found: 1
        }
    );
}

#[test]
fn clear_resets_to_empty_and_discards_inflight_result() {
    init_logging();
    let (state, effects) = search(AppState::new(), "engineer");
    let ticket = fetch_ticket(&effects);

    let (state, effects) = update(state, Msg::SearchCleared);
    assert!(effects.is_empty());
    assert_eq!(state.view().search, SearchState::Empty);

    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket,
            result: Ok(vec![preview("late", 1, 1)]),
        },
    );
    assert_eq!(state.view().search, SearchState::Empty);
}

#[test]
fn same_query_is_accepted_again_after_clear() {
    init_logging();
    let (state, _) = search(AppState::new(), "engineer");
    let (state, _) = update(state, Msg::SearchCleared);

    let (state, effects) = search(state, "engineer");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().search, SearchState::Loading);
}
