use std::sync::Once;

use vacancy_core::{
    filter_industries, update, AppState, Effect, FilterSnapshot, Industry, Msg, VacancyPreview,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(session_logging::initialize_for_tests);
}

fn industry(id: &str, name: &str) -> Industry {
    Industry {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn empty_snapshot_has_no_active_filters() {
    init_logging();
    let view = AppState::new().view();

    assert!(!view.has_active_filters);
    assert_eq!(view.filters, FilterSnapshot::default());
}

#[test]
fn each_filter_alone_activates_the_set() {
    init_logging();

    let (state, _) = update(
        AppState::new(),
        Msg::IndustryPicked(Some(industry("7", "IT"))),
    );
    assert!(state.view().has_active_filters);

    let (state, _) = update(
        AppState::new(),
        Msg::SalaryChanged(Some("100000".to_string())),
    );
    assert!(state.view().has_active_filters);

    let (state, _) = update(AppState::new(), Msg::OnlyWithSalaryToggled(true));
    assert!(state.view().has_active_filters);
}

#[test]
fn blank_salary_text_counts_as_unset() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SalaryChanged(Some("   ".to_string())));
    let view = state.view();

    // Stored verbatim, but inactive for the derived flag.
    assert_eq!(view.filters.expected_salary, "   ");
    assert!(!view.has_active_filters);
}

#[test]
fn every_mutation_emits_a_save() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::IndustryPicked(Some(industry("7", "IT"))),
    );
    assert_eq!(effects, vec![Effect::SaveFilters(state.view().filters)]);

    let (state, effects) = update(state, Msg::OnlyWithSalaryToggled(true));
    assert_eq!(effects, vec![Effect::SaveFilters(state.view().filters)]);
}

#[test]
fn clearing_twice_yields_the_same_snapshot_as_once() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::IndustryPicked(Some(industry("7", "IT"))),
    );
    let (state, _) = update(state, Msg::SalaryChanged(Some("90000".to_string())));

    let (state, effects) = update(state, Msg::FiltersCleared);
    let once = state.view().filters;
    assert_eq!(effects, vec![Effect::SaveFilters(once.clone())]);
    assert_eq!(once, FilterSnapshot::default());

    let (state, _) = update(state, Msg::FiltersCleared);
    assert_eq!(state.view().filters, once);
}

#[test]
fn restoring_saved_filters_seeds_state_without_a_save() {
    init_logging();
    let saved = FilterSnapshot {
        industry: Some(industry("7", "IT")),
        expected_salary: "120000".to_string(),
        only_with_salary: true,
    };

    let (state, effects) = update(AppState::new(), Msg::FiltersRestored(saved.clone()));

    assert!(effects.is_empty());
    assert_eq!(state.view().filters, saved);
    assert!(state.view().has_active_filters);
}

#[test]
fn changed_filters_make_the_same_query_accepted_again() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SearchRequested {
            query: "engineer".to_string(),
        },
    );
    assert_eq!(effects.len(), 1);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            ticket: match &effects[0] {
                Effect::FetchPage { ticket, .. } => *ticket,
                other => panic!("unexpected effect {other:?}"),
            },
            result: Ok(vec![VacancyPreview {
                id: "1".to_string(),
                name: "Engineer".to_string(),
                employer_name: "Acme".to_string(),
                salary_from: None,
                salary_to: None,
                currency: None,
                logo_url: None,
                found: 1,
                pages: 1,
            }]),
        },
    );

    let (state, effects) = update(state, Msg::OnlyWithSalaryToggled(true));
    assert_eq!(effects.len(), 1);

    let (_, effects) = update(
        state,
        Msg::SearchRequested {
            query: "engineer".to_string(),
        },
    );
    assert_eq!(effects.len(), 1, "filter change must re-trigger the search");
}

#[test]
fn industry_picker_filter_is_case_insensitive_substring() {
    init_logging();
    let industries = vec![
        industry("1", "Information Technology"),
        industry("2", "Construction"),
        industry("3", "Food Production"),
    ];

    let hits = filter_industries(&industries, "tio");
    assert_eq!(hits.len(), 3);

    let hits = filter_industries(&industries, "FOOD");
    assert_eq!(hits, vec![industry("3", "Food Production")]);

    let hits = filter_industries(&industries, "   ");
    assert_eq!(hits, industries);
}
