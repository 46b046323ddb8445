use std::sync::Once;

use vacancy_core::{
    update_detail, DetailEffect, DetailMsg, DetailState, FetchFailure, VacancyDetail,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(session_logging::initialize_for_tests);
}

fn detail(id: &str) -> VacancyDetail {
    VacancyDetail {
        id: id.to_string(),
        name: "Rust Engineer".to_string(),
        employer_name: "Acme".to_string(),
        salary_from: Some(200_000),
        salary_to: Some(300_000),
        currency: Some("RUR".to_string()),
        logo_url: None,
        description: "Build things.".to_string(),
        area: Some("Moscow".to_string()),
        experience: Some("3-6 years".to_string()),
        employment: Some("Full time".to_string()),
        key_skills: vec!["Rust".to_string(), "Tokio".to_string()],
    }
}

fn loaded(id: &str, is_favorite: bool) -> DetailState {
    let (state, effects) = update_detail(
        DetailState::Loading,
        DetailMsg::DetailLoaded {
            result: Ok(detail(id)),
            is_favorite,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn loaded_detail_shows_content_with_membership() {
    init_logging();
    let state = loaded("42", true);

    assert_eq!(
        state,
        DetailState::Content {
            vacancy: detail("42"),
            is_favorite: true,
        }
    );
}

#[test]
fn toggling_unfavorited_vacancy_adds_full_record_and_flips_immediately() {
    init_logging();
    let state = loaded("42", false);

    let (state, effects) = update_detail(state, DetailMsg::FavoriteToggled);

    // The add effect carries the whole record; the flag flips without
    // waiting for the store's acknowledgement.
    assert_eq!(effects, vec![DetailEffect::AddFavorite(detail("42"))]);
    assert_eq!(
        state,
        DetailState::Content {
            vacancy: detail("42"),
            is_favorite: true,
        }
    );
}

#[test]
fn toggling_favorited_vacancy_removes_by_id() {
    init_logging();
    let state = loaded("42", true);

    let (state, effects) = update_detail(state, DetailMsg::FavoriteToggled);

    assert_eq!(effects, vec![DetailEffect::RemoveFavorite("42".to_string())]);
    assert_eq!(
        state,
        DetailState::Content {
            vacancy: detail("42"),
            is_favorite: false,
        }
    );
}

#[test]
fn toggle_and_toggle_back_round_trips() {
    init_logging();
    let state = loaded("7", false);

    let (state, _) = update_detail(state, DetailMsg::FavoriteToggled);
    let (state, effects) = update_detail(state, DetailMsg::FavoriteToggled);

    assert_eq!(effects, vec![DetailEffect::RemoveFavorite("7".to_string())]);
    assert_eq!(
        state,
        DetailState::Content {
            vacancy: detail("7"),
            is_favorite: false,
        }
    );
}

#[test]
fn toggle_outside_content_is_noop() {
    init_logging();
    let (state, effects) = update_detail(DetailState::Loading, DetailMsg::FavoriteToggled);
    assert_eq!(state, DetailState::Loading);
    assert!(effects.is_empty());

    let (state, effects) = update_detail(DetailState::Error, DetailMsg::FavoriteToggled);
    assert_eq!(state, DetailState::Error);
    assert!(effects.is_empty());
}

#[test]
fn failed_detail_load_shows_error() {
    init_logging();
    let (state, effects) = update_detail(
        DetailState::Loading,
        DetailMsg::DetailLoaded {
            result: Err(FetchFailure::Server),
            is_favorite: false,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, DetailState::Error);
}
