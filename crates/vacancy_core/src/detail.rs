use crate::{FetchFailure, VacancyDetail};

/// State of one vacancy detail view. Each open view runs its own instance,
/// independent of the search session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Content {
        vacancy: VacancyDetail,
        is_favorite: bool,
    },
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMsg {
    /// The detail fetch resolved, joined with a favorite-membership query.
    DetailLoaded {
        result: Result<VacancyDetail, FetchFailure>,
        is_favorite: bool,
    },
    /// User pressed the favorite button.
    FavoriteToggled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    /// The store needs the full record to add a favorite...
    AddFavorite(VacancyDetail),
    /// ...but only the id to remove one.
    RemoveFavorite(String),
}

/// Update function for a detail view.
///
/// The favorite flag flips the moment the store effect is emitted, without
/// waiting for the store's acknowledgement; store failures are logged by
/// the store and never rolled back here.
pub fn update_detail(mut state: DetailState, msg: DetailMsg) -> (DetailState, Vec<DetailEffect>) {
    let effects = match msg {
        DetailMsg::DetailLoaded {
            result,
            is_favorite,
        } => {
            state = match result {
                Ok(vacancy) => DetailState::Content {
                    vacancy,
                    is_favorite,
                },
                Err(_) => DetailState::Error,
            };
            Vec::new()
        }
        DetailMsg::FavoriteToggled => match &mut state {
            DetailState::Content {
                vacancy,
                is_favorite,
            } => {
                let effect = if *is_favorite {
                    DetailEffect::RemoveFavorite(vacancy.id.clone())
                } else {
                    DetailEffect::AddFavorite(vacancy.clone())
                };
                *is_favorite = !*is_favorite;
                vec![effect]
            }
            _ => Vec::new(),
        },
    };

    (state, effects)
}
