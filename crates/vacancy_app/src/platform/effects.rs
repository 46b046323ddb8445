use std::path::PathBuf;

use session_logging::session_info;
use vacancy_core::{DetailEffect, Effect, FetchFailure};
use vacancy_engine::{CatalogError, CatalogEvent, CatalogHandle};

use super::persistence::{self, FavoriteStore};

/// Executes the effects the core asks for: catalog fetches and store
/// writes. Owns the catalog handle and the favorite store for the session.
pub struct EffectRunner {
    catalog: CatalogHandle,
    state_dir: PathBuf,
    favorites: FavoriteStore,
}

impl EffectRunner {
    pub fn new(catalog: CatalogHandle, state_dir: PathBuf) -> Self {
        let favorites = FavoriteStore::load(state_dir.clone());
        Self {
            catalog,
            state_dir,
            favorites,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    ticket,
                    query,
                    filters,
                } => {
                    session_info!(
                        "FetchPage page={} query_len={} filtered={}",
                        ticket.page,
                        query.len(),
                        filters.has_active_filters()
                    );
                    self.catalog.fetch_page(ticket, query, filters);
                }
                Effect::SaveFilters(snapshot) => {
                    persistence::save_filters(&self.state_dir, &snapshot);
                }
            }
        }
    }

    pub fn run_detail(&mut self, effects: Vec<DetailEffect>) {
        for effect in effects {
            match effect {
                DetailEffect::AddFavorite(detail) => self.favorites.add(detail),
                DetailEffect::RemoveFavorite(id) => self.favorites.remove(&id),
            }
        }
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    pub fn request_detail(&self, id: &str) {
        self.catalog.fetch_detail(id);
    }

    pub fn request_industries(&self) {
        self.catalog.fetch_industries();
    }

    pub fn poll_catalog(&self) -> Option<CatalogEvent> {
        self.catalog.try_recv()
    }
}

/// Collapses transport errors into the classification the state machine
/// consumes. A 404 is the catalog's "nothing here" signal, not a failure.
pub(crate) fn map_failure(err: &CatalogError) -> FetchFailure {
    match err {
        CatalogError::Unreachable(_) => FetchFailure::NoConnectivity,
        CatalogError::Status(404) => FetchFailure::NotFound,
        CatalogError::Status(_) | CatalogError::Decode(_) | CatalogError::Transport(_) => {
            FetchFailure::Server
        }
    }
}
