use std::path::Path;
use std::sync::mpsc;

use session_logging::{session_debug, session_warn};
use vacancy_core::{
    update, update_detail, AppState, AppViewModel, DetailMsg, DetailState, Industry, Msg,
    VacancyDetail,
};
use vacancy_engine::CatalogEvent;

use super::effects::{map_failure, EffectRunner};
use super::persistence;

type ViewObserver = Box<dyn FnMut(&AppViewModel)>;

/// Single-consumer session host: drains messages and catalog events,
/// applies the pure update functions and executes the resulting effects.
///
/// Every observable transition is broadcast synchronously to the
/// subscribers; only the latest view is ever delivered.
pub struct SessionHost {
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
    observers: Vec<ViewObserver>,
    active_detail: Option<(String, DetailState)>,
    industries: Vec<Industry>,
}

impl SessionHost {
    pub fn new(effects: EffectRunner, state_dir: &Path) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut host = Self {
            state: AppState::new(),
            msg_tx,
            msg_rx,
            effects,
            observers: Vec::new(),
            active_detail: None,
            industries: Vec::new(),
        };
        // Seed filters from disk before anything observes the view.
        host.dispatch(Msg::FiltersRestored(persistence::load_filters(state_dir)));
        host
    }

    /// Sender for debounced closures and other off-thread producers.
    pub fn sender(&self) -> mpsc::Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&AppViewModel) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Drains pending catalog events and queued messages. Call this from
    /// the session's consumer loop.
    pub fn pump(&mut self) {
        while let Some(event) = self.effects.poll_catalog() {
            self.apply_catalog_event(event);
        }
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        let view = state.view();
        self.state = state;
        self.effects.run(effects);
        if changed {
            for observer in &mut self.observers {
                observer(&view);
            }
        }
    }

    /// Opens a detail view for one vacancy, replacing any previous one.
    pub fn open_detail(&mut self, id: &str) {
        self.active_detail = Some((id.to_string(), DetailState::Loading));
        self.effects.request_detail(id);
    }

    pub fn close_detail(&mut self) {
        self.active_detail = None;
    }

    pub fn detail(&self) -> Option<&DetailState> {
        self.active_detail.as_ref().map(|(_, state)| state)
    }

    pub fn toggle_favorite(&mut self) {
        let Some((id, state)) = self.active_detail.take() else {
            return;
        };
        let (state, effects) = update_detail(state, DetailMsg::FavoriteToggled);
        self.effects.run_detail(effects);
        self.active_detail = Some((id, state));
    }

    pub fn favorites(&self) -> &[VacancyDetail] {
        self.effects.favorites().all()
    }

    pub fn request_industries(&self) {
        self.effects.request_industries();
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    fn apply_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::PageFetched { ticket, result } => {
                let result = result.map_err(|err| {
                    session_warn!("Page {} fetch failed: {}", ticket.page, err);
                    map_failure(&err)
                });
                self.dispatch(Msg::PageFetched { ticket, result });
            }
            CatalogEvent::DetailFetched { id, result } => {
                // Results for a closed or replaced view are discarded.
                let Some((active_id, state)) = self.active_detail.take() else {
                    session_debug!("Detail {} arrived after its view closed", id);
                    return;
                };
                if active_id != id {
                    self.active_detail = Some((active_id, state));
                    return;
                }
                let is_favorite = self.effects.favorites().contains(&id);
                let result = result.map_err(|err| {
                    session_warn!("Detail {} fetch failed: {}", id, err);
                    map_failure(&err)
                });
                let (state, effects) = update_detail(
                    state,
                    DetailMsg::DetailLoaded {
                        result,
                        is_favorite,
                    },
                );
                self.effects.run_detail(effects);
                self.active_detail = Some((id, state));
            }
            CatalogEvent::IndustriesFetched { result } => match result {
                Ok(industries) => self.industries = industries,
                Err(err) => session_warn!("Industry dictionary fetch failed: {}", err),
            },
        }
    }
}
