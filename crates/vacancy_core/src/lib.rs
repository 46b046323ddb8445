//! Vacancy search core: pure state machine and view-model helpers.
mod detail;
mod effect;
mod filter;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use detail::{update_detail, DetailEffect, DetailMsg, DetailState};
pub use effect::Effect;
pub use filter::{filter_industries, FilterSnapshot, Industry};
pub use msg::Msg;
pub use state::AppState;
pub use types::{FetchFailure, FetchTicket, VacancyDetail, VacancyPreview};
pub use update::update;
pub use view_model::{format_salary, AppViewModel, SearchState};
