mod debounce;
mod effects;
pub mod logging;
mod persistence;
mod session;

pub use debounce::Debouncer;
pub use effects::EffectRunner;
pub use persistence::{load_filters, save_filters, FavoriteStore};
pub use session::SessionHost;
