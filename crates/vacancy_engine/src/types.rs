use thiserror::Error;
use vacancy_core::{FetchTicket, Industry, VacancyDetail, VacancyPreview};

/// Transport-level catalog failure. The shell classifies these into the
/// core's `FetchFailure` taxonomy before they reach the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog unreachable: {0}")]
    Unreachable(String),
    #[error("catalog answered with http status {0}")]
    Status(u16),
    #[error("catalog payload could not be decoded: {0}")]
    Decode(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Completed catalog work, delivered back to the session's consumer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A result page resolved. The ticket is the one the fetch was issued
    /// with, so the state machine can discard superseded replies.
    PageFetched {
        ticket: FetchTicket,
        result: Result<Vec<VacancyPreview>, CatalogError>,
    },
    /// A vacancy detail resolved for one detail view.
    DetailFetched {
        id: String,
        result: Result<VacancyDetail, CatalogError>,
    },
    /// The industry dictionary resolved for the filter picker.
    IndustriesFetched {
        result: Result<Vec<Industry>, CatalogError>,
    },
}
