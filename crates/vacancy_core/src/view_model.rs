use crate::{FilterSnapshot, VacancyPreview};

/// Discrete UI-facing state of the search session. Exactly one is current
/// at any time; `items` is the full accumulated sequence across fetched
/// pages, in page order then in-page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Empty,
    Loading,
    Content {
        items: Vec<VacancyPreview>,
        found: u32,
    },
    LoadingMore {
        items: Vec<VacancyPreview>,
    },
    ContentWithLoadingError {
        items: Vec<VacancyPreview>,
    },
    NotFound,
    Error,
    NoInternet,
}

/// Everything the presentation layer consumes, broadcast on every
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search: SearchState,
    pub filters: FilterSnapshot,
    pub has_active_filters: bool,
}

/// Human-readable salary line for a vacancy row.
pub fn format_salary(from: Option<u32>, to: Option<u32>, currency: Option<&str>) -> String {
    let currency = currency.unwrap_or("");
    let tail = if currency.is_empty() {
        String::new()
    } else {
        format!(" {currency}")
    };
    match (from, to) {
        (Some(from), Some(to)) => format!("from {from} to {to}{tail}"),
        (Some(from), None) => format!("from {from}{tail}"),
        (None, Some(to)) => format!("up to {to}{tail}"),
        (None, None) => "Salary not specified".to_string(),
    }
}
