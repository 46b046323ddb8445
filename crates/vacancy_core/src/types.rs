/// One vacancy row as the catalog returns it per result page.
///
/// `found` and `pages` are page-level totals the catalog repeats on every
/// item; consumers read them once per page (from the first item) and must
/// not accumulate them across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyPreview {
    pub id: String,
    pub name: String,
    pub employer_name: String,
    pub salary_from: Option<u32>,
    pub salary_to: Option<u32>,
    pub currency: Option<String>,
    pub logo_url: Option<String>,
    pub found: u32,
    pub pages: u32,
}

/// Full vacancy record shown on the detail view. Replaced wholesale on
/// reload, never mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyDetail {
    pub id: String,
    pub name: String,
    pub employer_name: String,
    pub salary_from: Option<u32>,
    pub salary_to: Option<u32>,
    pub currency: Option<String>,
    pub logo_url: Option<String>,
    pub description: String,
    pub area: Option<String>,
    pub experience: Option<String>,
    pub employment: Option<String>,
    pub key_skills: Vec<String>,
}

/// Identity tag carried by every page fetch.
///
/// `epoch` increments whenever a new search supersedes the current one (or
/// the session is cleared); a result arriving with a non-current epoch is
/// stale and must be discarded without touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub page: u32,
}

/// Classified fetch outcome consumed by the state machine. Produced by the
/// transport collaborator; the core never inspects raw transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The catalog could not be reached at all; user-recoverable by retry.
    NoConnectivity,
    /// The catalog answered with an error or an undecodable payload.
    Server,
    /// The catalog explicitly signalled "nothing here"; a valid zero-result
    /// outcome, not an error.
    NotFound,
}
