use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use session_logging::{session_error, session_info, session_warn};
use vacancy_core::{FilterSnapshot, Industry, VacancyDetail};
use vacancy_engine::AtomicStateFile;

const FILTERS_FILENAME: &str = ".vacancy_filters.ron";
const FAVORITES_FILENAME: &str = ".vacancy_favorites.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedFilters {
    industry_id: Option<String>,
    industry_name: Option<String>,
    expected_salary: String,
    only_with_salary: bool,
}

/// Loads the saved filter snapshot. A missing or unreadable file yields the
/// empty snapshot; the session starts unfiltered rather than failing.
pub fn load_filters(state_dir: &Path) -> FilterSnapshot {
    let path = state_dir.join(FILTERS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return FilterSnapshot::default();
        }
        Err(err) => {
            session_warn!("Failed to read saved filters from {:?}: {}", path, err);
            return FilterSnapshot::default();
        }
    };

    let persisted: PersistedFilters = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(err) => {
            session_warn!("Failed to parse saved filters from {:?}: {}", path, err);
            return FilterSnapshot::default();
        }
    };

    let industry = match (persisted.industry_id, persisted.industry_name) {
        (Some(id), Some(name)) => Some(Industry { id, name }),
        _ => None,
    };

    FilterSnapshot {
        industry,
        expected_salary: persisted.expected_salary,
        only_with_salary: persisted.only_with_salary,
    }
}

/// Persists the filter snapshot, best-effort. Failures are logged and the
/// in-memory state stays authoritative.
pub fn save_filters(state_dir: &Path, snapshot: &FilterSnapshot) {
    let persisted = PersistedFilters {
        industry_id: snapshot.industry.as_ref().map(|industry| industry.id.clone()),
        industry_name: snapshot
            .industry
            .as_ref()
            .map(|industry| industry.name.clone()),
        expected_salary: snapshot.expected_salary.clone(),
        only_with_salary: snapshot.only_with_salary,
    };
    write_state(state_dir, FILTERS_FILENAME, &persisted);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedVacancy {
    id: String,
    name: String,
    employer_name: String,
    salary_from: Option<u32>,
    salary_to: Option<u32>,
    currency: Option<String>,
    logo_url: Option<String>,
    description: String,
    area: Option<String>,
    experience: Option<String>,
    employment: Option<String>,
    key_skills: Vec<String>,
}

impl PersistedVacancy {
    fn from_detail(detail: &VacancyDetail) -> Self {
        Self {
            id: detail.id.clone(),
            name: detail.name.clone(),
            employer_name: detail.employer_name.clone(),
            salary_from: detail.salary_from,
            salary_to: detail.salary_to,
            currency: detail.currency.clone(),
            logo_url: detail.logo_url.clone(),
            description: detail.description.clone(),
            area: detail.area.clone(),
            experience: detail.experience.clone(),
            employment: detail.employment.clone(),
            key_skills: detail.key_skills.clone(),
        }
    }

    fn into_detail(self) -> VacancyDetail {
        VacancyDetail {
            id: self.id,
            name: self.name,
            employer_name: self.employer_name,
            salary_from: self.salary_from,
            salary_to: self.salary_to,
            currency: self.currency,
            logo_url: self.logo_url,
            description: self.description,
            area: self.area,
            experience: self.experience,
            employment: self.employment,
            key_skills: self.key_skills,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedFavorites {
    vacancies: Vec<PersistedVacancy>,
}

/// File-backed favorite set. Membership queries are answered from memory;
/// adds and removes write through, best-effort.
pub struct FavoriteStore {
    state_dir: PathBuf,
    entries: Vec<VacancyDetail>,
    ids: HashSet<String>,
}

impl FavoriteStore {
    pub fn load(state_dir: PathBuf) -> Self {
        let path = state_dir.join(FAVORITES_FILENAME);
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match ron::from_str::<PersistedFavorites>(&content) {
                Ok(persisted) => {
                    session_info!("Loaded {} favorites from {:?}", persisted.vacancies.len(), path);
                    persisted
                        .vacancies
                        .into_iter()
                        .map(PersistedVacancy::into_detail)
                        .collect()
                }
                Err(err) => {
                    session_warn!("Failed to parse favorites from {:?}: {}", path, err);
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                session_warn!("Failed to read favorites from {:?}: {}", path, err);
                Vec::new()
            }
        };

        let ids = entries.iter().map(|entry| entry.id.clone()).collect();
        Self {
            state_dir,
            entries,
            ids,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Adding needs the full record; re-adding a present id is a no-op.
    pub fn add(&mut self, detail: VacancyDetail) {
        if self.ids.insert(detail.id.clone()) {
            self.entries.push(detail);
            self.flush();
        }
    }

    /// Removing needs only the id; removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) {
        if self.ids.remove(id) {
            self.entries.retain(|entry| entry.id != id);
            self.flush();
        }
    }

    pub fn all(&self) -> &[VacancyDetail] {
        &self.entries
    }

    fn flush(&self) {
        let persisted = PersistedFavorites {
            vacancies: self.entries.iter().map(PersistedVacancy::from_detail).collect(),
        };
        write_state(&self.state_dir, FAVORITES_FILENAME, &persisted);
    }
}

fn write_state<T: Serialize>(state_dir: &Path, filename: &str, value: &T) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(value, pretty) {
        Ok(text) => text,
        Err(err) => {
            session_error!("Failed to serialize {}: {}", filename, err);
            return;
        }
    };

    let writer = AtomicStateFile::new(state_dir.to_path_buf());
    if let Err(err) = writer.write(filename, &content) {
        session_error!("Failed to write {} to {:?}: {}", filename, state_dir, err);
    }
}
