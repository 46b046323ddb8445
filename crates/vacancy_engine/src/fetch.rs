use std::time::Duration;

use serde::Deserialize;
use vacancy_core::{FilterSnapshot, Industry, VacancyDetail, VacancyPreview};

use crate::CatalogError;

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub page_size: u32,
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            page_size: 20,
            user_agent: "vacancy-search/0.1".to_string(),
        }
    }
}

/// Seam to the remote vacancy catalog. The session engine only ever talks
/// to this trait; tests substitute it freely.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        filters: &FilterSnapshot,
    ) -> Result<Vec<VacancyPreview>, CatalogError>;

    async fn fetch_detail(&self, id: &str) -> Result<VacancyDetail, CatalogError>;

    async fn fetch_industries(&self) -> Result<Vec<Industry>, CatalogError>;
}

/// HTTP implementation against an hh.ru-style vacancy API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.settings.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CatalogError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalog {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        filters: &FilterSnapshot,
    ) -> Result<Vec<VacancyPreview>, CatalogError> {
        let mut params = vec![
            ("text", query.to_string()),
            ("page", page.to_string()),
            ("per_page", self.settings.page_size.to_string()),
        ];
        if let Some(industry) = &filters.industry {
            params.push(("industry", industry.id.clone()));
        }
        if !filters.expected_salary.trim().is_empty() {
            // Round-tripped verbatim; the catalog does its own parsing.
            params.push(("salary", filters.expected_salary.clone()));
        }
        if filters.only_with_salary {
            params.push(("only_with_salary", "true".to_string()));
        }

        let page_dto: PageDto = self.get_json("/vacancies", &params).await?;
        Ok(page_dto.into_previews())
    }

    async fn fetch_detail(&self, id: &str) -> Result<VacancyDetail, CatalogError> {
        let dto: DetailDto = self.get_json(&format!("/vacancies/{id}"), &[]).await?;
        Ok(dto.into_detail())
    }

    async fn fetch_industries(&self) -> Result<Vec<Industry>, CatalogError> {
        let dtos: Vec<IndustryDto> = self.get_json("/industries", &[]).await?;
        let mut industries = Vec::new();
        for dto in dtos {
            flatten_industry(dto, &mut industries);
        }
        Ok(industries)
    }
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() || err.is_connect() {
        return CatalogError::Unreachable(err.to_string());
    }
    CatalogError::Transport(err.to_string())
}

// Wire shapes of the remote JSON. Only the consumed fields are modeled;
// everything else is ignored.

#[derive(Debug, Deserialize)]
struct PageDto {
    items: Vec<PreviewDto>,
    found: u32,
    pages: u32,
}

impl PageDto {
    /// The page-level totals are stamped onto every item so a page result
    /// is self-describing for the pagination coordinator.
    fn into_previews(self) -> Vec<VacancyPreview> {
        let (found, pages) = (self.found, self.pages);
        self.items
            .into_iter()
            .map(|item| item.into_preview(found, pages))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct PreviewDto {
    id: String,
    name: String,
    #[serde(default)]
    employer: Option<EmployerDto>,
    #[serde(default)]
    salary: Option<SalaryDto>,
}

impl PreviewDto {
    fn into_preview(self, found: u32, pages: u32) -> VacancyPreview {
        let salary = self.salary.unwrap_or_default();
        let (employer_name, logo_url) = split_employer(self.employer);
        VacancyPreview {
            id: self.id,
            name: self.name,
            employer_name,
            salary_from: salary.from,
            salary_to: salary.to,
            currency: salary.currency,
            logo_url,
            found,
            pages,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmployerDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    logo_urls: Option<LogoUrlsDto>,
}

#[derive(Debug, Deserialize)]
struct LogoUrlsDto {
    #[serde(rename = "90", default)]
    small: Option<String>,
    #[serde(default)]
    original: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SalaryDto {
    #[serde(default)]
    from: Option<u32>,
    #[serde(default)]
    to: Option<u32>,
    #[serde(default)]
    currency: Option<String>,
}

fn split_employer(employer: Option<EmployerDto>) -> (String, Option<String>) {
    match employer {
        Some(employer) => {
            let logo = employer
                .logo_urls
                .and_then(|logos| logos.small.or(logos.original));
            (employer.name.unwrap_or_default(), logo)
        }
        None => (String::new(), None),
    }
}

#[derive(Debug, Deserialize)]
struct DetailDto {
    id: String,
    name: String,
    #[serde(default)]
    employer: Option<EmployerDto>,
    #[serde(default)]
    salary: Option<SalaryDto>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    area: Option<NamedDto>,
    #[serde(default)]
    experience: Option<NamedDto>,
    #[serde(default)]
    employment: Option<NamedDto>,
    #[serde(default)]
    key_skills: Vec<NamedDto>,
}

impl DetailDto {
    fn into_detail(self) -> VacancyDetail {
        let salary = self.salary.unwrap_or_default();
        let (employer_name, logo_url) = split_employer(self.employer);
        VacancyDetail {
            id: self.id,
            name: self.name,
            employer_name,
            salary_from: salary.from,
            salary_to: salary.to,
            currency: salary.currency,
            logo_url,
            description: self.description,
            area: self.area.map(|named| named.name),
            experience: self.experience.map(|named| named.name),
            employment: self.employment.map(|named| named.name),
            key_skills: self.key_skills.into_iter().map(|named| named.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NamedDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IndustryDto {
    id: String,
    name: String,
    #[serde(default)]
    industries: Vec<IndustryDto>,
}

/// The dictionary nests sub-industries under their parent; the picker wants
/// one flat list, parents before their children.
fn flatten_industry(dto: IndustryDto, out: &mut Vec<Industry>) {
    out.push(Industry {
        id: dto.id,
        name: dto.name,
    });
    for child in dto.industries {
        flatten_industry(child, out);
    }
}
