use crate::domain::model::{Qualification, QualificationSet, RefereeRecord, RegistryPage};
use crate::domain::ports::RefereeSource;
use crate::domain::services::normalize::fix;
use crate::utils::error::{CheckError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_REGISTRY_URL: &str = "https://iqareferees.org/api/v1/referees";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RefereeResource {
    #[serde(default)]
    attributes: Option<RefereeAttributes>,
    #[serde(default)]
    relationships: Option<RefereeRelationships>,
}

#[derive(Debug, Default, Deserialize)]
struct RefereeAttributes {
    #[serde(default)]
    first_name: serde_json::Value,
    #[serde(default)]
    last_name: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct RefereeRelationships {
    #[serde(default)]
    certifications: Option<CertificationList>,
}

#[derive(Debug, Default, Deserialize)]
struct CertificationList {
    #[serde(default)]
    data: Vec<CertificationRef>,
}

#[derive(Debug, Deserialize)]
struct CertificationRef {
    #[serde(rename = "type")]
    kind: String,
    id: serde_json::Value,
}

impl CertificationRef {
    /// Ids arrive as strings (`"3"`) or numbers depending on the serializer.
    fn numeric_id(&self) -> Option<u64> {
        match &self.id {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Name parts may come through as numbers or be missing altogether.
fn name_part(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => fix(s),
        other => fix(&other.to_string()),
    }
}

fn to_referee(value: serde_json::Value) -> Option<RefereeRecord> {
    let kind = value.get("type").and_then(serde_json::Value::as_str);
    if kind != Some("referee") {
        tracing::error!(
            "Skipping registry record: not a referee type: {}",
            kind.unwrap_or("<missing>")
        );
        return None;
    }

    let resource: RefereeResource = match serde_json::from_value(value) {
        Ok(resource) => resource,
        Err(e) => {
            tracing::error!("Skipping malformed referee record: {}", e);
            return None;
        }
    };

    let attributes = resource.attributes.unwrap_or_default();
    let first_name = name_part(&attributes.first_name);
    let last_name = name_part(&attributes.last_name);
    let name = format!("{} {}", first_name, last_name).trim().to_string();
    if name.is_empty() {
        tracing::warn!("Skipping registry record without a name");
        return None;
    }

    let certifications = resource
        .relationships
        .and_then(|r| r.certifications)
        .unwrap_or_default()
        .data;

    let qualifications: QualificationSet = certifications
        .iter()
        .filter(|cert| {
            if cert.kind != "certification" {
                tracing::error!(
                    "Skipping entry for {}: not a certification type: {}",
                    name,
                    cert.kind
                );
                return false;
            }
            true
        })
        .filter_map(CertificationRef::numeric_id)
        .filter_map(Qualification::from_certification_id)
        .collect();

    let referee = RefereeRecord::new(name, qualifications);
    tracing::debug!("Got referee: {}", referee);
    Some(referee)
}

/// Decodes one JSON:API page of the registry. Malformed records are logged
/// and dropped; the rest of the page is kept. `raw_len` counts every record
/// on the page, kept or not.
pub fn parse_page(body: &str) -> Result<RegistryPage> {
    let page: RawPage = serde_json::from_str(body)?;
    let raw_len = page.data.len();
    let referees = page.data.into_iter().filter_map(to_referee).collect();
    Ok(RegistryPage { referees, raw_len })
}

/// Live registry, one GET per page with `?page=N`.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    base_url: Url,
    client: Client,
}

impl HttpRegistry {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            client,
        })
    }

    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }
}

impl RefereeSource for HttpRegistry {
    async fn fetch_page(&self, page: u32) -> Result<RegistryPage> {
        let url = self.page_url(page);
        tracing::debug!("Requesting registry page: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Registry response status: {}", status);

        if !status.is_success() {
            return Err(CheckError::FetchError {
                page,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

/// A registry page saved to disk, served as page 1 only.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RefereeSource for FileRegistry {
    async fn fetch_page(&self, page: u32) -> Result<RegistryPage> {
        if page > 1 {
            return Ok(RegistryPage::default());
        }
        tracing::debug!("Reading registry snapshot: {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_page(&body)
    }
}

/// Registry picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum Registry {
    Http(HttpRegistry),
    File(FileRegistry),
}

impl RefereeSource for Registry {
    async fn fetch_page(&self, page: u32) -> Result<RegistryPage> {
        match self {
            Registry::Http(registry) => registry.fetch_page(page).await,
            Registry::File(registry) => registry.fetch_page(page).await,
        }
    }
}
