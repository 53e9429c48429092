use crate::domain::model::{QualificationReport, RefereeDirectory, RegistryPage, VolunteerRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One page of the referee registry. Page numbers start at 1; a page with no
/// records at all means there are no further pages.
pub trait RefereeSource: Send + Sync {
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl std::future::Future<Output = Result<RegistryPage>> + Send;
}

/// Order of rows in the qualification table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum VolunteerOrder {
    #[default]
    ClubThenName,
    Name,
}

pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn roster_has_header(&self) -> bool;
    fn registry_url(&self) -> &str;
    /// Saved registry page read instead of the network, when set.
    fn registry_file(&self) -> Option<&str>;
    fn user_agent(&self) -> &str;
    fn page_delay(&self) -> Duration;
    fn output_path(&self) -> &str;
    fn qualified_file(&self) -> &str;
    fn report_file(&self) -> &str;
    fn volunteer_order(&self) -> VolunteerOrder;
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedData {
    pub directory: RefereeDirectory,
    pub volunteers: Vec<VolunteerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub qualified: String,
    pub report: String,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedData>;
    async fn transform(&self, data: ExtractedData) -> Result<QualificationReport>;
    async fn load(&self, report: QualificationReport) -> Result<OutputPaths>;
}
