use crate::adapters::registry::{FileRegistry, HttpRegistry, Registry};
use crate::adapters::{report, roster};
use crate::core::directory::load_directory;
use crate::core::{
    ConfigProvider, ExtractedData, OutputPaths, Pipeline, QualificationReport, RefereeSource,
    Storage,
};
use crate::domain::services::{evaluate, find_match};
use crate::utils::error::Result;
use std::path::Path;

pub struct RefereeCheckPipeline<S: Storage, C: ConfigProvider, R: RefereeSource> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) registry: R,
}

impl<S: Storage, C: ConfigProvider, R: RefereeSource> RefereeCheckPipeline<S, C, R> {
    pub fn new(storage: S, config: C, registry: R) -> Self {
        Self {
            storage,
            config,
            registry,
        }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

impl<S: Storage, C: ConfigProvider> RefereeCheckPipeline<S, C, Registry> {
    /// Reads the saved registry page when one is configured, otherwise the
    /// live registry.
    pub fn from_config(storage: S, config: C) -> Result<Self> {
        let registry = match config.registry_file() {
            Some(path) => Registry::File(FileRegistry::new(path)),
            None => Registry::Http(HttpRegistry::new(
                config.registry_url(),
                config.user_agent(),
            )?),
        };
        Ok(Self::new(storage, config, registry))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: RefereeSource> Pipeline for RefereeCheckPipeline<S, C, R> {
    async fn extract(&self) -> Result<ExtractedData> {
        tracing::debug!("Reading roster: {}", self.config.roster_path());
        let data = self.storage.read_file(self.config.roster_path()).await?;
        let mut volunteers = roster::parse_roster(&data, self.config.roster_has_header())?;
        roster::sort_volunteers(&mut volunteers, self.config.volunteer_order());
        tracing::info!("Loaded {} volunteers claiming qualifications", volunteers.len());

        let directory = load_directory(&self.registry, self.config.page_delay()).await;
        tracing::info!(
            "Loaded {} referees from {} registry pages",
            directory.referees.len(),
            directory.pages_read
        );

        Ok(ExtractedData {
            directory,
            volunteers,
        })
    }

    async fn transform(&self, data: ExtractedData) -> Result<QualificationReport> {
        let ExtractedData {
            directory,
            volunteers,
        } = data;

        let mut report = QualificationReport {
            directory_warning: directory.truncated_by.clone(),
            ..Default::default()
        };
        if let Some(reason) = &report.directory_warning {
            tracing::warn!("Referee directory may be incomplete: {}", reason);
        }

        for volunteer in &volunteers {
            let referee = find_match(&directory.referees, volunteer);
            let evaluation = evaluate(volunteer, referee);

            if let Some(problem) = evaluation.problem {
                for line in problem.lines() {
                    tracing::warn!("{}", line);
                }
                report.problems.push(problem);
            }
            report.rows.push(evaluation.row);
        }

        Ok(report)
    }

    async fn load(&self, report: QualificationReport) -> Result<OutputPaths> {
        let paths = OutputPaths {
            qualified: self.output_file(self.config.qualified_file()),
            report: self.output_file(self.config.report_file()),
        };

        let table = report::render_qualified_table(&report.rows)?;
        tracing::debug!("Writing {} table rows to {}", report.rows.len(), paths.qualified);
        self.storage.write_file(&paths.qualified, &table).await?;

        let log = report::render_problem_log(&report);
        tracing::debug!("Writing {} problems to {}", report.problems.len(), paths.report);
        self.storage.write_file(&paths.report, log.as_bytes()).await?;

        Ok(paths)
    }
}
