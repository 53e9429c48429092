use crate::core::{OutputPaths, Pipeline};
use crate::utils::error::Result;

pub struct CheckEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CheckEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<OutputPaths> {
        tracing::info!("Starting referee check...");

        tracing::info!("Loading roster and referee registry...");
        let data = self.pipeline.extract().await?;
        let complete = data.directory.is_complete();

        tracing::info!("Matching {} volunteers...", data.volunteers.len());
        let report = self.pipeline.transform(data).await?;
        tracing::info!(
            "Checked {} volunteers, {} with problems",
            report.rows.len(),
            report.problems.len()
        );

        tracing::info!("Writing reports...");
        let paths = self.pipeline.load(report).await?;
        if !complete {
            tracing::warn!("Referee directory was incomplete; review {}", paths.report);
        }

        Ok(paths)
    }
}
