pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{directory::load_directory, engine::CheckEngine, pipeline::RefereeCheckPipeline};
pub use domain::model::{
    Qualification, QualificationRecord, QualificationReport, RefereeDirectory, RefereeRecord,
    RegistryPage, ReportRow, VolunteerRecord,
};
pub use domain::services::{evaluate, find_match, name_key};
pub use utils::error::{CheckError, Result};
