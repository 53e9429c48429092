pub mod directory;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{QualificationReport, RefereeDirectory};
pub use crate::domain::ports::{
    ConfigProvider, ExtractedData, OutputPaths, Pipeline, RefereeSource, Storage,
};
pub use crate::utils::error::Result;
