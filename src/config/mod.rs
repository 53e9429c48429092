pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_ROSTER: &str = "volunteers.csv";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_QUALIFIED_FILE: &str = "qualified_referees.csv";
pub const DEFAULT_REPORT_FILE: &str = "unqualified_referee_report.txt";
pub const MAX_PAGE_DELAY_MS: u64 = 60_000;

/// Checks shared by every configuration source. `fields` holds the names
/// reported in errors, flag style or TOML key style.
pub(crate) fn validate_provider<C: ConfigProvider>(config: &C, fields: &FieldNames) -> Result<()> {
    validation::validate_path(fields.roster, config.roster_path())?;
    validation::validate_file_extension(fields.roster, config.roster_path(), &["csv", "txt"])?;

    match config.registry_file() {
        Some(path) => validation::validate_path(fields.registry_file, path)?,
        None => validation::validate_url(fields.registry_url, config.registry_url())?,
    }
    validation::validate_non_empty_string(fields.user_agent, config.user_agent())?;
    validation::validate_range(
        fields.page_delay,
        config.page_delay().as_millis() as u64,
        0,
        MAX_PAGE_DELAY_MS,
    )?;

    validation::validate_path(fields.output_path, config.output_path())?;
    validation::validate_path(fields.qualified_file, config.qualified_file())?;
    validation::validate_path(fields.report_file, config.report_file())?;
    Ok(())
}

pub(crate) struct FieldNames {
    pub roster: &'static str,
    pub registry_url: &'static str,
    pub registry_file: &'static str,
    pub user_agent: &'static str,
    pub page_delay: &'static str,
    pub output_path: &'static str,
    pub qualified_file: &'static str,
    pub report_file: &'static str,
}

#[cfg(feature = "cli")]
mod args {
    use super::*;
    use crate::adapters::registry::{DEFAULT_REGISTRY_URL, DEFAULT_USER_AGENT};
    use crate::domain::ports::VolunteerOrder;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "referee-check")]
    #[command(about = "Check a volunteer roster against the referee registry")]
    pub struct CliConfig {
        /// Volunteer roster (name, manually checked, club, qualifications...)
        #[arg(long, default_value = DEFAULT_ROSTER)]
        pub roster: String,

        /// Skip the first roster line
        #[arg(long)]
        pub roster_has_header: bool,

        #[arg(long, default_value = DEFAULT_REGISTRY_URL)]
        pub registry_url: String,

        /// Read a saved registry page instead of the live registry
        #[arg(long)]
        pub registry_file: Option<String>,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        pub user_agent: String,

        /// Pause between registry pages, in milliseconds
        #[arg(long, default_value_t = 0)]
        pub page_delay_ms: u64,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, default_value = DEFAULT_QUALIFIED_FILE)]
        pub qualified_file: String,

        #[arg(long, default_value = DEFAULT_REPORT_FILE)]
        pub report_file: String,

        #[arg(long, value_enum, default_value_t = VolunteerOrder::ClubThenName)]
        pub volunteer_order: VolunteerOrder,

        /// TOML settings file; replaces the flags above
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn roster_path(&self) -> &str {
            &self.roster
        }

        fn roster_has_header(&self) -> bool {
            self.roster_has_header
        }

        fn registry_url(&self) -> &str {
            &self.registry_url
        }

        fn registry_file(&self) -> Option<&str> {
            self.registry_file.as_deref()
        }

        fn user_agent(&self) -> &str {
            &self.user_agent
        }

        fn page_delay(&self) -> Duration {
            Duration::from_millis(self.page_delay_ms)
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn qualified_file(&self) -> &str {
            &self.qualified_file
        }

        fn report_file(&self) -> &str {
            &self.report_file
        }

        fn volunteer_order(&self) -> VolunteerOrder {
            self.volunteer_order
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(
                self,
                &FieldNames {
                    roster: "--roster",
                    registry_url: "--registry-url",
                    registry_file: "--registry-file",
                    user_agent: "--user-agent",
                    page_delay: "--page-delay-ms",
                    output_path: "--output-path",
                    qualified_file: "--qualified-file",
                    report_file: "--report-file",
                },
            )
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CliConfig::parse_from(["referee-check"]);

            assert_eq!(config.roster_path(), "volunteers.csv");
            assert!(!config.roster_has_header());
            assert_eq!(config.registry_url(), DEFAULT_REGISTRY_URL);
            assert_eq!(config.registry_file(), None);
            assert_eq!(config.page_delay(), Duration::ZERO);
            assert_eq!(config.qualified_file(), "qualified_referees.csv");
            assert_eq!(config.report_file(), "unqualified_referee_report.txt");
            assert_eq!(config.volunteer_order(), VolunteerOrder::ClubThenName);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags() {
            let config = CliConfig::parse_from([
                "referee-check",
                "--roster",
                "tournament.csv",
                "--roster-has-header",
                "--registry-file",
                "referees_json.txt",
                "--page-delay-ms",
                "1000",
                "--volunteer-order",
                "name",
            ]);

            assert!(config.roster_has_header());
            assert_eq!(config.registry_file(), Some("referees_json.txt"));
            assert_eq!(config.page_delay(), Duration::from_secs(1));
            assert_eq!(config.volunteer_order(), VolunteerOrder::Name);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_invalid_registry_url() {
            let config =
                CliConfig::parse_from(["referee-check", "--registry-url", "iqareferees.org"]);
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(feature = "cli")]
pub use args::CliConfig;
