use crate::adapters::registry::{DEFAULT_REGISTRY_URL, DEFAULT_USER_AGENT};
use crate::config::{
    validate_provider, FieldNames, DEFAULT_OUTPUT_PATH, DEFAULT_QUALIFIED_FILE,
    DEFAULT_REPORT_FILE, DEFAULT_ROSTER,
};
use crate::core::ConfigProvider;
use crate::domain::ports::VolunteerOrder;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Settings file equivalent of the command line flags. Every section and key
/// is optional.
///
/// ```toml
/// [roster]
/// path = "volunteers.csv"
/// has_header = false
/// order = "club-then-name"
///
/// [registry]
/// url = "https://iqareferees.org/api/v1/referees"
/// page_delay_ms = 1000
///
/// [output]
/// path = "./reports"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    pub registry: RegistryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub path: String,
    pub has_header: bool,
    pub order: VolunteerOrder,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_ROSTER.to_string(),
            has_header: false,
            order: VolunteerOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub file: Option<String>,
    pub user_agent: String,
    pub page_delay_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            file: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub qualified_file: String,
    pub report_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            qualified_file: DEFAULT_QUALIFIED_FILE.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn roster_path(&self) -> &str {
        &self.roster.path
    }

    fn roster_has_header(&self) -> bool {
        self.roster.has_header
    }

    fn registry_url(&self) -> &str {
        &self.registry.url
    }

    fn registry_file(&self) -> Option<&str> {
        self.registry.file.as_deref()
    }

    fn user_agent(&self) -> &str {
        &self.registry.user_agent
    }

    fn page_delay(&self) -> Duration {
        Duration::from_millis(self.registry.page_delay_ms)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn qualified_file(&self) -> &str {
        &self.output.qualified_file
    }

    fn report_file(&self) -> &str {
        &self.output.report_file
    }

    fn volunteer_order(&self) -> VolunteerOrder {
        self.roster.order
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(
            self,
            &FieldNames {
                roster: "roster.path",
                registry_url: "registry.url",
                registry_file: "registry.file",
                user_agent: "registry.user_agent",
                page_delay: "registry.page_delay_ms",
                output_path: "output.path",
                qualified_file: "output.qualified_file",
                report_file: "output.report_file",
            },
        )
    }
}
