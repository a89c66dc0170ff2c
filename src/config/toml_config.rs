use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::domain::autocomplete::{DEFAULT_MIN_QUERY_LENGTH, DEFAULT_SUGGESTION_LIMIT};
use crate::domain::filter::DEFAULT_SPECIALTY_OPTIONS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use crate::view::DEFAULT_PLACEHOLDER_PHOTO;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File configuration. Every section is optional; missing values fall back to
/// the compiled-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub filters: FiltersConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Checkbox list for the filters panel.
    pub specialties: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub placeholder_photo: String,
    pub suggestion_limit: usize,
    pub min_query_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_photo: DEFAULT_PLACEHOLDER_PHOTO.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            tracing::debug!("Endpoint overridden to: {}", endpoint);
            self.source.endpoint = endpoint;
        }
        self
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn specialty_options(&self) -> Vec<String> {
        match &self.filters.specialties {
            Some(specialties) => specialties.clone(),
            None => DEFAULT_SPECIALTY_OPTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn placeholder_photo(&self) -> &str {
        &self.display.placeholder_photo
    }

    fn suggestion_limit(&self) -> usize {
        self.display.suggestion_limit
    }

    fn min_query_length(&self) -> usize {
        self.display.min_query_length
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout as usize, 1)?;
        }

        if let Some(specialties) = &self.filters.specialties {
            for specialty in specialties {
                validate_non_empty_string("filters.specialties", specialty)?;
            }
        }

        validate_url("display.placeholder_photo", &self.display.placeholder_photo)?;
        validate_positive_number("display.suggestion_limit", self.display.suggestion_limit, 1)?;
        validate_positive_number("display.min_query_length", self.display.min_query_length, 1)?;
        Ok(())
    }
}
