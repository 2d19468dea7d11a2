use crate::core::ConfigProvider;
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::{validate_resource_name, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://202.157.176.100:3000";
pub const DEFAULT_COUNTRIES_RESOURCE: &str = "negaras";
pub const DEFAULT_PORTS_RESOURCE: &str = "pelabuhans";
pub const DEFAULT_ITEMS_RESOURCE: &str = "barangs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "default_countries")]
    pub countries: String,
    #[serde(default = "default_ports")]
    pub ports: String,
    #[serde(default = "default_items")]
    pub items: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            ports: default_ports(),
            items: default_items(),
        }
    }
}

fn default_countries() -> String {
    DEFAULT_COUNTRIES_RESOURCE.to_string()
}

fn default_ports() -> String {
    DEFAULT_PORTS_RESOURCE.to_string()
}

fn default_items() -> String {
    DEFAULT_ITEMS_RESOURCE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// "compact" 或 "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PickerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PickerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PICKER_BASE_URL})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PickerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn countries_resource(&self) -> &str {
        &self.resources.countries
    }

    fn ports_resource(&self) -> &str {
        &self.resources.ports
    }

    fn items_resource(&self) -> &str {
        &self.resources.items
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.source.base_url)?;
        validate_resource_name("resources.countries", &self.resources.countries)?;
        validate_resource_name("resources.ports", &self.resources.ports)?;
        validate_resource_name("resources.items", &self.resources.items)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(PickerError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
