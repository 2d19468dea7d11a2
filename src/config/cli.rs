use crate::config::toml_config::{
    TomlConfig, DEFAULT_BASE_URL, DEFAULT_COUNTRIES_RESOURCE, DEFAULT_ITEMS_RESOURCE,
    DEFAULT_PORTS_RESOURCE,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_resource_name, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cascade-picker")]
#[command(about = "Pick a country, a port and an item, and see the discounted total")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_COUNTRIES_RESOURCE)]
    pub countries_resource: String,

    #[arg(long, default_value = DEFAULT_PORTS_RESOURCE)]
    pub ports_resource: String,

    #[arg(long, default_value = DEFAULT_ITEMS_RESOURCE)]
    pub items_resource: String,

    #[arg(long, help = "TOML config file; replaces the endpoint flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 有指定 `--config` 時讀檔，否則用命令列參數
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn countries_resource(&self) -> &str {
        &self.countries_resource
    }

    fn ports_resource(&self) -> &str {
        &self.ports_resource
    }

    fn items_resource(&self) -> &str {
        &self.items_resource
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_resource_name("countries_resource", &self.countries_resource)?;
        validate_resource_name("ports_resource", &self.ports_resource)?;
        validate_resource_name("items_resource", &self.items_resource)?;
        Ok(())
    }
}
