pub mod file;

use crate::adapters::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::utils::error::{PostgenError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use file::FileConfig;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "postgen")]
#[command(about = "Generate social media posts for a product with an LLM")]
pub struct CliConfig {
    #[arg(long, env = "POSTGEN_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL")]
    pub api_base: Option<String>,

    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    #[arg(long, help = "Provider request timeout in seconds")]
    pub request_timeout: Option<u64>,

    #[arg(long, short = 'c', help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderConfig,
}

impl ServerConfig {
    /// Merge flags and environment over the optional config file, then defaults.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    pub fn merge(cli: &CliConfig, file: FileConfig) -> Result<Self> {
        let api_key = cli.api_key.clone().or(file.provider.api_key);
        let api_key = validation::validate_required_field("api_key", &api_key)?.clone();

        Ok(Self {
            host: cli
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            provider: ProviderConfig {
                api_key,
                api_base: cli
                    .api_base
                    .clone()
                    .or(file.provider.api_base)
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                model: cli
                    .model
                    .clone()
                    .or(file.provider.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_seconds: cli.request_timeout.or(file.provider.timeout_seconds),
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| PostgenError::InvalidConfigValue {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("Invalid listen address: {}", e),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        self.socket_addr()?;
        self.provider.validate()
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_non_empty_string("model", &self.model)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, u64::MAX)?;
        }
        Ok(())
    }
}
