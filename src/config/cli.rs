use super::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_host, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "wakatime-stats")]
#[command(about = "Fetch a user's WakaTime coding stats")]
pub struct CliConfig {
    #[arg(short, long, help = "WakaTime username")]
    pub username: Option<String>,

    #[arg(long, help = "API host override, must be allow-listed")]
    pub api_domain: Option<String>,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "HTTP User-Agent header")]
    pub user_agent: Option<String>,

    #[arg(long = "allowed-domain", value_delimiter = ',', help = "Extra allowed API hosts")]
    pub allowed_api_domains: Vec<String>,

    #[arg(long, help = "Print a human-readable summary instead of JSON")]
    pub summary: bool,

    #[arg(long, default_value = "5", help = "Languages shown in --summary")]
    pub top: usize,

    #[arg(long, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Report elapsed time and memory usage")]
    pub monitor: bool,
}

impl CliConfig {
    /// Fill unset options from the config file. Flags always win; allowed
    /// hosts from both sources are combined.
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        let TomlConfig { wakatime, http } = file;

        self.username = self.username.or(wakatime.username);
        self.api_domain = self.api_domain.or(wakatime.api_domain);
        self.timeout_seconds = self.timeout_seconds.or(http.timeout_seconds);
        self.user_agent = self.user_agent.or(http.user_agent);

        for host in wakatime.allowed_api_domains {
            if !self.allowed_api_domains.contains(&host) {
                self.allowed_api_domains.push(host);
            }
        }
        self
    }

    /// 若有指定 --config 則載入並合併設定檔
    pub fn resolve(self) -> Result<Self> {
        match self.config.clone() {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                let file = TomlConfig::from_file(&path)?;
                file.validate()?;
                Ok(self.merge_file(file))
            }
            None => Ok(self),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn api_domain(&self) -> Option<&str> {
        self.api_domain.as_deref()
    }

    fn allowed_api_domains(&self) -> &[String] {
        &self.allowed_api_domains
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for host in &self.allowed_api_domains {
            validate_host("allowed-domain", host)?;
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout-seconds", timeout, 1)?;
        }

        Ok(())
    }
}
