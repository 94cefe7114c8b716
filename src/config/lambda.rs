use crate::core::ConfigProvider;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_host, validate_positive_number, Validate};
use std::env;

/// Function-level settings read from the Lambda environment. The username
/// and domain come with each invocation payload instead.
#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub allowed_api_domains: Vec<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let timeout_seconds = match env::var("WAKATIME_TIMEOUT_SECONDS") {
            Ok(raw) => Some(raw.trim().parse().map_err(|_| StatsError::ConfigError {
                message: format!("WAKATIME_TIMEOUT_SECONDS must be a number, got '{}'", raw),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            allowed_api_domains: env::var("WAKATIME_ALLOWED_API_DOMAINS")
                .map(|raw| parse_host_list(&raw))
                .unwrap_or_default(),
            timeout_seconds,
            user_agent: env::var("WAKATIME_USER_AGENT").ok(),
        })
    }
}

fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

impl ConfigProvider for LambdaConfig {
    fn username(&self) -> Option<&str> {
        None
    }

    fn api_domain(&self) -> Option<&str> {
        None
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        for host in &self.allowed_api_domains {
            validate_host("WAKATIME_ALLOWED_API_DOMAINS", host)?;
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("WAKATIME_TIMEOUT_SECONDS", timeout, 1)?;
        }

        Ok(())
    }
}
