use crate::utils::error::{Result, StatsError};
use regex::Regex;
use std::sync::LazyLock;

/// 預設的 WakaTime API 主機
pub const CANONICAL_HOST: &str = "wakatime.com";

/// 允許覆寫的 API 主機清單，企業版主機可透過設定追加
pub const ALLOWED_API_DOMAINS: &[&str] = &[CANONICAL_HOST];

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("username pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Hosts a request may be pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDomainAllowList {
    canonical: String,
    allowed: Vec<String>,
}

impl Default for ApiDomainAllowList {
    fn default() -> Self {
        Self {
            canonical: CANONICAL_HOST.to_string(),
            allowed: ALLOWED_API_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ApiDomainAllowList {
    /// Default list extended with `extra` hosts. Duplicates are ignored.
    pub fn with_additional<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for host in extra {
            let host = host.as_ref().trim();
            if !host.is_empty() && !list.contains(host) {
                list.allowed.push(host.to_string());
            }
        }
        list
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn contains(&self, host: &str) -> bool {
        self.allowed.iter().any(|d| d == host)
    }

    /// Resolve the host to query. Empty or absent input falls back to the
    /// canonical host; otherwise one trailing slash is stripped and the result
    /// must be allow-listed.
    pub fn resolve(&self, api_domain: Option<&str>) -> Result<String> {
        let domain = match api_domain {
            Some(d) if !d.is_empty() => d,
            _ => return Ok(self.canonical.clone()),
        };

        let sanitized = domain.strip_suffix('/').unwrap_or(domain);
        if !self.contains(sanitized) {
            tracing::warn!("Rejected API domain override: {}", sanitized);
            return Err(StatsError::InvalidApiDomain {
                domain: sanitized.to_string(),
            });
        }
        Ok(sanitized.to_string())
    }
}

/// Username must be present, then match `[A-Za-z0-9_-]+`.
pub fn validate_username(username: Option<&str>) -> Result<&str> {
    let username = match username {
        Some(u) if !u.is_empty() => u,
        _ => return Err(StatsError::missing("username")),
    };

    if !USERNAME_REGEX.is_match(username) {
        tracing::warn!("Rejected username with invalid characters");
        return Err(StatsError::InvalidUsernameFormat);
    }
    Ok(username)
}

/// Host names in config must be bare hosts, not URLs.
pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    if host.trim().is_empty() {
        return Err(StatsError::ConfigError {
            message: format!("{}: host cannot be empty", field_name),
        });
    }

    if host.contains("://") || host.trim_end_matches('/').contains('/') {
        return Err(StatsError::ConfigError {
            message: format!(
                "{}: '{}' must be a bare host name without scheme or path",
                field_name, host
            ),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(StatsError::ConfigError {
            message: format!("{}: value must be at least {}", field_name, min_value),
        });
    }
    Ok(())
}
