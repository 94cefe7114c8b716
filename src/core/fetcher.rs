use crate::core::{ConfigProvider, StatsRequest, StatsSource};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_username, ApiDomainAllowList};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("wakatime-stats/", env!("CARGO_PKG_VERSION"));

/// Fetches a user's stats from the WakaTime API.
///
/// Stateless apart from the HTTP client and the host allow-list, so one
/// instance can serve concurrent lookups.
#[derive(Debug, Clone)]
pub struct StatsFetcher {
    client: Client,
    allow_list: ApiDomainAllowList,
    endpoint_override: Option<Url>,
}

impl Default for StatsFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl StatsFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            allow_list: ApiDomainAllowList::default(),
            endpoint_override: None,
        }
    }

    /// Builds the HTTP client from config (timeout, user agent) and extends
    /// the allow-list with configured hosts.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent().unwrap_or(DEFAULT_USER_AGENT));

        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build()?;
        let allow_list = ApiDomainAllowList::with_additional(config.allowed_api_domains());

        Ok(Self::new(client).with_allow_list(allow_list))
    }

    pub fn with_allow_list(mut self, allow_list: ApiDomainAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    /// Send requests to `base` instead of `https://{host}`. Path and query are
    /// unchanged. Used to point the fetcher at a local mock server.
    #[doc(hidden)]
    pub fn with_endpoint_override(mut self, base: Url) -> Self {
        self.endpoint_override = Some(base);
        self
    }

    pub fn allow_list(&self) -> &ApiDomainAllowList {
        &self.allow_list
    }

    /// `https://{host}/api/v1/users/{username}/stats?is_including_today=true`
    pub fn request_url(&self, host: &str, username: &str) -> Result<Url> {
        let origin = match &self.endpoint_override {
            Some(base) => base.as_str().trim_end_matches('/').to_string(),
            None => format!("https://{}", host),
        };

        let invalid_host = || StatsError::InvalidApiDomain {
            domain: host.to_string(),
        };

        let mut url = Url::parse(&origin).map_err(|_| invalid_host())?;
        url.path_segments_mut()
            .map_err(|_| invalid_host())?
            .clear()
            .extend(["api", "v1", "users", username, "stats"]);
        url.query_pairs_mut().append_pair("is_including_today", "true");

        Ok(url)
    }

    pub async fn fetch_stats(&self, request: &StatsRequest) -> Result<Value> {
        let username = validate_username(request.username.as_deref())?;
        let host = self.allow_list.resolve(request.api_domain.as_deref())?;
        let url = self.request_url(&host, username)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(StatsError::UserNotFound {
                username: username.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(unwrap_envelope(&body))
    }
}

/// 回應格式為 { "data": { ... } }，只剝一層。空內容或非 JSON 視為沒有資料
fn unwrap_envelope(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(mut envelope) => envelope
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null),
        Err(e) => {
            tracing::warn!("Success response body is not JSON: {}", e);
            Value::Null
        }
    }
}

#[async_trait::async_trait]
impl StatsSource for StatsFetcher {
    async fn fetch_stats(&self, request: &StatsRequest) -> Result<Value> {
        StatsFetcher::fetch_stats(self, request).await
    }
}

/// One-off lookup with a default client.
pub async fn fetch_wakatime_stats(request: &StatsRequest) -> Result<Value> {
    StatsFetcher::default().fetch_stats(request).await
}
