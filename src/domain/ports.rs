use crate::domain::model::StatsRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can answer a stats request with the unwrapped payload.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self, request: &StatsRequest) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn username(&self) -> Option<&str>;
    fn api_domain(&self) -> Option<&str>;
    fn allowed_api_domains(&self) -> &[String];
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> Option<&str> {
        None
    }

    fn to_request(&self) -> StatsRequest {
        StatsRequest {
            username: self.username().map(str::to_string),
            api_domain: self.api_domain().map(str::to_string),
        }
    }
}
