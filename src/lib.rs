pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use core::fetcher::{fetch_wakatime_stats, StatsFetcher};
pub use domain::model::{LanguageStat, StatsRequest, WakaTimeStats};
pub use domain::ports::{ConfigProvider, StatsSource};
pub use utils::error::{ErrorSeverity, Result, StatsError};
pub use utils::validation::{ApiDomainAllowList, ALLOWED_API_DOMAINS, CANONICAL_HOST};
