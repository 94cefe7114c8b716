pub mod fetcher;

pub use crate::domain::model::{StatsRequest, WakaTimeStats};
pub use crate::domain::ports::{ConfigProvider, StatsSource};
pub use crate::utils::error::Result;
