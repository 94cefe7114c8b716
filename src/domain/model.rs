use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input of a single stats lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub api_domain: Option<String>,
}

impl StatsRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            api_domain: None,
        }
    }

    pub fn with_api_domain(mut self, api_domain: impl Into<String>) -> Self {
        self.api_domain = Some(api_domain.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub hours: Option<u64>,
    #[serde(default)]
    pub minutes: Option<u64>,
    #[serde(default)]
    pub total_seconds: Option<f64>,
}

/// Typed view over the stats payload. The payload itself is passed through
/// untouched; this only picks out the fields card renderers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaTimeStats {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub languages: Vec<LanguageStat>,
    #[serde(default)]
    pub human_readable_total: Option<String>,
    #[serde(default)]
    pub human_readable_range: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub total_seconds: Option<f64>,
    #[serde(default)]
    pub is_coding_activity_visible: Option<bool>,
    #[serde(default)]
    pub is_other_usage_visible: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl WakaTimeStats {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// 依使用比例排序，取前 `limit` 個語言
    pub fn top_languages(&self, limit: usize) -> Vec<&LanguageStat> {
        let mut langs: Vec<&LanguageStat> = self.languages.iter().collect();
        langs.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        langs.truncate(limit);
        langs
    }

    /// One-line-per-language summary used by the CLI.
    pub fn summary(&self, limit: usize) -> String {
        let mut lines = Vec::new();

        let who = self.username.as_deref().unwrap_or("unknown user");
        let range = self
            .human_readable_range
            .as_deref()
            .or(self.range.as_deref())
            .unwrap_or("all time");
        lines.push(format!("{} ({})", who, range));

        if let Some(total) = &self.human_readable_total {
            lines.push(format!("Total: {}", total));
        }

        if self.is_coding_activity_visible == Some(false) {
            lines.push("Coding activity is private".to_string());
            return lines.join("\n");
        }

        for lang in self.top_languages(limit) {
            let text = lang.text.as_deref().unwrap_or("");
            lines.push(format!("  {:<16} {:>6.2}%  {}", lang.name, lang.percent, text));
        }

        lines.join("\n")
    }
}
