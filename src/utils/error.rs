use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Missing params \"{param}\" make sure you pass the parameters in URL")]
    MissingParameter { param: String },

    #[error("Invalid username format.")]
    InvalidUsernameFormat,

    #[error("Invalid API domain '{domain}'.")]
    InvalidApiDomain { domain: String },

    /// 任何非 2xx 回應都歸到這裡，`status` 保留原始狀態碼供呼叫端區分
    #[error("Could not resolve to a User with the login of '{username}'")]
    UserNotFound { username: String, status: u16 },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 使用者輸入或設定錯誤
    Invalid,
    /// 遠端服務拒絕請求
    Remote,
    /// 網路或本機系統錯誤
    System,
}

impl StatsError {
    pub fn missing(param: &str) -> Self {
        StatsError::MissingParameter {
            param: param.to_string(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::MissingParameter { .. } => "MISSING_PARAM",
            StatsError::InvalidUsernameFormat => "WAKATIME_USERNAME_INVALID",
            StatsError::InvalidApiDomain { .. } => "WAKATIME_API_DOMAIN_INVALID",
            StatsError::UserNotFound { .. } => "WAKATIME_USER_NOT_FOUND",
            StatsError::Transport(_) => "HTTP_TRANSPORT",
            StatsError::ConfigError { .. } => "CONFIG_INVALID",
            StatsError::IoError(_) => "IO",
            StatsError::SerializationError(_) => "SERIALIZATION",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StatsError::MissingParameter { .. }
            | StatsError::InvalidUsernameFormat
            | StatsError::InvalidApiDomain { .. }
            | StatsError::ConfigError { .. } => ErrorSeverity::Invalid,
            StatsError::UserNotFound { .. } => ErrorSeverity::Remote,
            StatsError::Transport(_)
            | StatsError::IoError(_)
            | StatsError::SerializationError(_) => ErrorSeverity::System,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StatsError::MissingParameter { param } => {
                format!("Pass --{} or set it in the config file", param.replace('_', "-"))
            }
            StatsError::InvalidUsernameFormat => {
                "Usernames may only contain letters, digits, '-' and '_'".to_string()
            }
            StatsError::InvalidApiDomain { .. } => {
                "Use wakatime.com or add the host to allowed_api_domains".to_string()
            }
            StatsError::UserNotFound { status, .. } => match status {
                401 | 403 => "Make sure the user's stats are public".to_string(),
                429 => "Rate limited by the API, try again later".to_string(),
                s if *s >= 500 => "The API is having trouble, try again later".to_string(),
                _ => "Check the username spelling".to_string(),
            },
            StatsError::Transport(e) if e.is_timeout() => {
                "Request timed out, raise timeout_seconds or check your network".to_string()
            }
            StatsError::Transport(_) => "Check your network connection".to_string(),
            StatsError::ConfigError { .. } => "Fix the configuration and retry".to_string(),
            StatsError::IoError(_) => "Check file paths and permissions".to_string(),
            StatsError::SerializationError(_) => {
                "The API returned data that could not be serialized".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
