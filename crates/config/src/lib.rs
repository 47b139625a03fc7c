//! 统一配置中心
//!
//! 提供联邦同步服务的配置，包括：
//! - Matrix homeserver 连接
//! - 联邦功能开关
//! - 事件接入（通道容量、重试）
//! - 日志过滤
//!
//! 加载顺序：默认值 -> 可选配置文件（`FEDERATION_CONFIG_FILE`）-> 环境变量（`FEDERATION_*`，
//! 嵌套字段用 `__` 分隔，例如 `FEDERATION_MATRIX__ACCESS_TOKEN`）。

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "FEDERATION_CONFIG_FILE";
/// 环境变量前缀
pub const ENV_PREFIX: &str = "FEDERATION_";

/// 全局应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Matrix homeserver 配置
    pub matrix: MatrixConfig,
    /// 联邦功能开关
    #[serde(default)]
    pub federation: FederationFeatures,
    /// 事件接入配置
    #[serde(default)]
    pub intake: IntakeConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Matrix homeserver 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub homeserver_url: String,
    pub access_token: String,
    pub home_server_domain: String,
    pub request_timeout_seconds: u64,
    pub typing_timeout_ms: u64,
}

/// 联邦功能开关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationFeatures {
    pub typing_indicator_enabled: bool,
}

/// 事件接入配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub channel_capacity: usize,
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` 指令，`RUST_LOG` 优先
    pub filter: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            homeserver_url: "http://127.0.0.1:8008".into(),
            access_token: String::new(),
            home_server_domain: "localhost".into(),
            request_timeout_seconds: 10,
            typing_timeout_ms: 30_000,
        }
    }
}

impl Default for FederationFeatures {
    fn default() -> Self {
        Self {
            typing_indicator_enabled: true,
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            max_attempts: 3,
            retry_base_delay_ms: 200,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

impl Default for FederationConfig {
    /// 默认配置没有 access token，无法通过 [`FederationConfig::validate`]
    fn default() -> Self {
        Self {
            matrix: MatrixConfig::default(),
            federation: FederationFeatures::default(),
            intake: IntakeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FederationConfig {
    /// 按默认值 -> 配置文件 -> 环境变量的顺序加载并校验
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// 组装配置来源，不做提取
    pub fn figment() -> Figment {
        let mut fig = Figment::from(Serialized::defaults(FederationConfig::default()));
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            if path.ends_with(".yml") || path.ends_with(".yaml") {
                fig = fig.merge(Yaml::file(path));
            } else if path.ends_with(".json") {
                fig = fig.merge(Json::file(path));
            } else {
                fig = fig.merge(Toml::file(path));
            }
        }
        fig.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: FederationConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let matrix = &self.matrix;
        if !(matrix.homeserver_url.starts_with("http://")
            || matrix.homeserver_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidMatrixConfig(format!(
                "homeserver_url must be an http(s) URL, got '{}'",
                matrix.homeserver_url
            )));
        }
        if matrix.access_token.trim().is_empty() {
            return Err(ConfigError::InvalidMatrixConfig(
                "access_token cannot be empty".into(),
            ));
        }
        if matrix.home_server_domain.trim().is_empty() {
            return Err(ConfigError::InvalidMatrixConfig(
                "home_server_domain cannot be empty".into(),
            ));
        }
        if matrix.request_timeout_seconds == 0 || matrix.typing_timeout_ms == 0 {
            return Err(ConfigError::InvalidMatrixConfig(
                "timeouts must be greater than 0".into(),
            ));
        }

        if self.intake.channel_capacity == 0 {
            return Err(ConfigError::InvalidIntakeConfig(
                "channel_capacity must be greater than 0".into(),
            ));
        }
        if self.intake.max_attempts == 0 {
            return Err(ConfigError::InvalidIntakeConfig(
                "max_attempts must be at least 1".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidLoggingConfig(
                "filter cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// 用于日志输出的脱敏表示
    pub fn sanitize(&self) -> String {
        let mut redacted = self.clone();
        if !redacted.matrix.access_token.is_empty() {
            redacted.matrix.access_token = "[REDACTED]".into();
        }
        format!("{:?}", redacted)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("Invalid matrix configuration: {0}")]
    InvalidMatrixConfig(String),
    #[error("Invalid intake configuration: {0}")]
    InvalidIntakeConfig(String),
    #[error("Invalid logging configuration: {0}")]
    InvalidLoggingConfig(String),
}
