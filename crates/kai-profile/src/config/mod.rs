use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ROADMAP_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_MAX_OPEN_CHATS: usize = 200;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the profile service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub advisor: AdvisorConfig,
    pub leads: LeadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            advisor: AdvisorConfig::from_env()?,
            leads: LeadConfig {
                webhook_url: non_blank_var("LEAD_WEBHOOK_URL"),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Generative-AI endpoint used for roadmaps and chat.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Without a key every roadmap falls back to the static plan.
    pub api_key: Option<String>,
    pub base_url: String,
    pub roadmap_model: String,
    pub chat_model: String,
    pub timeout: Option<Duration>,
    /// Open chats kept before the least recently used one is evicted.
    pub max_open_chats: usize,
}

impl AdvisorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout = match non_blank_var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let max_open_chats = match non_blank_var("ADVISOR_MAX_CHATS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidChatLimit { value: raw.clone() })?,
            None => DEFAULT_MAX_OPEN_CHATS,
        };

        Ok(Self {
            api_key: non_blank_var("GEMINI_API_KEY"),
            base_url: non_blank_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            roadmap_model: non_blank_var("GEMINI_ROADMAP_MODEL")
                .unwrap_or_else(|| DEFAULT_ROADMAP_MODEL.to_string()),
            chat_model: non_blank_var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            timeout,
            max_open_chats,
        })
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            roadmap_model: DEFAULT_ROADMAP_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: None,
            max_open_chats: DEFAULT_MAX_OPEN_CHATS,
        }
    }
}

/// Marketing lead delivery.
#[derive(Debug, Clone, Default)]
pub struct LeadConfig {
    pub webhook_url: Option<String>,
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { value: String },
    InvalidChatLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { value } => {
                write!(f, "GEMINI_TIMEOUT_SECS must be whole seconds, got '{value}'")
            }
            ConfigError::InvalidChatLimit { value } => {
                write!(f, "ADVISOR_MAX_CHATS must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidChatLimit { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
