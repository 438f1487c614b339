use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    /// `None` disables description generation.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub production: bool,
    pub seed_fixtures: bool,
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            production: false,
            seed_fixtures: true,
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let llm_defaults = LlmConfig::default();

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or(defaults.allowed_origins);

        Self {
            host: parse_or(&lookup, "HOST", defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            allowed_origins,
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
            seed_fixtures: parse_or(&lookup, "SEED_FIXTURES", defaults.seed_fixtures),
            llm: LlmConfig {
                api_url: lookup("LLM_API_URL").unwrap_or(llm_defaults.api_url),
                api_key: lookup("LLM_API_KEY").filter(|k| !k.trim().is_empty()),
                model: lookup("LLM_MODEL").unwrap_or(llm_defaults.model),
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "LLM_TIMEOUT_SECS",
                    DEFAULT_LLM_TIMEOUT_SECS,
                )),
            },
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Config: Invalid value '{}' for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.socket_addr(), SocketAddr::from(([0, 0, 0, 0], 3001)));
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert!(!config.production);
        assert!(config.seed_fixtures);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", " https://evently.app , ,"),
            ("RUST_ENV", "Production"),
            ("SEED_FIXTURES", "false"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_MODEL", "local-model"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]);

        assert_eq!(config.socket_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.allowed_origins, vec!["https://evently.app"]);
        assert!(config.production);
        assert!(!config.seed_fixtures);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("LLM_API_KEY", "  ")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.llm.api_key.is_none());
    }
}
