//! Configuration module
//!
//! Configuration is read once at process start and handed to constructors.
//! Nothing on the request path reads the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::PromptVariant;

const SERVER_PORT: u16 = 8000;
const MAX_FILE_SIZE_MB: usize = 10;
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const OPENAI_MAX_TOKENS: u32 = 4096;
const INFERENCE_TIMEOUT_SECS: u64 = 120;
const INFERENCE_MAX_RETRIES: u32 = 0;
const CORS_ORIGINS: &str = "http://localhost:3000";

/// Settings for the inference provider client
#[derive(Clone)]
pub struct InferenceConfig {
    /// Bearer token. `None` is tolerated at boot; the provider rejects the call.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// `None` disables the client-side timeout
    pub timeout: Option<Duration>,
    /// Extra attempts for transient transport faults
    pub max_retries: u32,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENAI_BASE_URL.to_string(),
            model: OPENAI_MODEL.to_string(),
            max_tokens: OPENAI_MAX_TOKENS,
            timeout: Some(Duration::from_secs(INFERENCE_TIMEOUT_SECS)),
            max_retries: INFERENCE_MAX_RETRIES,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub uploads_dir: PathBuf,
    pub public_dir: PathBuf,
    pub max_file_size_bytes: usize,
    pub prompt_variant: PromptVariant,
    /// `LOG_FORMAT=json` switches console output to JSON lines
    pub log_json: bool,
    pub inference: InferenceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec![CORS_ORIGINS.to_string()],
            uploads_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            prompt_variant: PromptVariant::default(),
            log_json: false,
            inference: InferenceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a `.env` file (if present) and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let is_production = is_production_name(&environment);
        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| CORS_ORIGINS.to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = parse_or(&lookup, "PORT", SERVER_PORT)?;
        let max_file_size_mb: usize = parse_or(&lookup, "MAX_FILE_SIZE_MB", MAX_FILE_SIZE_MB)?;
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_FILE_SIZE_MB is too large, got '{}'", max_file_size_mb)
            })?;

        let prompt_variant = match lookup("PROMPT_VARIANT") {
            Some(value) => value
                .parse::<PromptVariant>()
                .map_err(|e| anyhow::anyhow!(e))?,
            None => PromptVariant::default(),
        };

        let timeout_secs = parse_or(&lookup, "INFERENCE_TIMEOUT_SECS", INFERENCE_TIMEOUT_SECS)?;
        let inference = InferenceConfig {
            api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| OPENAI_MODEL.to_string()),
            max_tokens: parse_or(&lookup, "OPENAI_MAX_TOKENS", OPENAI_MAX_TOKENS)?,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            max_retries: parse_or(&lookup, "INFERENCE_MAX_RETRIES", INFERENCE_MAX_RETRIES)?,
        };

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            uploads_dir: lookup("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            max_file_size_bytes,
            prompt_variant,
            log_json: lookup("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            inference,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}
