//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

use scout_core::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use scout_core::{GenerationParams, GenerationProfiles};
use thiserror::Error;

/// Where to obtain a key when `GROQ_API_KEY` is missing.
pub const API_KEY_HINT_URL: &str = "https://console.groq.com/keys";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set; get a free key at {}", API_KEY_HINT_URL)]
    MissingApiKey,
}

/// Runtime configuration for scout-server.
///
/// Every field except the API key has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3001"`, or `PORT` if set).
    pub bind_address: String,

    /// Credential for the completion provider. Never logged.
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API.
    pub llm_base_url: String,

    /// Label reported by `/api/test-ai`.
    pub llm_provider: String,

    pub model: String,

    /// Whole-request timeout for model calls. `None` waits indefinitely.
    pub llm_timeout: Option<Duration>,

    pub profiles: GenerationProfiles,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated allowed origins. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve the generated OpenAPI document at `/api/openapi.json`.
    pub enable_openapi: bool,
}

impl Config {
    /// Build [`Config`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let defaults = GenerationProfiles::default();
        let port: u16 = parse_or(&lookup, "PORT", 3001);

        Ok(Self {
            bind_address: env_or(&lookup, "SCOUT_BIND", &format!("0.0.0.0:{port}")),
            api_key,
            llm_base_url: env_or(&lookup, "SCOUT_LLM_BASE_URL", DEFAULT_BASE_URL),
            llm_provider: env_or(&lookup, "SCOUT_LLM_PROVIDER", "groq"),
            model: env_or(&lookup, "SCOUT_MODEL", DEFAULT_MODEL),
            llm_timeout: lookup("SCOUT_LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            profiles: GenerationProfiles {
                chat: GenerationParams::new(
                    parse_or(&lookup, "SCOUT_CHAT_TEMPERATURE", defaults.chat.temperature),
                    defaults.chat.max_tokens,
                ),
                plan: GenerationParams::new(
                    parse_or(&lookup, "SCOUT_PLAN_TEMPERATURE", defaults.plan.temperature),
                    parse_opt(&lookup, "SCOUT_PLAN_MAX_TOKENS").or(defaults.plan.max_tokens),
                ),
                section_update: GenerationParams::new(
                    parse_or(
                        &lookup,
                        "SCOUT_UPDATE_TEMPERATURE",
                        defaults.section_update.temperature,
                    ),
                    parse_opt(&lookup, "SCOUT_UPDATE_MAX_TOKENS")
                        .or(defaults.section_update.max_tokens),
                ),
            },
            log_level: env_or(&lookup, "SCOUT_LOG", "info"),
            log_json: lookup("SCOUT_LOG_JSON").is_some_and(|v| is_truthy(&v)),
            cors_allowed_origins: lookup("SCOUT_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_openapi: lookup("SCOUT_ENABLE_OPENAPI")
                .map(|v| !v.eq_ignore_ascii_case("false") && v != "0")
                .unwrap_or(true),
        })
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    parse_opt(lookup, key).unwrap_or(default)
}

fn parse_opt<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
