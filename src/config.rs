//! planagent configuration types and loading

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schedule::WorkingHours;

/// Main planagent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reasoning-service configuration
    pub llm: LlmConfig,

    /// Planning-session behavior
    pub session: SessionConfig,

    /// Working-hours window for slot generation
    pub schedule: ScheduleConfig,

    /// Place-search configuration
    pub places: PlacesConfig,

    /// Budget-estimation constants
    pub budget: BudgetConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.schedule.work_start >= self.schedule.work_end || self.schedule.work_end > 23 {
            return Err(eyre::eyre!(
                "Invalid working hours: work-start {} must be before work-end {} (max 23)",
                self.schedule.work_start,
                self.schedule.work_end
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .planagent.yml
        let local_config = PathBuf::from(".planagent.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/planagent/planagent.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("planagent").join("planagent.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Reasoning-service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("groq" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("{} environment variable not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama3-70b-8192".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            base_url: "https://api.groq.com/openai".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
            temperature: 0.3,
        }
    }
}

/// Planning-session behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum reasoning turns before the session gives up
    #[serde(rename = "max-turns")]
    pub max_turns: usize,

    /// Maximum conversation messages kept; 0 keeps everything
    #[serde(rename = "history-window")]
    pub history_window: usize,

    /// Maximum rate-limit retries; 0 retries indefinitely
    #[serde(rename = "rate-limit-max-retries")]
    pub rate_limit_max_retries: u32,

    /// Pause before resubmitting when the service gives no retry hint
    #[serde(rename = "rate-limit-default-secs")]
    pub rate_limit_default_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: 20,
            history_window: 0,
            rate_limit_max_retries: 0,
            rate_limit_default_secs: 2,
        }
    }
}

/// Working-hours window for slot generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First hour of the working window (0-23)
    #[serde(rename = "work-start")]
    pub work_start: u32,

    /// End hour of the working window, exclusive for slot ends
    #[serde(rename = "work-end")]
    pub work_end: u32,
}

impl ScheduleConfig {
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours {
            start: self.work_start,
            end: self.work_end,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_start: 9,
            work_end: 18,
        }
    }
}

/// Place-search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Maximum results per search
    pub limit: u32,

    /// Trailing text appended to every search query (e.g. a city hint)
    #[serde(rename = "query-suffix")]
    pub query_suffix: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://us1.locationiq.com".to_string(),
            api_key_env: "LOCATIONIQ_API_KEY".to_string(),
            limit: 5,
            query_suffix: String::new(),
        }
    }
}

/// Budget-estimation constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Flat per-person rate
    #[serde(rename = "base-rate-per-person")]
    pub base_rate_per_person: f64,

    /// Locations that trigger the premium multiplier
    #[serde(rename = "premium-locations")]
    pub premium_locations: Vec<String>,

    /// Rate multiplier for premium locations
    #[serde(rename = "premium-multiplier")]
    pub premium_multiplier: f64,

    /// Currency code reported with estimates
    pub currency: String,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            base_rate_per_person: 300.0,
            premium_locations: vec!["Bandra".to_string(), "Juhu".to_string(), "Powai".to_string()],
            premium_multiplier: 1.5,
            currency: "INR".to_string(),
        }
    }
}
