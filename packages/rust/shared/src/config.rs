//! Application configuration for DocDraft.
//!
//! User config lives at `~/.docdraft/docdraft.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DocDraftError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docdraft.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docdraft";

// ---------------------------------------------------------------------------
// Config structs (matching docdraft.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Local summarization limits.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Remote agent settings. When fully configured the remote agent
    /// replaces the local heuristics.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// `[summary]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Bullets per document summary.
    #[serde(default = "default_max_bullets")]
    pub max_bullets: usize,

    /// Word budget for the combined summary.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_bullets: default_max_bullets(),
            max_words: default_max_words(),
        }
    }
}

fn default_max_bullets() -> usize {
    5
}
fn default_max_words() -> usize {
    800
}

/// `[agent]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Project the agent belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Agent identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            project_name: None,
            agent_id: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_key_env() -> String {
    "DOCDRAFT_AGENT_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    600
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AgentConfig {
    /// Endpoint, agent id and API key are all present.
    pub fn is_configured(&self) -> bool {
        non_blank(&self.endpoint).is_some()
            && non_blank(&self.agent_id).is_some()
            && self.api_key().is_some()
    }

    /// The API key read from [`AgentConfig::api_key_env`], if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        match std::env::var(&self.api_key_env) {
            Ok(val) if !val.trim().is_empty() => Some(val),
            _ => None,
        }
    }

    /// Parse and validate the configured endpoint.
    pub fn endpoint_url(&self) -> Result<Url> {
        let raw = non_blank(&self.endpoint)
            .ok_or_else(|| DocDraftError::config("agent endpoint is not set"))?;

        let url = Url::parse(raw)
            .map_err(|e| DocDraftError::validation(format!("invalid agent endpoint '{raw}': {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DocDraftError::validation(format!(
                "agent endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docdraft/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocDraftError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docdraft/docdraft.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocDraftError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocDraftError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocDraftError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocDraftError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocDraftError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
