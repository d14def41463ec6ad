//! Configuration management for MedX.
//!
//! Loads configuration from ${MEDX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format;
use crate::prompts::MEDICAL_SYSTEM_PROMPT;
use crate::transcript::DEFAULT_GREETING;

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

pub mod paths {
    //! Path resolution for MedX configuration directories.
    //!
    //! MEDX_HOME resolution order:
    //! 1. MEDX_HOME environment variable (if set)
    //! 2. ~/.config/medx (default)

    use std::path::PathBuf;

    /// Returns the MedX home directory.
    ///
    /// Checks MEDX_HOME env var first, falls back to ~/.config/medx
    pub fn medx_home() -> PathBuf {
        if let Ok(home) = std::env::var("MEDX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("medx"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        medx_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosted model to query (Bytez model id)
    pub model: String,

    /// Optional Bytez API base URL (for test rigs or proxies)
    pub bytez_base_url: Option<String>,

    /// Optional Bytez API key (env BYTEZ_API_KEY is the fallback)
    pub bytez_api_key: Option<String>,

    /// Optional inline system prompt
    pub system_prompt: Option<String>,

    /// Optional path to a file containing the system prompt
    pub system_prompt_file: Option<String>,

    /// Assistant greeting shown on start and after a clear
    pub greeting: String,

    /// Medical terms emphasized in replies, in substitution order
    pub highlight_keywords: Vec<String>,
}

impl Config {
    const DEFAULT_MODEL: &str = "Qwen/Qwen3-4B-Instruct-2507";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the effective system prompt.
    ///
    /// Precedence: prompt file > inline prompt > built-in medical prompt.
    pub fn effective_system_prompt(&self) -> Result<String> {
        if let Some(path_str) = &self.system_prompt_file {
            let content = fs::read_to_string(Path::new(path_str))
                .with_context(|| format!("Failed to read system prompt file: {path_str}"))?;
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        let inline = self.system_prompt.as_deref().unwrap_or("").trim();
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }

        Ok(MEDICAL_SYSTEM_PROMPT.trim().to_string())
    }

    /// Returns the effective Bytez base URL from config, if set.
    /// Empty strings are treated as unset.
    pub fn effective_bytez_base_url(&self) -> Option<&str> {
        self.bytez_base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            bytez_base_url: None,
            bytez_api_key: None,
            system_prompt: None,
            system_prompt_file: None,
            greeting: DEFAULT_GREETING.to_string(),
            highlight_keywords: format::DEFAULT_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model, "Qwen/Qwen3-4B-Instruct-2507");
        assert_eq!(config.highlight_keywords.len(), format::DEFAULT_KEYWORDS.len());
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "model = \"org/other-model\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model, "org/other-model");
        assert!(config.highlight_keywords.contains(&"Malaria".to_string()));
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("Qwen/Qwen3-4B-Instruct-2507"));
        assert!(contents.contains("# bytez_api_key ="));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Prompt resolution: file wins over inline.
    #[test]
    fn test_system_prompt_file_wins_over_inline() {
        let dir = tempdir().unwrap();
        let prompt_file = dir.path().join("prompt.txt");
        fs::write(&prompt_file, "file prompt").unwrap();

        let config = Config {
            system_prompt_file: Some(prompt_file.to_str().unwrap().to_string()),
            system_prompt: Some("inline prompt".to_string()),
            ..Default::default()
        };

        assert_eq!(config.effective_system_prompt().unwrap(), "file prompt");
    }

    /// Prompt resolution: built-in medical prompt is the final fallback.
    #[test]
    fn test_system_prompt_defaults_to_builtin() {
        let config = Config::default();
        let prompt = config.effective_system_prompt().unwrap();
        assert!(prompt.contains("medical"));
    }

    /// Base URL: empty strings are treated as unset.
    #[test]
    fn test_empty_base_url_is_unset() {
        let config = Config {
            bytez_base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_bytez_base_url(), None);
    }
}
