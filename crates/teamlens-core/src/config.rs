use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the Anthropic API key. Never stored in the
/// config file.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model used for every generation call.
    #[serde(default = "default_model")]
    pub model: String,

    /// Token budget for profile generation and pairwise comparisons.
    #[serde(default = "default_profile_max_tokens")]
    pub profile_max_tokens: u32,

    /// Token budget for chat and insights responses.
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,

    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Profile store location.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_profile_max_tokens() -> u32 {
    2048
}

fn default_chat_max_tokens() -> u32 {
    1024
}

fn default_port() -> u16 {
    8787
}

fn default_db_path() -> PathBuf {
    PathBuf::from("teamlens.redb")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            profile_max_tokens: default_profile_max_tokens(),
            chat_max_tokens: default_chat_max_tokens(),
            port: default_port(),
            db_path: default_db_path(),
        }
    }
}

impl Config {
    /// Load `teamlens.yaml` from `path`. A missing file yields defaults;
    /// a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// The API key, when the environment provides one.
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("teamlens.yaml")).unwrap();
        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.port, 8787);
        assert_eq!(config.profile_max_tokens, 2048);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teamlens.yaml");
        std::fs::write(&path, "port: 9000\nmodel: claude-3-5-haiku-latest\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert_eq!(config.chat_max_tokens, 1024);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teamlens.yaml");
        std::fs::write(&path, "port: [not-a-port\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
