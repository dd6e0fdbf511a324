use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ORIGIN: &str = "http://192.168.4.1";
pub const DEFAULT_KEY_RELEASE_MS: u64 = 750;

/// Configuration read from `<config dir>/scout/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Address the rover serves its control page on.
    pub origin: String,
    /// Terminals without key-release reporting: a key counts as released
    /// after this long without a repeat.
    pub key_release_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            key_release_ms: DEFAULT_KEY_RELEASE_MS,
            log_file: None,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scout").join("config.toml"))
}

/// Load the default config file, falling back to defaults when it does not exist.
pub fn load_config() -> anyhow::Result<ClientConfig> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(ClientConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> anyhow::Result<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: ClientConfig =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "origin = \"http://10.0.0.7\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.origin, "http://10.0.0.7");
        assert_eq!(config.key_release_ms, DEFAULT_KEY_RELEASE_MS);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "origin = \"http://rover.local\"\nkey_release_ms = 300\nlog_file = \"/tmp/scout.log\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.key_release_ms, 300);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/scout.log")));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "key_release_ms = \"soon\"\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
