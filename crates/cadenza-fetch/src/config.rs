use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://dit009-spotify-assignment.vercel.app/api/v1";
pub const DEFAULT_LYRICS_BASE_URL: &str = "https://api.lyrics.ovh/v1";
pub const DEFAULT_WIKI_STATS_BASE_URL: &str =
    "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article/en.wikipedia/all-access/all-agents";
pub const DEFAULT_WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Spotify's "Top 50 - Global" playlist.
pub const DEFAULT_CHART_PLAYLIST_ID: &str = "37i9dQZEVXbNG2KDcFcKOF";

/// Pause between the top-track and audio-feature requests of Add-Artist.
pub const DEFAULT_COOLDOWN_SECS: u64 = 30;

/// Configuration for cadenza.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CADENZA_* prefix)
/// 3. Config file (~/.config/cadenza/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the registry and cached payloads.
    ///
    /// Can be set via:
    /// - CLI: --cache-dir /path/to/dir
    /// - ENV: CADENZA_CACHE_DIR
    /// - Config: cache_dir = "/path/to/dir"
    /// - Default: ~/.local/share/cadenza/resources
    pub cache_dir: PathBuf,

    /// Base URL of the catalog (Spotify proxy) API.
    pub catalog_base_url: String,

    /// Base URL of the lyrics API.
    pub lyrics_base_url: String,

    /// Per-article pageview endpoint, up to and including the agent segment.
    pub wiki_stats_base_url: String,

    /// MediaWiki action API endpoint used for article text.
    pub wiki_api_url: String,

    /// Catalog playlist used as "this week's charts".
    pub chart_playlist_id: String,

    /// Seconds to wait before requesting audio features in Add-Artist.
    pub cooldown_secs: u64,

    pub logging: LoggingConfig,
}

/// Logger settings, applied by the binary at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "error", "warn", "info", "debug", "trace".
    pub level: String,
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            coloured: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            lyrics_base_url: DEFAULT_LYRICS_BASE_URL.to_string(),
            wiki_stats_base_url: DEFAULT_WIKI_STATS_BASE_URL.to_string(),
            wiki_api_url: DEFAULT_WIKI_API_URL.to_string(),
            chart_playlist_id: DEFAULT_CHART_PLAYLIST_ID.to_string(),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cadenza/config.toml
    /// Reads environment variables with CADENZA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cadenza");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom cache directory.
    ///
    /// This is used when the --cache-dir CLI flag is provided.
    pub fn load_with_cache_dir(cache_dir: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.cache_dir = cache_dir;
        Ok(config)
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Get the default cache directory.
///
/// Returns: ~/.local/share/cadenza/resources (or platform equivalent)
fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadenza")
        .join("resources")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cadenza/config.toml
/// - macOS: ~/Library/Application Support/cadenza/config.toml
/// - Windows: %APPDATA%\cadenza\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadenza")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cadenza Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CADENZA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Where the artist registry, cached catalog payloads and rendered charts live.
# Delete charts.json and features_charts.json to pick up a new week's charts.
#
# Can also be set via:
# - CLI: cadenza --cache-dir /custom/dir
# - Environment: CADENZA_CACHE_DIR=/custom/dir
#
# Default: Platform-specific data directory
#cache_dir = "/path/to/cadenza/resources"

# Catalog API (Spotify proxy)
#catalog_base_url = "https://dit009-spotify-assignment.vercel.app/api/v1"
#chart_playlist_id = "37i9dQZEVXbNG2KDcFcKOF"

# The catalog rate-limits bursts; adding an artist pauses this many seconds
# before requesting audio features.
#cooldown_secs = 30

# Lyrics and Wikipedia endpoints
#lyrics_base_url = "https://api.lyrics.ovh/v1"
#wiki_stats_base_url = "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article/en.wikipedia/all-access/all-agents"
#wiki_api_url = "https://en.wikipedia.org/w/api.php"

[logging]
# error | warn | info | debug | trace
level = "warn"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.cache_dir.as_os_str().is_empty());
        assert_eq!(config.cooldown(), Duration::from_secs(30));
        assert_eq!(config.chart_playlist_id, DEFAULT_CHART_PLAYLIST_ID);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_cache_dir() {
        let custom_path = PathBuf::from("/tmp/cadenza-test");
        let config = Config::load_with_cache_dir(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().cache_dir, custom_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"cooldown_secs": 0, "logging": {"level": "debug"}}"#).unwrap();
        assert_eq!(config.cooldown_secs, 0);
        assert_eq!(config.catalog_base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.coloured);
    }
}
