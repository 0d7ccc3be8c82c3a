use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::progress::ProgressStyle;

/// Transfer parameters for enclosure and feed downloads (optional `[fetch]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole transfer.
    pub timeout_secs: u64,
    /// Optional `User-Agent` header; libcurl sends none by default.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How the CLI reports per-episode progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// `Downloading 2 of 5: "title"` lines on stdout.
    #[default]
    Counted,
    /// `Downloading "title"` lines on stdout (no counter).
    Plain,
    /// Structured tracing events only.
    Log,
    /// No progress output.
    None,
}

impl ProgressMode {
    /// Message variant used when building progress lines.
    pub fn style(self) -> ProgressStyle {
        match self {
            ProgressMode::Plain => ProgressStyle::Plain,
            ProgressMode::Counted | ProgressMode::Log | ProgressMode::None => {
                ProgressStyle::Counted
            }
        }
    }
}

/// Global configuration loaded from `~/.config/pdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdlConfig {
    /// Pause between two episode downloads, in seconds (0 = no pause).
    pub delay_secs: u64,
    /// Output directory, relative to the working directory ("" = working directory).
    pub output_dir: String,
    /// Name files after the episode title instead of the enclosure URL.
    pub rename: bool,
    /// Progress output mode.
    #[serde(default)]
    pub progress: ProgressMode,
    /// Optional transfer settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for PdlConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1,
            output_dir: "download".to_string(),
            rename: true,
            progress: ProgressMode::Counted,
            fetch: None,
        }
    }
}

impl PdlConfig {
    /// Transfer settings, falling back to defaults when the section is absent.
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PdlConfig> {
    if !path.exists() {
        let default_cfg = PdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PdlConfig::default();
        assert_eq!(cfg.delay_secs, 1);
        assert_eq!(cfg.output_dir, "download");
        assert!(cfg.rename);
        assert_eq!(cfg.progress, ProgressMode::Counted);
        assert!(cfg.fetch.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            delay_secs = 0
            output_dir = ""
            rename = false
            progress = "plain"
        "#;
        let cfg: PdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.delay_secs, 0);
        assert_eq!(cfg.output_dir, "");
        assert!(!cfg.rename);
        assert_eq!(cfg.progress, ProgressMode::Plain);
        assert_eq!(cfg.progress.style(), ProgressStyle::Plain);
    }

    #[test]
    fn config_toml_fetch_section() {
        let toml = r#"
            delay_secs = 2
            output_dir = "casts"
            rename = true

            [fetch]
            connect_timeout_secs = 5
            timeout_secs = 60
            user_agent = "pdl/0.1"
        "#;
        let cfg: PdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.progress, ProgressMode::Counted);
        let fetch = cfg.fetch_config();
        assert_eq!(fetch.connect_timeout(), Duration::from_secs(5));
        assert_eq!(fetch.timeout(), Duration::from_secs(60));
        assert_eq!(fetch.user_agent.as_deref(), Some("pdl/0.1"));
    }

    #[test]
    fn missing_fetch_section_uses_defaults() {
        let cfg = PdlConfig::default();
        assert_eq!(cfg.fetch_config(), FetchConfig::default());
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, PdlConfig::default());
        assert!(path.exists());

        fs::write(&path, "delay_secs = 7\noutput_dir = \"x\"\nrename = false\n").unwrap();
        let reloaded = load_or_init_at(&path).unwrap();
        assert_eq!(reloaded.delay_secs, 7);
        assert!(!reloaded.rename);
    }
}
