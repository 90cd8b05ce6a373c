use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::page::Theme;
use crate::types::Category;

pub const DEFAULT_CONTENT: &str = "content.json";
pub const DEFAULT_USER_AGENT: &str = "mediadeck/0.1";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeckConfig {
    /// Location of the catalog document: a path, an absolute URL, or a
    /// location relative to `base_url`.
    pub content: String,
    pub base_url: Option<String>,
    pub theme: Theme,
    pub default_tab: Category,
    pub fetch_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            content: DEFAULT_CONTENT.to_string(),
            base_url: None,
            theme: Theme::Light,
            default_tab: Category::Music,
            fetch_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DeckConfig {
    /// Load from `explicit` if given (must exist), else from the user config
    /// dir if a file is there, else defaults. Env overrides apply last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cfg = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        cfg.with_env_overrides()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(content) = std::env::var("MEDIADECK_CONTENT").ok().filter(|s| !s.trim().is_empty()) {
            self.content = content;
        }
        if let Ok(theme) = std::env::var("MEDIADECK_THEME") {
            self.theme = theme.parse().map_err(|e: String| anyhow!("MEDIADECK_THEME: {e}"))?;
        }
        Ok(self)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

/// `<config dir>/mediadeck/config.toml` for the current user.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mediadeck").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "content = \"data/catalog.json\"\nbase_url = \"https://example.com/\"\ntheme = \"dark\"\ndefault_tab = \"videos\"\nfetch_timeout_secs = 5\n",
        )
        .unwrap();
        let cfg = DeckConfig::from_file(&path).unwrap();
        assert_eq!(cfg.content, "data/catalog.json");
        assert_eq!(cfg.base_url.as_deref(), Some("https://example.com/"));
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.default_tab, Category::Videos);
        assert_eq!(cfg.fetch_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let cfg = DeckConfig::from_file(&path).unwrap();
        assert_eq!(cfg.content, DEFAULT_CONTENT);
        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.default_tab, Category::Music);
        assert_eq!(cfg.fetch_timeout(), None);
    }

    #[test]
    fn bad_values_are_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "theme = \"sepia\"\n").unwrap();
        assert!(DeckConfig::from_file(&path).is_err());
        assert!(DeckConfig::from_file(&tmp.path().join("missing.toml")).is_err());
    }
}
