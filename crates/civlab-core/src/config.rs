//! civlab configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Discipline;

/// Top-level civlab configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CivlabConfig {
    /// Extra directory of question-bank TOML files, loaded next to the
    /// built-in banks. Supports `${VAR}` references.
    #[serde(default)]
    pub banks_dir: Option<PathBuf>,
    /// Discipline used by `quiz` when nothing else is selected.
    #[serde(default = "default_discipline")]
    pub default_discipline: Discipline,
    /// Show the explanation after each answer.
    #[serde(default = "default_true")]
    pub show_explanations: bool,
    /// Tick period of the flow animation in milliseconds.
    #[serde(default = "default_animation_interval")]
    pub animation_interval_ms: u64,
}

fn default_discipline() -> Discipline {
    Discipline::Structural
}
fn default_true() -> bool {
    true
}
fn default_animation_interval() -> u64 {
    50
}

impl Default for CivlabConfig {
    fn default() -> Self {
        Self {
            banks_dir: None,
            default_discipline: default_discipline(),
            show_explanations: true,
            animation_interval_ms: default_animation_interval(),
        }
    }
}

impl CivlabConfig {
    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `civlab.toml` in the current directory
/// 2. `~/.config/civlab/config.toml`
///
/// Environment variable overrides: `CIVLAB_BANKS_DIR`,
/// `CIVLAB_ANIMATION_INTERVAL_MS`.
pub fn load_config_from(path: Option<&Path>) -> Result<CivlabConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("civlab.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CivlabConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("CIVLAB_BANKS_DIR") {
        config.banks_dir = Some(PathBuf::from(dir));
    }
    if let Ok(ms) = std::env::var("CIVLAB_ANIMATION_INTERVAL_MS") {
        config.animation_interval_ms = ms
            .trim()
            .parse()
            .with_context(|| format!("invalid CIVLAB_ANIMATION_INTERVAL_MS: '{ms}'"))?;
    }

    config.banks_dir = config
        .banks_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));

    anyhow::ensure!(
        config.animation_interval_ms > 0,
        "animation_interval_ms must be at least 1"
    );

    match &config_path {
        Some(path) => tracing::info!("loaded config from {}", path.display()),
        None => tracing::debug!("no config file found, using defaults"),
    }

    Ok(config)
}

/// Parse a config document without touching the environment.
pub fn parse_config(content: &str) -> Result<CivlabConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("civlab"))
}
