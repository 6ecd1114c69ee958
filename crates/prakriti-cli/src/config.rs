//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level prakriti configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrakritiConfig {
    /// Catalog file to use instead of the built-in questionnaire.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Profile file used for greetings and the BMI readout.
    #[serde(default)]
    pub profile: Option<PathBuf>,
    /// Directory where results are saved automatically.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never re-scanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `prakriti.toml` in the current directory
/// 2. `~/.config/prakriti/config.toml`
///
/// `PRAKRITI_CATALOG` overrides the catalog path from any file.
pub fn load_config_from(path: Option<&Path>) -> Result<PrakritiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("prakriti.toml");
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

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PrakritiConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PrakritiConfig::default(),
    };

    if let Ok(catalog) = std::env::var("PRAKRITI_CATALOG") {
        if !catalog.is_empty() {
            config.catalog = Some(PathBuf::from(catalog));
        }
    }

    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.profile = config.profile.as_deref().map(resolve_path);
    config.output_dir = config.output_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("prakriti"))
}
