use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::AppConfig;

pub const CONFIG_FILE_NAME: &str = "specview.toml";

/// Loads `specview.toml` from the working directory, then the per-user
/// config directory, then falls back to defaults. `SPECVIEW_*` variables
/// override whatever was read.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let mut cfg = match discover() {
        Some(path) => read_file(&path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    Ok(cfg)
}

/// Loads an explicit config file. Env overrides still apply.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut cfg = read_file(path)?;
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    Ok(cfg)
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("specview").join("config.toml");
    user.exists().then_some(user)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let cfg = toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(target: "specview.config", path = %path.display(), "config loaded");
    Ok(cfg)
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for key in AppConfig::KEYS {
        let var = env_var_name(key);
        if let Some(v) = lookup(&var) {
            if !v.trim().is_empty() {
                cfg.set_key(key, &v)?;
            }
        }
    }
    if let Some(v) = lookup("SPECVIEW_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }
    if let Some(v) = lookup("SPECVIEW_LOG_FILE") {
        if !v.trim().is_empty() {
            cfg.logging.file = Some(v.trim().to_string());
        }
    }
    Ok(())
}

/// `phpspecPath` -> `SPECVIEW_PHPSPEC_PATH`
fn env_var_name(key: &str) -> String {
    let mut out = String::from("SPECVIEW_");
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}
