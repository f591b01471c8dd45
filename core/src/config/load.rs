use std::path::{Path, PathBuf};

use super::types::AppConfig;

pub const LOCAL_CONFIG_FILE: &str = "enkai.toml";

/// `~/.enkai`
pub fn get_enkai_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".enkai"))
}

/// Load `~/.enkai/config.toml`, else `./enkai.toml`, else defaults, then apply
/// environment overrides.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let home_config = match get_enkai_data_dir() {
        Ok(dir) => Some(dir.join("config.toml")),
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, skipping home config");
            None
        }
    };

    let mut cfg = load_first_existing(home_config.as_deref(), Path::new(LOCAL_CONFIG_FILE))?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

fn load_first_existing(
    home_config: Option<&Path>,
    local_config: &Path,
) -> anyhow::Result<AppConfig> {
    match home_config.filter(|p| p.exists()) {
        Some(path) => load_from_path(path),
        None if local_config.exists() => load_from_path(local_config),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// `ENKAI_CONCURRENCY`, `ENKAI_MODEL`, `ENKAI_AUTO_MODEL` and `GEMINI_API_KEY`
/// win over file values. Blank or unparsable values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("ENKAI_CONCURRENCY") {
        match v.trim().parse::<usize>() {
            Ok(n) => cfg.executor.concurrency = n,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid ENKAI_CONCURRENCY"),
        }
    }
    if let Some(v) = get("ENKAI_MODEL") {
        cfg.generation.model = v.trim().to_string();
    }
    if let Some(v) = get("ENKAI_AUTO_MODEL") {
        match v.trim().parse::<bool>() {
            Ok(b) => cfg.generation.auto_model = b,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid ENKAI_AUTO_MODEL"),
        }
    }
    if cfg.generation.api_key.trim().is_empty() {
        if let Some(v) = get("GEMINI_API_KEY") {
            cfg.generation.api_key = v.trim().to_string();
        }
    }
}
