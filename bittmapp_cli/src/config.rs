use anyhow::Context;
use bittmapp_lib::RasterConfig;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_THRESHOLD: u8 = 128;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub raster: RasterConfig,
    pub threshold: Option<u8>,
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bittmapp").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Read `path` if given, else the per-user config file. A missing per-user file is an empty config.
pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("loaded config from {}: {config:?}", path.display());
    Ok(config)
}
