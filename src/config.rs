use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::generator::descriptor::{FrameworkInfo, ReleaseInfo};

/// Root configuration structure, deserialized from `.mof-fixtures/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where tables are read from and fixtures are written to.
    pub paths: PathsConfig,
    /// Framework block written at the top of every descriptor.
    pub framework: FrameworkInfo,
    /// Default release metadata; CLI flags override individual fields.
    pub release: ReleaseInfo,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the license YAML tables and `Components.yml`.
    pub tables_dir: PathBuf,
    /// Directory fixtures are written into.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            tables_dir: PathBuf::from("."),
            output_dir: PathBuf::from("Test_Files"),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.mof-fixtures/config.toml`
/// 3. `~/.config/mof-fixtures/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".mof-fixtures").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("mof-fixtures").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}
