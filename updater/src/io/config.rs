//! Updater configuration stored in a TOML file (`updater.toml` by default).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "updater.toml";

/// Updater configuration (TOML).
///
/// Missing fields default to values that reproduce the plain keyed update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Field that identifies a record.
    pub id_field: String,

    /// Pretty-print the output document.
    pub pretty: bool,

    /// Refuse to update when two records share an id.
    pub require_unique_ids: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            pretty: true,
            require_unique_ids: false,
        }
    }
}

impl UpdaterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.id_field.trim().is_empty() {
            return Err(anyhow!("id_field must be a non-empty string"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `UpdaterConfig::default()`.
pub fn load_config(path: &Path) -> Result<UpdaterConfig> {
    if !path.exists() {
        let cfg = UpdaterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UpdaterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    tracing::debug!(path = %path.display(), id_field = %cfg.id_field, "loaded config");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &UpdaterConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::records::write_atomic(path, &buf, "toml.tmp")
}
