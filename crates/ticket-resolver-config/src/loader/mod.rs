//! Layered config loading.
//!
//! Up to three json5 layers are read (user, cwd, runtime), each checked
//! against the schema on its own, then merged and decoded.

mod schema;
mod stack;

#[cfg(test)]
mod tests;

use crate::{ConfigError, ResolverConfig};
use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config dir.
const DEFAULT_CONFIG_FILE: &str = "ticket-resolver.json5";
/// User config dir, relative to home.
const DEFAULT_CONFIG_DIR: &str = ".ticket-resolver";

/// Merged config and the layers that contributed to it.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: ResolverConfig,
    /// Applied layers, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    User,
    Cwd,
    /// Passed explicitly; applied last.
    Runtime,
}

impl ConfigLayerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

/// A layer that was read and applied.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Where to look for layers.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    pub cwd: PathBuf,
    /// Defaults to `~/.ticket-resolver/ticket-resolver.json5`; `None` skips the user layer.
    pub user_config_path: Option<PathBuf>,
    /// Must exist; applied in order after the cwd layer.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: stack::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl ResolverConfig {
    /// Load one file, without layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config file (path={})", path.display());
        let origin = format!("file({})", path.display());
        let value = stack::parse_file(path, &origin)?;
        decode(value, &origin)
    }

    /// Load json5 text, without layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading inline config (len={})", contents.len());
        let value = stack::parse_str(contents, "inline")?;
        decode(value, "inline")
    }

    /// Load the default layer stack for `cwd`.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load user, cwd and runtime layers, later layers winning.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config (cwd={}, runtime_layers={})",
            options.cwd.display(),
            options.runtime_paths.len()
        );
        let (merged, layers) = stack::load_stack(options)?;
        let config: ResolverConfig = serde_json::from_value(merged)?;
        config.validate()?;
        info!("layered config ready (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Range checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.min_password_len == 0 {
            return Err(ConfigError::InvalidField {
                path: "auth.min_password_len".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(path) = &self.storage.path
            && path.trim().is_empty()
        {
            return Err(ConfigError::InvalidField {
                path: "storage.path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn decode(value: Value, origin: &str) -> Result<ResolverConfig, ConfigError> {
    schema::check(&value, origin)?;
    let config: ResolverConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
