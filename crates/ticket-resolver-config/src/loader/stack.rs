//! Layer discovery, reading and merging.

use super::{ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE};
use super::{LayeredConfigOptions, schema};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One place a layer may live.
struct Candidate {
    source: ConfigLayerSource,
    path: PathBuf,
    /// Runtime layers were asked for explicitly, so a missing file is an error.
    required: bool,
}

/// Read every present layer in precedence order and fold them together.
pub(super) fn load_stack(
    options: LayeredConfigOptions,
) -> Result<(Value, Vec<ConfigLayer>), ConfigError> {
    let mut merged = Value::Object(Map::new());
    let mut layers = Vec::new();
    let mut seen = HashSet::new();

    for candidate in candidates(options) {
        if !candidate.required && !candidate.path.exists() {
            debug!(
                "config layer absent (source={}, path={})",
                candidate.source.as_str(),
                candidate.path.display()
            );
            continue;
        }
        if !seen.insert(identity(&candidate.path)) {
            debug!(
                "config layer already applied (source={}, path={})",
                candidate.source.as_str(),
                candidate.path.display()
            );
            continue;
        }
        let origin = origin(candidate.source, &candidate.path);
        let value = parse_file(&candidate.path, &origin)?;
        schema::check(&value, &origin)?;
        overlay(&mut merged, value);
        layers.push(ConfigLayer {
            source: candidate.source,
            path: candidate.path,
        });
    }
    Ok((merged, layers))
}

fn candidates(options: LayeredConfigOptions) -> Vec<Candidate> {
    let user = options.user_config_path.map(|path| Candidate {
        source: ConfigLayerSource::User,
        path,
        required: false,
    });
    let cwd = Candidate {
        source: ConfigLayerSource::Cwd,
        path: options.cwd.join(DEFAULT_CONFIG_FILE),
        required: false,
    };
    let runtime = options.runtime_paths.into_iter().map(|path| Candidate {
        source: ConfigLayerSource::Runtime,
        path,
        required: true,
    });
    user.into_iter()
        .chain(std::iter::once(cwd))
        .chain(runtime)
        .collect()
}

/// Read and parse one json5 file.
pub(super) fn parse_file(path: &Path, origin: &str) -> Result<Value, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents, origin)
}

pub(super) fn parse_str(contents: &str, origin: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Objects merge key by key; any other value replaces what was there.
fn overlay(base: &mut Value, top: Value) {
    let Value::Object(top_map) = top else {
        *base = top;
        return;
    };
    let Value::Object(base_map) = base else {
        *base = Value::Object(top_map);
        return;
    };
    for (key, value) in top_map {
        match base_map.get_mut(&key) {
            Some(slot) => overlay(slot, value),
            None => {
                base_map.insert(key, value);
            }
        }
    }
}

/// Same file reached through different spellings is applied once.
fn identity(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Label used in validation errors, e.g. `cwd(/work/ticket-resolver.json5)`.
fn origin(source: ConfigLayerSource, path: &Path) -> String {
    format!("{}({})", source.as_str(), path.display())
}

/// `~/.ticket-resolver/ticket-resolver.json5`, when a home directory exists.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE),
    )
}
