use std::fs;
use std::path::{Path, PathBuf};

use super::core::FlogConfig;
use crate::errors::{FlogError, Result};

/// Name of the configuration file searched for in ancestor directories.
pub const CONFIG_FILE_NAME: &str = ".flog.toml";

/// How many directories (starting with the working directory) are searched.
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<FlogConfig> {
    let config = toml::from_str::<FlogConfig>(contents)
        .map_err(|e| FlogError::config(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named configuration file. Missing files are an error.
pub fn load_config_from(path: &Path) -> Result<FlogConfig> {
    let contents = fs::read_to_string(path).map_err(|e| FlogError::io(e.to_string(), path))?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try one candidate location. A missing file is not an error; an unreadable
/// or invalid one is.
fn try_load_config_from_path(config_path: &Path) -> Result<Option<FlogConfig>> {
    match fs::read_to_string(config_path) {
        Ok(contents) => {
            let config = parse_and_validate_config(&contents)?;
            tracing::debug!("Loaded config from {}", config_path.display());
            Ok(Some(config))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FlogError::io(e.to_string(), config_path)),
    }
}

/// Directory ancestors of `start` (inclusive) up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.flog.toml`.
pub fn load_config_in(start: PathBuf) -> Result<FlogConfig> {
    for dir in directory_ancestors(start, MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            return Ok(config);
        }
    }
    tracing::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    Ok(FlogConfig::default())
}

/// Search from the working directory; fall back to defaults when it is
/// unavailable.
pub fn load_config() -> Result<FlogConfig> {
    match std::env::current_dir() {
        Ok(current) => load_config_in(current),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(FlogConfig::default())
        }
    }
}
