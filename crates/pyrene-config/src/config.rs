use std::path::PathBuf;

use pyrene_utils::path::{resolve_path, xdg_config_home};
use tracing::debug;

use crate::error::Result;

/// Environment variable overriding the repository store location.
pub const STORE_PATH_ENV: &str = "PYRENE_CONFIG";

/// Location of the repository store when none is given explicitly:
/// `$PYRENE_CONFIG` if set, otherwise `$XDG_CONFIG_HOME/pyrene/repos.toml`.
pub fn default_store_path() -> Result<PathBuf> {
    match std::env::var(STORE_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(resolve_path(&path)?),
        _ => Ok(xdg_config_home().join("pyrene").join("repos.toml")),
    }
}

/// Resolves the store location, preferring `explicit` (e.g. a `--config` flag) over
/// the default.
pub fn store_path(explicit: Option<&str>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => resolve_path(path)?,
        None => default_store_path()?,
    };
    debug!("Using repository store at {}", path.display());
    Ok(path)
}
