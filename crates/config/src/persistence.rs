//! Configuration file discovery and reading.
//!
//! # File Formats
//!
//! Both JSON5 (`.json5`, with comments and trailing commas) and plain JSON
//! are accepted; the JSON5 parser reads both.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./shipnotes.json5` or `./shipnotes.json`
//! 2. User: `~/.config/shipnotes/config.json5` or `~/.config/shipnotes/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["shipnotes.json5", "shipnotes.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "shipnotes";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Returns `Some(path)` for the first existing candidate, `None` if there is
/// none.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Searches `local_dir`, then `<user_config_dir>/shipnotes`.
fn find_config_file_in(local_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_config_dir.into_iter().flat_map(|dir| {
        USER_CONFIG_FILE_NAMES
            .iter()
            .map(move |name| dir.join(USER_CONFIG_DIR).join(name))
    });

    local.chain(user).find(|path| path.exists())
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
///
/// # Examples
///
/// ```no_run
/// use shipnotes_config::persistence::read_config_file;
/// use shipnotes_config::Config;
///
/// # fn main() -> shipnotes_config::Result<()> {
/// let config: Config = read_config_file("shipnotes.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}
