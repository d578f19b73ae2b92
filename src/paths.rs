//! Path utilities for determining data storage locations.
//!
//! All weekgrid data lives under `~/.weekgrid/`: the status database and
//! the optional config file.

use std::path::PathBuf;

/// The base directory name for weekgrid data.
const DATA_DIR_NAME: &str = ".weekgrid";

/// The database filename.
pub const DATABASE_FILENAME: &str = "tasks.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory for weekgrid.
///
/// Returns `~/.weekgrid/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the default database path, `~/.weekgrid/tasks.sqlite3`.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the default config path, `~/.weekgrid/config.yaml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
