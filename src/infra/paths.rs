// src/infra/paths.rs — Config path resolution
//
// FAITHJUDGE_HOME overrides everything. Otherwise config lives in ~/.faithjudge/.

use std::path::PathBuf;

/// Returns the FAITHJUDGE_HOME override, if set.
fn faithjudge_home() -> Option<PathBuf> {
    std::env::var_os("FAITHJUDGE_HOME").map(PathBuf::from)
}

/// Home directory, if one can be determined for the current user.
pub fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Configuration directory: $FAITHJUDGE_HOME/ or ~/.faithjudge/
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = faithjudge_home() {
        return Some(home);
    }
    dirs_home().map(|home| home.join(".faithjudge"))
}

/// Default config file location.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
