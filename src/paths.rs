//! Per-user locations: the home `.env` and the run log directory.

use std::{env, path::PathBuf};

/// Overrides the home directory, mainly for tests.
const HOME_OVERRIDE_VAR: &str = "AUTOCODER_HOME";
const DATA_DIR_NAME: &str = ".autocoder";

fn user_home() -> Option<PathBuf> {
    [HOME_OVERRIDE_VAR, "HOME", "USERPROFILE"]
        .into_iter()
        .find_map(|key| env::var_os(key).filter(|value| !value.is_empty()))
        .map(PathBuf::from)
}

/// `.env` consulted after the one in the current directory.
pub fn home_env_path() -> Option<PathBuf> {
    user_home().map(|home| home.join(".env"))
}

/// Falls back to `./.autocoder` when no home directory is known.
pub fn data_dir() -> PathBuf {
    user_home().unwrap_or_default().join(DATA_DIR_NAME)
}

/// One JSON log file per run lands here.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_sits_under_the_data_dir() {
        let logs = log_dir();
        assert!(logs.ends_with(".autocoder/logs"));
        assert_eq!(logs.parent(), Some(data_dir().as_path()));
    }
}
