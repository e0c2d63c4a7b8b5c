//! `.env` loading for provider credentials.

use std::{fs, path::Path, sync::OnceLock};

use crate::paths::home_env_path;

static ENV_FILES_ONCE: OnceLock<()> = OnceLock::new();

/// Loads `./.env` and then the home `.env` once per process. Variables that
/// are already set always win.
pub fn ensure_env_files_loaded() {
    ENV_FILES_ONCE.get_or_init(|| {
        load_env_file(Path::new(".env"));
        if let Some(path) = home_env_path() {
            load_env_file(&path);
        }
    });
}

fn load_env_file(path: &Path) {
    if let Ok(contents) = fs::read_to_string(path) {
        let applied = apply_env_contents(&contents);
        tracing::debug!(path = %path.display(), applied, "Loaded env file");
    }
}

/// Applies assignments from `contents`, returning how many were set.
pub fn apply_env_contents(contents: &str) -> usize {
    let mut applied = 0;
    for line in contents.lines() {
        if let Some((key, value)) = parse_env_assignment(line)
            && std::env::var_os(&key).is_none()
        {
            // Called from main before tracing or the runtime spawn threads.
            unsafe {
                std::env::set_var(&key, &value);
            }
            applied += 1;
        }
    }
    applied
}

fn parse_env_assignment(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed).trim();

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), normalize_env_value(value.trim())))
}

fn normalize_env_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        return trimmed[1..trimmed.len() - 1].to_string();
    }
    trimmed.to_string()
}
