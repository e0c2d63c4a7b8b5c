use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::core::{
    domain::WorkspaceRoot,
    error::{Error, Result},
    ports::FileSystem,
};

/// Establishes the directory that receives generated artifacts.
pub struct WorkspaceInitializer {
    file_system: Arc<dyn FileSystem>,
    target: PathBuf,
}

impl WorkspaceInitializer {
    /// `target` may be relative; it is resolved against the current
    /// directory when the root is initialized.
    pub fn new(file_system: Arc<dyn FileSystem>, target: impl Into<PathBuf>) -> Self {
        Self {
            file_system,
            target: target.into(),
        }
    }

    /// Creates the root if absent, reuses it if present, and checks that it
    /// is writable. Safe to call more than once.
    pub fn init_workspace(&self) -> Result<WorkspaceRoot> {
        let root = absolutize(&self.target)?;

        if self.file_system.exists(&root) && !self.file_system.is_dir(&root) {
            return Err(Error::Initialization(format!(
                "{} exists and is not a directory",
                root.display()
            )));
        }

        self.file_system
            .create_dir_all(&root)
            .map_err(|e| Error::Initialization(e.to_string()))?;
        self.probe_writable(&root)?;

        tracing::debug!(root = %root.display(), "Workspace root ready");
        Ok(WorkspaceRoot::from_verified(root))
    }

    fn probe_writable(&self, root: &Path) -> Result<()> {
        let probe = root.join(format!(".autocoder-probe-{}", Uuid::new_v4()));
        self.file_system.write(&probe, "").map_err(|e| {
            Error::Initialization(format!("{} is not writable: {e}", root.display()))
        })?;
        self.file_system
            .remove_file(&probe)
            .map_err(|e| Error::Initialization(e.to_string()))
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| {
        Error::Initialization(format!("Cannot resolve current directory: {e}"))
    })?;
    Ok(cwd.join(path))
}
